//! API routes and handlers

pub mod envelope;
pub mod generate;
pub mod history;
pub mod internal;
pub mod profiles;
pub mod request_context;
mod router;


pub use router::create_router;
