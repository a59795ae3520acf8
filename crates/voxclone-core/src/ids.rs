//! Record id generation: `<prefix>_<unix millis>_<9 base36 chars>`.
//!
//! Ids are collision-unlikely, not collision-free.

use chrono::Utc;
use rand::Rng;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub const PROFILE_PREFIX: &str = "voice";
pub const GENERATION_PREFIX: &str = "gen";

pub fn new_profile_id() -> String {
    new_id(PROFILE_PREFIX)
}

pub fn new_generation_id() -> String {
    new_id(GENERATION_PREFIX)
}

fn new_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{prefix}_{}_{suffix}", Utc::now().timestamp_millis())
}
