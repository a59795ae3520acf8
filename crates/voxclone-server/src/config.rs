//! Server configuration: command line first, then `VOXCLONE_*` environment, then defaults.

use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use tracing::warn;
use voxclone_core::audio::EstimatorKind;
use voxclone_core::synthesis::SynthesisConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Parser)]
#[command(
    name = "voxclone-server",
    about = "HTTP API server for voice profile upload and speech generation",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct ServerArgs {
    /// Host to bind to
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Externally visible base URL used when building audio links
    #[arg(long)]
    pub public_url: Option<String>,

    /// Audio analyzer: `heuristic` (size based) or `decode` (full decode)
    #[arg(long)]
    pub audio_analyzer: Option<EstimatorKind>,

    /// Speech synthesis endpoint
    #[arg(long)]
    pub synthesis_endpoint: Option<String>,

    /// Model name sent to the synthesis endpoint
    #[arg(long)]
    pub synthesis_model: Option<String>,

    /// Timeout for a single synthesis call, in seconds
    #[arg(long)]
    pub synthesis_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub public_url: String,
    pub estimator: EstimatorKind,
    pub synthesis: SynthesisConfig,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn resolve_server_config(args: ServerArgs) -> ServerConfig {
    let host = args.host.unwrap_or_else(host_from_env_or_default);
    let port = args.port.unwrap_or_else(port_from_env_or_default);
    let public_url = args
        .public_url
        .or_else(|| env_string("VOXCLONE_PUBLIC_URL"))
        .unwrap_or_else(|| default_public_url(&host, port));

    let estimator = args
        .audio_analyzer
        .unwrap_or_else(|| env_parse("VOXCLONE_AUDIO_ANALYZER", EstimatorKind::default()));

    let defaults = SynthesisConfig::default();
    let timeout_secs = args.synthesis_timeout_secs.unwrap_or_else(|| {
        env_parse(
            "VOXCLONE_SYNTHESIS_TIMEOUT_SECS",
            defaults.timeout.as_secs(),
        )
    });
    let synthesis = SynthesisConfig {
        endpoint: args
            .synthesis_endpoint
            .or_else(|| env_string("VOXCLONE_SYNTHESIS_ENDPOINT"))
            .unwrap_or(defaults.endpoint),
        api_key: env_string("VOXCLONE_SYNTHESIS_API_KEY"),
        customer_id: env_string("VOXCLONE_SYNTHESIS_CUSTOMER_ID"),
        model: args
            .synthesis_model
            .or_else(|| env_string("VOXCLONE_SYNTHESIS_MODEL"))
            .unwrap_or(defaults.model),
        timeout: Duration::from_secs(timeout_secs.max(1)),
    };

    ServerConfig {
        host,
        port,
        public_url,
        estimator,
        synthesis,
    }
}

fn default_public_url(host: &str, port: u16) -> String {
    let visible_host = match host {
        "0.0.0.0" | "::" | "[::]" => "localhost",
        other => other,
    };
    format!("http://{visible_host}:{port}")
}

fn host_from_env_or_default() -> String {
    match std::env::var("VOXCLONE_HOST") {
        Ok(raw) => {
            let host = raw.trim();
            if host.is_empty() {
                warn!("Empty VOXCLONE_HOST, falling back to {DEFAULT_HOST}");
                DEFAULT_HOST.to_string()
            } else {
                host.to_string()
            }
        }
        Err(_) => DEFAULT_HOST.to_string(),
    }
}

fn port_from_env_or_default() -> u16 {
    env_parse("VOXCLONE_PORT", DEFAULT_PORT)
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match env_string(key) {
        Some(raw) => match raw.parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Invalid {key}='{raw}', falling back to {default:?}");
                default
            }
        },
        None => default,
    }
}
