use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("PORT must be a number: {0}")]
    InvalidPort(String),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub static_dir: PathBuf,
    pub pages_dir: PathBuf,
    pub submissions_file: PathBuf,
    pub api_key_var: String,
    pub secrets_file: PathBuf,
    pub default_voice: String,
    pub api_url: String,
}

pub const API_KEY_VAR: &str = "ELEVENLABS_API_KEY";

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env_or("HOST", "0.0.0.0");
        let port = env_or("PORT", "8000");
        let port: u16 = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;

        let addr = format!("{}:{}", host, port);
        let addr: SocketAddr = addr
            .parse()
            .map_err(|_| ConfigError::InvalidAddress(addr))?;

        let static_dir = PathBuf::from(env_or("STATIC_DIR", "static"));
        let submissions_file = std::env::var("SUBMISSIONS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| static_dir.join("submissions.json"));

        Ok(Self {
            addr,
            pages_dir: PathBuf::from(env_or("PAGES_DIR", "pages")),
            static_dir,
            submissions_file,
            api_key_var: API_KEY_VAR.to_string(),
            secrets_file: PathBuf::from(env_or("ELEVENLABS_SECRETS_FILE", "local_secrets.txt")),
            default_voice: env_or("ELEVENLABS_VOICE", "Bella"),
            api_url: env_or("ELEVENLABS_API_URL", "https://api.elevenlabs.io"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
