use std::path::{Path, PathBuf};

/// Looks up the provider credential, preferring the environment over a
/// local plaintext file.
#[derive(Debug, Clone)]
pub struct SecretResolver {
    env_var: String,
    fallback_file: PathBuf,
}

impl SecretResolver {
    pub fn new(env_var: impl Into<String>, fallback_file: impl Into<PathBuf>) -> Self {
        Self {
            env_var: env_var.into(),
            fallback_file: fallback_file.into(),
        }
    }

    /// Re-read on every call so a rotated key is picked up without a restart.
    pub fn resolve(&self) -> Option<String> {
        let from_env = std::env::var(&self.env_var).unwrap_or_default();
        let from_env = from_env.trim();
        if !from_env.is_empty() {
            return Some(from_env.to_string());
        }

        read_fallback(&self.fallback_file)
    }
}

fn read_fallback(path: &Path) -> Option<String> {
    if !path.exists() {
        return None;
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => {
            let key = contents.trim();
            (!key.is_empty()).then(|| key.to_string())
        }
        Err(e) => {
            tracing::debug!("Ignoring unreadable secrets file {}: {}", path.display(), e);
            None
        }
    }
}
