use std::path::PathBuf;

use uuid::Uuid;

use crate::error::AppError;

/// URL prefix under which the static directory is mounted.
pub const STATIC_URL_PREFIX: &str = "/static";

/// Writes generated audio into the public static directory. Files are never
/// cleaned up.
pub struct AudioStore {
    dir: PathBuf,
}

impl AudioStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store `audio` as `<prefix>_<random hex>.mp3` and return its public URL.
    pub async fn save(&self, prefix: &str, audio: &[u8]) -> Result<String, AppError> {
        let filename = format!("{}_{}.mp3", prefix, Uuid::new_v4().simple());
        tokio::fs::write(self.dir.join(&filename), audio).await?;

        tracing::info!("Wrote {} bytes of audio to {}", audio.len(), filename);
        Ok(format!("{}/{}", STATIC_URL_PREFIX, filename))
    }
}
