pub mod audio;
pub mod submissions;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

pub use audio::AudioStore;
pub use submissions::SubmissionStore;

/// One stored form entry: a generated id, the form's own fields, and the
/// receive time in fractional unix seconds.
#[derive(Debug, Clone, Serialize)]
pub struct Submission<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: T,
    pub ts: f64,
}

impl<T: Serialize> Submission<T> {
    pub fn new(fields: T) -> Self {
        Self {
            id: Uuid::new_v4(),
            fields,
            ts: Utc::now().timestamp_millis() as f64 / 1000.0,
        }
    }
}
