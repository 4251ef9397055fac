pub mod elevenlabs;
pub mod secret;

use std::time::Duration;

use reqwest::{StatusCode, Url};

pub use elevenlabs::SynthesisRequest;
pub use secret::SecretResolver;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(thiserror::Error, Debug)]
pub enum SynthesisError {
    #[error("No ElevenLabs API key configured")]
    MissingKey,

    #[error("ElevenLabs error {}", .0.as_u16())]
    Upstream(StatusCode),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("TTS failed")]
    EmptyAudio,

    #[error("Invalid ElevenLabs URL: {0}")]
    InvalidUrl(String),
}

/// Thin client over the ElevenLabs text-to-speech endpoint. One request per
/// call, no retries; the whole response body is the audio.
pub struct SpeechClient {
    http: reqwest::Client,
    base_url: Url,
    resolver: SecretResolver,
    default_voice: String,
}

impl SpeechClient {
    pub fn new(
        base_url: &str,
        resolver: SecretResolver,
        default_voice: impl Into<String>,
    ) -> Result<Self, SynthesisError> {
        let base_url =
            Url::parse(base_url).map_err(|e| SynthesisError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url,
            resolver,
            default_voice: default_voice.into(),
        })
    }

    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SynthesisError> {
        let key = self.resolver.resolve().ok_or(SynthesisError::MissingKey)?;

        let url = elevenlabs::synthesis_url(&self.base_url, voice)
            .ok_or_else(|| SynthesisError::InvalidUrl(self.base_url.to_string()))?;

        tracing::debug!("Requesting synthesis of {} chars with voice '{}'", text.len(), voice);

        let response = self
            .http
            .post(url)
            .header("xi-api-key", key)
            .json(&SynthesisRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!("ElevenLabs rejected synthesis request: {}", status);
            return Err(SynthesisError::Upstream(status));
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SynthesisError::EmptyAudio);
        }
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
pub(crate) mod fake {
    //! Minimal stand-in for the provider, bound to an ephemeral local port.

    use axum::{
        extract::Path,
        http::{HeaderMap, StatusCode},
        response::IntoResponse,
        routing::post,
        Json, Router,
    };

    use super::SynthesisRequest;

    pub const FAKE_KEY: &str = "sk-test";

    async fn synthesize(
        Path(voice): Path<String>,
        headers: HeaderMap,
        Json(body): Json<SynthesisRequest>,
    ) -> impl IntoResponse {
        if headers.get("xi-api-key").and_then(|v| v.to_str().ok()) != Some(FAKE_KEY) {
            return (StatusCode::UNAUTHORIZED, Vec::new());
        }
        match voice.as_str() {
            "missing" => return (StatusCode::NOT_FOUND, Vec::new()),
            "silent" => return (StatusCode::OK, Vec::new()),
            _ => {}
        }
        let audio = format!("ID3 {} :: {}", voice, body.text).into_bytes();
        (StatusCode::OK, audio)
    }

    /// Returns the base URL of a running fake provider.
    pub async fn spawn() -> String {
        let app = Router::new().route("/v1/text-to-speech/:voice", post(synthesize));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_key(base_url: &str, env_var: &str, key: Option<&str>) -> SpeechClient {
        match key {
            Some(k) => std::env::set_var(env_var, k),
            None => std::env::remove_var(env_var),
        }
        let resolver = SecretResolver::new(env_var, "/nonexistent/local_secrets.txt");
        SpeechClient::new(base_url, resolver, "Bella").unwrap()
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        // Unroutable base URL: any request attempt would surface as a transport error.
        let client = client_with_key("http://127.0.0.1:1", "VOICE_DESK_TEST_SPEECH_NO_KEY", None);
        let err = client.synthesize("hello", "Bella").await.unwrap_err();
        assert!(matches!(err, SynthesisError::MissingKey));
        assert_eq!(err.to_string(), "No ElevenLabs API key configured");
    }

    #[tokio::test]
    async fn test_success_returns_body() {
        let base = fake::spawn().await;
        let client = client_with_key(&base, "VOICE_DESK_TEST_SPEECH_OK", Some(fake::FAKE_KEY));
        let audio = client.synthesize("hello there", "Bella").await.unwrap();
        assert_eq!(audio, b"ID3 Bella :: hello there".to_vec());
    }

    #[tokio::test]
    async fn test_non_200_reports_status() {
        let base = fake::spawn().await;
        let client = client_with_key(&base, "VOICE_DESK_TEST_SPEECH_404", Some(fake::FAKE_KEY));
        let err = client.synthesize("hello", "missing").await.unwrap_err();
        assert!(matches!(err, SynthesisError::Upstream(StatusCode::NOT_FOUND)));
        assert_eq!(err.to_string(), "ElevenLabs error 404");
    }

    #[tokio::test]
    async fn test_empty_body_is_failure() {
        let base = fake::spawn().await;
        let client = client_with_key(&base, "VOICE_DESK_TEST_SPEECH_EMPTY", Some(fake::FAKE_KEY));
        let err = client.synthesize("hello", "silent").await.unwrap_err();
        assert!(matches!(err, SynthesisError::EmptyAudio));
    }

    #[tokio::test]
    async fn test_wrong_key_is_upstream_error() {
        let base = fake::spawn().await;
        let client = client_with_key(&base, "VOICE_DESK_TEST_SPEECH_BAD_KEY", Some("sk-wrong"));
        let err = client.synthesize("hello", "Bella").await.unwrap_err();
        assert_eq!(err.to_string(), "ElevenLabs error 401");
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let client = client_with_key("http://127.0.0.1:1", "VOICE_DESK_TEST_SPEECH_DOWN", Some("sk"));
        let err = client.synthesize("hello", "Bella").await.unwrap_err();
        assert!(matches!(err, SynthesisError::Transport(_)));
    }

    #[test]
    fn test_invalid_base_url() {
        let resolver = SecretResolver::new("VOICE_DESK_TEST_SPEECH_URL", "/nonexistent");
        let result = SpeechClient::new("not a url", resolver, "Bella");
        assert!(matches!(result, Err(SynthesisError::InvalidUrl(_))));
    }
}
