pub mod form;
pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct TtsForm {
    pub text: Option<String>,
    pub voice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AppointmentForm {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time_pref: Option<String>,
    pub lang: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub plan: Option<String>,
    pub message: Option<String>,
}

/// Stored fields of an appointment request.
#[derive(Debug, Clone, Serialize)]
pub struct Appointment {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub service: Option<String>,
    pub date: Option<String>,
    pub time_pref: Option<String>,
    pub lang: String,
}

/// Stored fields of a contact request.
#[derive(Debug, Clone, Serialize)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub plan: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TtsResponse {
    pub audio_url: String,
}

#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    pub status: String,
    pub detail: String,
    pub tts: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: String,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

pub const DEFAULT_LANG: &str = "en";

impl Appointment {
    /// Spoken confirmation, Dutch when the language tag starts with "nl".
    pub fn confirmation(&self) -> String {
        let date = self.date.as_deref().unwrap_or_default();
        let time_pref = self.time_pref.as_deref().unwrap_or_default();

        if self.lang.starts_with("nl") {
            format!(
                "Bedankt {}, uw afspraak is geregistreerd voor {} {}. We bevestigen spoedig.",
                self.name, date, time_pref
            )
        } else {
            format!(
                "Thanks {}, your appointment for {} at {} has been recorded. We'll confirm shortly.",
                self.name, date, time_pref
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn appointment(lang: &str) -> Appointment {
        Appointment {
            name: "Sam".into(),
            phone: None,
            email: None,
            service: Some("bookkeeping".into()),
            date: Some("2026-11-02".into()),
            time_pref: Some("10:00".into()),
            lang: lang.into(),
        }
    }

    #[test]
    fn test_english_confirmation() {
        assert_eq!(
            appointment("en").confirmation(),
            "Thanks Sam, your appointment for 2026-11-02 at 10:00 has been recorded. We'll confirm shortly."
        );
    }

    #[test]
    fn test_dutch_confirmation() {
        assert_eq!(
            appointment("nl-NL").confirmation(),
            "Bedankt Sam, uw afspraak is geregistreerd voor 2026-11-02 10:00. We bevestigen spoedig."
        );
    }

    #[test]
    fn test_other_languages_fall_back_to_english() {
        assert!(appointment("de").confirmation().starts_with("Thanks Sam"));
        // Prefix check only, case-sensitive
        assert!(appointment("NL").confirmation().starts_with("Thanks Sam"));
    }

    #[test]
    fn test_appointment_response_keeps_null_tts() {
        let body = serde_json::to_value(AppointmentResponse {
            status: "ok".into(),
            detail: "done".into(),
            tts: None,
        })
        .unwrap();
        assert!(body.get("tts").is_some());
        assert!(body["tts"].is_null());
    }
}
