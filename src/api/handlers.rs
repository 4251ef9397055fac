use axum::{extract::State, Json};
use std::sync::Arc;

use super::form::FormData;
use super::{
    Appointment, AppointmentForm, AppointmentResponse, Contact, ContactForm, ContactResponse,
    HealthResponse, TtsForm, TtsResponse, DEFAULT_LANG,
};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::storage::Submission;

pub async fn tts(
    State(state): State<Arc<AppState>>,
    FormData(form): FormData<TtsForm>,
) -> Result<Json<TtsResponse>, AppError> {
    let text = required(form.text, "text")?;
    let voice = present(form.voice).unwrap_or_else(|| state.speech.default_voice().to_string());

    // Generate audio
    let audio = state.speech.synthesize(&text, &voice).await?;
    let audio_url = state.audio.save("tts", &audio).await?;

    Ok(Json(TtsResponse { audio_url }))
}

pub async fn appointment(
    State(state): State<Arc<AppState>>,
    FormData(form): FormData<AppointmentForm>,
) -> Result<Json<AppointmentResponse>, AppError> {
    let appointment = Appointment {
        name: required(form.name, "name")?,
        phone: present(form.phone),
        email: present(form.email),
        service: present(form.service),
        date: present(form.date),
        time_pref: present(form.time_pref),
        lang: present(form.lang).unwrap_or_else(|| DEFAULT_LANG.to_string()),
    };

    let record = Submission::new(appointment);
    state.submissions.append(&record).await?;
    tracing::info!("Recorded appointment {} ({})", record.id, record.fields.lang);

    let confirmation = record.fields.confirmation();

    // A failed confirmation audio only drops the URL from the response
    let tts = match state
        .speech
        .synthesize(&confirmation, state.speech.default_voice())
        .await
    {
        Ok(audio) => Some(state.audio.save("appt", &audio).await?),
        Err(e) => {
            tracing::warn!("Confirmation audio for {} skipped: {}", record.id, e);
            None
        }
    };

    Ok(Json(AppointmentResponse {
        status: "ok".to_string(),
        detail: confirmation,
        tts,
    }))
}

pub async fn contact(
    State(state): State<Arc<AppState>>,
    FormData(form): FormData<ContactForm>,
) -> Result<Json<ContactResponse>, AppError> {
    let contact = Contact {
        name: required(form.name, "name")?,
        email: required(form.email, "email")?,
        plan: present(form.plan),
        message: present(form.message),
    };

    let record = Submission::new(contact);
    state.submissions.append(&record).await?;
    tracing::info!("Recorded contact request {}", record.id);

    Ok(Json(ContactResponse {
        status: "ok".to_string(),
        detail: "Submission received".to_string(),
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Empty form values count as not submitted.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    present(value).ok_or_else(|| AppError::missing_field(field))
}
