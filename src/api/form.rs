use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;

/// Form fields from either an urlencoded or a `multipart/form-data` body.
pub struct FormData<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for FormData<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            return Ok(FormData(value));
        }

        let headers = req.headers().clone();
        let body = Bytes::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        let fields = parse_multipart(&headers, body)
            .await
            .map_err(IntoResponse::into_response)?;

        serde_json::from_value(Value::Object(fields))
            .map(FormData)
            .map_err(|e| AppError::BadRequest(format!("Invalid form fields: {}", e)).into_response())
    }
}

/// Collect every multipart field as a string value keyed by field name.
pub async fn parse_multipart(headers: &HeaderMap, body: Bytes) -> Result<Map<String, Value>, AppError> {
    let boundary = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|ct| multer::parse_boundary(ct).ok())
        .ok_or_else(|| AppError::BadRequest("Missing multipart boundary".to_string()))?;

    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut fields = Map::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Field read error: {}", e)))?;
        fields.insert(name, Value::String(value));
    }

    Ok(fields)
}
