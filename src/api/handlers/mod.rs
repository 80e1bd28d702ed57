use axum::{
    extract::{FromRequest, Path, Request, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Form, Json,
};
use serde::de::DeserializeOwned;

use crate::models::*;
use crate::store::{GatewayError, NoteStore};

type ApiError = (StatusCode, Json<ErrorResponse>);

// ============================================================
// Error Handling
// ============================================================

/// Map a gateway failure to a response. Store failures are logged in full
/// and reported to the client as a generic message.
fn gateway_error(e: GatewayError) -> ApiError {
    match e {
        GatewayError::NotFound(id) => {
            tracing::warn!("Note not found: {}", id);
            (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::new("Note not found")),
            )
        }
        GatewayError::Store(e) => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Internal server error")),
            )
        }
    }
}

fn bad_request(message: impl Into<String>) -> ApiError {
    let message = message.into();
    tracing::warn!("Validation error: {}", message);
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(message)))
}

// ============================================================
// Request Bodies
// ============================================================

/// Request body sent either as JSON or as a urlencoded form, picked by
/// `Content-Type`. Anything that is not a form is parsed as JSON.
pub struct Payload<T>(pub T);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(input) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| bad_request(rejection.body_text()))?;
            Ok(Payload(input))
        } else {
            let Json(input) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| bad_request(rejection.body_text()))?;
            Ok(Payload(input))
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Notes
// ============================================================

pub async fn create_note(
    State(store): State<NoteStore>,
    Payload(input): Payload<NoteInput>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    store.create(input).map_err(gateway_error)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Note created successfully")),
    ))
}

pub async fn list_notes(State(store): State<NoteStore>) -> Result<Json<Vec<Note>>, ApiError> {
    store.list_all().map(Json).map_err(gateway_error)
}

pub async fn update_note(
    State(store): State<NoteStore>,
    Path(id): Path<String>,
    Payload(input): Payload<NoteInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    if id.trim().is_empty() {
        return Err(bad_request("ID is missing in the request"));
    }

    store.update(&id, input).map_err(gateway_error)?;
    Ok(Json(MessageResponse::new("Note updated successfully")))
}

pub async fn delete_note(
    State(store): State<NoteStore>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    store.delete(&id).map_err(gateway_error)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn pin_note(
    State(store): State<NoteStore>,
    Path(id): Path<String>,
    Payload(input): Payload<PinInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    store
        .set_pinned(&id, input.pinned)
        .map_err(gateway_error)?;
    Ok(Json(MessageResponse::new(
        "Note pinned/unpinned successfully",
    )))
}
