//! Contact form handler

use axum::{extract::State, http::StatusCode, Json};

use crate::db;
use crate::email;
use crate::error::{AppError, Result};
use crate::models::{ContactMessage, NewContactMessage};
use crate::AppState;

/// Create a contact message and queue the acknowledgement email
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<NewContactMessage>,
) -> Result<(StatusCode, Json<ContactMessage>)> {
    if req.first_name.trim().is_empty()
        || req.last_name.trim().is_empty()
        || req.message.trim().is_empty()
    {
        return Err(AppError::Validation(
            "first_name, last_name and message are required".to_string(),
        ));
    }
    if req.email.trim().is_empty() || !req.email.contains('@') {
        return Err(AppError::Validation(
            "email must be a valid email address".to_string(),
        ));
    }

    let message = db::insert_contact_message(&state.db, &req).await?;
    email::send_contact_confirmation(&message);

    Ok((StatusCode::CREATED, Json(message)))
}
