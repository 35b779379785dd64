use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::db::DbConn;
use crate::models::CreateContactDto;
use crate::services::EmailService;
use crate::storage;
use crate::utils::{check_payload, ApiCreated, ApiError};

#[openapi(tag = "Contact")]
#[post("/contact", data = "<dto>")]
pub async fn submit_contact(
    db: &State<DbConn>,
    dto: Json<CreateContactDto>,
) -> Result<ApiCreated<serde_json::Value>, ApiError> {
    let dto = dto.into_inner();
    check_payload(&dto)?;

    let contact = storage::create_contact(db, dto)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to send message: {}", e)))?;

    // Best effort; the submission is already persisted
    EmailService::send_contact_notification(&contact).await;

    Ok(ApiCreated::with_message(
        "Message sent successfully".to_string(),
        serde_json::json!({}),
    ))
}
