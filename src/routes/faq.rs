use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::db::DbConn;
use crate::models::CreateFaqQuestionDto;
use crate::storage;
use crate::utils::{check_payload, ApiCreated, ApiError};

#[openapi(tag = "FAQ")]
#[post("/faq/questions", data = "<dto>")]
pub async fn submit_question(
    db: &State<DbConn>,
    dto: Json<CreateFaqQuestionDto>,
) -> Result<ApiCreated<serde_json::Value>, ApiError> {
    let dto = dto.into_inner();
    check_payload(&dto)?;

    let question = storage::create_faq_question(db, dto)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to submit question: {}", e)))?;

    Ok(ApiCreated::with_message(
        "Question submitted successfully".to_string(),
        serde_json::json!({
            "id": question.id.map(|id| id.to_hex()),
        }),
    ))
}
