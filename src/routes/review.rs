use mongodb::bson::oid::ObjectId;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::db::DbConn;
use crate::guards::AuthGuard;
use crate::models::{CreateAgencyReviewDto, CreateWorkplaceReviewDto};
use crate::storage;
use crate::utils::{check_payload, ApiCreated, ApiError};

#[openapi(tag = "Reviews")]
#[post("/workplaces/<id>/reviews", data = "<dto>")]
pub async fn create_workplace_review(
    db: &State<DbConn>,
    auth: AuthGuard,
    id: String,
    dto: Json<CreateWorkplaceReviewDto>,
) -> Result<ApiCreated<serde_json::Value>, ApiError> {
    let dto = dto.into_inner();
    check_payload(&dto)?;

    let workplace_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::bad_request("Invalid workplace ID"))?;

    // Reviews must reference an existing workplace
    storage::get_workplace(db, workplace_id)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Workplace not found"))?;

    let review = storage::create_workplace_review(db, workplace_id, auth.user_id, dto)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to create review: {}", e)))?;

    Ok(ApiCreated::with_message(
        "Review submitted successfully".to_string(),
        serde_json::json!({
            "review": review,
        }),
    ))
}

#[openapi(tag = "Reviews")]
#[post("/agencies/<id>/reviews", data = "<dto>")]
pub async fn create_agency_review(
    db: &State<DbConn>,
    auth: AuthGuard,
    id: String,
    dto: Json<CreateAgencyReviewDto>,
) -> Result<ApiCreated<serde_json::Value>, ApiError> {
    let dto = dto.into_inner();
    check_payload(&dto)?;

    let agency_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::bad_request("Invalid agency ID"))?;

    storage::get_agency(db, agency_id)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Agency not found"))?;

    let review = storage::create_agency_review(db, agency_id, auth.user_id, dto)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to create review: {}", e)))?;

    Ok(ApiCreated::with_message(
        "Review submitted successfully".to_string(),
        serde_json::json!({
            "review": review,
        }),
    ))
}
