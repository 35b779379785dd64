use mongodb::bson::oid::ObjectId;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::db::DbConn;
use crate::guards::{AuthGuard, MaybeAuth};
use crate::models::CreateAgencyDto;
use crate::storage;
use crate::utils::{check_payload, preview_list, preview_reviews, ApiCreated, ApiError, ApiResponse};

#[openapi(tag = "Agencies")]
#[get("/agencies")]
pub async fn get_agencies(
    db: &State<DbConn>,
    auth: MaybeAuth,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let agencies = storage::get_agencies(db)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let total = agencies.len();
    let (agencies, is_limited) = preview_list(agencies, auth.is_authenticated());

    Ok(Json(ApiResponse::success(serde_json::json!({
        "agencies": agencies,
        "total": total,
        "is_limited": is_limited,
    }))))
}

#[openapi(tag = "Agencies")]
#[get("/agencies/<id>")]
pub async fn get_agency(
    db: &State<DbConn>,
    auth: MaybeAuth,
    id: String,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let object_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::bad_request("Invalid agency ID"))?;

    let agency = storage::get_agency(db, object_id)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Agency not found"))?;

    let reviews = storage::get_agency_reviews(db, object_id)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let (reviews, total_reviews, is_limited) =
        preview_reviews(reviews, auth.is_authenticated());

    Ok(Json(ApiResponse::success(serde_json::json!({
        "agency": agency,
        "reviews": reviews,
        "total_reviews": total_reviews,
        "is_limited": is_limited,
    }))))
}

#[openapi(tag = "Agencies")]
#[post("/agencies", data = "<dto>")]
pub async fn create_agency(
    db: &State<DbConn>,
    auth: AuthGuard,
    dto: Json<CreateAgencyDto>,
) -> Result<ApiCreated<serde_json::Value>, ApiError> {
    let dto = dto.into_inner();
    check_payload(&dto)?;

    let agency = storage::create_agency(db, dto, auth.user_id)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to create agency: {}", e)))?;

    Ok(ApiCreated::new(serde_json::json!({
        "agency": agency,
    })))
}
