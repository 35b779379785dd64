use mongodb::bson::oid::ObjectId;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::db::DbConn;
use crate::guards::{AuthGuard, MaybeAuth};
use crate::models::CreateWorkplaceDto;
use crate::storage;
use crate::storage::filter::WorkplaceFilter;
use crate::utils::{check_payload, preview_list, preview_reviews, ApiCreated, ApiError, ApiResponse};

/// Blank query params read as "no filter".
fn none_if_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(FromForm, serde::Deserialize, rocket_okapi::okapi::schemars::JsonSchema)]
pub struct WorkplaceSearchQuery {
    pub location: Option<String>,
    pub role: Option<String>,
    pub rating: Option<f64>,
    pub facilities: Option<String>,
}

impl From<WorkplaceSearchQuery> for WorkplaceFilter {
    fn from(query: WorkplaceSearchQuery) -> Self {
        WorkplaceFilter {
            location: none_if_blank(query.location),
            role: none_if_blank(query.role),
            rating: query.rating.filter(|r| *r > 0.0),
            facilities: none_if_blank(query.facilities),
        }
    }
}

#[openapi(tag = "Workplaces")]
#[get("/workplaces?<query..>")]
pub async fn get_workplaces(
    db: &State<DbConn>,
    auth: MaybeAuth,
    query: WorkplaceSearchQuery,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let workplaces = storage::get_workplaces(db, &query.into())
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let total = workplaces.len();
    let (workplaces, is_limited) = preview_list(workplaces, auth.is_authenticated());

    Ok(Json(ApiResponse::success(serde_json::json!({
        "workplaces": workplaces,
        "total": total,
        "is_limited": is_limited,
    }))))
}

#[openapi(tag = "Workplaces")]
#[get("/workplaces/<id>")]
pub async fn get_workplace(
    db: &State<DbConn>,
    auth: MaybeAuth,
    id: String,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let object_id = ObjectId::parse_str(&id)
        .map_err(|_| ApiError::bad_request("Invalid workplace ID"))?;

    let workplace = storage::get_workplace(db, object_id)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::not_found("Workplace not found"))?;

    let reviews = storage::get_workplace_reviews(db, object_id)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;

    let (reviews, total_reviews, is_limited) =
        preview_reviews(reviews, auth.is_authenticated());

    Ok(Json(ApiResponse::success(serde_json::json!({
        "workplace": workplace,
        "reviews": reviews,
        "total_reviews": total_reviews,
        "is_limited": is_limited,
    }))))
}

#[openapi(tag = "Workplaces")]
#[post("/workplaces", data = "<dto>")]
pub async fn create_workplace(
    db: &State<DbConn>,
    auth: AuthGuard,
    dto: Json<CreateWorkplaceDto>,
) -> Result<ApiCreated<serde_json::Value>, ApiError> {
    let dto = dto.into_inner();
    check_payload(&dto)?;

    let workplace = storage::create_workplace(db, dto, auth.user_id)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to create workplace: {}", e)))?;

    Ok(ApiCreated::new(serde_json::json!({
        "workplace": workplace,
    })))
}
