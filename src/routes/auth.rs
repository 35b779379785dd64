use mongodb::bson::oid::ObjectId;
use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;

use crate::db::DbConn;
use crate::guards::{AuthGuard, AUTH_COOKIE};
use crate::models::{LoginDto, RefreshTokenDto, RegisterDto, UserResponse};
use crate::services::{JwtService, PasswordService};
use crate::storage;
use crate::utils::{check_payload, ApiCreated, ApiError, ApiResponse};

fn issue_tokens(user_id: &ObjectId, username: &str) -> Result<(String, String), ApiError> {
    let access = JwtService::generate_access_token(user_id, username)
        .map_err(|e| ApiError::internal_error(format!("Failed to issue token: {}", e)))?;
    let refresh = JwtService::generate_refresh_token(user_id, username)
        .map_err(|e| ApiError::internal_error(format!("Failed to issue token: {}", e)))?;
    Ok((access, refresh))
}

fn set_session_cookie(cookies: &CookieJar<'_>, token: &str) {
    cookies.add(
        Cookie::build((AUTH_COOKIE, token.to_string()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/"),
    );
}

/// --------------------
/// Register
/// --------------------
#[openapi(tag = "Auth")]
#[post("/register", data = "<dto>")]
pub async fn register(
    db: &State<DbConn>,
    cookies: &CookieJar<'_>,
    dto: Json<RegisterDto>,
) -> Result<ApiCreated<serde_json::Value>, ApiError> {
    let dto = dto.into_inner();
    check_payload(&dto)?;

    let existing = storage::get_user_by_username(db, &dto.username)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;
    if existing.is_some() {
        return Err(ApiError::bad_request("Username already exists"));
    }

    let existing = storage::get_user_by_email(db, &dto.email)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?;
    if existing.is_some() {
        return Err(ApiError::bad_request("Email already registered"));
    }

    let password_hash = PasswordService::hash_password(&dto.password)
        .map_err(|e| ApiError::internal_error(format!("Failed to hash password: {}", e)))?;

    let user = storage::create_user(db, dto, password_hash)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to create user: {}", e)))?;

    let user_id = user
        .id
        .ok_or_else(|| ApiError::internal_error("User was stored without an id"))?;
    let (access_token, refresh_token) = issue_tokens(&user_id, &user.username)?;
    set_session_cookie(cookies, &access_token);

    Ok(ApiCreated::with_message(
        "Account created successfully".to_string(),
        serde_json::json!({
            "user": UserResponse::from(user),
            "access_token": access_token,
            "refresh_token": refresh_token,
        }),
    ))
}

/// --------------------
/// Login
/// --------------------
#[openapi(tag = "Auth")]
#[post("/login", data = "<dto>")]
pub async fn login(
    db: &State<DbConn>,
    cookies: &CookieJar<'_>,
    dto: Json<LoginDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let user = storage::get_user_by_username(db, &dto.username)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

    if !PasswordService::verify_password(&dto.password, &user.password) {
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let user_id = user
        .id
        .ok_or_else(|| ApiError::internal_error("User record is missing an id"))?;
    let (access_token, refresh_token) = issue_tokens(&user_id, &user.username)?;
    set_session_cookie(cookies, &access_token);

    Ok(Json(ApiResponse::success(serde_json::json!({
        "user": UserResponse::from(user),
        "access_token": access_token,
        "refresh_token": refresh_token,
    }))))
}

/// --------------------
/// Logout
/// --------------------
#[openapi(tag = "Auth")]
#[post("/logout")]
pub async fn logout(
    cookies: &CookieJar<'_>,
) -> Json<ApiResponse<serde_json::Value>> {
    cookies.remove(Cookie::build(AUTH_COOKIE).path("/"));

    Json(ApiResponse::success_with_message(
        "Logged out successfully".to_string(),
        serde_json::json!({}),
    ))
}

/// --------------------
/// Refresh access token
/// --------------------
#[openapi(tag = "Auth")]
#[post("/refresh", data = "<dto>")]
pub async fn refresh_token(
    cookies: &CookieJar<'_>,
    dto: Json<RefreshTokenDto>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    let claims = JwtService::verify_token(&dto.refresh_token, true)
        .map_err(|_| ApiError::unauthorized("Invalid refresh token"))?;

    let user_id = ObjectId::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthorized("Invalid refresh token"))?;

    let access_token = JwtService::generate_access_token(&user_id, &claims.username)
        .map_err(|e| ApiError::internal_error(format!("Failed to issue token: {}", e)))?;
    set_session_cookie(cookies, &access_token);

    Ok(Json(ApiResponse::success(serde_json::json!({
        "access_token": access_token,
    }))))
}

/// --------------------
/// Current user
/// --------------------
#[openapi(tag = "Auth")]
#[get("/user")]
pub async fn current_user(
    db: &State<DbConn>,
    auth: AuthGuard,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = storage::get_user(db, auth.user_id)
        .await
        .map_err(|e| ApiError::internal_error(format!("Database error: {}", e)))?
        .ok_or_else(|| ApiError::unauthorized("Account no longer exists"))?;

    Ok(Json(ApiResponse::success(UserResponse::from(user))))
}
