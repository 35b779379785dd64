use rocket::request::{self, FromRequest, Request, Outcome};
use rocket::http::Status;
use mongodb::bson::oid::ObjectId;

// === OpenAPI (compatible with rocket_okapi 0.8.0 / 0.8.1) ===
use rocket_okapi::request::{OpenApiFromRequest, RequestHeaderInput};
use rocket_okapi::r#gen::OpenApiGenerator;

/// Cookie set at login so browser sessions work without a token header.
pub const AUTH_COOKIE: &str = "access_token";

/// JWT-based authentication guard. Accepts `Authorization: Bearer` first,
/// then the `access_token` cookie.
pub struct AuthGuard {
    pub user_id: ObjectId,
    pub username: String,
}

fn token_from_request(req: &Request<'_>) -> Option<String> {
    if let Some(header) = req.headers().get_one("Authorization") {
        return Some(header.trim_start_matches("Bearer ").to_string());
    }
    req.cookies().get(AUTH_COOKIE).map(|c| c.value().to_string())
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthGuard {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match token_from_request(req) {
            Some(token) => match crate::services::JwtService::verify_token(&token, false) {
                Ok(claims) => match ObjectId::parse_str(&claims.sub) {
                    Ok(user_id) => Outcome::Success(AuthGuard {
                        user_id,
                        username: claims.username,
                    }),
                    Err(_) => Outcome::Error((Status::Unauthorized, ())),
                },
                Err(_) => Outcome::Error((Status::Unauthorized, ())),
            },
            None => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

/// Optional authentication for endpoints that serve anonymous visitors a
/// teaser. Never fails; an invalid token simply reads as anonymous.
pub struct MaybeAuth(pub Option<AuthGuard>);

impl MaybeAuth {
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for MaybeAuth {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match AuthGuard::from_request(req).await {
            Outcome::Success(auth) => Outcome::Success(MaybeAuth(Some(auth))),
            _ => Outcome::Success(MaybeAuth(None)),
        }
    }
}

/// === OpenAPI Integration (Fallback for older versions) ===
/// Keeps OpenAPI generation working even without new traits.
impl<'a> OpenApiFromRequest<'a> for AuthGuard {
    fn from_request_input(
        _gen: &mut OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        // The guard doesn't contribute any special header/parameter for docs
        Ok(RequestHeaderInput::None)
    }
}

impl<'a> OpenApiFromRequest<'a> for MaybeAuth {
    fn from_request_input(
        _gen: &mut OpenApiGenerator,
        _name: String,
        _required: bool,
    ) -> rocket_okapi::Result<RequestHeaderInput> {
        Ok(RequestHeaderInput::None)
    }
}
