pub mod auth;

pub use auth::{AuthGuard, MaybeAuth, AUTH_COOKIE};
