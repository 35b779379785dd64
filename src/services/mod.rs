pub mod email;
pub mod jwt;
pub mod password;

pub use email::EmailService;
pub use jwt::JwtService;
pub use password::PasswordService;
