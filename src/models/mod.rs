pub mod agency;
pub mod contact;
pub mod faq;
pub mod review;
pub mod user;
pub mod workplace;

pub use agency::*;
pub use contact::*;
pub use faq::*;
pub use review::*;
pub use user::*;
pub use workplace::*;
