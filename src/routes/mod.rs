pub mod agency;
pub mod auth;
pub mod contact;
pub mod faq;
pub mod review;
pub mod workplace;
