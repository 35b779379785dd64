use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use validator::Validate;

use crate::models::User;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WorkplaceReview {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub workplace_id: ObjectId,
    pub user_id: ObjectId,
    pub rating: i32, // 1-5
    pub position: String,
    pub pay_rate: f64,
    pub payment_time: i32, // days until payment arrived
    pub transport: String,
    pub facilities: Option<String>,
    pub comments: String,
    pub created_at: DateTime,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CreateWorkplaceReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(length(min = 1, message = "Position is required"))]
    pub position: String,
    #[validate(range(min = 1.0, message = "Pay rate is required"))]
    pub pay_rate: f64,
    #[validate(range(min = 1, message = "Payment time is required"))]
    pub payment_time: i32,
    #[validate(length(min = 5, message = "Transport information is required"))]
    pub transport: String,
    pub facilities: Option<String>,
    #[validate(length(min = 10, message = "Comments must be at least 10 characters"))]
    pub comments: String,
}

/// Grade scale used for agency payment reliability and communication.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceGrade {
    Excellent,
    Good,
    Average,
    Poor,
    VeryPoor,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AgencyReview {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub agency_id: ObjectId,
    pub user_id: ObjectId,
    pub rating: i32, // 1-5
    pub pay_rates: Option<String>,
    pub payment_reliability: ServiceGrade,
    pub communication: ServiceGrade,
    pub comments: String,
    pub created_at: DateTime,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CreateAgencyReviewDto {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub pay_rates: Option<String>,
    pub payment_reliability: ServiceGrade,
    pub communication: ServiceGrade,
    #[validate(length(min = 10, message = "Comments must be at least 10 characters"))]
    pub comments: String,
}

/// Partial user attached to each review. `None` when the referenced user no
/// longer exists; the client renders such reviews as anonymous.
#[derive(Debug, Serialize, Deserialize, Clone, JsonSchema)]
pub struct ReviewAuthor {
    pub id: String,
    pub username: String,
    pub profession: String,
}

impl From<&User> for ReviewAuthor {
    fn from(user: &User) -> Self {
        ReviewAuthor {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            username: user.username.clone(),
            profession: user.profession.clone(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct WorkplaceReviewWithAuthor {
    #[serde(flatten)]
    pub review: WorkplaceReview,
    pub user: Option<ReviewAuthor>,
}

#[derive(Debug, Serialize, Clone)]
pub struct AgencyReviewWithAuthor {
    #[serde(flatten)]
    pub review: AgencyReview,
    pub user: Option<ReviewAuthor>,
}
