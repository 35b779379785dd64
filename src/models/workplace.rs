use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use rocket_okapi::okapi::schemars;
use rocket_okapi::okapi::schemars::JsonSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum WorkplaceType {
    Pharmacy,
    Hospital,
    Optometry,
    Dental,
    Other,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Workplace {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub city: String,
    pub postcode: String,
    pub address: String,
    #[serde(rename = "type")]
    pub workplace_type: WorkplaceType,
    pub phone: Option<String>,
    pub created_by: ObjectId,
    pub created_at: DateTime,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CreateWorkplaceDto {
    #[validate(length(min = 3, message = "Workplace name is required"))]
    pub name: String,
    #[validate(length(min = 2, message = "City is required"))]
    pub city: String,
    #[validate(custom = "crate::utils::validation::validate_uk_postcode")]
    pub postcode: String,
    #[validate(length(min = 5, message = "Address is required"))]
    pub address: String,
    #[serde(rename = "type")]
    pub workplace_type: WorkplaceType,
    pub phone: Option<String>,
}
