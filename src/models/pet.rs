use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Availability of a listed pet. Only the booking lifecycle moves a pet
/// out of `Available`; seller edits never touch this field directly.
#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum PetStatus {
    #[default]
    #[display("available")]
    #[serde(alias = "available", rename(serialize = "available"))]
    Available,
    #[display("pending")]
    #[serde(alias = "pending", rename(serialize = "pending"))]
    Pending,
    #[display("sold")]
    #[serde(alias = "sold", rename(serialize = "sold"))]
    Sold,
}

#[derive(Debug, Clone, Default)]
pub struct Pet {
    pub id: i64,
    /// Public identifier used on shared listing links.
    pub external_id: Uuid,
    pub seller_id: i64,
    pub animal_type: String,
    pub breed: String,
    pub pet_name: String,
    pub pet_age: i64,
    pub descriptions: String,
    /// Ordered references to stored listing pictures.
    pub image_urls: Vec<String>,
    pub status: PetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
