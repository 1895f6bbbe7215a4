use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A named service a veterinarian offers for appointment booking.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VetService {
    pub id: i64,
    pub vet_id: i64,
    pub service_name: String,
    pub descriptions: String,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}
