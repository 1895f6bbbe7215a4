use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::{account, pet};

/// State of an adoption request. `Completed` exists in stored data for
/// finished adoptions but no transition endpoint produces it.
#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    #[display("pending")]
    #[serde(alias = "pending", rename(serialize = "pending"))]
    Pending,
    #[display("accepted")]
    #[serde(alias = "accepted", rename(serialize = "accepted"))]
    Accepted,
    #[display("declined")]
    #[serde(alias = "declined", rename(serialize = "declined"))]
    Declined,
    #[display("completed")]
    #[serde(alias = "completed", rename(serialize = "completed"))]
    Completed,
}

/// A buyer's adoption request for one pet. At most one booking per pet may
/// be active (pending or accepted) at a time.
#[derive(Debug, Clone, Default)]
pub struct Booking {
    pub id: i64,
    pub pet_id: i64,
    pub buyer_id: i64,
    pub status: BookingStatus,
    pub requested_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape produced by the seller listing join: the booking together with
/// the pet it reserves and the buyer who requested it.
#[derive(Debug, Clone)]
pub struct SellerBookingRecord {
    pub booking: Booking,
    pub pet: pet::Pet,
    pub buyer: account::Buyer,
}
