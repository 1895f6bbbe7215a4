use chrono::{DateTime, Utc};
use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum AppointmentStatus {
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
}

/// The party requesting a vet appointment. Exactly one side holds the id,
/// which rules out the both-set and both-null states the two-column wire
/// shape would otherwise allow.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    #[display("buyer")]
    Buyer(i64),
    #[display("seller")]
    Seller(i64),
}

impl Requester {
    /// Builds a requester from the two optional wire/database columns.
    /// Returns `None` unless exactly one side is present.
    pub fn from_ids(buyer_id: Option<i64>, seller_id: Option<i64>) -> Option<Self> {
        match (buyer_id, seller_id) {
            (Some(id), None) => Some(Requester::Buyer(id)),
            (None, Some(id)) => Some(Requester::Seller(id)),
            _ => None,
        }
    }

    /// Identifier of whichever side requested the appointment.
    pub fn id(&self) -> i64 {
        match self {
            Requester::Buyer(id) | Requester::Seller(id) => *id,
        }
    }

    pub fn buyer_id(&self) -> Option<i64> {
        match self {
            Requester::Buyer(id) => Some(*id),
            Requester::Seller(_) => None,
        }
    }

    pub fn seller_id(&self) -> Option<i64> {
        match self {
            Requester::Buyer(_) => None,
            Requester::Seller(id) => Some(*id),
        }
    }
}

/// A requested appointment with a vet for one of their services.
#[derive(Debug, Clone)]
pub struct ServiceBooking {
    pub id: i64,
    pub requester: Requester,
    pub vet_id: i64,
    pub service_id: i64,
    pub appointment_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    /// Present only while the appointment is declined.
    pub decline_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row shape produced by the appointment listing joins: the booking plus the
/// resolved requester identity and the booked service/vet details.
#[derive(Debug, Clone)]
pub struct AppointmentRecord {
    pub booking: ServiceBooking,
    pub booker_name: String,
    pub booker_email: String,
    pub service_name: String,
    pub service_price: Decimal,
    pub vet_name: String,
    pub clinic_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requester_needs_exactly_one_side() {
        assert_eq!(Requester::from_ids(Some(3), None), Some(Requester::Buyer(3)));
        assert_eq!(
            Requester::from_ids(None, Some(7)),
            Some(Requester::Seller(7))
        );
        assert_eq!(Requester::from_ids(Some(3), Some(7)), None);
        assert_eq!(Requester::from_ids(None, None), None);
    }

    #[test]
    fn test_requester_exposes_only_its_own_side() {
        let buyer = Requester::Buyer(3);
        assert_eq!(buyer.buyer_id(), Some(3));
        assert_eq!(buyer.seller_id(), None);
        assert_eq!(buyer.to_string(), "buyer");

        let seller = Requester::Seller(7);
        assert_eq!(seller.buyer_id(), None);
        assert_eq!(seller.seller_id(), Some(7));
        assert_eq!(seller.to_string(), "seller");
    }
}
