//! Pet adoption booking lifecycle.
//!
//! A buyer reserves a listed pet and the seller accepts or declines the
//! request. The pet's availability mirrors the booking state at every step:
//! reserving marks the pet pending, accepting marks it sold, declining
//! releases it back to the market. Each transition rewrites the booking and
//! the pet inside one storage transaction.

use crate::{models, repo, rest::errors::ApiError};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Wire shape of a stored adoption booking.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSchema {
    pub id: i64,
    pub pet_id: i64,
    pub buyer_id: i64,
    pub status: models::booking::BookingStatus,
    pub requested_at: DateTime<Utc>,
}

impl From<models::booking::Booking> for BookingSchema {
    fn from(val: models::booking::Booking) -> Self {
        BookingSchema {
            id: val.id,
            pet_id: val.pet_id,
            buyer_id: val.buyer_id,
            status: val.status,
            requested_at: val.requested_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PetSummarySchema {
    pub id: i64,
    pub pet_name: String,
    pub animal_type: String,
    pub breed: String,
    pub status: models::pet::PetStatus,
}

#[derive(Debug, Serialize)]
pub struct BuyerSummarySchema {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Booking as shown on the seller's dashboard: the request joined with the
/// reserved pet and the buyer who asked for it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerBookingSchema {
    pub id: i64,
    pub status: models::booking::BookingStatus,
    pub requested_at: DateTime<Utc>,
    pub pet: PetSummarySchema,
    pub buyer: BuyerSummarySchema,
}

impl From<models::booking::SellerBookingRecord> for SellerBookingSchema {
    fn from(val: models::booking::SellerBookingRecord) -> Self {
        SellerBookingSchema {
            id: val.booking.id,
            status: val.booking.status,
            requested_at: val.booking.requested_at,
            pet: PetSummarySchema {
                id: val.pet.id,
                pet_name: val.pet.pet_name,
                animal_type: val.pet.animal_type,
                breed: val.pet.breed,
                status: val.pet.status,
            },
            buyer: BuyerSummarySchema {
                id: val.buyer.id,
                name: val.buyer.name,
                email: val.buyer.email,
                phone: val.buyer.phone,
            },
        }
    }
}

/// Reserves a pet for a buyer.
///
/// # Arguments
/// * `pet_id` - ID of the listed pet being reserved
/// * `buyer_id` - ID of the buyer requesting the adoption
/// * `repo` - Repository instance for database operations
///
/// # Errors
/// Returns an error if:
/// - The pet or the buyer does not exist (`NotFound`)
/// - An active booking already holds the pet (`PetAlreadyBooked`)
pub async fn reserve_pet(
    pet_id: i64,
    buyer_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<models::booking::Booking, ApiError> {
    let (pet, buyer) = futures::try_join!(repo.get_pet(pet_id), repo.get_buyer(buyer_id))?;

    let pet = pet.ok_or_else(|| ApiError::NotFound(format!("pet {pet_id} does not exist")))?;
    buyer.ok_or_else(|| ApiError::NotFound(format!("buyer {buyer_id} does not exist")))?;

    let now = Utc::now();
    let booking = models::booking::Booking {
        id: 0,
        pet_id: pet.id,
        buyer_id,
        status: models::booking::BookingStatus::Pending,
        requested_at: now,
        updated_at: now,
    };

    repo.reserve_pet(&booking)
        .await?
        .ok_or(ApiError::PetAlreadyBooked)
}

/// Applies the seller's decision to a pending booking.
///
/// Accepting marks the pet sold; declining releases it back to the market.
/// Any other status value is rejected before anything is written.
pub async fn resolve_booking(
    booking_id: i64,
    decision: &str,
    repo: &repo::ImplAppRepo,
) -> Result<models::booking::Booking, ApiError> {
    let (status, pet_status) = match decision {
        "accepted" => (
            models::booking::BookingStatus::Accepted,
            models::pet::PetStatus::Sold,
        ),
        "declined" => (
            models::booking::BookingStatus::Declined,
            models::pet::PetStatus::Available,
        ),
        other => {
            return Err(ApiError::Validation(format!(
                "status must be 'accepted' or 'declined', got '{other}'"
            )));
        }
    };

    repo.set_booking_status(booking_id, status, pet_status)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("booking {booking_id} does not exist")))
}

/// Returns every booking placed on the seller's pets, newest request first,
/// joined with pet and buyer summaries. Bookings on other sellers' pets are
/// excluded by the join itself.
pub async fn seller_bookings(
    seller_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<SellerBookingSchema>, ApiError> {
    Ok(repo
        .get_bookings_by_seller(seller_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use mockall::predicate::*;
    use uuid::Uuid;

    fn create_test_pet(id: i64, seller_id: i64, status: models::pet::PetStatus) -> models::pet::Pet {
        models::pet::Pet {
            id,
            external_id: Uuid::new_v4(),
            seller_id,
            animal_type: "dog".to_string(),
            breed: "beagle".to_string(),
            pet_name: "Kira".to_string(),
            pet_age: 3,
            descriptions: "friendly tricolor beagle".to_string(),
            image_urls: vec!["pets/kira-1.jpg".to_string()],
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn create_test_buyer(id: i64) -> models::account::Buyer {
        models::account::Buyer {
            id,
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: Some("5215511112222".to_string()),
            created_at: Utc::now(),
        }
    }

    #[ntex::test]
    async fn test_reserve_pet_inserts_pending_booking() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet()
            .with(eq(10))
            .times(1)
            .returning(|_| Ok(Some(create_test_pet(10, 1, models::pet::PetStatus::Available))));
        mock_repo
            .expect_get_buyer()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(Some(create_test_buyer(3))));
        mock_repo
            .expect_reserve_pet()
            .withf(|booking| {
                booking.pet_id == 10
                    && booking.buyer_id == 3
                    && booking.status == models::booking::BookingStatus::Pending
            })
            .times(1)
            .returning(|booking| {
                Ok(Some(models::booking::Booking {
                    id: 77,
                    ..booking.clone()
                }))
            });

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let booking = reserve_pet(10, 3, &repo).await.unwrap();

        assert_eq!(booking.id, 77);
        assert_eq!(booking.status, models::booking::BookingStatus::Pending);
    }

    #[ntex::test]
    async fn test_reserve_pet_rejects_already_reserved_pet() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet()
            .with(eq(10))
            .times(1)
            .returning(|_| Ok(Some(create_test_pet(10, 1, models::pet::PetStatus::Pending))));
        mock_repo
            .expect_get_buyer()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(Some(create_test_buyer(3))));
        mock_repo
            .expect_reserve_pet()
            .times(1)
            .returning(|_| Ok(None));

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = reserve_pet(10, 3, &repo).await.unwrap_err();

        assert!(matches!(err, ApiError::PetAlreadyBooked));
    }

    #[ntex::test]
    async fn test_reserve_pet_unknown_pet_writes_nothing() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_pet()
            .with(eq(404))
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_get_buyer()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(Some(create_test_buyer(3))));
        mock_repo.expect_reserve_pet().times(0);

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = reserve_pet(404, 3, &repo).await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[ntex::test]
    async fn test_accepting_marks_pet_sold() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_set_booking_status()
            .with(
                eq(5),
                eq(models::booking::BookingStatus::Accepted),
                eq(models::pet::PetStatus::Sold),
            )
            .times(1)
            .returning(|booking_id, status, _| {
                Ok(Some(models::booking::Booking {
                    id: booking_id,
                    pet_id: 10,
                    buyer_id: 3,
                    status,
                    requested_at: Utc::now(),
                    updated_at: Utc::now(),
                }))
            });

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let booking = resolve_booking(5, "accepted", &repo).await.unwrap();

        assert_eq!(booking.status, models::booking::BookingStatus::Accepted);
    }

    #[ntex::test]
    async fn test_declining_releases_pet_to_the_market() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_set_booking_status()
            .with(
                eq(5),
                eq(models::booking::BookingStatus::Declined),
                eq(models::pet::PetStatus::Available),
            )
            .times(1)
            .returning(|booking_id, status, _| {
                Ok(Some(models::booking::Booking {
                    id: booking_id,
                    pet_id: 10,
                    buyer_id: 3,
                    status,
                    requested_at: Utc::now(),
                    updated_at: Utc::now(),
                }))
            });

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let booking = resolve_booking(5, "declined", &repo).await.unwrap();

        assert_eq!(booking.status, models::booking::BookingStatus::Declined);
    }

    #[ntex::test]
    async fn test_resolve_booking_rejects_unknown_decision() {
        let mock_repo = MockAppRepo::new();

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = resolve_booking(5, "completed", &repo).await.unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[ntex::test]
    async fn test_resolve_booking_unknown_id() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_set_booking_status()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = resolve_booking(9000, "accepted", &repo).await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[ntex::test]
    async fn test_seller_bookings_joins_pet_and_buyer() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_bookings_by_seller()
            .with(eq(1))
            .times(1)
            .returning(|_| {
                Ok(vec![models::booking::SellerBookingRecord {
                    booking: models::booking::Booking {
                        id: 77,
                        pet_id: 10,
                        buyer_id: 3,
                        status: models::booking::BookingStatus::Pending,
                        requested_at: Utc::now(),
                        updated_at: Utc::now(),
                    },
                    pet: create_test_pet(10, 1, models::pet::PetStatus::Pending),
                    buyer: create_test_buyer(3),
                }])
            });

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let bookings = seller_bookings(1, &repo).await.unwrap();

        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, 77);
        assert_eq!(bookings[0].pet.pet_name, "Kira");
        assert_eq!(bookings[0].buyer.email, "ana@example.com");
    }
}
