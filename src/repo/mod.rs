pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepo {
    async fn init_schema(&self) -> anyhow::Result<()>;

    async fn insert_buyer(&self, buyer: &models::account::Buyer) -> anyhow::Result<i64>;

    async fn get_buyer(&self, buyer_id: i64) -> anyhow::Result<Option<models::account::Buyer>>;

    async fn insert_seller(&self, seller: &models::account::Seller) -> anyhow::Result<i64>;

    async fn get_seller(&self, seller_id: i64)
    -> anyhow::Result<Option<models::account::Seller>>;

    async fn insert_vet(&self, vet: &models::account::Vet) -> anyhow::Result<i64>;

    async fn get_vet(&self, vet_id: i64) -> anyhow::Result<Option<models::account::Vet>>;

    async fn insert_vet_service(
        &self,
        service: &models::service::VetService,
    ) -> anyhow::Result<i64>;

    async fn get_vet_service(
        &self,
        service_id: i64,
    ) -> anyhow::Result<Option<models::service::VetService>>;

    async fn get_services_by_vet(
        &self,
        vet_id: i64,
    ) -> anyhow::Result<Vec<models::service::VetService>>;

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64>;

    async fn get_pet(&self, pet_id: i64) -> anyhow::Result<Option<models::pet::Pet>>;

    async fn get_available_pets(&self) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn get_pets_by_seller(&self, seller_id: i64)
    -> anyhow::Result<Vec<models::pet::Pet>>;

    /// Inserts the booking and marks the pet pending in one transaction.
    /// Returns `None` without writing when the pet already has an active
    /// (pending or accepted) booking.
    async fn reserve_pet(
        &self,
        booking: &models::booking::Booking,
    ) -> anyhow::Result<Option<models::booking::Booking>>;

    async fn get_booking(
        &self,
        booking_id: i64,
    ) -> anyhow::Result<Option<models::booking::Booking>>;

    /// Rewrites the booking status and the mirrored pet status in one
    /// transaction. Returns `None` when the booking does not exist.
    async fn set_booking_status(
        &self,
        booking_id: i64,
        status: models::booking::BookingStatus,
        pet_status: models::pet::PetStatus,
    ) -> anyhow::Result<Option<models::booking::Booking>>;

    async fn get_bookings_by_seller(
        &self,
        seller_id: i64,
    ) -> anyhow::Result<Vec<models::booking::SellerBookingRecord>>;

    /// True iff an active appointment already holds this vet's exact slot.
    async fn has_active_appointment_at(
        &self,
        vet_id: i64,
        appointment_time: DateTime<Utc>,
    ) -> anyhow::Result<bool>;

    /// Re-runs the slot check and inserts in one transaction. Returns `None`
    /// without writing when an active appointment holds the slot.
    async fn insert_service_booking(
        &self,
        booking: &models::service_booking::ServiceBooking,
    ) -> anyhow::Result<Option<models::service_booking::ServiceBooking>>;

    async fn get_service_booking(
        &self,
        booking_id: i64,
    ) -> anyhow::Result<Option<models::service_booking::ServiceBooking>>;

    async fn set_service_booking_status(
        &self,
        booking_id: i64,
        status: models::service_booking::AppointmentStatus,
        decline_reason: Option<String>,
    ) -> anyhow::Result<Option<models::service_booking::ServiceBooking>>;

    async fn delete_service_booking(&self, booking_id: i64) -> anyhow::Result<()>;

    async fn get_vet_appointments(
        &self,
        vet_id: i64,
    ) -> anyhow::Result<Vec<models::service_booking::AppointmentRecord>>;

    async fn get_buyer_appointments(
        &self,
        buyer_id: i64,
    ) -> anyhow::Result<Vec<models::service_booking::AppointmentRecord>>;

    async fn get_seller_appointments(
        &self,
        seller_id: i64,
    ) -> anyhow::Result<Vec<models::service_booking::AppointmentRecord>>;
}

pub type ImplAppRepo = Box<dyn AppRepo>;
