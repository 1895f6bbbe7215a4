use crate::models;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::from_str;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};
use std::str::FromStr;

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

impl FromRow<'_, SqliteRow> for models::pet::Pet {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let external_id: uuid::fmt::Hyphenated = row.try_get("external_id")?;

        Ok(Self {
            id: row.try_get("id")?,
            external_id: external_id.into(),
            seller_id: row.try_get("seller_id")?,
            animal_type: row.try_get("animal_type")?,
            breed: row.try_get("breed")?,
            pet_name: row.try_get("pet_name")?,
            pet_age: row.try_get("pet_age")?,
            descriptions: row.try_get("descriptions")?,
            image_urls: from_str::<Vec<String>>(row.try_get::<&str, &str>("image_urls")?)
                .unwrap_or_default(),
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::booking::Booking {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            buyer_id: row.try_get("buyer_id")?,
            status: row.try_get("status")?,
            requested_at: row.try_get("requested_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::service::VetService {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            vet_id: row.try_get("vet_id")?,
            service_name: row.try_get("service_name")?,
            descriptions: row.try_get("descriptions")?,
            price: Decimal::from_str(row.try_get::<&str, &str>("price")?).unwrap_or_default(),
            created_at: row.try_get("created_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::service_booking::ServiceBooking {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let requester = models::service_booking::Requester::from_ids(
            row.try_get("buyer_id")?,
            row.try_get("seller_id")?,
        )
        .ok_or_else(|| {
            sqlx::Error::Decode("service_booking row must name exactly one requester side".into())
        })?;

        Ok(Self {
            id: row.try_get("id")?,
            requester,
            vet_id: row.try_get("vet_id")?,
            service_id: row.try_get("service_id")?,
            appointment_time: row.try_get("appointment_time")?,
            status: row.try_get("status")?,
            decline_reason: row.try_get("decline_reason")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl FromRow<'_, SqliteRow> for models::booking::SellerBookingRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        let pet_external_id: uuid::fmt::Hyphenated = row.try_get("pet_external_id")?;

        let booking = models::booking::Booking {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            buyer_id: row.try_get("buyer_id")?,
            status: row.try_get("status")?,
            requested_at: row.try_get("requested_at")?,
            updated_at: row.try_get("updated_at")?,
        };

        let pet = models::pet::Pet {
            id: booking.pet_id,
            external_id: pet_external_id.into(),
            seller_id: row.try_get("seller_id")?,
            animal_type: row.try_get("animal_type")?,
            breed: row.try_get("breed")?,
            pet_name: row.try_get("pet_name")?,
            pet_age: row.try_get("pet_age")?,
            descriptions: row.try_get("descriptions")?,
            image_urls: from_str::<Vec<String>>(row.try_get::<&str, &str>("image_urls")?)
                .unwrap_or_default(),
            status: row.try_get("pet_status")?,
            created_at: row.try_get("pet_created_at")?,
            updated_at: row.try_get("pet_updated_at")?,
        };

        let buyer = models::account::Buyer {
            id: booking.buyer_id,
            name: row.try_get("buyer_name")?,
            email: row.try_get("buyer_email")?,
            phone: row.try_get("buyer_phone")?,
            created_at: row.try_get("buyer_created_at")?,
        };

        Ok(Self { booking, pet, buyer })
    }
}

impl FromRow<'_, SqliteRow> for models::service_booking::AppointmentRecord {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            booking: models::service_booking::ServiceBooking::from_row(row)?,
            booker_name: row.try_get("booker_name")?,
            booker_email: row.try_get("booker_email")?,
            service_name: row.try_get("service_name")?,
            service_price: Decimal::from_str(row.try_get::<&str, &str>("service_price")?)
                .unwrap_or_default(),
            vet_name: row.try_get("vet_name")?,
            clinic_name: row.try_get("clinic_name")?,
        })
    }
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn init_schema(&self) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_INIT_SCHEMA)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn insert_buyer(&self, buyer: &models::account::Buyer) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_BUYER)
            .bind(&buyer.name)
            .bind(&buyer.email)
            .bind(&buyer.phone)
            .bind(buyer.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_buyer(&self, buyer_id: i64) -> anyhow::Result<Option<models::account::Buyer>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_BUYER)
            .bind(buyer_id)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn insert_seller(&self, seller: &models::account::Seller) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_SELLER)
            .bind(&seller.name)
            .bind(&seller.email)
            .bind(&seller.phone)
            .bind(seller.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_seller(
        &self,
        seller_id: i64,
    ) -> anyhow::Result<Option<models::account::Seller>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_SELLER)
            .bind(seller_id)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn insert_vet(&self, vet: &models::account::Vet) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_VET)
            .bind(&vet.name)
            .bind(&vet.email)
            .bind(&vet.clinic_name)
            .bind(vet.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_vet(&self, vet_id: i64) -> anyhow::Result<Option<models::account::Vet>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_VET)
            .bind(vet_id)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn insert_vet_service(
        &self,
        service: &models::service::VetService,
    ) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_VET_SERVICE)
            .bind(service.vet_id)
            .bind(&service.service_name)
            .bind(&service.descriptions)
            .bind(service.price.to_string())
            .bind(service.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_vet_service(
        &self,
        service_id: i64,
    ) -> anyhow::Result<Option<models::service::VetService>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_VET_SERVICE)
            .bind(service_id)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn get_services_by_vet(
        &self,
        vet_id: i64,
    ) -> anyhow::Result<Vec<models::service::VetService>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_SERVICES_BY_VET)
            .bind(vet_id)
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PET)
            .bind(pet.external_id.to_string())
            .bind(pet.seller_id)
            .bind(&pet.animal_type)
            .bind(&pet.breed)
            .bind(&pet.pet_name)
            .bind(pet.pet_age)
            .bind(&pet.descriptions)
            .bind(serde_json::to_string(&pet.image_urls).unwrap_or_else(|_| "[]".to_string()))
            .bind(pet.status.to_string())
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_pet(&self, pet_id: i64) -> anyhow::Result<Option<models::pet::Pet>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_PET)
            .bind(pet_id)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn get_available_pets(&self) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_AVAILABLE_PETS)
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn get_pets_by_seller(
        &self,
        seller_id: i64,
    ) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_PETS_BY_SELLER)
            .bind(seller_id)
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn reserve_pet(
        &self,
        booking: &models::booking::Booking,
    ) -> anyhow::Result<Option<models::booking::Booking>> {
        let mut transaction = self.db_pool.begin().await?;

        // check and paired writes share the transaction so a lost race
        // cannot book the same pet twice
        let already_reserved = sqlx::query(sqlite_queries::QUERY_GET_ACTIVE_BOOKING_FOR_PET)
            .bind(booking.pet_id)
            .fetch_optional(&mut *transaction)
            .await?
            .is_some();

        if already_reserved {
            return Ok(None);
        }

        let booking_id = sqlx::query(sqlite_queries::QUERY_INSERT_BOOKING)
            .bind(booking.pet_id)
            .bind(booking.buyer_id)
            .bind(booking.status.to_string())
            .bind(booking.requested_at)
            .bind(booking.updated_at)
            .execute(&mut *transaction)
            .await?
            .last_insert_rowid();

        sqlx::query(sqlite_queries::QUERY_SET_PET_STATUS)
            .bind(booking.pet_id)
            .bind(models::pet::PetStatus::Pending.to_string())
            .bind(booking.updated_at)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        Ok(Some(models::booking::Booking {
            id: booking_id,
            ..booking.clone()
        }))
    }

    async fn get_booking(
        &self,
        booking_id: i64,
    ) -> anyhow::Result<Option<models::booking::Booking>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_BOOKING)
            .bind(booking_id)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn set_booking_status(
        &self,
        booking_id: i64,
        status: models::booking::BookingStatus,
        pet_status: models::pet::PetStatus,
    ) -> anyhow::Result<Option<models::booking::Booking>> {
        let mut transaction = self.db_pool.begin().await?;

        let booking = match sqlx::query_as::<_, models::booking::Booking>(
            sqlite_queries::QUERY_GET_BOOKING,
        )
        .bind(booking_id)
        .fetch_optional(&mut *transaction)
        .await?
        {
            Some(booking) => booking,
            None => return Ok(None),
        };

        let now = Utc::now();

        sqlx::query(sqlite_queries::QUERY_SET_BOOKING_STATUS)
            .bind(booking_id)
            .bind(status.to_string())
            .bind(now)
            .execute(&mut *transaction)
            .await?;

        sqlx::query(sqlite_queries::QUERY_SET_PET_STATUS)
            .bind(booking.pet_id)
            .bind(pet_status.to_string())
            .bind(now)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        Ok(Some(models::booking::Booking {
            status,
            updated_at: now,
            ..booking
        }))
    }

    async fn get_bookings_by_seller(
        &self,
        seller_id: i64,
    ) -> anyhow::Result<Vec<models::booking::SellerBookingRecord>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_SELLER_BOOKINGS)
            .bind(seller_id)
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn has_active_appointment_at(
        &self,
        vet_id: i64,
        appointment_time: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        Ok(sqlx::query(sqlite_queries::QUERY_GET_ACTIVE_APPOINTMENT_AT)
            .bind(vet_id)
            .bind(appointment_time)
            .fetch_optional(&self.db_pool)
            .await?
            .is_some())
    }

    async fn insert_service_booking(
        &self,
        booking: &models::service_booking::ServiceBooking,
    ) -> anyhow::Result<Option<models::service_booking::ServiceBooking>> {
        let mut transaction = self.db_pool.begin().await?;

        let slot_taken = sqlx::query(sqlite_queries::QUERY_GET_ACTIVE_APPOINTMENT_AT)
            .bind(booking.vet_id)
            .bind(booking.appointment_time)
            .fetch_optional(&mut *transaction)
            .await?
            .is_some();

        if slot_taken {
            return Ok(None);
        }

        let booking_id = sqlx::query(sqlite_queries::QUERY_INSERT_SERVICE_BOOKING)
            .bind(booking.requester.buyer_id())
            .bind(booking.requester.seller_id())
            .bind(booking.vet_id)
            .bind(booking.service_id)
            .bind(booking.appointment_time)
            .bind(booking.status.to_string())
            .bind(&booking.decline_reason)
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .execute(&mut *transaction)
            .await?
            .last_insert_rowid();

        transaction.commit().await?;

        Ok(Some(models::service_booking::ServiceBooking {
            id: booking_id,
            ..booking.clone()
        }))
    }

    async fn get_service_booking(
        &self,
        booking_id: i64,
    ) -> anyhow::Result<Option<models::service_booking::ServiceBooking>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_SERVICE_BOOKING)
            .bind(booking_id)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    async fn set_service_booking_status(
        &self,
        booking_id: i64,
        status: models::service_booking::AppointmentStatus,
        decline_reason: Option<String>,
    ) -> anyhow::Result<Option<models::service_booking::ServiceBooking>> {
        let mut transaction = self.db_pool.begin().await?;

        let booking = match sqlx::query_as::<_, models::service_booking::ServiceBooking>(
            sqlite_queries::QUERY_GET_SERVICE_BOOKING,
        )
        .bind(booking_id)
        .fetch_optional(&mut *transaction)
        .await?
        {
            Some(booking) => booking,
            None => return Ok(None),
        };

        let now = Utc::now();

        sqlx::query(sqlite_queries::QUERY_SET_SERVICE_BOOKING_STATUS)
            .bind(booking_id)
            .bind(status.to_string())
            .bind(&decline_reason)
            .bind(now)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        Ok(Some(models::service_booking::ServiceBooking {
            status,
            decline_reason,
            updated_at: now,
            ..booking
        }))
    }

    async fn delete_service_booking(&self, booking_id: i64) -> anyhow::Result<()> {
        // status guard repeated here keeps the declined-only rule even if a
        // concurrent update re-activated the appointment after the caller's
        // check
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_SERVICE_BOOKING)
            .bind(booking_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_vet_appointments(
        &self,
        vet_id: i64,
    ) -> anyhow::Result<Vec<models::service_booking::AppointmentRecord>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_VET_APPOINTMENTS)
            .bind(vet_id)
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn get_buyer_appointments(
        &self,
        buyer_id: i64,
    ) -> anyhow::Result<Vec<models::service_booking::AppointmentRecord>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_BUYER_APPOINTMENTS)
            .bind(buyer_id)
            .fetch_all(&self.db_pool)
            .await?)
    }

    async fn get_seller_appointments(
        &self,
        seller_id: i64,
    ) -> anyhow::Result<Vec<models::service_booking::AppointmentRecord>> {
        Ok(sqlx::query_as(sqlite_queries::QUERY_GET_SELLER_APPOINTMENTS)
            .bind(seller_id)
            .fetch_all(&self.db_pool)
            .await?)
    }
}
