//! Vet service appointment lifecycle.
//!
//! A buyer or seller requests a time slot with a veterinarian for one of the
//! vet's published services. The vet accepts or declines; only a declined
//! appointment may be removed. Slot conflicts compare the exact appointment
//! timestamp for the same vet, with no interval awareness.

use crate::{consts, models, repo, rest::errors::ApiError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Input for a new appointment request, as received on the wire.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub buyer_id: Option<i64>,
    pub seller_id: Option<i64>,
    pub vet_id: i64,
    pub service_id: i64,
    pub appointment_time: DateTime<Utc>,
}

/// Wire shape of a stored appointment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentSchema {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<i64>,
    pub vet_id: i64,
    pub service_id: i64,
    pub appointment_time: DateTime<Utc>,
    pub status: models::service_booking::AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
}

impl From<models::service_booking::ServiceBooking> for AppointmentSchema {
    fn from(val: models::service_booking::ServiceBooking) -> Self {
        AppointmentSchema {
            id: val.id,
            buyer_id: val.requester.buyer_id(),
            seller_id: val.requester.seller_id(),
            vet_id: val.vet_id,
            service_id: val.service_id,
            appointment_time: val.appointment_time,
            status: val.status,
            decline_reason: val.decline_reason,
        }
    }
}

/// Resolved requester identity attached to a listed appointment.
#[derive(Debug, Serialize)]
pub struct BookerSchema {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfoSchema {
    pub id: i64,
    pub service_name: String,
    pub price: Decimal,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VetSummarySchema {
    pub id: i64,
    pub name: String,
    pub clinic_name: String,
}

/// Appointment as shown on the vet's agenda, with the requester resolved to
/// whichever side (buyer or seller) placed it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VetAppointmentSchema {
    pub id: i64,
    pub appointment_time: DateTime<Utc>,
    pub status: models::service_booking::AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    pub booker: BookerSchema,
    pub service_info: ServiceInfoSchema,
}

impl From<models::service_booking::AppointmentRecord> for VetAppointmentSchema {
    fn from(val: models::service_booking::AppointmentRecord) -> Self {
        let requester = val.booking.requester;

        VetAppointmentSchema {
            id: val.booking.id,
            appointment_time: val.booking.appointment_time,
            status: val.booking.status,
            decline_reason: val.booking.decline_reason,
            booker: BookerSchema {
                id: requester.id(),
                name: val.booker_name,
                email: val.booker_email,
                role: requester.to_string(),
            },
            service_info: ServiceInfoSchema {
                id: val.booking.service_id,
                service_name: val.service_name,
                price: val.service_price,
            },
        }
    }
}

/// Appointment as shown to the requesting buyer or seller.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequesterAppointmentSchema {
    pub id: i64,
    pub appointment_time: DateTime<Utc>,
    pub status: models::service_booking::AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decline_reason: Option<String>,
    pub service_info: ServiceInfoSchema,
    pub vet: VetSummarySchema,
}

impl From<models::service_booking::AppointmentRecord> for RequesterAppointmentSchema {
    fn from(val: models::service_booking::AppointmentRecord) -> Self {
        RequesterAppointmentSchema {
            id: val.booking.id,
            appointment_time: val.booking.appointment_time,
            status: val.booking.status,
            decline_reason: val.booking.decline_reason,
            service_info: ServiceInfoSchema {
                id: val.booking.service_id,
                service_name: val.service_name,
                price: val.service_price,
            },
            vet: VetSummarySchema {
                id: val.booking.vet_id,
                name: val.vet_name,
                clinic_name: val.clinic_name,
            },
        }
    }
}

/// Requests an appointment slot with a vet.
///
/// # Arguments
/// * `input` - Requester side, vet, service and slot time
/// * `repo` - Repository instance for database operations
///
/// # Errors
/// Returns an error if:
/// - Both or neither requester side is given (`Validation`)
/// - An active appointment already holds the exact slot (`SlotTaken`)
pub async fn request_appointment(
    input: NewAppointment,
    repo: &repo::ImplAppRepo,
) -> Result<models::service_booking::ServiceBooking, ApiError> {
    let requester = models::service_booking::Requester::from_ids(input.buyer_id, input.seller_id)
        .ok_or_else(|| {
            ApiError::Validation(
                "exactly one of buyerId or sellerId must identify the requester".to_string(),
            )
        })?;

    if repo
        .has_active_appointment_at(input.vet_id, input.appointment_time)
        .await?
    {
        return Err(ApiError::SlotTaken);
    }

    let now = Utc::now();
    let booking = models::service_booking::ServiceBooking {
        id: 0,
        requester,
        vet_id: input.vet_id,
        service_id: input.service_id,
        appointment_time: input.appointment_time,
        status: models::service_booking::AppointmentStatus::Pending,
        decline_reason: None,
        created_at: now,
        updated_at: now,
    };

    // the insert re-checks the slot inside its own transaction, so a request
    // that lost the race between gate and write still answers the conflict
    repo.insert_service_booking(&booking)
        .await?
        .ok_or(ApiError::SlotTaken)
}

/// Applies the vet's decision to an appointment.
///
/// Declining stores the supplied reason, or a placeholder when none is
/// given. Any non-declined status erases a previously stored reason, so
/// re-activating a declined appointment forgets why it was declined.
pub async fn update_appointment_status(
    booking_id: i64,
    status_input: &str,
    decline_reason: Option<String>,
    repo: &repo::ImplAppRepo,
) -> Result<models::service_booking::ServiceBooking, ApiError> {
    let status = match status_input {
        "pending" => models::service_booking::AppointmentStatus::Pending,
        "accepted" => models::service_booking::AppointmentStatus::Accepted,
        "declined" => models::service_booking::AppointmentStatus::Declined,
        other => {
            return Err(ApiError::Validation(format!(
                "unknown appointment status '{other}'"
            )));
        }
    };

    let reason = match status {
        models::service_booking::AppointmentStatus::Declined => Some(
            decline_reason
                .filter(|reason| !reason.trim().is_empty())
                .unwrap_or_else(|| consts::DEFAULT_DECLINE_REASON.to_string()),
        ),
        _ => None,
    };

    repo.set_service_booking_status(booking_id, status, reason)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("appointment {booking_id} does not exist")))
}

/// Removes an appointment, allowed only while it is declined.
pub async fn remove_appointment(
    booking_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<(), ApiError> {
    let booking = repo
        .get_service_booking(booking_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("appointment {booking_id} does not exist")))?;

    if booking.status != models::service_booking::AppointmentStatus::Declined {
        return Err(ApiError::Forbidden(
            "only declined appointments can be removed".to_string(),
        ));
    }

    repo.delete_service_booking(booking_id).await?;

    Ok(())
}

/// Returns the vet's agenda sorted by slot time ascending, each entry with
/// the resolved booker and the booked service.
pub async fn vet_appointments(
    vet_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<VetAppointmentSchema>, ApiError> {
    Ok(repo
        .get_vet_appointments(vet_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn buyer_appointments(
    buyer_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<RequesterAppointmentSchema>, ApiError> {
    Ok(repo
        .get_buyer_appointments(buyer_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

pub async fn seller_appointments(
    seller_id: i64,
    repo: &repo::ImplAppRepo,
) -> Result<Vec<RequesterAppointmentSchema>, ApiError> {
    Ok(repo
        .get_seller_appointments(seller_id)
        .await?
        .into_iter()
        .map(Into::into)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use chrono::TimeZone;
    use mockall::predicate::*;
    use rust_decimal::Decimal;

    fn slot() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 12, 10, 0, 0).unwrap()
    }

    fn create_test_appointment(
        id: i64,
        status: models::service_booking::AppointmentStatus,
        decline_reason: Option<&str>,
    ) -> models::service_booking::ServiceBooking {
        models::service_booking::ServiceBooking {
            id,
            requester: models::service_booking::Requester::Buyer(3),
            vet_id: 2,
            service_id: 8,
            appointment_time: slot(),
            status,
            decline_reason: decline_reason.map(str::to_string),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn new_appointment_input() -> NewAppointment {
        NewAppointment {
            buyer_id: Some(3),
            seller_id: None,
            vet_id: 2,
            service_id: 8,
            appointment_time: slot(),
        }
    }

    #[ntex::test]
    async fn test_request_appointment_inserts_pending() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_has_active_appointment_at()
            .with(eq(2), eq(slot()))
            .times(1)
            .returning(|_, _| Ok(false));
        mock_repo
            .expect_insert_service_booking()
            .withf(|booking| {
                booking.requester == models::service_booking::Requester::Buyer(3)
                    && booking.status == models::service_booking::AppointmentStatus::Pending
                    && booking.decline_reason.is_none()
            })
            .times(1)
            .returning(|booking| {
                Ok(Some(models::service_booking::ServiceBooking {
                    id: 41,
                    ..booking.clone()
                }))
            });

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let booking = request_appointment(new_appointment_input(), &repo)
            .await
            .unwrap();

        assert_eq!(booking.id, 41);
        assert_eq!(
            booking.status,
            models::service_booking::AppointmentStatus::Pending
        );
    }

    #[ntex::test]
    async fn test_request_appointment_rejects_ambiguous_requester() {
        let mock_repo = MockAppRepo::new();

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = request_appointment(
            NewAppointment {
                buyer_id: Some(3),
                seller_id: Some(1),
                ..new_appointment_input()
            },
            &repo,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[ntex::test]
    async fn test_request_appointment_rejects_missing_requester() {
        let mock_repo = MockAppRepo::new();

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = request_appointment(
            NewAppointment {
                buyer_id: None,
                seller_id: None,
                ..new_appointment_input()
            },
            &repo,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[ntex::test]
    async fn test_request_appointment_rejects_taken_slot() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_has_active_appointment_at()
            .with(eq(2), eq(slot()))
            .times(1)
            .returning(|_, _| Ok(true));
        mock_repo.expect_insert_service_booking().times(0);

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = request_appointment(new_appointment_input(), &repo)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::SlotTaken));
    }

    #[ntex::test]
    async fn test_request_appointment_lost_race_still_answers_conflict() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_has_active_appointment_at()
            .times(1)
            .returning(|_, _| Ok(false));
        mock_repo
            .expect_insert_service_booking()
            .times(1)
            .returning(|_| Ok(None));

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = request_appointment(new_appointment_input(), &repo)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::SlotTaken));
    }

    #[ntex::test]
    async fn test_decline_without_reason_stores_placeholder() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_set_service_booking_status()
            .with(
                eq(41),
                eq(models::service_booking::AppointmentStatus::Declined),
                eq(Some(consts::DEFAULT_DECLINE_REASON.to_string())),
            )
            .times(1)
            .returning(|booking_id, status, reason| {
                Ok(Some(models::service_booking::ServiceBooking {
                    status,
                    decline_reason: reason,
                    ..create_test_appointment(booking_id, status, None)
                }))
            });

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let booking = update_appointment_status(41, "declined", None, &repo)
            .await
            .unwrap();

        assert_eq!(
            booking.decline_reason.as_deref(),
            Some(consts::DEFAULT_DECLINE_REASON)
        );
    }

    #[ntex::test]
    async fn test_decline_keeps_the_given_reason() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_set_service_booking_status()
            .with(
                eq(41),
                eq(models::service_booking::AppointmentStatus::Declined),
                eq(Some("unavailable".to_string())),
            )
            .times(1)
            .returning(|booking_id, status, reason| {
                Ok(Some(models::service_booking::ServiceBooking {
                    status,
                    decline_reason: reason,
                    ..create_test_appointment(booking_id, status, None)
                }))
            });

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let booking =
            update_appointment_status(41, "declined", Some("unavailable".to_string()), &repo)
                .await
                .unwrap();

        assert_eq!(booking.decline_reason.as_deref(), Some("unavailable"));
    }

    #[ntex::test]
    async fn test_reactivating_erases_prior_decline_reason() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_set_service_booking_status()
            .with(
                eq(41),
                eq(models::service_booking::AppointmentStatus::Accepted),
                eq(None::<String>),
            )
            .times(1)
            .returning(|booking_id, status, reason| {
                Ok(Some(models::service_booking::ServiceBooking {
                    status,
                    decline_reason: reason,
                    ..create_test_appointment(booking_id, status, Some("unavailable"))
                }))
            });

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let booking = update_appointment_status(
            41,
            "accepted",
            Some("stale reason from the form".to_string()),
            &repo,
        )
        .await
        .unwrap();

        assert_eq!(booking.decline_reason, None);
    }

    #[ntex::test]
    async fn test_update_rejects_unknown_status() {
        let mock_repo = MockAppRepo::new();

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = update_appointment_status(41, "cancelled", None, &repo)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[ntex::test]
    async fn test_remove_rejects_active_appointment() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_service_booking()
            .with(eq(41))
            .times(1)
            .returning(|booking_id| {
                Ok(Some(create_test_appointment(
                    booking_id,
                    models::service_booking::AppointmentStatus::Pending,
                    None,
                )))
            });
        mock_repo.expect_delete_service_booking().times(0);

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = remove_appointment(41, &repo).await.unwrap_err();

        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[ntex::test]
    async fn test_remove_deletes_declined_appointment() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_service_booking()
            .with(eq(41))
            .times(1)
            .returning(|booking_id| {
                Ok(Some(create_test_appointment(
                    booking_id,
                    models::service_booking::AppointmentStatus::Declined,
                    Some("unavailable"),
                )))
            });
        mock_repo
            .expect_delete_service_booking()
            .with(eq(41))
            .times(1)
            .returning(|_| Ok(()));

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        remove_appointment(41, &repo).await.unwrap();
    }

    #[ntex::test]
    async fn test_remove_unknown_appointment() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_service_booking()
            .times(1)
            .returning(|_| Ok(None));

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let err = remove_appointment(9000, &repo).await.unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[ntex::test]
    async fn test_vet_agenda_resolves_booker_and_service() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_get_vet_appointments()
            .with(eq(2))
            .times(1)
            .returning(|_| {
                Ok(vec![models::service_booking::AppointmentRecord {
                    booking: create_test_appointment(
                        41,
                        models::service_booking::AppointmentStatus::Pending,
                        None,
                    ),
                    booker_name: "Ana".to_string(),
                    booker_email: "ana@example.com".to_string(),
                    service_name: "vaccination".to_string(),
                    service_price: Decimal::new(35000, 2),
                    vet_name: "Dr. Rivas".to_string(),
                    clinic_name: "Rivas Clinic".to_string(),
                }])
            });

        let repo: repo::ImplAppRepo = Box::new(mock_repo);
        let agenda = vet_appointments(2, &repo).await.unwrap();

        assert_eq!(agenda.len(), 1);
        assert_eq!(agenda[0].booker.role, "buyer");
        assert_eq!(agenda[0].booker.id, 3);
        assert_eq!(agenda[0].service_info.service_name, "vaccination");
        assert_eq!(agenda[0].service_info.price, Decimal::new(35000, 2));
    }
}
