//! Vet service appointment endpoints.

use crate::{api, rest::AppState};
use chrono::{DateTime, Utc};
use ntex::web;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceBookingRequest {
    pub buyer_id: Option<i64>,
    pub seller_id: Option<i64>,
    pub vet_id: i64,
    pub service_id: i64,
    pub appointment_time: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceBookingRequest {
    pub status: String,
    pub decline_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ServiceBookingPath {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct VetPath {
    pub vet_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct BuyerPath {
    pub buyer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SellerPath {
    pub seller_id: i64,
}

/// Requests an appointment slot with a vet.
///
/// Answers 400 when the requester side is ambiguous and 409 when an active
/// appointment already holds the exact slot.
#[web::post("")]
pub async fn create_service_booking(
    form: web::types::Json<CreateServiceBookingRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let booking = api::appointment::request_appointment(
        api::appointment::NewAppointment {
            buyer_id: form.buyer_id,
            seller_id: form.seller_id,
            vet_id: form.vet_id,
            service_id: form.service_id,
            appointment_time: form.appointment_time,
        },
        &app_state.repo,
    )
    .await?;

    Ok(web::HttpResponse::Created().json(&api::appointment::AppointmentSchema::from(booking)))
}

/// Applies the vet's decision (pending/accepted/declined) to an appointment.
#[web::put("/{id}")]
pub async fn update_service_booking(
    path: web::types::Path<ServiceBookingPath>,
    form: web::types::Json<UpdateServiceBookingRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let booking = api::appointment::update_appointment_status(
        path.id,
        &form.status,
        form.decline_reason.clone(),
        &app_state.repo,
    )
    .await?;

    Ok(web::HttpResponse::Ok().json(&api::appointment::AppointmentSchema::from(booking)))
}

/// Removes a declined appointment. Any other status answers 403.
#[web::delete("/{id}")]
pub async fn delete_service_booking(
    path: web::types::Path<ServiceBookingPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    api::appointment::remove_appointment(path.id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&serde_json::json!({
        "message": "appointment removed",
    })))
}

/// The vet's agenda, sorted by slot time ascending, each entry carrying the
/// resolved booker and the booked service.
#[web::get("/vet-appointments/{vet_id}")]
pub async fn vet_appointments(
    path: web::types::Path<VetPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointments = api::appointment::vet_appointments(path.vet_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&appointments))
}

#[web::get("/buyer-appointments/{buyer_id}")]
pub async fn buyer_appointments(
    path: web::types::Path<BuyerPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointments = api::appointment::buyer_appointments(path.buyer_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&appointments))
}

#[web::get("/seller-appointments/{seller_id}")]
pub async fn seller_appointments(
    path: web::types::Path<SellerPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let appointments =
        api::appointment::seller_appointments(path.seller_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&appointments))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{
            "buyerId": 3,
            "vetId": 2,
            "serviceId": 8,
            "appointmentTime": "2025-06-12T10:00:00Z"
        }"#;
        let request: CreateServiceBookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.buyer_id, Some(3));
        assert_eq!(request.seller_id, None);
        assert_eq!(request.vet_id, 2);
        assert_eq!(request.service_id, 8);
    }

    #[test]
    fn test_create_request_requires_appointment_time() {
        let json = r#"{"buyerId":3,"vetId":2,"serviceId":8}"#;
        assert!(serde_json::from_str::<CreateServiceBookingRequest>(json).is_err());
    }

    #[test]
    fn test_update_request_reason_is_optional() {
        let json = r#"{"status":"declined"}"#;
        let request: UpdateServiceBookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, "declined");
        assert_eq!(request.decline_reason, None);
    }
}
