//! Pet adoption booking endpoints.

use crate::{api, rest::AppState};
use ntex::web;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub pet_id: i64,
    pub buyer_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct BookingPath {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct SellerPath {
    pub seller_id: i64,
}

/// Creates an adoption booking for an available pet.
///
/// Answers 400 when the pet already has an active booking and 404 when the
/// pet or buyer is unknown.
#[web::post("")]
pub async fn create_booking(
    form: web::types::Json<CreateBookingRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let booking = api::booking::reserve_pet(form.pet_id, form.buyer_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Created().json(&serde_json::json!({
        "message": "booking request sent to the seller",
        "booking": api::booking::BookingSchema::from(booking),
    })))
}

/// Applies the seller's accept/decline decision to a booking.
#[web::patch("/{id}")]
pub async fn update_booking(
    path: web::types::Path<BookingPath>,
    form: web::types::Json<UpdateBookingRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let booking = api::booking::resolve_booking(path.id, &form.status, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&serde_json::json!({
        "message": "booking updated",
        "booking": api::booking::BookingSchema::from(booking),
    })))
}

/// Lists every booking placed on the seller's pets, with pet and buyer
/// summaries attached.
#[web::get("/seller/{seller_id}")]
pub async fn seller_bookings(
    path: web::types::Path<SellerPath>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let bookings = api::booking::seller_bookings(path.seller_id, &app_state.repo).await?;

    Ok(web::HttpResponse::Ok().json(&bookings))
}
