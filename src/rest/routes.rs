//! REST route configuration module.
//!
//! Endpoints are grouped by resource into logical scopes. Handlers stay thin
//! and delegate to the api layer; every response body is JSON.

use super::{accounts, appointments, bookings, pets, vet_services};
use ntex::web;

/// Configures account registration routes.
///
/// # Routes
/// - `POST /accounts/buyers` - Register a buyer
/// - `GET /accounts/buyers/{buyer_id}` - Buyer details
/// - `POST /accounts/sellers` - Register a seller
/// - `GET /accounts/sellers/{seller_id}` - Seller details
/// - `POST /accounts/vets` - Register a veterinarian
/// - `GET /accounts/vets/{vet_id}` - Veterinarian details
pub fn accounts(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/accounts").service((
        accounts::register_buyer,
        accounts::buyer_details,
        accounts::register_seller,
        accounts::seller_details,
        accounts::register_vet,
        accounts::vet_details,
    )));
}

/// Configures pet listing routes.
///
/// # Routes
/// - `POST /pets` - Publish a pet listing
/// - `GET /pets` - Pets currently open for adoption
/// - `GET /pets/{pet_id}` - Listing details
/// - `GET /pets/seller/{seller_id}` - A seller's listings
pub fn pets(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/pets").service((
        pets::create_pet,
        pets::available_pets,
        pets::seller_pets,
        pets::pet_details,
    )));
}

/// Configures vet service catalog routes.
///
/// # Routes
/// - `POST /vetservices` - Publish a service
/// - `GET /vetservices/vet/{vet_id}` - Services a vet offers
pub fn vet_services(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/vetservices").service((
        vet_services::create_vet_service,
        vet_services::services_by_vet,
    )));
}

/// Configures adoption booking routes.
///
/// # Routes
/// - `POST /bookings` - Reserve an available pet
/// - `PATCH /bookings/{id}` - Accept or decline a booking
/// - `GET /bookings/seller/{seller_id}` - Bookings on a seller's pets
pub fn bookings(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/bookings").service((
        bookings::create_booking,
        bookings::update_booking,
        bookings::seller_bookings,
    )));
}

/// Configures vet appointment routes.
///
/// # Routes
/// - `POST /servicebookings` - Request an appointment slot
/// - `PUT /servicebookings/{id}` - Accept/decline/re-activate an appointment
/// - `DELETE /servicebookings/{id}` - Remove a declined appointment
/// - `GET /servicebookings/vet-appointments/{vet_id}` - A vet's agenda
/// - `GET /servicebookings/buyer-appointments/{buyer_id}` - A buyer's appointments
/// - `GET /servicebookings/seller-appointments/{seller_id}` - A seller's appointments
pub fn service_bookings(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/servicebookings").service((
        appointments::create_service_booking,
        appointments::update_service_booking,
        appointments::delete_service_booking,
        appointments::vet_appointments,
        appointments::buyer_appointments,
        appointments::seller_appointments,
    )));
}
