pub mod accounts;
pub mod appointments;
pub mod bookings;
pub mod errors;
pub mod pets;
pub mod routes;
pub mod vet_services;

use crate::repo;

pub struct AppState {
    pub repo: repo::ImplAppRepo,
}
