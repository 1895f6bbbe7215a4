pub mod account;
pub mod booking;
pub mod pet;
pub mod service;
pub mod service_booking;
