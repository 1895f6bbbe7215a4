//! # API Module
//!
//! Business logic for the marketplace, kept independent of the HTTP layer.
//! Each submodule handles one domain:
//!
//! - [`booking`] - Pet adoption bookings and their mirrored pet availability
//! - [`appointment`] - Vet service appointments and slot conflicts
//! - [`catalog`] - Accounts, pet listings and published vet services

pub mod appointment;
pub mod booking;
pub mod catalog;
