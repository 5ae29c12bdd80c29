//! HTTP route handlers

pub mod bookings;
pub mod contact;
pub mod locations;
pub mod quotes;
pub mod reviews;
pub mod tours;
