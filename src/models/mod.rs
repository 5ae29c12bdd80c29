//! Database models

pub mod booking;
pub mod contact;
pub mod location;
pub mod tour;

pub use booking::{Booking, Coupon, NewBooking};
pub use contact::{ContactMessage, NewContactMessage};
pub use location::Location;
pub use tour::{NewReview, Review, Tour};
