//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Aggregates (average rating) come from a JOIN + GROUP BY in one query
//! - Inserts use RETURNING so ids come from the table sequence
//! - Not-found is `Ok(None)`

pub mod properties;
pub mod reservations;
pub mod users;

pub use properties::{Property, PropertyRepo, PropertyWithRating};
pub use reservations::{ReservationRepo, ReservationWithProperty};
pub use users::{User, UserRepo};
