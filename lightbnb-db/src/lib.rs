//! lightbnb-db: PostgreSQL query gateway for LightBnB
//!
//! Users, reservations and property search over a sqlx pool, with
//! validated inputs and fixture seeding.

pub mod db;
pub mod gateway;
pub mod models;
pub mod seed;

pub use db::{DbError, Property, PropertyWithRating, ReservationWithProperty, User};
pub use gateway::Gateway;
pub use seed::{seed, SeedError, SeedReport};
