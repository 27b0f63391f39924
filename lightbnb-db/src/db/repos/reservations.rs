//! Reservation repository
//!
//! Read only: a guest's completed stays with the reserved property and its
//! average rating.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::Property;
use crate::db::DbError;
use crate::models::Limit;

/// A reservation joined with its property and average rating
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ReservationWithProperty {
    pub reservation_id: i32,
    pub guest_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: f64,
}

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Completed stays for a guest (`end_date` before today), earliest first.
    pub async fn list_past_for_guest(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<ReservationWithProperty>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                properties.*,
                reservations.id AS reservation_id,
                reservations.guest_id,
                reservations.start_date,
                reservations.end_date,
                avg(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            JOIN property_reviews ON properties.id = property_reviews.property_id
            WHERE reservations.guest_id = $1
              AND reservations.end_date < CURRENT_DATE
            GROUP BY properties.id, reservations.id
            ORDER BY reservations.start_date, reservations.id
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit.as_i64())
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
