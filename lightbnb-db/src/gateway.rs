//! Query gateway used by the web controller
//!
//! One method per operation the controller needs. Inputs are already
//! validated (see [`crate::models`]); every failure is an `Err`.

use lightbnb_core::DatabaseConfig;
use sqlx::PgPool;
use tracing::instrument;

use crate::db::{
    create_pool_from_config, DbError, Property, PropertyRepo, PropertyWithRating,
    ReservationRepo, ReservationWithProperty, User, UserRepo,
};
use crate::models::{Limit, NewProperty, NewUser, PropertySearch};

/// Cloneable handle over the connection pool
#[derive(Clone)]
pub struct Gateway {
    pool: PgPool,
}

impl Gateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build the pool from configuration and wrap it.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        let pool = create_pool_from_config(config).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[instrument(skip_all)]
    pub async fn get_user_with_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let user = UserRepo::new(&self.pool).find_by_email(email).await?;
        tracing::debug!(found = user.is_some(), "user lookup by email");
        Ok(user)
    }

    #[instrument(skip(self))]
    pub async fn get_user_with_id(&self, id: i32) -> Result<Option<User>, DbError> {
        UserRepo::new(&self.pool).find_by_id(id).await
    }

    #[instrument(skip_all)]
    pub async fn add_user(&self, user: &NewUser) -> Result<User, DbError> {
        let user = UserRepo::new(&self.pool).create(user).await?;
        tracing::info!(user_id = user.id, "user added");
        Ok(user)
    }

    /// Completed reservations for `guest_id`, ordered by start date.
    #[instrument(skip(self, limit), fields(limit = limit.get()))]
    pub async fn get_all_reservations(
        &self,
        guest_id: i32,
        limit: Limit,
    ) -> Result<Vec<ReservationWithProperty>, DbError> {
        let rows = ReservationRepo::new(&self.pool)
            .list_past_for_guest(guest_id, limit)
            .await?;
        tracing::debug!(count = rows.len(), "reservations fetched");
        Ok(rows)
    }

    /// Properties matching `search`, ordered by cost per night.
    #[instrument(skip_all, fields(limit = limit.get()))]
    pub async fn get_all_properties(
        &self,
        search: &PropertySearch,
        limit: Limit,
    ) -> Result<Vec<PropertyWithRating>, DbError> {
        let rows = PropertyRepo::new(&self.pool).search(search, limit).await?;
        tracing::debug!(count = rows.len(), "properties fetched");
        Ok(rows)
    }

    #[instrument(skip_all, fields(owner_id = property.owner_id))]
    pub async fn add_property(&self, property: &NewProperty) -> Result<Property, DbError> {
        let property = PropertyRepo::new(&self.pool).create(property).await?;
        tracing::info!(property_id = property.id, "property added");
        Ok(property)
    }
}
