//! Load fixture users and properties into the database
//!
//! Users are inserted first; each fixture property's `owner_id` is then
//! rewritten to the id the database gave that owner. Everything runs in one
//! transaction, so a failure leaves nothing behind.

use std::collections::BTreeMap;

use lightbnb_core::{FixtureProperty, Fixtures};
use sqlx::PgPool;

use crate::db::repos::properties::insert_property;
use crate::db::repos::users::insert_user;
use crate::db::DbError;
use crate::models::{NewProperty, NewPropertyParams, NewUser, ValidationError};

/// Seeding failure
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error("invalid {fixture} fixture {id}: {source}")]
    Invalid {
        fixture: &'static str,
        id: i32,
        #[source]
        source: ValidationError,
    },

    #[error("property fixture {property_id} references unknown owner {owner_id}")]
    UnknownOwner { property_id: i32, owner_id: i32 },
}

impl From<sqlx::Error> for SeedError {
    fn from(e: sqlx::Error) -> Self {
        Self::Db(DbError::Sqlx(e))
    }
}

/// What a seed run inserted
#[derive(Debug, Clone, Default)]
pub struct SeedReport {
    /// Fixture user id -> database user id
    pub user_ids: BTreeMap<i32, i32>,
    /// Fixture property id -> database property id
    pub property_ids: BTreeMap<i32, i32>,
}

/// Insert all fixtures in a single transaction.
pub async fn seed(pool: &PgPool, fixtures: &Fixtures) -> Result<SeedReport, SeedError> {
    let mut report = SeedReport::default();
    let mut tx = pool.begin().await?;

    for fixture in &fixtures.users {
        let user = NewUser::new(&fixture.name, &fixture.email, &fixture.password).map_err(
            |source| SeedError::Invalid {
                fixture: "user",
                id: fixture.id,
                source,
            },
        )?;
        let row = insert_user(&mut *tx, &user).await?;
        report.user_ids.insert(fixture.id, row.id);
    }

    for fixture in &fixtures.properties {
        let params = property_params(fixture, &report.user_ids)?;
        let property = NewProperty::try_from(params).map_err(|source| SeedError::Invalid {
            fixture: "property",
            id: fixture.id,
            source,
        })?;
        let row = insert_property(&mut *tx, &property).await?;
        report.property_ids.insert(fixture.id, row.id);
    }

    tx.commit().await?;

    tracing::info!(
        users = report.user_ids.len(),
        properties = report.property_ids.len(),
        "fixtures seeded"
    );
    Ok(report)
}

/// Turn a fixture property into insert params, remapping its owner.
pub(crate) fn property_params(
    fixture: &FixtureProperty,
    user_ids: &BTreeMap<i32, i32>,
) -> Result<NewPropertyParams, SeedError> {
    let owner_id = *user_ids
        .get(&fixture.owner_id)
        .ok_or(SeedError::UnknownOwner {
            property_id: fixture.id,
            owner_id: fixture.owner_id,
        })?;

    Ok(NewPropertyParams {
        owner_id,
        title: fixture.title.clone(),
        description: fixture.description.clone(),
        thumbnail_photo_url: fixture.thumbnail_photo_url.clone(),
        cover_photo_url: fixture.cover_photo_url.clone(),
        cost_per_night: fixture.cost_per_night,
        parking_spaces: fixture.parking_spaces,
        number_of_bathrooms: fixture.number_of_bathrooms,
        number_of_bedrooms: fixture.number_of_bedrooms,
        country: fixture.country.clone(),
        street: fixture.street.clone(),
        city: fixture.city.clone(),
        province: fixture.province.clone(),
        post_code: fixture.post_code.clone(),
    })
}
