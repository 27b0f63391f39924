//! Property repository
//!
//! - search: optional filters composed into one parameterized query,
//!   average rating via JOIN + GROUP BY
//! - create: INSERT ... RETURNING, id issued by the table sequence

use serde::Serialize;
use sqlx::{FromRow, PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::db::DbError;
use crate::models::{Limit, NewProperty, PropertySearch};

/// Property record from database
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Minor currency units (cents)
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// Property with its average review score
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct PropertyWithRating {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: f64,
}

const SEARCH_SELECT: &str = "SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating \
     FROM properties \
     JOIN property_reviews ON properties.id = property_reviews.property_id";

/// Emits `WHERE` before the first condition and `AND` before the rest.
#[derive(Debug, Default)]
struct WhereClause {
    started: bool,
}

impl WhereClause {
    fn push(&mut self, builder: &mut QueryBuilder<'_, Postgres>, condition: &str) {
        builder.push(if self.started { " AND " } else { " WHERE " });
        builder.push(condition);
        self.started = true;
    }
}

/// Build the property search query.
///
/// `minimum_rating` is checked against each review row before grouping, so a
/// property qualifies when at least one of its reviews meets the bound.
pub(crate) fn search_query(search: &PropertySearch, limit: Limit) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(SEARCH_SELECT);
    let mut clause = WhereClause::default();

    if let Some(city) = search.city() {
        clause.push(&mut builder, "properties.city LIKE ");
        builder.push_bind(city.like_pattern());
    }
    if let Some(owner_id) = search.owner_id() {
        clause.push(&mut builder, "properties.owner_id = ");
        builder.push_bind(owner_id);
    }
    if let Some(min) = search.minimum_price() {
        clause.push(&mut builder, "properties.cost_per_night > ");
        builder.push_bind(min.get());
    }
    if let Some(max) = search.maximum_price() {
        clause.push(&mut builder, "properties.cost_per_night < ");
        builder.push_bind(max.get());
    }
    if let Some(rating) = search.minimum_rating() {
        clause.push(&mut builder, "property_reviews.rating >= ");
        builder.push_bind(rating.get());
    }

    builder.push(" GROUP BY properties.id ORDER BY properties.cost_per_night, properties.id LIMIT ");
    builder.push_bind(limit.as_i64());
    builder
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Properties matching every present filter, cheapest first.
    pub async fn search(
        &self,
        search: &PropertySearch,
        limit: Limit,
    ) -> Result<Vec<PropertyWithRating>, DbError> {
        let mut builder = search_query(search, limit);
        tracing::debug!(sql = builder.sql(), ?search, "property search");

        let rows = builder
            .build_query_as::<PropertyWithRating>()
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// Insert a property, returning the stored row with its new id.
    pub async fn create(&self, property: &NewProperty) -> Result<Property, DbError> {
        insert_property(self.pool, property).await
    }
}

/// INSERT on any executor, so seeding can run inside a transaction.
pub(crate) async fn insert_property<'e, E>(
    executor: E,
    property: &NewProperty,
) -> Result<Property, DbError>
where
    E: PgExecutor<'e>,
{
    let row = sqlx::query_as(
        r#"
        INSERT INTO properties (
            owner_id, title, description, thumbnail_photo_url, cover_photo_url,
            cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
            country, street, city, province, post_code
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(property.owner_id)
    .bind(&property.title)
    .bind(property.description.as_deref())
    .bind(&property.thumbnail_photo_url)
    .bind(&property.cover_photo_url)
    .bind(property.cost_per_night.get())
    .bind(property.parking_spaces)
    .bind(property.number_of_bathrooms)
    .bind(property.number_of_bedrooms)
    .bind(&property.country)
    .bind(&property.street)
    .bind(&property.city)
    .bind(&property.province)
    .bind(&property.post_code)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PropertySearchParams;

    fn sql_for(params: PropertySearchParams, limit: u32) -> String {
        let search = PropertySearch::try_from(params).unwrap();
        search_query(&search, Limit::new(limit).unwrap()).sql().to_owned()
    }

    #[test]
    fn no_filters_no_where() {
        let sql = sql_for(PropertySearchParams::default(), 10);
        assert!(!sql.contains("WHERE"));
        assert!(!sql.contains(" AND "));
        assert!(sql.ends_with("GROUP BY properties.id ORDER BY properties.cost_per_night, properties.id LIMIT $1"));
    }

    #[test]
    fn first_filter_gets_where_even_without_city() {
        let sql = sql_for(
            PropertySearchParams {
                owner_id: Some(3),
                ..Default::default()
            },
            10,
        );
        assert!(sql.contains(" WHERE properties.owner_id = $1 GROUP BY"));
        assert!(!sql.contains(" AND "));
    }

    #[test]
    fn later_filters_joined_with_and() {
        let sql = sql_for(
            PropertySearchParams {
                city: Some("Van".into()),
                owner_id: Some(3),
                minimum_price_per_night: Some(10.0),
                maximum_price_per_night: Some(500.0),
                minimum_rating: Some(4.0),
            },
            5,
        );

        assert_eq!(sql.matches(" WHERE ").count(), 1);
        assert_eq!(sql.matches(" AND ").count(), 4);
        assert!(sql.contains(
            " WHERE properties.city LIKE $1 \
             AND properties.owner_id = $2 \
             AND properties.cost_per_night > $3 \
             AND properties.cost_per_night < $4 \
             AND property_reviews.rating >= $5 GROUP BY"
        ));
        assert!(sql.ends_with("LIMIT $6"));
    }

    #[test]
    fn price_only_search() {
        let sql = sql_for(
            PropertySearchParams {
                maximum_price_per_night: Some(100.0),
                minimum_rating: Some(3.0),
                ..Default::default()
            },
            10,
        );
        assert!(sql.contains(
            " WHERE properties.cost_per_night < $1 AND property_reviews.rating >= $2 GROUP BY"
        ));
    }

    #[test]
    fn zero_price_bounds_add_no_clause() {
        let sql = sql_for(
            PropertySearchParams {
                minimum_price_per_night: Some(0.0),
                maximum_price_per_night: Some(0.0),
                ..Default::default()
            },
            10,
        );
        assert!(!sql.contains("cost_per_night <"));
        assert!(!sql.contains("cost_per_night >"));
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn average_rating_is_float() {
        let sql = sql_for(PropertySearchParams::default(), 10);
        assert!(sql.starts_with("SELECT properties.*, avg(property_reviews.rating)::float8 AS average_rating"));
    }
}
