//! User repository
//!
//! - lookups by email or id return `Ok(None)` on a miss
//! - create: INSERT ... RETURNING, duplicate email is a `Conflict`

use serde::Serialize;
use sqlx::{FromRow, PgExecutor, PgPool};

use crate::db::DbError;
use crate::models::NewUser;

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Exact match on `users.email`; case is not normalized.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a user, returning the stored row with its new id.
    pub async fn create(&self, user: &NewUser) -> Result<User, DbError> {
        insert_user(self.pool, user).await
    }
}

/// INSERT on any executor, so seeding can run inside a transaction.
pub(crate) async fn insert_user<'e, E>(executor: E, user: &NewUser) -> Result<User, DbError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as(
        r#"
        INSERT INTO users (name, email, password)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, password
        "#,
    )
    .bind(user.name())
    .bind(user.email().as_str())
    .bind(user.password())
    .fetch_one(executor)
    .await
    .map_err(|e| DbError::from_insert(e, "user", "email"))
}
