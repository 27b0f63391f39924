//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool from configuration - nothing hard-coded
//! - Every value is a bind parameter; dynamic SQL only adds fixed fragments
//! - Rely on DB constraints, map conflicts - no check-then-insert
//! - Failures are `Err`, never returned in place of data

pub mod error;
pub mod pool;
pub mod repos;

pub use error::DbError;
pub use pool::{connect_options, create_pool, create_pool_from_config};
pub use repos::*;
