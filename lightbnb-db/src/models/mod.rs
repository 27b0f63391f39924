//! Gateway inputs with validation at construction
//!
//! Loose option bags (`*Params`) from the web layer are converted into
//! these types before any SQL is built. Invalid input returns
//! ValidationError; absent options are simply skipped.

pub mod limit;
pub mod property;
pub mod user;
pub mod validation;

pub use limit::{Limit, DEFAULT_LIMIT};
pub use property::{
    Cents, CityFilter, MinimumRating, NewProperty, NewPropertyParams, PropertySearch,
    PropertySearchParams,
};
pub use user::{Email, NewUser};
pub use validation::ValidationError;
