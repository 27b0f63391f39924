//! Seed fixtures for users and properties
//!
//! The fixture files are JSON objects keyed by the fixture id
//! (`{"1": {...}, "2": {...}}`). A plain JSON array is accepted too.
//! Records come back ordered by fixture id.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::config::FixturesConfig;
use crate::error::{CoreError, Result};

/// A user as it appears in `users.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureUser {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A property as it appears in `properties.json`
///
/// `owner_id` refers to a [`FixtureUser::id`], not a database id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureProperty {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Minor currency units (cents)
    pub cost_per_night: i32,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// Both fixture collections
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub users: Vec<FixtureUser>,
    pub properties: Vec<FixtureProperty>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile<T> {
    Keyed(BTreeMap<String, T>),
    List(Vec<T>),
}

trait FixtureId {
    fn fixture_id(&self) -> i32;
}

impl FixtureId for FixtureUser {
    fn fixture_id(&self) -> i32 {
        self.id
    }
}

impl FixtureId for FixtureProperty {
    fn fixture_id(&self) -> i32 {
        self.id
    }
}

fn parse_records<T>(json: &str, context: &str) -> Result<Vec<T>>
where
    T: DeserializeOwned + FixtureId,
{
    let file: FixtureFile<T> =
        serde_json::from_str(json).map_err(|e| CoreError::json(context, e))?;

    let mut records = match file {
        FixtureFile::Keyed(map) => map.into_values().collect::<Vec<_>>(),
        FixtureFile::List(list) => list,
    };
    records.sort_by_key(|record| record.fixture_id());
    Ok(records)
}

fn read_records<T>(path: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned + FixtureId,
{
    let json = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    parse_records(&json, &path.display().to_string())
}

pub fn parse_users(json: &str) -> Result<Vec<FixtureUser>> {
    parse_records(json, "users fixture")
}

pub fn parse_properties(json: &str) -> Result<Vec<FixtureProperty>> {
    parse_records(json, "properties fixture")
}

impl Fixtures {
    /// Load `users.json` and `properties.json` from the configured directory.
    pub fn load(config: &FixturesConfig) -> Result<Self> {
        let users = read_records(&config.users_path())?;
        let properties = read_records(&config.properties_path())?;

        tracing::info!(
            dir = %config.dir.display(),
            users = users.len(),
            properties = properties.len(),
            "fixtures loaded"
        );

        Ok(Self { users, properties })
    }
}
