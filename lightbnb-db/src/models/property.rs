//! Property inputs: prices, search filters and new listings

use serde::{Deserialize, Serialize};

use super::validation::{non_negative, required_text};
use super::ValidationError;

/// Column width of the text columns in `properties`
const MAX_FIELD_LEN: usize = 255;

/// Highest review score a property can receive
const MAX_RATING: f64 = 5.0;

/// Price in minor currency units, as stored in `properties.cost_per_night`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(i32);

impl Cents {
    pub fn new(cents: i32) -> Result<Self, ValidationError> {
        non_negative("cost_per_night", cents).map(Self)
    }

    /// Convert a price in major units (dollars) to cents.
    ///
    /// # Example
    /// ```
    /// use lightbnb_db::models::Cents;
    ///
    /// assert_eq!(Cents::from_dollars("price", 12.5).unwrap().get(), 1250);
    /// assert!(Cents::from_dollars("price", -1.0).is_err());
    /// ```
    pub fn from_dollars(field: &'static str, dollars: f64) -> Result<Self, ValidationError> {
        let max = f64::from(i32::MAX) / 100.0;

        if !dollars.is_finite() || dollars < 0.0 || dollars > max {
            return Err(ValidationError::OutOfRange {
                field,
                min: 0.0,
                max,
            });
        }

        // Bounded above, so the cast cannot saturate.
        Ok(Self((dollars * 100.0).round() as i32))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

/// Lower bound on an individual review score.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct MinimumRating(f64);

impl MinimumRating {
    pub fn new(rating: f64) -> Result<Self, ValidationError> {
        if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "minimum_rating",
                min: 0.0,
                max: MAX_RATING,
            });
        }
        Ok(Self(rating))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Case-sensitive substring filter on `properties.city`.
///
/// The term is kept verbatim, surrounding spaces included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFilter(String);

impl CityFilter {
    pub fn new(city: &str) -> Result<Self, ValidationError> {
        if city.trim().is_empty() {
            return Err(ValidationError::Empty { field: "city" });
        }
        if city.chars().count() > MAX_FIELD_LEN {
            return Err(ValidationError::TooLong {
                field: "city",
                max: MAX_FIELD_LEN,
            });
        }
        Ok(Self(city.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `LIKE` pattern matching the city anywhere in the column.
    ///
    /// `%`, `_` and `\` in the input are escaped so they match literally.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.0.len() + 2);
        pattern.push('%');
        for c in self.0.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Loose option bag for property search, as sent by the web form.
///
/// Prices are in dollars. Missing, blank or zero values mean "no filter".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertySearchParams {
    pub city: Option<String>,
    pub owner_id: Option<i32>,
    pub minimum_price_per_night: Option<f64>,
    pub maximum_price_per_night: Option<f64>,
    pub minimum_rating: Option<f64>,
}

/// Validated property search filters. All present filters combine with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySearch {
    city: Option<CityFilter>,
    owner_id: Option<i32>,
    minimum_price: Option<Cents>,
    maximum_price: Option<Cents>,
    minimum_rating: Option<MinimumRating>,
}

impl PropertySearch {
    pub fn city(&self) -> Option<&CityFilter> {
        self.city.as_ref()
    }

    pub fn owner_id(&self) -> Option<i32> {
        self.owner_id
    }

    /// Exclusive lower bound on `cost_per_night`
    pub fn minimum_price(&self) -> Option<Cents> {
        self.minimum_price
    }

    /// Exclusive upper bound on `cost_per_night`
    pub fn maximum_price(&self) -> Option<Cents> {
        self.maximum_price
    }

    pub fn minimum_rating(&self) -> Option<MinimumRating> {
        self.minimum_rating
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl TryFrom<PropertySearchParams> for PropertySearch {
    type Error = ValidationError;

    fn try_from(params: PropertySearchParams) -> Result<Self, Self::Error> {
        let city = params
            .city
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(CityFilter::new)
            .transpose()?;

        let owner_id = match params.owner_id.filter(|&id| id != 0) {
            Some(id) if id < 0 => {
                return Err(ValidationError::OutOfRange {
                    field: "owner_id",
                    min: 1.0,
                    max: f64::from(i32::MAX),
                })
            }
            other => other,
        };

        let minimum_price = params
            .minimum_price_per_night
            .filter(|&d| d != 0.0)
            .map(|d| Cents::from_dollars("minimum_price_per_night", d))
            .transpose()?;
        let maximum_price = params
            .maximum_price_per_night
            .filter(|&d| d != 0.0)
            .map(|d| Cents::from_dollars("maximum_price_per_night", d))
            .transpose()?;

        if let (Some(low), Some(high)) = (minimum_price, maximum_price) {
            if low > high {
                return Err(ValidationError::InvalidRange {
                    low: "minimum_price_per_night",
                    high: "maximum_price_per_night",
                });
            }
        }

        let minimum_rating = params
            .minimum_rating
            .filter(|&r| r != 0.0)
            .map(MinimumRating::new)
            .transpose()?;

        Ok(Self {
            city,
            owner_id,
            minimum_price,
            maximum_price,
            minimum_rating,
        })
    }
}

/// Loose request body for a new listing. `cost_per_night` is in cents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPropertyParams {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
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

/// Validated insert payload for `properties`
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: Cents,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

impl TryFrom<NewPropertyParams> for NewProperty {
    type Error = ValidationError;

    fn try_from(p: NewPropertyParams) -> Result<Self, Self::Error> {
        if p.owner_id <= 0 {
            return Err(ValidationError::OutOfRange {
                field: "owner_id",
                min: 1.0,
                max: f64::from(i32::MAX),
            });
        }

        let description = p
            .description
            .map(|d| d.trim().to_owned())
            .filter(|d| !d.is_empty());

        Ok(Self {
            owner_id: p.owner_id,
            title: required_text("title", &p.title, MAX_FIELD_LEN)?,
            description,
            thumbnail_photo_url: required_text(
                "thumbnail_photo_url",
                &p.thumbnail_photo_url,
                MAX_FIELD_LEN,
            )?,
            cover_photo_url: required_text("cover_photo_url", &p.cover_photo_url, MAX_FIELD_LEN)?,
            cost_per_night: Cents::new(p.cost_per_night)?,
            parking_spaces: non_negative("parking_spaces", p.parking_spaces)?,
            number_of_bathrooms: non_negative("number_of_bathrooms", p.number_of_bathrooms)?,
            number_of_bedrooms: non_negative("number_of_bedrooms", p.number_of_bedrooms)?,
            country: required_text("country", &p.country, MAX_FIELD_LEN)?,
            street: required_text("street", &p.street, MAX_FIELD_LEN)?,
            city: required_text("city", &p.city, MAX_FIELD_LEN)?,
            province: required_text("province", &p.province, MAX_FIELD_LEN)?,
            post_code: required_text("post_code", &p.post_code, MAX_FIELD_LEN)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> NewPropertyParams {
        NewPropertyParams {
            owner_id: 1,
            title: "Speed lamp".into(),
            description: Some("  ".into()),
            thumbnail_photo_url: "https://images.pexels.com/photos/2086676/thumb.jpeg".into(),
            cover_photo_url: "https://images.pexels.com/photos/2086676/cover.jpeg".into(),
            cost_per_night: 93061,
            parking_spaces: 6,
            number_of_bathrooms: 4,
            number_of_bedrooms: 8,
            country: "Canada".into(),
            street: "536 Namsub Highway".into(),
            city: "Sotboske".into(),
            province: "Quebec".into(),
            post_code: "28142".into(),
        }
    }

    #[test]
    fn dollars_to_cents() {
        assert_eq!(Cents::from_dollars("p", 0.0).unwrap().get(), 0);
        assert_eq!(Cents::from_dollars("p", 100.0).unwrap().get(), 10_000);
        assert_eq!(Cents::from_dollars("p", 19.99).unwrap().get(), 1999);
    }

    #[test]
    fn dollars_out_of_range() {
        assert!(Cents::from_dollars("p", f64::NAN).is_err());
        assert!(Cents::from_dollars("p", f64::INFINITY).is_err());
        assert!(Cents::from_dollars("p", 30_000_000.0).is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(MinimumRating::new(0.0).is_ok());
        assert!(MinimumRating::new(4.5).is_ok());
        assert!(MinimumRating::new(5.0).is_ok());
        assert!(MinimumRating::new(5.1).is_err());
        assert!(MinimumRating::new(-1.0).is_err());
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(CityFilter::new("Van").unwrap().like_pattern(), "%Van%");
        assert_eq!(
            CityFilter::new("100%_real\\").unwrap().like_pattern(),
            "%100\\%\\_real\\\\%"
        );
    }

    #[test]
    fn empty_params_mean_no_filters() {
        let search = PropertySearch::try_from(PropertySearchParams::default()).unwrap();
        assert!(search.is_empty());
    }

    #[test]
    fn blank_city_is_skipped() {
        let search = PropertySearch::try_from(PropertySearchParams {
            city: Some("   ".into()),
            ..Default::default()
        })
        .unwrap();
        assert!(search.city().is_none());
    }

    #[test]
    fn prices_converted_to_cents() {
        let search = PropertySearch::try_from(PropertySearchParams {
            minimum_price_per_night: Some(50.0),
            maximum_price_per_night: Some(150.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(search.minimum_price(), Some(Cents(5000)));
        assert_eq!(search.maximum_price(), Some(Cents(15000)));
    }

    #[test]
    fn inverted_price_range_rejected() {
        let err = PropertySearch::try_from(PropertySearchParams {
            minimum_price_per_night: Some(200.0),
            maximum_price_per_night: Some(100.0),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidRange { .. }));
    }

    #[test]
    fn negative_owner_rejected() {
        let err = PropertySearch::try_from(PropertySearchParams {
            owner_id: Some(-3),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { field: "owner_id", .. }));
    }

    #[test]
    fn zero_values_are_skipped() {
        let search = PropertySearch::try_from(PropertySearchParams {
            city: None,
            owner_id: Some(0),
            minimum_price_per_night: Some(0.0),
            maximum_price_per_night: Some(0.0),
            minimum_rating: Some(0.0),
        })
        .unwrap();
        assert!(search.is_empty());
    }

    #[test]
    fn zero_maximum_does_not_invert_range() {
        let search = PropertySearch::try_from(PropertySearchParams {
            minimum_price_per_night: Some(80.0),
            maximum_price_per_night: Some(0.0),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(search.minimum_price(), Some(Cents(8000)));
        assert!(search.maximum_price().is_none());
    }

    #[test]
    fn city_term_kept_verbatim() {
        let search = PropertySearch::try_from(PropertySearchParams {
            city: Some(" Van".into()),
            ..Default::default()
        })
        .unwrap();
        let city = search.city().unwrap();
        assert_eq!(city.as_str(), " Van");
        assert_eq!(city.like_pattern(), "% Van%");
    }

    #[test]
    fn params_deserialize_from_query_json() {
        let params: PropertySearchParams =
            serde_json::from_str(r#"{"city": "Vancouver", "minimum_rating": 4}"#).unwrap();
        let search = PropertySearch::try_from(params).unwrap();
        assert_eq!(search.city().map(CityFilter::as_str), Some("Vancouver"));
        assert_eq!(search.minimum_rating().map(MinimumRating::get), Some(4.0));
    }

    #[test]
    fn new_property_validates() {
        let property = NewProperty::try_from(listing()).unwrap();
        assert_eq!(property.cost_per_night.get(), 93061);
        assert!(property.description.is_none());
    }

    #[test]
    fn new_property_rejects_blank_title() {
        let mut params = listing();
        params.title = "".into();
        assert_eq!(
            NewProperty::try_from(params).unwrap_err(),
            ValidationError::Empty { field: "title" }
        );
    }

    #[test]
    fn new_property_rejects_negative_price() {
        let mut params = listing();
        params.cost_per_night = -5;
        assert!(NewProperty::try_from(params).is_err());
    }
}
