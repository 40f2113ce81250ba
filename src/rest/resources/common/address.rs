//! Postal address used for shipping and billing at checkout.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Country used when none is given.
pub const DEFAULT_COUNTRY: &str = "Turkey";

/// A shipping or billing address.
///
/// City, district, neighborhood, street and building number are required;
/// the apartment number is optional. Use [`Address::new`] to build a
/// validated address from form input.
///
/// # Example
///
/// ```rust
/// use eshop_client::rest::resources::Address;
///
/// let address = Address::new("İstanbul", "Kadıköy", "Moda", "Bahariye Cd.", "12")
///     .unwrap()
///     .with_apartment_no("4");
///
/// assert_eq!(address.country, "Turkey");
/// assert!(Address::new("İstanbul", "", "Moda", "Bahariye Cd.", "12").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// City (il).
    #[serde(default)]
    pub city: String,

    /// District (ilçe).
    #[serde(default)]
    pub district: String,

    /// Neighborhood (mahalle).
    #[serde(default)]
    pub neighborhood: String,

    /// Street name.
    #[serde(default)]
    pub street: String,

    /// Building number.
    #[serde(default)]
    pub building_no: String,

    /// Apartment or flat number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apartment_no: Option<String>,

    /// Country name.
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Address {
    /// Creates an address from form input, trimming every field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] naming the first required field
    /// that is blank.
    pub fn new(
        city: &str,
        district: &str,
        neighborhood: &str,
        street: &str,
        building_no: &str,
    ) -> Result<Self, ValidationError> {
        let address = Self {
            city: city.trim().to_string(),
            district: district.trim().to_string(),
            neighborhood: neighborhood.trim().to_string(),
            street: street.trim().to_string(),
            building_no: building_no.trim().to_string(),
            apartment_no: None,
            country: default_country(),
        };
        address.validate()?;
        Ok(address)
    }

    /// Sets the apartment number. Blank input clears it.
    #[must_use]
    pub fn with_apartment_no(mut self, apartment_no: &str) -> Self {
        let apartment_no = apartment_no.trim();
        self.apartment_no = (!apartment_no.is_empty()).then(|| apartment_no.to_string());
        self
    }

    /// Sets the country. Blank input keeps the default.
    #[must_use]
    pub fn with_country(mut self, country: &str) -> Self {
        let country = country.trim();
        if !country.is_empty() {
            self.country = country.to_string();
        }
        self
    }

    /// Checks that every required field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Empty`] naming the first blank field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("city", &self.city),
            ("district", &self.district),
            ("neighborhood", &self.neighborhood),
            ("street", &self.street),
            ("buildingNo", &self.building_no),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::Empty { field });
            }
        }
        Ok(())
    }
}
