//! # Tide Pool Finder Core Library
//!
//! Finds coastal spots worth visiting for tide pooling today: a location is
//! worth the trip when one of its low tides falls between sunrise and sunset.
//!
//! ## Data Flow
//! 1. **Fetch**: tide-forecast.com and timeanddate.com pages over HTTP, with
//!    retry on transient failures ([`fetch`])
//! 2. **Extract**: today's low tides ([`tide_data`]) and sun times
//!    ([`sun_data`]) from the page tables
//! 3. **Normalize**: `H:MM am|pm` strings to timestamps on today's date
//!    ([`clock`])
//! 4. **Evaluate**: low tides strictly inside the daylight window
//!    ([`evaluate`])
//!
//! [`finder::TidePoolFinder`] ties the steps together and skips any location
//! whose pages cannot be fetched or read. Nothing is cached or persisted.
//!
//! ## Core Types
//! - [`Location`]: a city with its tide page and sun page URLs
//! - [`config::Config`]: the location list and HTTP retry policy

use serde::{Deserialize, Serialize};

// Module declarations
pub mod clock;
pub mod config;
pub mod evaluate;
pub mod fetch;
pub mod finder;
pub mod markup;
pub mod sun_data;
pub mod tide_data;

/// A coastal spot to check, with the two pages describing its day.
///
/// # Example
/// ```
/// use tide_pool_lib::Location;
///
/// let spot = Location::new(
///     "Half Moon Bay, California",
///     "https://www.tide-forecast.com/locations/Half-Moon-Bay-California/tides/latest",
///     "https://www.timeanddate.com/sun/@5354943",
/// );
/// assert_eq!(spot.city, "Half Moon Bay, California");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Display name used in every report line
    pub city: String,
    /// tide-forecast.com "latest" page for the location
    pub tide_url: String,
    /// timeanddate.com sun page for the location
    pub sun_url: String,
}

impl Location {
    pub fn new(
        city: impl Into<String>,
        tide_url: impl Into<String>,
        sun_url: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            tide_url: tide_url.into(),
            sun_url: sun_url.into(),
        }
    }
}
