//! # Tide Pool Finder
//!
//! Runs the scrape-parse-compare pipeline over every configured location,
//! one after another:
//!
//! 1. **Fetch** the tide page and the sun page
//! 2. **Extract** today's low tides and the sunrise/sunset times
//! 3. **Normalize** all times onto the reference day
//! 4. **Evaluate** which low tides fall in daylight and print the verdict
//!
//! A failure at any step skips only that location; it is logged and the run
//! moves on. Each location is scanned by a self-contained
//! [`TidePoolFinder::scan_location`] call with no state shared between
//! locations.

use crate::clock::{self, ClockError};
use crate::config::Config;
use crate::evaluate::{evaluate, Evaluation};
use crate::fetch::{FetchError, Fetcher};
use crate::markup::ExtractError;
use crate::{sun_data, tide_data, Location};
use chrono::NaiveDate;
use std::io::{self, Write};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Reasons a location is skipped.
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("failed to retrieve tide or sun data ({0})")]
    Fetch(#[from] FetchError),

    #[error("unexpected page structure ({0})")]
    Extract(#[from] ExtractError),

    #[error("unreadable time ({0})")]
    Clock(#[from] ClockError),
}

/// Counts from one pass over the location list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Locations that produced a verdict
    pub evaluated: usize,
    /// Locations skipped on a fetch, markup or time error
    pub skipped: usize,
}

pub struct TidePoolFinder {
    fetcher: Fetcher,
    locations: Vec<Location>,
}

impl TidePoolFinder {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(config.fetch)?,
            locations: config.locations,
        })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Scan every location in order, writing each verdict to `out`.
    ///
    /// Per-location errors are logged and counted, never returned. Only a
    /// failed write to `out` ends the run early.
    pub async fn run<W: Write>(&self, day: NaiveDate, out: &mut W) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        for location in &self.locations {
            match self.scan_location(location, day).await {
                Ok(evaluation) => {
                    writeln!(out, "{evaluation}")?;
                    summary.evaluated += 1;
                }
                Err(error) => {
                    warn!("For location {}: {}. Cannot calculate.", location.city, error);
                    summary.skipped += 1;
                }
            }
        }

        info!(
            evaluated = summary.evaluated,
            skipped = summary.skipped,
            "Finished checking tide pools"
        );
        Ok(summary)
    }

    /// Fetch, extract, normalize and evaluate a single location.
    pub async fn scan_location(
        &self,
        location: &Location,
        day: NaiveDate,
    ) -> Result<Evaluation, FinderError> {
        debug!(city = %location.city, "Checking location");

        // Both pages are requested before either result is inspected
        let tide_page = self.fetcher.fetch(&location.tide_url).await;
        let sun_page = self.fetcher.fetch(&location.sun_url).await;
        let (tide_page, sun_page) = (tide_page?, sun_page?);

        let low_tides = tide_data::parse_low_tides(&tide_page)?;
        let sun = sun_data::parse_sun_window(&sun_page)?;
        let (tides, window) = clock::normalize(day, &low_tides, &sun)?;

        Ok(evaluate(&location.city, &tides, &window))
    }
}
