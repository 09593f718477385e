//! # Low Tide Extraction
//!
//! Reads today's low tides out of a tide-forecast.com location page.
//!
//! ## Page Structure
//!
//! The scraper targets the day table near the top of the page:
//! ```html
//! <table class="tide-day-tides">
//!   <tr><td>Low Tide</td><td><b>3:45 AM</b>(Mon 19 October)</td>
//!       <td><b class="js-two-units-length-value__primary">0.5 ft</b></td></tr>
//!   <tr><td>High Tide</td>...</tr>
//!   ...
//! </table>
//! ```
//!
//! A row counts as a low tide when one of its cells reads exactly
//! `Low Tide`. Its first bold element is the time, its second the height.
//! Semidiurnal coasts see at most two low tides a day, so only the first two
//! rows are kept.

use crate::markup::{find_table, selector, text_of, ExtractError};
use scraper::Html;
use tracing::debug;

/// Class of the table listing today's tides.
pub const TIDE_TABLE: &str = "table.tide-day-tides";

const LOW_TIDE_LABEL: &str = "Low Tide";

/// One low tide as printed on the page, e.g. `3:45 AM` / `0.5 ft`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TideReading {
    pub time: String,
    pub height: String,
}

/// Today's first and second low tide, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LowTides {
    pub first: Option<TideReading>,
    pub second: Option<TideReading>,
}

impl LowTides {
    /// Store a reading in the first free slot. Returns false once both slots
    /// are taken.
    fn record(&mut self, reading: TideReading) -> bool {
        match (&self.first, &self.second) {
            (None, _) => self.first = Some(reading),
            (Some(_), None) => self.second = Some(reading),
            (Some(_), Some(_)) => return false,
        }
        true
    }

    /// Present readings, first low tide first.
    pub fn iter(&self) -> impl Iterator<Item = &TideReading> {
        self.first.iter().chain(self.second.iter())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }
}

/// Extract up to two low tides from a tide page.
///
/// A missing tide table fails the whole page. Low tide rows that lack a
/// time or height are skipped, and a table with no low tide rows yields an
/// empty [`LowTides`].
pub fn parse_low_tides(html: &str) -> Result<LowTides, ExtractError> {
    let doc = Html::parse_document(html);
    let table = find_table(&doc, TIDE_TABLE)?;

    let rows = selector("tr")?;
    let cells = selector("td")?;
    let bold = selector("b")?;

    let mut tides = LowTides::default();
    for row in table.select(&rows) {
        if !row
            .select(&cells)
            .any(|cell| text_of(cell).trim() == LOW_TIDE_LABEL)
        {
            continue;
        }

        let mut values = row.select(&bold).map(|b| text_of(b).trim().to_string());
        let (Some(time), Some(height)) = (values.next(), values.next()) else {
            debug!("Skipping low tide row without time and height");
            continue;
        };

        if !tides.record(TideReading { time, height }) {
            break;
        }
    }

    debug!(count = tides.len(), "Extracted low tides");
    Ok(tides)
}
