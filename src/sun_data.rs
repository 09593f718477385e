//! # Sunrise and Sunset Extraction
//!
//! Reads today's sunrise and sunset from a timeanddate.com sun page. The
//! times sit in a bordered summary table:
//! ```html
//! <table class="table table--left table--inner-borders-rows">
//!   <tr><th>Sunrise Today: </th><td>7:12 am<span class="comp sa8">↑</span> 98° East</td></tr>
//!   <tr><th>Sunset Today: </th><td>6:28 pm<span class="comp sa24">↑</span> 262° West</td></tr>
//! </table>
//! ```
//! The header text, trailing space included, must match exactly.

use crate::markup::{find_table, selector, text_of, ExtractError};
use scraper::{ElementRef, Html};
use tracing::debug;

/// Class of the table holding today's sun times.
pub const SUN_TABLE: &str = "table.table--inner-borders-rows";

const SUNRISE_HEADER: &str = "Sunrise Today: ";
const SUNSET_HEADER: &str = "Sunset Today: ";

/// Sunrise and sunset as printed on the page, e.g. `7:12 am`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SunWindow {
    pub sunrise: String,
    pub sunset: String,
}

/// Extract today's sunrise and sunset from a sun page.
///
/// Both rows must be present with a non-empty time.
pub fn parse_sun_window(html: &str) -> Result<SunWindow, ExtractError> {
    let doc = Html::parse_document(html);
    let table = find_table(&doc, SUN_TABLE)?;

    let rows = selector("tr")?;
    let header = selector("th")?;
    let data = selector("td")?;

    let mut sunrise = None;
    let mut sunset = None;
    for row in table.select(&rows) {
        // Any header cell in the row may carry the label
        let label = row
            .select(&header)
            .map(text_of)
            .find(|text| text == SUNRISE_HEADER || text == SUNSET_HEADER);
        let slot = match label.as_deref() {
            Some(SUNRISE_HEADER) => &mut sunrise,
            Some(SUNSET_HEADER) => &mut sunset,
            _ => continue,
        };

        if let Some(time) = row.select(&data).next().map(text_before_span) {
            if !time.is_empty() {
                *slot = Some(time);
            }
        }
    }

    let window = SunWindow {
        sunrise: sunrise.ok_or(ExtractError::MissingRow(SUNRISE_HEADER))?,
        sunset: sunset.ok_or(ExtractError::MissingRow(SUNSET_HEADER))?,
    };
    debug!(sunrise = %window.sunrise, sunset = %window.sunset, "Extracted sun times");
    Ok(window)
}

/// Text of `cell` up to its first nested `<span>`, trimmed.
fn text_before_span(cell: ElementRef<'_>) -> String {
    let mut text = String::new();
    for child in cell.children() {
        if let Some(fragment) = child.value().as_text() {
            text.push_str(fragment);
        } else if let Some(element) = ElementRef::wrap(child) {
            if element.value().name() == "span" {
                break;
            }
            text.extend(element.text());
        }
    }
    text.trim().to_string()
}
