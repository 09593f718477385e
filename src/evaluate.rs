//! Daylight low tide evaluation.

use crate::clock::{DaylightWindow, TimedTide};
use chrono::NaiveDateTime;
use std::fmt;

/// A low tide falling strictly inside the daylight window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub at: NaiveDateTime,
    pub height: String,
}

/// Verdict for one location. No findings means "don't go today".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub city: String,
    pub findings: Vec<Finding>,
}

impl Evaluation {
    pub fn is_visit_worthy(&self) -> bool {
        !self.findings.is_empty()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.findings.is_empty() {
            return write!(
                f,
                "Don't go to {} today. Did not find a low tide within daylight hours",
                self.city
            );
        }

        for (i, finding) in self.findings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "Go to {} at {}. Found low tide with height {} during daylight hours",
                self.city, finding.at, finding.height
            )?;
        }
        Ok(())
    }
}

/// Check each low tide independently against the daylight window.
pub fn evaluate(city: &str, tides: &[TimedTide], window: &DaylightWindow) -> Evaluation {
    let findings = tides
        .iter()
        .filter(|tide| window.contains(tide.at))
        .map(|tide| Finding {
            at: tide.at,
            height: tide.height.clone(),
        })
        .collect();

    Evaluation {
        city: city.to_string(),
        findings,
    }
}
