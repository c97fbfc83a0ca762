//! Observation data representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{FredError, Result};

/// Date format used by FRED for every calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder FRED uses for a missing reading.
pub const MISSING_VALUE: &str = ".";

/// A single reading of a series, valid for a realtime window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Start of the realtime (vintage) window.
    pub realtime_start: NaiveDate,
    /// End of the realtime (vintage) window.
    pub realtime_end: NaiveDate,
    /// Observation date.
    pub date: NaiveDate,
    /// Observed value; NaN when the source marks it missing.
    pub value: f64,
}

impl Observation {
    /// Creates a new observation.
    #[must_use]
    pub const fn new(
        realtime_start: NaiveDate,
        realtime_end: NaiveDate,
        date: NaiveDate,
        value: f64,
    ) -> Self {
        Self {
            realtime_start,
            realtime_end,
            date,
            value,
        }
    }

    /// Returns true if the source reported no value for this date.
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        self.value.is_nan()
    }
}

/// Parses an observation value, mapping `""` and `"."` to NaN.
///
/// # Errors
///
/// Returns a conversion error if the text is not a number.
pub fn parse_value(raw: &str) -> Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() || raw == MISSING_VALUE {
        return Ok(f64::NAN);
    }
    raw.parse::<f64>()
        .map_err(|_| FredError::conversion("value", raw))
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns a conversion error naming `field` if the text is not a date.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| FredError::conversion(field, raw))
}

/// Ordered collection of observations returned by one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observations(Vec<Observation>);

impl Observations {
    /// Wraps a list of observations.
    #[must_use]
    pub const fn new(observations: Vec<Observation>) -> Self {
        Self(observations)
    }

    /// Returns the values in order, NaN for missing readings.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|o| o.value)
    }

    /// Returns the number of missing readings.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.0.iter().filter(|o| o.is_missing()).count()
    }

    /// Returns the underlying observations.
    #[must_use]
    pub fn into_inner(self) -> Vec<Observation> {
        self.0
    }
}

impl std::ops::Deref for Observations {
    type Target = [Observation];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Observation>> for Observations {
    fn from(observations: Vec<Observation>) -> Self {
        Self(observations)
    }
}

impl FromIterator<Observation> for Observations {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Observations {
    type Item = Observation;
    type IntoIter = std::vec::IntoIter<Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Observations {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
