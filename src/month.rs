//! Resolution of the month that analytics are computed for.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::Date;

use crate::clock::Clock;

/// A month key of the form `YYYY-MM`, e.g. "2025-03".
///
/// Keys supplied by clients are not validated. A malformed key matches no
/// transactions, so analytics for it are empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MonthKey(String);

impl MonthKey {
    /// Create a month key from a client supplied string without validating it.
    pub fn new_unchecked(month: &str) -> Self {
        Self(month.to_owned())
    }

    /// The key for the calendar month that `date` falls in.
    pub fn from_date(date: Date) -> Self {
        Self(format!("{:04}-{:02}", date.year(), u8::from(date.month())))
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The query string accepted by routes that take an optional month, e.g. `?month=2025-03`.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The month as `YYYY-MM`.
    pub month: Option<String>,
}

/// Get the month to compute analytics for.
///
/// An absent or empty `month` resolves to the current calendar month
/// according to `clock`. Any other value is passed through unchanged.
pub fn resolve_month(month: Option<&str>, clock: &dyn Clock) -> MonthKey {
    match month.filter(|month| !month.is_empty()) {
        Some(month) => MonthKey::new_unchecked(month),
        None => MonthKey::from_date(clock.today()),
    }
}
