//! Monthly analytics over the transaction ledger.
//!
//! The summary, daily trend and category breakdown are independent read-only
//! computations. Each one queries the store itself and nothing is cached.

mod category;
mod handlers;
mod summary;
mod trend;

pub use crate::stores::CategoryTotal;
pub use category::get_category_breakdown;
pub use handlers::{get_by_category_endpoint, get_summary_endpoint};
pub use summary::{MonthSummary, get_month_summary};
pub use trend::{DailyTrendPoint, build_daily_trend, get_daily_trend};
