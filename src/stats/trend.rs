//! The daily running-balance trend for a month.

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    month::MonthKey,
    stores::{DailyTotals, TransactionStore, add_amount, subtract_amount},
};

/// Income, expenses and the running balance for a day with transactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTrendPoint {
    /// The day.
    pub date: Date,
    /// Income on `date`.
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    /// Expenses on `date`.
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    /// Income minus expenses from the start of the month up to and including `date`.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Get the running balance for each day in `month` that has transactions.
///
/// # Errors
/// Returns an error if the store query fails or the balance overflows.
pub fn get_daily_trend(
    store: &impl TransactionStore,
    month: &MonthKey,
) -> Result<Vec<DailyTrendPoint>, Error> {
    let daily_totals = store.daily_totals(month)?;

    build_daily_trend(&daily_totals)
}

/// Accumulate the running balance over `daily_totals`.
///
/// `daily_totals` must be in order of ascending date. The balance starts at
/// zero before the first day.
///
/// # Errors
/// Returns [Error::AmountOverflow] if the running balance does not fit in a [Decimal].
pub fn build_daily_trend(daily_totals: &[DailyTotals]) -> Result<Vec<DailyTrendPoint>, Error> {
    let mut balance = Decimal::ZERO;

    daily_totals
        .iter()
        .map(|day| {
            balance = add_amount(balance, day.income)?;
            balance = subtract_amount(balance, day.expense)?;

            Ok(DailyTrendPoint {
                date: day.date,
                income: day.income,
                expense: day.expense,
                balance,
            })
        })
        .collect()
}
