//! Monthly totals and the average daily expense.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    Error,
    month::MonthKey,
    stores::{TransactionStore, add_amount, subtract_amount},
};

/// Income and expense totals for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    /// The month the summary is for.
    pub month: MonthKey,
    /// The sum of all income in the month.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    /// The sum of all expenses in the month.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    /// `total_income` minus `total_expense`.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    /// Total expenses divided by the number of days with any transactions.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_daily_expense: Decimal,
}

/// Summarise the transactions in `month`.
///
/// The average daily expense is taken over the days that have at least one
/// transaction of either type, so a month without activity averages to zero.
/// The quotient is not rounded.
///
/// # Errors
/// Returns an error if either store query fails or a total overflows.
pub fn get_month_summary(
    store: &impl TransactionStore,
    month: &MonthKey,
) -> Result<MonthSummary, Error> {
    let totals = store.totals_by_type(month)?;
    let daily_totals = store.daily_totals(month)?;

    let active_days = Decimal::from(daily_totals.len().max(1));
    let daily_expense_sum = daily_totals
        .iter()
        .try_fold(Decimal::ZERO, |sum, day| add_amount(sum, day.expense))?;

    Ok(MonthSummary {
        month: month.clone(),
        total_income: totals.income,
        total_expense: totals.expense,
        balance: subtract_amount(totals.income, totals.expense)?,
        avg_daily_expense: daily_expense_sum / active_days,
    })
}
