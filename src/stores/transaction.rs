//! Defines the transaction store trait.

use rust_decimal::Decimal;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    month::MonthKey,
    transaction::{NewTransaction, Transaction, TransactionId},
};

/// Total income and expenses for a month.
///
/// Both totals are zero when there are no matching transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct TypeTotals {
    /// The sum of all income.
    pub income: Decimal,
    /// The sum of all expenses.
    pub expense: Decimal,
}

/// Total income and expenses for a single day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyTotals {
    /// The day the totals are for.
    pub date: Date,
    /// The sum of income on `date`.
    pub income: Decimal,
    /// The sum of expenses on `date`.
    pub expense: Decimal,
}

/// The total spent on a category in a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// The sum of expenses with this category.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
}

/// Add `amount` to `total`.
///
/// # Errors
/// Returns [Error::AmountOverflow] if the sum does not fit in a [Decimal].
pub(crate) fn add_amount(total: Decimal, amount: Decimal) -> Result<Decimal, Error> {
    total.checked_add(amount).ok_or_else(|| {
        tracing::error!("overflow adding {amount} to {total}");
        Error::AmountOverflow
    })
}

/// Subtract `amount` from `total`.
///
/// # Errors
/// Returns [Error::AmountOverflow] if the difference does not fit in a [Decimal].
pub(crate) fn subtract_amount(total: Decimal, amount: Decimal) -> Result<Decimal, Error> {
    total.checked_sub(amount).ok_or_else(|| {
        tracing::error!("overflow subtracting {amount} from {total}");
        Error::AmountOverflow
    })
}

/// Handles the creation, retrieval and aggregation of transactions.
///
/// Month filters match transactions by the calendar month of their
/// `tx_date`. A month key that is not of the form `YYYY-MM` matches nothing.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Replace the fields of the transaction `id`.
    ///
    /// # Errors
    /// Returns [Error::UpdateMissingTransaction] if `id` does not exist.
    fn update(&self, id: TransactionId, transaction: NewTransaction)
    -> Result<Transaction, Error>;

    /// Delete the transaction `id` and return it.
    ///
    /// # Errors
    /// Returns [Error::DeleteMissingTransaction] if `id` does not exist.
    fn delete(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if `id` does not exist.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error>;

    /// Retrieve transactions, newest first, optionally restricted to `month`.
    fn list(&self, month: Option<&MonthKey>) -> Result<Vec<Transaction>, Error>;

    /// Sum income and expenses in `month`.
    ///
    /// # Errors
    /// Returns [Error::AmountOverflow] if a sum is too large to represent.
    fn totals_by_type(&self, month: &MonthKey) -> Result<TypeTotals, Error>;

    /// Sum income and expenses for each day in `month` with at least one
    /// transaction, in order of ascending date.
    fn daily_totals(&self, month: &MonthKey) -> Result<Vec<DailyTotals>, Error>;

    /// Sum expenses for each category in `month` with at least one expense,
    /// largest total first. Equal totals are ordered by category name.
    fn expense_by_category(&self, month: &MonthKey) -> Result<Vec<CategoryTotal>, Error>;
}
