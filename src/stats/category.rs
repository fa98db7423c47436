//! Per-category expense totals for a month.

use crate::{
    Error,
    month::MonthKey,
    stores::{CategoryTotal, TransactionStore},
};

/// Get the expense total for every category with expenses in `month`,
/// largest total first. Equal totals are ordered by category name.
///
/// # Errors
/// Returns an error if the store query fails or a total overflows.
pub fn get_category_breakdown(
    store: &impl TransactionStore,
    month: &MonthKey,
) -> Result<Vec<CategoryTotal>, Error> {
    store.expense_by_category(month)
}
