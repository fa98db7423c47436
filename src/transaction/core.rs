//! Defines the core data models for transactions.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs in the database.
pub type TransactionId = i64;

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned, e.g. a salary payment.
    Income,
    /// Money that was spent, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The name used for the type in the database and the API.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string was not exactly "income" or "expense".
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid transaction type \"{0}\"")]
pub struct InvalidTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = InvalidTransactionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(InvalidTransactionType(other.to_owned())),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// The date the transaction is attributed to.
    pub tx_date: Date,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// A label such as "Food" or "Salary".
    pub category: String,
    /// The amount of money earned or spent. Never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Free text detailing the transaction.
    pub note: Option<String>,
    /// When the transaction was first stored.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the transaction was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A validated transaction that is ready to be stored.
///
/// Create one from client input with
/// [TransactionPayload::validate](crate::TransactionPayload::validate).
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The date the transaction is attributed to.
    pub tx_date: Date,
    /// Whether the transaction is income or an expense.
    pub transaction_type: TransactionType,
    /// A non-empty label such as "Food" or "Salary".
    pub category: String,
    /// A non-negative amount of money.
    pub amount: Decimal,
    /// Free text detailing the transaction.
    pub note: Option<String>,
}

impl NewTransaction {
    /// Shortcut for creating an expense without a note.
    pub fn expense(tx_date: Date, category: &str, amount: Decimal) -> Self {
        Self {
            tx_date,
            transaction_type: TransactionType::Expense,
            category: category.to_owned(),
            amount,
            note: None,
        }
    }

    /// Shortcut for creating income without a note.
    pub fn income(tx_date: Date, category: &str, amount: Decimal) -> Self {
        Self {
            tx_date,
            transaction_type: TransactionType::Income,
            category: category.to_owned(),
            amount,
            note: None,
        }
    }

    /// Set the note for the transaction.
    pub fn note(mut self, note: Option<&str>) -> Self {
        self.note = note.map(str::to_owned);
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serde_json::json;
    use time::macros::{date, datetime};

    use crate::transaction::{InvalidTransactionType, Transaction, TransactionType};

    #[test]
    fn parses_transaction_types() {
        assert_eq!("income".parse(), Ok(TransactionType::Income));
        assert_eq!("expense".parse(), Ok(TransactionType::Expense));
    }

    #[test]
    fn type_names_are_case_sensitive() {
        assert_eq!(
            "Income".parse::<TransactionType>(),
            Err(InvalidTransactionType("Income".to_owned()))
        );
    }

    #[test]
    fn serializes_to_api_shape() {
        let transaction = Transaction {
            id: 7,
            tx_date: date!(2025 - 03 - 01),
            transaction_type: TransactionType::Expense,
            category: "Food".to_owned(),
            amount: dec!(12.5),
            note: None,
            created_at: datetime!(2025-03-01 10:00 UTC),
            updated_at: datetime!(2025-03-02 11:30 UTC),
        };

        let got = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            got,
            json!({
                "id": 7,
                "tx_date": "2025-03-01",
                "type": "expense",
                "category": "Food",
                "amount": 12.5,
                "note": null,
                "created_at": "2025-03-01T10:00:00Z",
                "updated_at": "2025-03-02T11:30:00Z",
            })
        );
    }
}
