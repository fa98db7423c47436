//! Validation of transactions sent by clients.

use axum::{Json, extract::rejection::JsonRejection};
use rust_decimal::Decimal;
use serde::Deserialize;
use time::{Date, macros::format_description};

use crate::{
    Error,
    transaction::{NewTransaction, TransactionType},
};

const REQUIRED_FIELDS_MESSAGE: &str = "tx_date, type, category, and amount are required";

/// The request body for creating or updating a transaction.
///
/// Every field is optional here so that missing fields are reported by
/// [TransactionPayload::validate] rather than the JSON extractor.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TransactionPayload {
    /// The date as `YYYY-MM-DD`.
    pub tx_date: Option<String>,
    /// Either "income" or "expense".
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    /// The category label.
    pub category: Option<String>,
    /// The amount, either a JSON number or a numeric string.
    pub amount: Option<Decimal>,
    /// An optional note.
    pub note: Option<String>,
}

impl TransactionPayload {
    /// Check the payload and convert it into a transaction that can be stored.
    ///
    /// An empty note is treated the same as a missing note.
    ///
    /// # Errors
    /// Returns [Error::Validation] if `tx_date`, `type` or `category` are
    /// missing or empty, `amount` is missing, `type` is not "income" or
    /// "expense", `tx_date` is not a valid date or `amount` is negative.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let (Some(tx_date), Some(transaction_type), Some(category), Some(amount)) = (
            self.tx_date.filter(|value| !value.is_empty()),
            self.transaction_type.filter(|value| !value.is_empty()),
            self.category.filter(|value| !value.is_empty()),
            self.amount,
        ) else {
            return Err(Error::Validation(REQUIRED_FIELDS_MESSAGE.to_owned()));
        };

        let transaction_type: TransactionType = transaction_type
            .parse()
            .map_err(|_| Error::Validation("type must be 'income' or 'expense'".to_owned()))?;

        let tx_date = Date::parse(&tx_date, format_description!("[year]-[month]-[day]"))
            .map_err(|_| {
                Error::Validation("tx_date must be a date in the format YYYY-MM-DD".to_owned())
            })?;

        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(Error::Validation("amount must not be negative".to_owned()));
        }

        Ok(NewTransaction {
            tx_date,
            transaction_type,
            category,
            amount,
            note: self.note.filter(|note| !note.is_empty()),
        })
    }
}

/// Validate a JSON request body.
///
/// A body that is not valid JSON for [TransactionPayload] is reported as an
/// [Error::Validation] with the extractor's message.
pub(super) fn validate_json_payload(
    payload: Result<Json<TransactionPayload>, JsonRejection>,
) -> Result<NewTransaction, Error> {
    let Json(payload) = payload.map_err(|rejection| Error::Validation(rejection.body_text()))?;

    payload.validate()
}
