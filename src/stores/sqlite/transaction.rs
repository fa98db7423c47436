//! Implements a SQLite backed transaction store.
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex, MutexGuard},
};

use rusqlite::{
    Connection, Row, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Type, ValueRef},
};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    month::MonthKey,
    stores::{CategoryTotal, DailyTotals, TransactionStore, TypeTotals, add_amount},
    transaction::{NewTransaction, Transaction, TransactionId, TransactionType},
};

/// The columns of the transaction table in the order [map_transaction_row] expects.
const TRANSACTION_COLUMNS: &str =
    "id, tx_date, type, category, amount, note, created_at, updated_at";

/// Stores transactions in a SQLite database.
///
/// Amounts are stored as decimal text and summed in Rust so that totals are
/// exact. Use [initialize](crate::initialize_db) to create the table first.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }

    /// Get the type, category and amount of every transaction in `month`,
    /// ordered by ascending date.
    fn get_month_activity(&self, month: &MonthKey) -> Result<Vec<MonthActivity>, Error> {
        let connection = self.lock()?;
        let mut statement = connection.prepare(
            "SELECT tx_date, type, category, amount FROM \"transaction\"
             WHERE substr(tx_date, 1, 7) = ?1
             ORDER BY tx_date ASC, id ASC",
        )?;

        statement
            .query_map([month.as_str()], |row| {
                Ok(MonthActivity {
                    tx_date: row.get(0)?,
                    transaction_type: row.get(1)?,
                    category: row.get(2)?,
                    amount: get_amount(row, 3)?,
                })
            })?
            .collect::<Result<Vec<_>, rusqlite::Error>>()
            .map_err(|error| error.into())
    }
}

/// The fields of a transaction needed for the monthly aggregates.
struct MonthActivity {
    tx_date: Date,
    transaction_type: TransactionType,
    category: String,
    amount: Decimal,
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&self, transaction: NewTransaction) -> Result<Transaction, Error> {
        let now = OffsetDateTime::now_utc();
        let connection = self.lock()?;

        let transaction = connection
            .prepare(&format!(
                "INSERT INTO \"transaction\" (tx_date, type, category, amount, note, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![
                    transaction.tx_date,
                    transaction.transaction_type,
                    transaction.category,
                    transaction.amount.to_string(),
                    transaction.note,
                    now,
                ],
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Update a transaction and refresh its `updated_at` timestamp.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::UpdateMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn update(
        &self,
        id: TransactionId,
        transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let now = OffsetDateTime::now_utc();
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "UPDATE \"transaction\"
                 SET tx_date = ?1, type = ?2, category = ?3, amount = ?4, note = ?5, updated_at = ?6
                 WHERE id = ?7
                 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row(
                params![
                    transaction.tx_date,
                    transaction.transaction_type,
                    transaction.category,
                    transaction.amount.to_string(),
                    transaction.note,
                    now,
                    id,
                ],
                map_transaction_row,
            )
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingTransaction,
                error => error.into(),
            })
    }

    /// Delete a transaction and return the deleted row.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&self, id: TransactionId) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        connection
            .prepare(&format!(
                "DELETE FROM \"transaction\" WHERE id = ?1 RETURNING {TRANSACTION_COLUMNS}"
            ))?
            .query_row([id], map_transaction_row)
            .map_err(|error| match error {
                rusqlite::Error::QueryReturnedNoRows => Error::DeleteMissingTransaction,
                error => error.into(),
            })
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] there is some other SQL error.
    fn get(&self, id: TransactionId) -> Result<Transaction, Error> {
        let transaction = self
            .lock()?
            .prepare(&format!(
                "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE id = :id"
            ))?
            .query_row(&[(":id", &id)], map_transaction_row)?;

        Ok(transaction)
    }

    fn list(&self, month: Option<&MonthKey>) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;
        let mut statement = connection.prepare(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\"
             WHERE ?1 IS NULL OR substr(tx_date, 1, 7) = ?1
             ORDER BY tx_date DESC, id DESC"
        ))?;

        statement
            .query_map([month.map(MonthKey::as_str)], map_transaction_row)?
            .collect::<Result<Vec<_>, rusqlite::Error>>()
            .map_err(|error| error.into())
    }

    fn totals_by_type(&self, month: &MonthKey) -> Result<TypeTotals, Error> {
        self.get_month_activity(month)?.into_iter().try_fold(
            TypeTotals::default(),
            |mut totals, activity| {
                match activity.transaction_type {
                    TransactionType::Income => {
                        totals.income = add_amount(totals.income, activity.amount)?
                    }
                    TransactionType::Expense => {
                        totals.expense = add_amount(totals.expense, activity.amount)?
                    }
                }
                Ok(totals)
            },
        )
    }

    fn daily_totals(&self, month: &MonthKey) -> Result<Vec<DailyTotals>, Error> {
        let mut totals_by_date: BTreeMap<Date, DailyTotals> = BTreeMap::new();

        for activity in self.get_month_activity(month)? {
            let day = totals_by_date
                .entry(activity.tx_date)
                .or_insert(DailyTotals {
                    date: activity.tx_date,
                    income: Decimal::ZERO,
                    expense: Decimal::ZERO,
                });

            match activity.transaction_type {
                TransactionType::Income => day.income = add_amount(day.income, activity.amount)?,
                TransactionType::Expense => {
                    day.expense = add_amount(day.expense, activity.amount)?
                }
            }
        }

        Ok(totals_by_date.into_values().collect())
    }

    fn expense_by_category(&self, month: &MonthKey) -> Result<Vec<CategoryTotal>, Error> {
        let mut totals: HashMap<String, Decimal> = HashMap::new();

        for activity in self
            .get_month_activity(month)?
            .into_iter()
            .filter(|activity| activity.transaction_type == TransactionType::Expense)
        {
            let total = totals.entry(activity.category).or_insert(Decimal::ZERO);
            *total = add_amount(*total, activity.amount)?;
        }

        let mut categories: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, total_expense)| CategoryTotal {
                category,
                total_expense,
            })
            .collect();
        categories.sort_by(|a, b| {
            b.total_expense
                .cmp(&a.total_expense)
                .then_with(|| a.category.cmp(&b.category))
        });

        Ok(categories)
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// Read the decimal text in column `index`.
fn get_amount(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    text.parse().map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
    })
}

/// Map a database row to a Transaction.
///
/// The row must contain the columns in [TRANSACTION_COLUMNS].
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        tx_date: row.get(1)?,
        transaction_type: row.get(2)?,
        category: row.get(3)?,
        amount: get_amount(row, 4)?,
        note: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tx_date TEXT NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('income', 'expense')),
                category TEXT NOT NULL,
                amount TEXT NOT NULL,
                note TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
                )",
        (),
    )?;

    // Every analytics query filters on the month of the transaction date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_tx_date ON \"transaction\"(tx_date);",
        (),
    )?;

    Ok(())
}
