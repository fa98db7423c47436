use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};

use clap::Parser;
use rusqlite::Connection;
use rust_decimal::Decimal;
use time::{Date, Duration, OffsetDateTime};

use finance_tracker::{NewTransaction, SQLiteTransactionStore, TransactionStore, initialize_db};

/// A utility for creating a test database for the finance tracker server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    let store = SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)));
    let today = OffsetDateTime::now_utc().date();
    let transactions = sample_transactions(today);

    println!("Creating {} sample transactions...", transactions.len());
    for transaction in transactions {
        store.create(transaction)?;
    }

    println!("Success!");

    Ok(())
}

/// A month of salary, rent and everyday spending ending on `today`,
/// plus a few transactions from the previous month.
fn sample_transactions(today: Date) -> Vec<NewTransaction> {
    let day = |days_ago: i64| today - Duration::days(days_ago);

    vec![
        NewTransaction::income(day(40), "Salary", Decimal::new(4200_00, 2)),
        NewTransaction::expense(day(38), "Rent", Decimal::new(1650_00, 2)),
        NewTransaction::expense(day(35), "Groceries", Decimal::new(132_45, 2)),
        NewTransaction::income(day(10), "Salary", Decimal::new(4200_00, 2)),
        NewTransaction::expense(day(9), "Rent", Decimal::new(1650_00, 2)),
        NewTransaction::expense(day(7), "Groceries", Decimal::new(98_20, 2)),
        NewTransaction::expense(day(5), "Transport", Decimal::new(45_00, 2)).note(Some("Bus pass")),
        NewTransaction::expense(day(3), "Dining", Decimal::new(36_90, 2)),
        NewTransaction::income(day(2), "Freelance", Decimal::new(350_00, 2))
            .note(Some("Logo design")),
        NewTransaction::expense(day(1), "Groceries", Decimal::new(61_75, 2)),
        NewTransaction::expense(day(0), "Entertainment", Decimal::new(19_99, 2)),
    ]
}
