//! Shared setup for the book integration tests.
//!
//! Every test gets its own in-memory SQLite database. The pool holds exactly
//! one connection, so a context must be closed before the next one opens.

#![allow(dead_code)]

use chrono::NaiveDate;
use massikone_core::accounts::{Account, AccountType};
use massikone_core::auth::Caller;
use massikone_core::ledger::{DocumentInput, EntryLines};
use massikone_db::migration::{Migrator, MigratorTrait};
use massikone_db::{AccountRepository, BookContext, get_or_put_user};
use massikone_shared::types::{AccountId, DocumentId};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub const BANK: i32 = 1910;
pub const PAYABLES: i32 = 2870;
pub const SALES: i32 = 3000;
pub const PURCHASES: i32 = 4000;

/// Connects to a fresh in-memory database with the schema and a small chart.
pub async fn setup() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to migrate");

    let repo = AccountRepository::new(&db);
    for account in [
        Account::new(AccountId(1000), AccountType::Asset, 0, "ASSETS"),
        Account::leaf(AccountId(BANK), AccountType::Asset, "Bank"),
        Account::new(AccountId(2000), AccountType::Liability, 0, "LIABILITIES"),
        Account::leaf(AccountId(PAYABLES), AccountType::Liability, "Payables"),
        Account::new(AccountId(3000), AccountType::Revenue, 0, "REVENUE"),
        Account::leaf(AccountId(SALES), AccountType::Revenue, "Sales"),
        Account::new(AccountId(4000), AccountType::Expense, 0, "EXPENSES"),
        Account::leaf(AccountId(PURCHASES), AccountType::Expense, "Purchases"),
    ] {
        repo.insert(&account).await.expect("Failed to insert account");
    }
    db
}

/// The first user to log in, which makes them an admin.
pub async fn admin(db: &DatabaseConnection) -> Caller {
    get_or_put_user(db, "test", "admin", "Ada Admin")
        .await
        .expect("Failed to create admin")
}

/// A normal user; call after [`admin`].
pub async fn normal(db: &DatabaseConnection, name: &str) -> Caller {
    get_or_put_user(db, "test", name, name)
        .await
        .expect("Failed to create user")
}

pub fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

/// A two-account document: `amount` credited to `credit`, debited to `debit`.
pub fn shortcut(credit: i32, debit: i32, amount: &str, paid_date: Option<NaiveDate>) -> DocumentInput {
    DocumentInput {
        paid_date,
        description: format!("{amount} from {credit} to {debit}"),
        lines: EntryLines::Shortcut {
            credit_account_id: Some(AccountId(credit)),
            debit_account_id: Some(AccountId(debit)),
            amount: amount.to_string(),
        },
        ..DocumentInput::default()
    }
}

/// Posts one document in its own committed context.
pub async fn post(db: &DatabaseConnection, caller: &Caller, input: DocumentInput) -> DocumentId {
    let mut book = BookContext::begin(db, caller.clone())
        .await
        .expect("Failed to open context");
    let id = book.post_document(input).await.expect("Failed to post");
    book.close().await.expect("Failed to commit");
    id
}
