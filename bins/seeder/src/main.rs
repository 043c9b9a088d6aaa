//! Database seeder for Massikone development and testing.
//!
//! Seeds a small chart of accounts, a development admin, the organization
//! settings and a couple of sample documents. Running it twice is harmless:
//! each step skips when its data is already there.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use massikone_core::accounts::{Account, AccountType};
use massikone_core::auth::Caller;
use massikone_core::ledger::{DocumentInput, EntryLines};
use massikone_db::migration::Migrator;
use massikone_db::{AccountRepository, BookContext, Settings, connect_with, get_or_put_user};
use massikone_shared::AppConfig;
use massikone_shared::config::LogConfig;
use massikone_shared::types::AccountId;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Auth provider used for the development admin.
const DEV_PROVIDER: &str = "dev";

/// `(account_id, nesting_level, account_type, title)`; level 9 is a leaf.
const CHART: &[(i32, i32, AccountType, &str)] = &[
    (1000, 0, AccountType::Asset, "VASTAAVAA"),
    (1700, 1, AccountType::Asset, "Saamiset"),
    (1700, 9, AccountType::Asset, "Myyntisaamiset"),
    (1900, 1, AccountType::Asset, "Rahat ja pankkisaamiset"),
    (1900, 9, AccountType::Asset, "Käteisvarat"),
    (1910, 9, AccountType::Asset, "Pankkitili"),
    (2000, 0, AccountType::Liability, "VASTATTAVAA"),
    (2000, 1, AccountType::Equity, "Oma pääoma"),
    (2250, 9, AccountType::PastProfit, "Edellisten tilikausien voitto"),
    (2870, 1, AccountType::Liability, "Vieras pääoma"),
    (2870, 9, AccountType::Liability, "Ostovelat"),
    (3000, 0, AccountType::Revenue, "TUOTOT"),
    (3000, 9, AccountType::Revenue, "Jäsenmaksut"),
    (3100, 9, AccountType::Revenue, "Myynti"),
    (4000, 0, AccountType::Expense, "KULUT"),
    (4000, 9, AccountType::Expense, "Ostot"),
    (4400, 9, AccountType::Expense, "Matkakulut"),
    (4900, 9, AccountType::Expense, "Muut kulut"),
];

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| log.filter.as_str().into());
    let registry = tracing_subscriber::registry().with(filter);
    if log.json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.log);

    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    Migrator::up(&db, None).await.context("Failed to migrate")?;

    info!("Seeding chart of accounts...");
    seed_chart(&db).await?;

    info!("Seeding admin user...");
    let admin = get_or_put_user(&db, DEV_PROVIDER, "admin", "Development Admin")
        .await
        .context("Failed to seed admin user")?;
    info!(user_id = %admin.user_id, admin = admin.is_admin(), "Admin user ready");

    info!("Seeding settings and sample documents...");
    seed_book(&db, admin).await?;

    info!("Seeding complete!");
    Ok(())
}

/// Inserts the chart unless accounts already exist.
async fn seed_chart(db: &DatabaseConnection) -> anyhow::Result<()> {
    let repo = AccountRepository::new(db);
    if !repo.list().await?.is_empty() {
        info!("  Chart already exists, skipping...");
        return Ok(());
    }
    for &(id, level, account_type, title) in CHART {
        repo.insert(&Account::new(AccountId(id), account_type, level, title))
            .await?;
    }
    info!(count = CHART.len(), "  Created accounts");
    Ok(())
}

fn sample(day: u32, description: &str, credit: i32, debit: i32, amount: &str) -> DocumentInput {
    DocumentInput {
        paid_date: NaiveDate::from_ymd_opt(2024, 1, day),
        description: description.to_string(),
        lines: EntryLines::Shortcut {
            credit_account_id: Some(AccountId(credit)),
            debit_account_id: Some(AccountId(debit)),
            amount: amount.to_string(),
        },
        ..DocumentInput::default()
    }
}

/// Stores settings and, on an empty book, two sample documents.
async fn seed_book(db: &DatabaseConnection, admin: Caller) -> anyhow::Result<()> {
    let mut book = BookContext::begin(db, admin).await?;
    book.put_settings(&Settings {
        org_full_name: "Esimerkkiyhdistys ry".to_string(),
        org_short_name: "Esimerkki".to_string(),
    })
    .await?;

    if book.get_documents().await?.is_empty() {
        book.post_document(sample(5, "Jäsenmaksut tammikuu", 3000, 1910, "240,00"))
            .await?;
        book.post_document(sample(12, "Toimistotarvikkeet", 1910, 4000, "37,90"))
            .await?;
    } else {
        info!("  Documents already exist, skipping...");
    }

    let journal = book.get_journal().await?;
    info!(
        documents = journal.documents.len(),
        debit_cents = journal.total_debit_cents,
        credit_cents = journal.total_credit_cents,
        "  Journal"
    );
    book.close().await?;
    Ok(())
}
