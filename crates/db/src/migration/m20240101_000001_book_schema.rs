//! Book schema: chart of accounts, documents, users and settings.
//!
//! The SQL is kept to the subset PostgreSQL and SQLite share.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for sql in SCHEMA_SQL {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        for table in TABLES.iter().rev() {
            db.execute_unprepared(&format!("DROP TABLE IF EXISTS {table};"))
                .await?;
        }
        Ok(())
    }
}

/// Tables in creation order.
const TABLES: [&str; 7] = [
    "users",
    "user_auth",
    "accounts",
    "documents",
    "document_entries",
    "document_images",
    "settings",
];

const SCHEMA_SQL: [&str; 9] = [
    r"
-- Users; is_admin grants access to every document and report
CREATE TABLE users (
    user_id BIGINT PRIMARY KEY,
    full_name TEXT NOT NULL,
    is_admin BOOLEAN NOT NULL DEFAULT FALSE
);",
    r"
-- External logins; auth_user_id is the hex SHA-256 of provider + provider user id
CREATE TABLE user_auth (
    auth_provider TEXT NOT NULL,
    auth_user_id TEXT NOT NULL,
    user_id BIGINT NOT NULL REFERENCES users(user_id),
    PRIMARY KEY (auth_provider, auth_user_id)
);",
    r"
-- Chart of accounts; nesting_level 9 marks postable leaves
CREATE TABLE accounts (
    account_id INTEGER NOT NULL,
    nesting_level INTEGER NOT NULL,
    account_type INTEGER NOT NULL,
    title TEXT NOT NULL,
    PRIMARY KEY (account_id, nesting_level),
    CONSTRAINT chk_account_type CHECK (account_type BETWEEN 0 AND 6),
    CONSTRAINT chk_nesting_level CHECK (nesting_level BETWEEN 0 AND 9)
);",
    r"
CREATE TABLE documents (
    document_id BIGINT PRIMARY KEY,
    paid_user_id BIGINT REFERENCES users(user_id),
    paid_date DATE,
    description TEXT NOT NULL DEFAULT '',
    created_date DATE
);",
    r"
CREATE INDEX idx_documents_paid_user ON documents(paid_user_id);",
    r"
-- Entries are replaced as a whole on every document write
CREATE TABLE document_entries (
    document_id BIGINT NOT NULL REFERENCES documents(document_id),
    row_number INTEGER NOT NULL,
    account_id INTEGER NOT NULL,
    debit BOOLEAN NOT NULL,
    unit_count BIGINT NOT NULL DEFAULT 1,
    unit_cost_cents BIGINT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    PRIMARY KEY (document_id, row_number),
    CONSTRAINT chk_row_number CHECK (row_number >= 0)
);",
    r"
CREATE INDEX idx_document_entries_account ON document_entries(account_id);",
    r"
CREATE TABLE document_images (
    document_id BIGINT NOT NULL REFERENCES documents(document_id),
    image_num INTEGER NOT NULL,
    image_id TEXT NOT NULL,
    PRIMARY KEY (document_id, image_num)
);",
    r"
-- Organization settings as name/value rows
CREATE TABLE settings (
    name TEXT PRIMARY KEY,
    value TEXT NOT NULL DEFAULT ''
);",
];
