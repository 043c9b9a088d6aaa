//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Each repository borrows a connection or an open transaction.

pub mod account;
pub mod document;
pub mod settings;
pub mod user;

pub use account::{AccountRepository, account_from_model};
pub use document::{DocumentRepository, HeaderUpdate, entry_from_model};
pub use settings::SettingsRepository;
pub use user::UserRepository;
