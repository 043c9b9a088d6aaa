//! `SeaORM` entity definitions.
//!
//! One entity per table of the book schema.

pub mod accounts;
pub mod document_entries;
pub mod document_images;
pub mod documents;
pub mod settings;
pub mod user_auth;
pub mod users;
