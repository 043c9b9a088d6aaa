//! Shared types, errors, and configuration for Massikone.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for accounts, documents and users
//! - Cents formatting and parsing (no floating point, ever)
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
