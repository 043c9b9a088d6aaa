//! Report generation.
//!
//! This module provides pure business logic for the book's projections:
//! - Journal (by document)
//! - Ledger (by account, with running balances)
//! - Statements over account ranges

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::*;
