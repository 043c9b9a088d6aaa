//! Core business logic for Massikone.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `accounts` - Chart of accounts tree and listing
//! - `auth` - Caller roles and the admin/owner gate
//! - `ledger` - Documents, entries and the balance engine
//! - `reports` - Journal, ledger and statement projections

pub mod accounts;
pub mod auth;
pub mod ledger;
pub mod reports;
