//! Core business logic for Haulpay.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `ledger` - Double-entry journal types and validation
//! - `settlement` - Fee breakdown math and settlement line construction
//! - `withdrawal` - Withdrawal request state machine
//! - `reconciliation` - Statement building and balance verification

pub mod ledger;
pub mod reconciliation;
pub mod settlement;
pub mod withdrawal;
