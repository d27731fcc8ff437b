//! Shared types, errors, and configuration for Haulpay.
//!
//! This crate provides common types used across all other crates:
//! - Currencies with decimal-precision minor-unit rounding
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
