//! # Payments Types
//!
//! Domain types, validation rules and port traits for the payment record service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Payment, Amount, Currency, RawValue)
//! - `validation` - The payment input validator
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, repository and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;
pub mod validation;

// Re-export commonly used types
pub use domain::{Amount, Currency, Payment, PaymentId, RawValue, sort_newest_first};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError, messages};
pub use ports::PaymentRepository;
pub use validation::{ValidationResult, validate_payment_input};
