//! Domain models for the payment service.

pub mod input;
pub mod money;
pub mod payment;

pub use input::RawValue;
pub use money::{Amount, Currency};
pub use payment::{Payment, PaymentId, sort_newest_first};
