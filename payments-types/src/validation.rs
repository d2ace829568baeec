//! Payment input validation.
//!
//! Rules run in a fixed order and every applicable violation is collected;
//! only the top-level shape check stops evaluation early:
//!
//! 1. input must be an object
//! 2. `amount` present
//! 3. `amount` numeric
//! 4. `amount` finite, and `amount > 0` (checked independently)
//! 5. `currency` present and non-empty
//! 6. `currency` a string
//! 7. `currency` in the allow-list
//! 8. no fields besides `amount` and `currency`
//!
//! NaN fails only the finiteness rule because `NaN <= 0` is false, while
//! negative infinity fails both. Callers rely on this exact output.

use crate::domain::{Amount, Currency, RawValue};
use crate::dto::CreatePaymentRequest;
use crate::error::DomainError;

const ALLOWED_FIELDS: [&str; 2] = ["amount", "currency"];

/// Outcome of validating a payment input.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    violations: Vec<DomainError>,
    accepted: Option<CreatePaymentRequest>,
}

impl ValidationResult {
    fn rejected(violations: Vec<DomainError>) -> Self {
        Self {
            violations,
            accepted: None,
        }
    }

    /// True iff no rule was violated.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation messages in rule-evaluation order.
    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Violated rules in evaluation order.
    pub fn violations(&self) -> &[DomainError] {
        &self.violations
    }

    /// The typed request for a valid input, or the violations otherwise.
    pub fn into_request(self) -> Result<CreatePaymentRequest, Vec<DomainError>> {
        match self.accepted {
            Some(req) if self.violations.is_empty() => Ok(req),
            _ => Err(self.violations),
        }
    }
}

/// Validates an inbound payment payload.
///
/// `None` stands for an absent or unparseable body. Never panics.
pub fn validate_payment_input(input: Option<&RawValue>) -> ValidationResult {
    let Some(record) = input.filter(|v| matches!(v, RawValue::Object(_))) else {
        return ValidationResult::rejected(vec![DomainError::InvalidInputFormat]);
    };

    let mut violations = Vec::new();

    let amount = check_amount(record.get("amount"), &mut violations);
    let currency = check_currency(record.get("currency"), &mut violations);

    let unexpected: Vec<String> = record
        .keys()
        .filter(|k| !ALLOWED_FIELDS.contains(k))
        .map(str::to_string)
        .collect();
    if !unexpected.is_empty() {
        violations.push(DomainError::UnexpectedFields(unexpected));
    }

    let accepted = match (amount, currency) {
        (Some(amount), Some(currency)) if violations.is_empty() => {
            Some(CreatePaymentRequest { amount, currency })
        }
        _ => None,
    };

    ValidationResult {
        violations,
        accepted,
    }
}

fn check_amount(value: Option<&RawValue>, violations: &mut Vec<DomainError>) -> Option<Amount> {
    match value {
        None | Some(RawValue::Null) => {
            violations.push(DomainError::AmountRequired);
            None
        }
        Some(RawValue::Number(n)) => {
            let n = *n;
            let before = violations.len();
            if !n.is_finite() {
                violations.push(DomainError::AmountMustBeFinite);
            }
            if n <= 0.0 {
                violations.push(DomainError::AmountMustBePositive);
            }
            if violations.len() == before {
                Amount::new(n).ok()
            } else {
                None
            }
        }
        Some(_) => {
            violations.push(DomainError::AmountMustBeNumber);
            None
        }
    }
}

fn check_currency(value: Option<&RawValue>, violations: &mut Vec<DomainError>) -> Option<Currency> {
    match value {
        None | Some(RawValue::Null) => {
            violations.push(DomainError::CurrencyRequired);
            None
        }
        Some(RawValue::String(s)) if s.is_empty() => {
            violations.push(DomainError::CurrencyRequired);
            None
        }
        Some(RawValue::String(s)) => match s.parse::<Currency>() {
            Ok(currency) => Some(currency),
            Err(e) => {
                violations.push(e);
                None
            }
        },
        Some(_) => {
            violations.push(DomainError::CurrencyMustBeString);
            None
        }
    }
}
