//! Transaction request types and structural validation

mod entity;
mod validation;

pub use entity::{TransactionInput, TransactionRequest};
pub use validation::{coerce_amount, coerce_country, coerce_hour, TransactionValidationError};
