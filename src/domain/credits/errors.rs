use thiserror::Error;

use super::credit_type::CreditType;

/// Errors from credit pricing and configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CreditsError {
    #[error("Credits are disabled")]
    Disabled,

    #[error("Unknown credit type: {0}")]
    UnknownCreditType(String),

    #[error("Credit type {0} is not configured")]
    NotConfigured(CreditType),

    #[error("Minimum purchasable amount of {credit_type} is {minimum}, requested {requested}")]
    BelowMinimum {
        credit_type: CreditType,
        minimum: u64,
        requested: u64,
    },

    #[error("Invalid credits configuration: {0}")]
    InvalidConfig(String),
}
