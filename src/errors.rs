use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("transaction date is empty")]
    EmptyDate,

    #[error("invalid date: {input}")]
    InvalidDate {
        input: String,
    },

    #[error("invalid amount: {input}")]
    InvalidAmount {
        input: String,
    },

    #[error("amount must be positive: {amount}")]
    NonPositiveAmount {
        amount: Money,
    },

    #[error("invalid interest rate: {input}")]
    InvalidRate {
        input: String,
    },

    #[error("interest rate must be positive: {rate}")]
    NonPositiveRate {
        rate: Rate,
    },

    #[error("amount out of range: {message}")]
    AmountOutOfRange {
        message: String,
    },

    #[error("a custom interest rate is required")]
    CustomRateRequired,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
