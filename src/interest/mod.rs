pub mod accrual;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;

pub use accrual::{compute_interest, days_elapsed, AccrualEngine, YEAR_BASIS_DAYS};

/// interest calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestCalculation {
    pub interest_amount: Money,
    pub daily_rate: Rate,
    pub days: i64,
    pub principal_base: Money,
    pub year_basis: u32,
}

/// trait for interest calculations
pub trait InterestCalculator {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        transaction_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<InterestCalculation>;

    fn year_basis(&self) -> u32;
}
