use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::rates::{RateColumn, RateSet};

/// unique identifier for a transaction record
pub type RecordId = Uuid;

/// interest accrued on one record at one rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateInterest {
    pub column: RateColumn,
    /// the rate actually applied when the record was added
    pub rate: Rate,
    pub interest: Money,
}

/// a recorded transaction with its interest snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: RecordId,
    pub date: NaiveDate,
    pub principal: Money,
    pub days_elapsed: i64,
    pub interest: Vec<RateInterest>,
    /// the "now" the interest was computed against
    pub recorded_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn interest_at(&self, column: RateColumn) -> Option<Money> {
        self.interest
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.interest)
    }

    /// rate used for the given column, if the record has it
    pub fn rate_at(&self, column: RateColumn) -> Option<Rate> {
        self.interest
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.rate)
    }
}

/// totals for one interest column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTotal {
    pub column: RateColumn,
    pub total_interest: Money,
    /// total principal plus total interest for this column
    pub total_sum: Money,
}

/// aggregate totals over every record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub total_principal: Money,
    pub by_rate: Vec<RateTotal>,
}

impl Totals {
    pub fn for_column(&self, column: RateColumn) -> Option<&RateTotal> {
        self.by_rate.iter().find(|total| total.column == column)
    }

    pub fn total_interest(&self, column: RateColumn) -> Option<Money> {
        self.for_column(column).map(|total| total.total_interest)
    }

    pub fn total_sum(&self, column: RateColumn) -> Option<Money> {
        self.for_column(column).map(|total| total.total_sum)
    }
}

/// owned copy of the ledger contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub records: Vec<TransactionRecord>,
    pub totals: Totals,
    pub rates: RateSet,
}
