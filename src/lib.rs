pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod rates;
pub mod report;
pub mod types;

// re-export key types
pub use config::LedgerConfig;
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use events::{EventStore, LedgerEvent, SubscriptionId};
pub use interest::{
    compute_interest, days_elapsed, AccrualEngine, InterestCalculation, InterestCalculator,
};
pub use ledger::Ledger;
pub use rates::{RateColumn, RateSet};
pub use report::{LedgerReport, ReportRow, ReportTotal};
pub use types::{LedgerSnapshot, RateInterest, RateTotal, RecordId, Totals, TransactionRecord};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
