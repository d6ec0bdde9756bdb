use chrono::{DateTime, NaiveDate, Utc};
use hourglass_rs::{SafeTimeProvider, TimeSource};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::decimal::{parse_decimal, Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::events::{EventStore, LedgerEvent, SubscriptionId};
use crate::interest::{days_elapsed, AccrualEngine, InterestCalculator};
use crate::rates::{RateColumn, RateSet};
use crate::report::LedgerReport;
use crate::types::{LedgerSnapshot, RateInterest, RateTotal, Totals, TransactionRecord};

/// date format accepted for transaction dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// append-only transaction ledger
///
/// Every record carries the interest computed at the moment it was added, for each
/// rate configured at that moment. Totals are recomputed from the records on each query.
#[derive(Debug)]
pub struct Ledger {
    config: LedgerConfig,
    rates: RateSet,
    engine: AccrualEngine,
    records: Vec<TransactionRecord>,
    events: EventStore,
}

impl Ledger {
    /// create a ledger from a validated configuration
    pub fn new(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        let rates = config.rate_set();
        Ok(Self {
            config,
            rates,
            engine: AccrualEngine::new(),
            records: Vec::new(),
            events: EventStore::new(),
        })
    }

    /// ledger with the 24% and 18% rates and an optional custom rate
    pub fn standard() -> Self {
        let config = LedgerConfig::standard();
        Self {
            rates: config.rate_set(),
            config,
            engine: AccrualEngine::new(),
            records: Vec::new(),
            events: EventStore::new(),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn rates(&self) -> &RateSet {
        &self.rates
    }

    pub fn custom_rate(&self) -> Option<Rate> {
        self.rates.custom()
    }

    /// add a transaction, returning false if the input was rejected
    ///
    /// Rejected input leaves the ledger untouched.
    pub fn add_transaction(
        &mut self,
        date: &str,
        amount: &str,
        custom_rate: Option<&str>,
        time_provider: &SafeTimeProvider,
    ) -> bool {
        let outcome = self
            .try_add_transaction(date, amount, custom_rate, time_provider)
            .map(|_| ());

        match outcome {
            Ok(()) => true,
            Err(err) => {
                warn!("transaction rejected: {}", err);
                self.events.emit(LedgerEvent::TransactionRejected {
                    reason: err.to_string(),
                    timestamp: time_provider.now(),
                });
                false
            }
        }
    }

    /// add a transaction using system time
    pub fn add_transaction_now(&mut self, date: &str, amount: &str, custom_rate: Option<&str>) -> bool {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.add_transaction(date, amount, custom_rate, &time)
    }

    /// add a transaction, reporting why it was rejected
    ///
    /// A supplied custom rate replaces the current one before interest is computed,
    /// but only if the whole addition succeeds.
    pub fn try_add_transaction(
        &mut self,
        date: &str,
        amount: &str,
        custom_rate: Option<&str>,
        time_provider: &SafeTimeProvider,
    ) -> Result<&TransactionRecord> {
        let date = parse_date(date)?;
        let principal = parse_amount(amount)?;
        let custom_rate = custom_rate.map(parse_rate).transpose()?;

        let mut rates = self.rates.clone();
        if let Some(rate) = custom_rate {
            rates.set_custom(rate);
        }
        if self.config.require_custom_rate && rates.custom().is_none() {
            return Err(LedgerError::CustomRateRequired);
        }

        let now = time_provider.now();
        let interest = rates
            .columns()
            .into_iter()
            .map(|(column, rate)| -> Result<RateInterest> {
                let calculation = self.engine.calculate_interest(principal, rate, date, now)?;
                Ok(RateInterest {
                    column,
                    rate,
                    interest: calculation.interest_amount,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let record = TransactionRecord {
            id: Uuid::new_v4(),
            date,
            principal,
            days_elapsed: days_elapsed(date, now),
            interest,
            recorded_at: now,
        };
        self.ensure_totals_in_range(&record, &rates)?;

        if let Some(rate) = custom_rate {
            self.apply_custom_rate(rate, now);
        }

        debug!(
            "recorded transaction {} on {}: principal {}, {} days elapsed",
            record.id, record.date, record.principal, record.days_elapsed
        );

        self.events.emit(LedgerEvent::TransactionAdded {
            record_id: record.id,
            date,
            principal,
            timestamp: now,
        });

        let index = self.records.len();
        self.records.push(record);
        Ok(&self.records[index])
    }

    /// update the custom rate used by later additions, returning false on invalid input
    pub fn set_custom_rate(&mut self, value: &str) -> bool {
        match self.try_set_custom_rate(value) {
            Ok(_) => true,
            Err(err) => {
                warn!("custom rate rejected: {}", err);
                false
            }
        }
    }

    /// update the custom rate, returning the previous one
    ///
    /// Interest already stored on records is left as it was.
    pub fn try_set_custom_rate(&mut self, value: &str) -> Result<Option<Rate>> {
        let rate = parse_rate(value)?;
        Ok(self.apply_custom_rate(rate, Utc::now()))
    }

    pub fn clear_custom_rate(&mut self) -> Option<Rate> {
        let previous = self.rates.clear_custom();
        if previous.is_some() {
            info!("custom rate cleared");
            self.events.emit(LedgerEvent::CustomRateChanged {
                old_rate: previous,
                new_rate: None,
                timestamp: Utc::now(),
            });
        }
        previous
    }

    fn apply_custom_rate(&mut self, rate: Rate, timestamp: DateTime<Utc>) -> Option<Rate> {
        let previous = self.rates.set_custom(rate);
        if previous != Some(rate) {
            info!("custom rate set to {}", rate);
            self.events.emit(LedgerEvent::CustomRateChanged {
                old_rate: previous,
                new_rate: Some(rate),
                timestamp,
            });
        }
        previous
    }

    /// records in insertion order
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// totals over every record, recomputed on each call
    pub fn totals(&self) -> Totals {
        // every append was checked against overflow, so saturation never clamps
        let total_principal = self
            .records
            .iter()
            .fold(Money::ZERO, |acc, record| acc.saturating_add(record.principal));

        let by_rate = total_columns(&self.rates, self.records.iter())
            .into_iter()
            .map(|column| {
                let total_interest = self
                    .records
                    .iter()
                    .filter_map(|record| record.interest_at(column))
                    .fold(Money::ZERO, Money::saturating_add);
                RateTotal {
                    column,
                    total_interest,
                    total_sum: total_principal.saturating_add(total_interest),
                }
            })
            .collect();

        debug!("totals over {} records: principal {}", self.records.len(), total_principal);

        Totals {
            total_principal,
            by_rate,
        }
    }

    /// reject a record whose addition would push any total out of the decimal range
    fn ensure_totals_in_range(&self, pending: &TransactionRecord, rates: &RateSet) -> Result<()> {
        let out_of_range = || LedgerError::AmountOutOfRange {
            message: "ledger totals would overflow".to_string(),
        };
        let all = || self.records.iter().chain(std::iter::once(pending));

        let total_principal = all()
            .try_fold(Money::ZERO, |acc, record| acc.checked_add(record.principal))
            .ok_or_else(out_of_range)?;

        for column in total_columns(rates, all()) {
            let total_interest = all()
                .filter_map(|record| record.interest_at(column))
                .try_fold(Money::ZERO, Money::checked_add)
                .ok_or_else(out_of_range)?;
            total_principal
                .checked_add(total_interest)
                .ok_or_else(out_of_range)?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            records: self.records.clone(),
            totals: self.totals(),
            rates: self.rates.clone(),
        }
    }

    /// two-decimal view for display
    pub fn report(&self) -> LedgerReport {
        LedgerReport::from_ledger(self)
    }

    /// discard every record, keeping configuration and the custom rate
    pub fn reset(&mut self) {
        let records_discarded = self.records.len();
        self.records.clear();
        info!("ledger reset, {} records discarded", records_discarded);
        self.events.emit(LedgerEvent::LedgerReset {
            records_discarded,
            timestamp: Utc::now(),
        });
    }

    /// register an observer called on every ledger event
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&LedgerEvent) + 'static,
    {
        self.events.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn events(&self) -> &[LedgerEvent] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<LedgerEvent> {
        self.events.take_events()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::standard()
    }
}

/// fixed columns in configured order, then the custom column if it is set or any record has it
fn total_columns<'a>(
    rates: &RateSet,
    mut records: impl Iterator<Item = &'a TransactionRecord>,
) -> Vec<RateColumn> {
    let mut columns: Vec<RateColumn> = rates
        .fixed()
        .iter()
        .map(|rate| RateColumn::Fixed(*rate))
        .collect();
    let has_custom = rates.custom().is_some()
        || records.any(|record| record.interest_at(RateColumn::Custom).is_some());
    if has_custom {
        columns.push(RateColumn::Custom);
    }
    columns
}

fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::EmptyDate);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| LedgerError::InvalidDate {
        input: input.to_string(),
    })
}

fn parse_amount(input: &str) -> Result<Money> {
    let amount = parse_decimal(input)
        .map(Money::from_decimal)
        .ok_or_else(|| LedgerError::InvalidAmount {
            input: input.to_string(),
        })?;
    if !amount.is_positive() {
        return Err(LedgerError::NonPositiveAmount { amount });
    }
    Ok(amount)
}

/// parse a percentage such as "12.5" into a rate
fn parse_rate(input: &str) -> Result<Rate> {
    let rate = parse_decimal(input)
        .map(Rate::from_percent_decimal)
        .ok_or_else(|| LedgerError::InvalidRate {
            input: input.to_string(),
        })?;
    if !rate.is_positive() {
        return Err(LedgerError::NonPositiveRate { rate });
    }
    Ok(rate)
}
