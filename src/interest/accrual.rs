use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use hourglass_rs::SafeTimeProvider;

use crate::decimal::{Money, Rate};
use crate::errors::{LedgerError, Result};
use crate::interest::{InterestCalculation, InterestCalculator};

/// days in the accrual year (actual/365)
pub const YEAR_BASIS_DAYS: u32 = 365;

/// whole days from midnight UTC of `transaction_date` to `now`, truncated toward zero
///
/// A date after `now` yields a negative count.
pub fn days_elapsed(transaction_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let start = transaction_date.and_time(NaiveTime::MIN).and_utc();
    (now - start).num_days()
}

/// simple interest accrued on `principal` from `transaction_date` until `now`
///
/// `principal * rate * days / 365`, unrounded. Future dates give negative interest.
pub fn compute_interest(
    transaction_date: NaiveDate,
    principal: Money,
    annual_rate: Rate,
    now: DateTime<Utc>,
) -> Result<Money> {
    let days = days_elapsed(transaction_date, now);
    principal
        .apply_rate(annual_rate, days, YEAR_BASIS_DAYS)
        .ok_or_else(|| LedgerError::AmountOutOfRange {
            message: format!("interest on {} at {} over {} days", principal, annual_rate, days),
        })
}

/// engine for accruing simple interest on an actual/365 basis
#[derive(Debug, Clone, Copy, Default)]
pub struct AccrualEngine;

impl AccrualEngine {
    pub fn new() -> Self {
        Self
    }

    /// accrue interest up to the provider's current time
    pub fn accrue_until_now(
        &self,
        principal: Money,
        annual_rate: Rate,
        transaction_date: NaiveDate,
        time_provider: &SafeTimeProvider,
    ) -> Result<InterestCalculation> {
        self.calculate_interest(principal, annual_rate, transaction_date, time_provider.now())
    }
}

impl InterestCalculator for AccrualEngine {
    fn calculate_interest(
        &self,
        principal: Money,
        rate: Rate,
        transaction_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<InterestCalculation> {
        if !principal.is_positive() {
            return Err(LedgerError::NonPositiveAmount { amount: principal });
        }
        if !rate.is_positive() {
            return Err(LedgerError::NonPositiveRate { rate });
        }

        let days = days_elapsed(transaction_date, now);

        Ok(InterestCalculation {
            interest_amount: compute_interest(transaction_date, principal, rate, now)?,
            daily_rate: rate.daily_rate(YEAR_BASIS_DAYS),
            days,
            principal_base: principal,
            year_basis: YEAR_BASIS_DAYS,
        })
    }

    fn year_basis(&self) -> u32 {
        YEAR_BASIS_DAYS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_elapsed() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(days_elapsed(date(2024, 1, 1), now), 182);
        assert_eq!(days_elapsed(date(2024, 7, 1), now), 0);
        assert_eq!(days_elapsed(date(2024, 7, 3), now), -2);
    }

    #[test]
    fn test_partial_days_truncate_toward_zero() {
        let afternoon = Utc.with_ymd_and_hms(2024, 7, 1, 15, 30, 0).unwrap();
        assert_eq!(days_elapsed(date(2024, 6, 30), afternoon), 1);
        assert_eq!(days_elapsed(date(2024, 7, 1), afternoon), 0);
        // 1 day 8.5 hours ahead rounds toward zero
        assert_eq!(days_elapsed(date(2024, 7, 3), afternoon), -1);
    }

    #[test]
    fn test_half_year_at_fixed_rates() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let principal = Money::from_major(1_000);

        let at_24 = compute_interest(date(2024, 1, 1), principal, Rate::from_percentage(24), now).unwrap();
        let at_18 = compute_interest(date(2024, 1, 1), principal, Rate::from_percentage(18), now).unwrap();

        assert_eq!(at_24.round_dp(2).as_decimal(), dec!(119.67));
        assert_eq!(at_18.round_dp(2).as_decimal(), dec!(89.75));
    }

    #[test]
    fn test_same_day_is_zero() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let interest = compute_interest(date(2024, 3, 15), Money::from_major(5_000), Rate::from_percentage(24), now).unwrap();
        assert!(interest.is_zero());
    }

    #[test]
    fn test_future_date_is_negative() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let interest = compute_interest(date(2024, 1, 11), Money::from_major(365), Rate::from_percentage(10), now).unwrap();
        assert_eq!(interest.as_decimal(), dec!(-1));
    }

    #[test]
    fn test_linear_in_principal_and_rate() {
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap();
        let d = date(2024, 2, 17);

        let base = compute_interest(d, Money::from_major(750), Rate::from_percentage(18), now).unwrap();
        let double_principal = compute_interest(d, Money::from_major(1_500), Rate::from_percentage(18), now).unwrap();
        let double_rate = compute_interest(d, Money::from_major(750), Rate::from_percentage(36), now).unwrap();

        let doubled = (base * dec!(2)).round_dp(12);
        assert_eq!(double_principal.round_dp(12), doubled);
        assert_eq!(double_rate.round_dp(12), doubled);
    }

    #[test]
    fn test_engine_calculation_details() {
        let engine = AccrualEngine::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

        let calc = engine
            .calculate_interest(Money::from_major(10_000), Rate::from_percentage(5), date(2024, 1, 1), now)
            .unwrap();

        assert_eq!(calc.days, 30);
        assert_eq!(calc.year_basis, engine.year_basis());
        assert_eq!(calc.principal_base, Money::from_major(10_000));
        assert_eq!(calc.interest_amount.round_dp(2).as_decimal(), dec!(41.10));
        assert_eq!(calc.daily_rate, Rate::from_decimal(dec!(0.05) / dec!(365)));
    }

    #[test]
    fn test_engine_rejects_non_positive_inputs() {
        let engine = AccrualEngine::new();
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();

        let err = engine
            .calculate_interest(Money::ZERO, Rate::from_percentage(5), date(2024, 1, 1), now)
            .unwrap_err();
        assert_eq!(err, LedgerError::NonPositiveAmount { amount: Money::ZERO });

        let err = engine
            .calculate_interest(Money::from_major(10), Rate::ZERO, date(2024, 1, 1), now)
            .unwrap_err();
        assert_eq!(err, LedgerError::NonPositiveRate { rate: Rate::ZERO });
    }

    #[test]
    fn test_overflow_is_an_error() {
        let engine = AccrualEngine::new();
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
        let huge = Money::from_str_exact("79228162514264337593543950335").unwrap();

        let err = compute_interest(date(2024, 1, 1), huge, Rate::from_percentage(24), now).unwrap_err();
        assert!(matches!(err, LedgerError::AmountOutOfRange { .. }));

        let err = engine
            .calculate_interest(huge, Rate::from_percentage(18), date(2024, 1, 1), now)
            .unwrap_err();
        assert!(matches!(err, LedgerError::AmountOutOfRange { .. }));
    }

    #[test]
    fn test_accrual_with_time_manipulation() {
        let engine = AccrualEngine::new();
        let time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        ));
        let control = time.test_control().unwrap();

        let principal = Money::from_major(36_500);
        let rate = Rate::from_percentage(10);
        let start = date(2024, 1, 1);

        let calc = engine.accrue_until_now(principal, rate, start, &time).unwrap();
        assert!(calc.interest_amount.is_zero());

        control.advance(Duration::days(3));
        let calc = engine.accrue_until_now(principal, rate, start, &time).unwrap();
        assert_eq!(calc.days, 3);
        assert_eq!(calc.interest_amount.as_decimal(), dec!(30));
    }
}
