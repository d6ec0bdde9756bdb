/// display view of a ledger, with every amount rounded to two decimals
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;
use crate::ledger::Ledger;
use crate::rates::{RateColumn, RateSet};

/// placeholder for a record that has no interest in a column
const MISSING_CELL: &str = "-";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub headers: Vec<String>,
    pub rows: Vec<ReportRow>,
    pub total_principal: String,
    pub totals: Vec<ReportTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub date: String,
    pub amount: String,
    pub interest: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportTotal {
    pub interest_label: String,
    pub total_interest: String,
    pub sum_label: String,
    pub total_sum: String,
}

impl LedgerReport {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let totals = ledger.totals();
        let rates = ledger.rates();
        let columns: Vec<RateColumn> = totals.by_rate.iter().map(|total| total.column).collect();

        let mut headers = vec!["Date".to_string(), "Amount".to_string()];
        headers.extend(
            columns
                .iter()
                .map(|column| format!("Interest ({})", column_label(*column, rates))),
        );

        let rows = ledger
            .records()
            .iter()
            .map(|record| ReportRow {
                date: record.date.format("%Y-%m-%d").to_string(),
                amount: format_money(record.principal),
                interest: columns
                    .iter()
                    .map(|column| {
                        record
                            .interest_at(*column)
                            .map(format_money)
                            .unwrap_or_else(|| MISSING_CELL.to_string())
                    })
                    .collect(),
            })
            .collect();

        let report_totals = totals
            .by_rate
            .iter()
            .map(|total| {
                let label = column_label(total.column, rates);
                ReportTotal {
                    interest_label: format!("Total Interest ({})", label),
                    total_interest: format_money(total.total_interest),
                    sum_label: format!("Total Sum (Principal + Interest {})", label),
                    total_sum: format_money(total.total_sum),
                }
            })
            .collect();

        Self {
            headers,
            rows,
            total_principal: format_money(totals.total_principal),
            totals: report_totals,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for LedgerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.len()).collect();
        for row in &self.rows {
            for (i, cell) in row.cells().enumerate() {
                if let Some(width) = widths.get_mut(i) {
                    *width = (*width).max(cell.len());
                }
            }
        }

        write_line(f, self.headers.iter().map(String::as_str), &widths)?;
        for row in &self.rows {
            write_line(f, row.cells(), &widths)?;
        }

        writeln!(f)?;
        writeln!(f, "Total Principal: {}", self.total_principal)?;
        for total in &self.totals {
            writeln!(f, "{}: {}", total.interest_label, total.total_interest)?;
            writeln!(f, "{}: {}", total.sum_label, total.total_sum)?;
        }
        Ok(())
    }
}

impl ReportRow {
    fn cells(&self) -> impl Iterator<Item = &str> {
        [self.date.as_str(), self.amount.as_str()]
            .into_iter()
            .chain(self.interest.iter().map(String::as_str))
    }
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) -> fmt::Result {
    let line = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(f, "{}", line.trim_end())
}

fn column_label(column: RateColumn, rates: &RateSet) -> String {
    match (column, rates.custom()) {
        (RateColumn::Fixed(rate), _) => rate.to_string(),
        (RateColumn::Custom, Some(rate)) => format!("custom {}", rate),
        (RateColumn::Custom, None) => "custom".to_string(),
    }
}

/// two decimal places, halves rounded away from zero
pub fn format_money(amount: Money) -> String {
    format!("{:.2}", amount.round_dp(2).as_decimal())
}
