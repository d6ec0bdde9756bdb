use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Rate;

/// identifies an interest column on a record or in the totals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateColumn {
    /// one of the configured fixed rates
    Fixed(Rate),
    /// the user-supplied rate, whatever its value was at append time
    Custom,
}

impl fmt::Display for RateColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateColumn::Fixed(rate) => write!(f, "{}", rate),
            RateColumn::Custom => write!(f, "custom"),
        }
    }
}

/// ordered set of annual rates applied to every new record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSet {
    fixed: Vec<Rate>,
    custom: Option<Rate>,
}

impl RateSet {
    pub fn new(fixed: Vec<Rate>) -> Self {
        Self { fixed, custom: None }
    }

    /// 24% and 18%
    pub fn standard() -> Self {
        Self::new(vec![Rate::from_percentage(24), Rate::from_percentage(18)])
    }

    pub fn fixed(&self) -> &[Rate] {
        &self.fixed
    }

    pub fn custom(&self) -> Option<Rate> {
        self.custom
    }

    /// replace the custom rate, returning the previous one
    pub fn set_custom(&mut self, rate: Rate) -> Option<Rate> {
        self.custom.replace(rate)
    }

    pub fn clear_custom(&mut self) -> Option<Rate> {
        self.custom.take()
    }

    /// columns in display order: fixed rates, then the custom rate if one is set
    pub fn columns(&self) -> Vec<(RateColumn, Rate)> {
        let mut columns: Vec<(RateColumn, Rate)> = self
            .fixed
            .iter()
            .map(|rate| (RateColumn::Fixed(*rate), *rate))
            .collect();
        if let Some(custom) = self.custom {
            columns.push((RateColumn::Custom, custom));
        }
        columns
    }
}

impl Default for RateSet {
    fn default() -> Self {
        Self::standard()
    }
}
