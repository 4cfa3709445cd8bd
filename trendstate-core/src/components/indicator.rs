//! Indicator trait and computed indicator values container.
//!
//! Indicators are pure functions: bar series in, named numeric series out.
//! Every output series has the same length as the input series.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::BarSeries;
use crate::error::IndicatorError;

/// Trait for indicators.
///
/// # Look-ahead contamination guard
/// Apart from explicitly backward-projected outputs (Ichimoku's chikou), no
/// value at bar t may depend on price data from bar t+1 or later.
pub trait Indicator: Send + Sync {
    /// Instance name (e.g., "atr_14"). Multi-output indicators prefix their
    /// output keys with it.
    fn name(&self) -> &str;

    /// Number of leading bars that hold the NaN placeholder.
    fn lookback(&self) -> usize;

    /// Minimum series length accepted by `compute`.
    fn min_len(&self) -> usize;

    /// Compute every output series for `series`.
    fn compute(&self, series: &BarSeries) -> Result<IndicatorValues, IndicatorError>;
}

/// Container for computed indicator series, keyed by output name.
///
/// Uses `BTreeMap` so serialized output has a stable key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct IndicatorValues {
    series: BTreeMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a named series, replacing any previous series with that name.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Value of a named series at a specific bar index.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    /// The full series for a name.
    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.series.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Move every series of `other` into `self`.
    pub fn merge(&mut self, other: IndicatorValues) {
        self.series.extend(other.series);
    }

    /// Number of series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
