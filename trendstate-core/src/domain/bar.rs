//! Bar, the fundamental market data unit, and the parallel-array view
//! the indicator engines read.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{check_lengths, IndicatorError};

/// OHLCV bar for a single period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    /// Returns true if any OHLCV field is NaN.
    pub fn is_void(&self) -> bool {
        self.open.is_nan()
            || self.high.is_nan()
            || self.low.is_nan()
            || self.close.is_nan()
            || self.volume.is_nan()
    }

    /// Basic sanity check: high >= low and both bracket open and close.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.volume >= 0.0
    }

    pub fn midpoint(&self) -> f64 {
        (self.high + self.low) / 2.0
    }
}

/// Bar series as parallel arrays of equal length.
///
/// Construction validates the shape once, so every engine reached through the
/// `Indicator` trait sees consistent lengths.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarSeries {
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
}

impl BarSeries {
    pub fn new(
        high: Vec<f64>,
        low: Vec<f64>,
        close: Vec<f64>,
        volume: Vec<f64>,
    ) -> Result<Self, IndicatorError> {
        check_lengths(
            "bar_series",
            &high,
            &[("low", &low), ("close", &close), ("volume", &volume)],
        )?;
        Ok(Self {
            high,
            low,
            close,
            volume,
        })
    }

    /// Series without volume; volume is filled with zeros.
    pub fn from_hlc(high: Vec<f64>, low: Vec<f64>, close: Vec<f64>) -> Result<Self, IndicatorError> {
        let volume = vec![0.0; high.len()];
        Self::new(high, low, close, volume)
    }

    pub fn from_bars(bars: &[Bar]) -> Self {
        Self {
            high: bars.iter().map(|b| b.high).collect(),
            low: bars.iter().map(|b| b.low).collect(),
            close: bars.iter().map(|b| b.close).collect(),
            volume: bars.iter().map(|b| b.volume).collect(),
        }
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }

    /// First `len` bars as a new series.
    pub fn truncated(&self, len: usize) -> Self {
        let len = len.min(self.len());
        Self {
            high: self.high[..len].to_vec(),
            low: self.low[..len].to_vec(),
            close: self.close[..len].to_vec(),
            volume: self.volume[..len].to_vec(),
        }
    }
}
