//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (period + 1).
//! Seed: EMA[0] = close[0], so every bar carries a value.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::BarSeries;
use crate::error::{require_len, require_period, IndicatorError};

pub const DEFAULT_EMA_PERIOD: usize = 20;

#[derive(Debug, Clone)]
pub struct Ema {
    period: usize,
    name: String,
}

impl Ema {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        require_period("ema", "period", period, 1)?;
        Ok(Self {
            period,
            name: format!("ema_{period}"),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn alpha(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }

    pub fn calculate(&self, prices: &[f64]) -> Result<Vec<f64>, IndicatorError> {
        require_len("ema", prices.len(), self.period)?;

        let alpha = self.alpha();
        let mut result = Vec::with_capacity(prices.len());
        let mut prev = prices[0];
        result.push(prev);
        for &price in &prices[1..] {
            prev = alpha * price + (1.0 - alpha) * prev;
            result.push(prev);
        }
        Ok(result)
    }
}

impl Default for Ema {
    fn default() -> Self {
        Self {
            period: DEFAULT_EMA_PERIOD,
            name: format!("ema_{DEFAULT_EMA_PERIOD}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn min_len(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &BarSeries) -> Result<IndicatorValues, IndicatorError> {
        let ema = self.calculate(series.close())?;
        let mut values = IndicatorValues::new();
        values.insert(self.name.clone(), ema);
        Ok(values)
    }
}
