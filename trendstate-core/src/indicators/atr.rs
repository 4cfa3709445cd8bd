//! Average True Range (ATR).
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), with
//! TR[0] = high[0] - low[0].
//! ATR[period-1] = mean of TR[0..period]; afterwards
//! ATR[t] = (ATR[t-1] * (period-1) + TR[t]) / period.
//! Indices before period-1 are NaN.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::BarSeries;
use crate::error::{check_lengths, require_len, require_period, IndicatorError};
use crate::indicators::primitives::{true_range, wilder_smooth, WilderForm};

pub const DEFAULT_ATR_PERIOD: usize = 14;

#[derive(Debug, Clone)]
pub struct Atr {
    period: usize,
    name: String,
}

impl Atr {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        require_period("atr", "period", period, 1)?;
        Ok(Self {
            period,
            name: format!("atr_{period}"),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn calculate(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<Vec<f64>, IndicatorError> {
        let n = check_lengths("atr", high, &[("low", low), ("close", close)])?;
        require_len("atr", n, self.period)?;

        let tr = true_range(high, low, close);
        Ok(wilder_smooth(&tr, self.period, WilderForm::Average))
    }
}

impl Default for Atr {
    fn default() -> Self {
        Self {
            period: DEFAULT_ATR_PERIOD,
            name: format!("atr_{DEFAULT_ATR_PERIOD}"),
        }
    }
}

impl Indicator for Atr {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn min_len(&self) -> usize {
        self.period
    }

    fn compute(&self, series: &BarSeries) -> Result<IndicatorValues, IndicatorError> {
        let atr = self.calculate(series.high(), series.low(), series.close())?;
        let mut values = IndicatorValues::new();
        values.insert(self.name.clone(), atr);
        Ok(values)
    }
}
