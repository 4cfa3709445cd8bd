//! Simple Moving Average (SMA).
//!
//! SMA[t] = mean(close[t-period+1..=t]). Lookback: period - 1 (NaN before).

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::BarSeries;
use crate::error::{require_len, require_period, IndicatorError};

pub const DEFAULT_SMA_PERIOD: usize = 20;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        require_period("sma", "period", period, 1)?;
        Ok(Self {
            period,
            name: format!("sma_{period}"),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn calculate(&self, prices: &[f64]) -> Result<Vec<f64>, IndicatorError> {
        require_len("sma", prices.len(), self.period)?;

        let mut result = vec![f64::NAN; prices.len()];
        let p = self.period as f64;
        for (i, window) in prices.windows(self.period).enumerate() {
            result[i + self.period - 1] = window.iter().sum::<f64>() / p;
        }
        Ok(result)
    }
}

impl Default for Sma {
    fn default() -> Self {
        Self {
            period: DEFAULT_SMA_PERIOD,
            name: format!("sma_{DEFAULT_SMA_PERIOD}"),
        }
    }
}

impl Indicator for Sma {
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
        let sma = self.calculate(series.close())?;
        let mut values = IndicatorValues::new();
        values.insert(self.name.clone(), sma);
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn sma_period_3() {
        let result = Sma::new(3)
            .unwrap()
            .calculate(&[10.0, 11.0, 12.0, 13.0, 14.0])
            .unwrap();
        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert_approx(result[2], 11.0, DEFAULT_EPSILON);
        assert_approx(result[3], 12.0, DEFAULT_EPSILON);
        assert_approx(result[4], 13.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_period_1_equals_input() {
        let prices = [3.0, 1.0, 4.0];
        assert_eq!(Sma::new(1).unwrap().calculate(&prices).unwrap(), prices.to_vec());
    }

    #[test]
    fn sma_errors() {
        assert_eq!(Sma::new(0).unwrap_err().kind(), ErrorKind::InvalidConfig);
        assert_eq!(
            Sma::new(5).unwrap().calculate(&[1.0; 4]).unwrap_err().kind(),
            ErrorKind::InsufficientData
        );
    }
}
