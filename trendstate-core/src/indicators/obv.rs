//! On-Balance Volume (OBV).
//!
//! OBV[0] = volume[0]; afterwards volume is added on an up close, subtracted
//! on a down close and carried on an unchanged close.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::BarSeries;
use crate::error::{check_lengths, require_len, IndicatorError};

#[derive(Debug, Clone)]
pub struct Obv {
    name: String,
}

impl Obv {
    pub fn new() -> Self {
        Self {
            name: "obv".to_string(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn calculate(&self, close: &[f64], volume: &[f64]) -> Result<Vec<f64>, IndicatorError> {
        let n = check_lengths("obv", close, &[("volume", volume)])?;
        require_len("obv", n, 1)?;

        let mut obv = Vec::with_capacity(n);
        let mut running = volume[0];
        obv.push(running);
        for i in 1..n {
            if close[i] > close[i - 1] {
                running += volume[i];
            } else if close[i] < close[i - 1] {
                running -= volume[i];
            }
            obv.push(running);
        }
        Ok(obv)
    }
}

impl Default for Obv {
    fn default() -> Self {
        Self::new()
    }
}

impl Indicator for Obv {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn min_len(&self) -> usize {
        1
    }

    fn compute(&self, series: &BarSeries) -> Result<IndicatorValues, IndicatorError> {
        let obv = self.calculate(series.close(), series.volume())?;
        let mut values = IndicatorValues::new();
        values.insert(self.name.clone(), obv);
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn obv_regression() {
        let close = [10.0, 11.0, 11.0, 12.0, 11.0, 12.0];
        let volume = [100.0, 200.0, 150.0, 300.0, 250.0, 400.0];
        let obv = Obv::new().calculate(&close, &volume).unwrap();
        assert_eq!(obv, vec![100.0, 300.0, 300.0, 600.0, 350.0, 750.0]);
    }

    #[test]
    fn obv_errors() {
        let obv = Obv::new();
        assert_eq!(obv.calculate(&[], &[]).unwrap_err().kind(), ErrorKind::InsufficientData);
        assert_eq!(
            obv.calculate(&[1.0, 2.0], &[1.0]).unwrap_err().kind(),
            ErrorKind::Shape
        );
    }
}
