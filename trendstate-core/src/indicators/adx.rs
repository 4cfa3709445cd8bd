//! ADX: Average Directional Index (Wilder).
//!
//! Steps:
//! 1. +DM / -DM from consecutive bars (bar 0 has neither)
//! 2. Smooth TR, +DM, -DM with the accumulator form (seed = sum of first `period`)
//! 3. +DI = 100 * smoothed(+DM) / smoothed(TR), -DI likewise (0 when TR is 0)
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI) (0 when the sum is 0)
//! 5. ADX = average-form Wilder smoothing of DX
//!
//! DX is 0 across the warm-up region, and the first ADX value averages DX
//! over indices 0..=period-1, so it includes those zeros. Reference outputs
//! depend on this, so it is kept.
//!
//! adx, +DI and -DI are NaN before index period-1.

use serde::Serialize;

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::BarSeries;
use crate::error::{check_lengths, require_len, require_period, IndicatorError};
use crate::indicators::primitives::{true_range, wilder_smooth, WilderForm};

pub const DEFAULT_ADX_PERIOD: usize = 14;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdxOutput {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Adx {
    period: usize,
    name: String,
}

/// Raw +DM and -DM series. At most one of the two is nonzero on any bar.
pub fn directional_movement(high: &[f64], low: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = high.len();
    let mut plus_dm = vec![0.0; n];
    let mut minus_dm = vec![0.0; n];

    for i in 1..n {
        let up_move = high[i] - high[i - 1];
        let down_move = low[i - 1] - low[i];

        if up_move > down_move && up_move > 0.0 {
            plus_dm[i] = up_move;
        }
        if down_move > up_move && down_move > 0.0 {
            minus_dm[i] = down_move;
        }
    }

    (plus_dm, minus_dm)
}

impl Adx {
    pub fn new(period: usize) -> Result<Self, IndicatorError> {
        require_period("adx", "period", period, 1)?;
        Ok(Self {
            period,
            name: format!("adx_{period}"),
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
    ) -> Result<AdxOutput, IndicatorError> {
        let n = check_lengths("adx", high, &[("low", low), ("close", close)])?;
        require_len("adx", n, self.period)?;

        let warmup = self.period - 1;
        let tr = true_range(high, low, close);
        let (plus_dm, minus_dm) = directional_movement(high, low);

        let smooth_tr = wilder_smooth(&tr, self.period, WilderForm::Accumulator);
        let smooth_plus = wilder_smooth(&plus_dm, self.period, WilderForm::Accumulator);
        let smooth_minus = wilder_smooth(&minus_dm, self.period, WilderForm::Accumulator);

        let mut plus_di = vec![f64::NAN; n];
        let mut minus_di = vec![f64::NAN; n];
        let mut dx = vec![0.0; n];

        for i in warmup..n {
            let (pdi, mdi) = if smooth_tr[i] == 0.0 {
                (0.0, 0.0)
            } else {
                (
                    100.0 * smooth_plus[i] / smooth_tr[i],
                    100.0 * smooth_minus[i] / smooth_tr[i],
                )
            };
            plus_di[i] = pdi;
            minus_di[i] = mdi;

            let di_sum = pdi + mdi;
            dx[i] = if di_sum == 0.0 {
                0.0
            } else {
                100.0 * (pdi - mdi).abs() / di_sum
            };
        }

        let adx = wilder_smooth(&dx, self.period, WilderForm::Average);

        Ok(AdxOutput {
            adx,
            plus_di,
            minus_di,
        })
    }
}

impl Default for Adx {
    fn default() -> Self {
        Self {
            period: DEFAULT_ADX_PERIOD,
            name: format!("adx_{DEFAULT_ADX_PERIOD}"),
        }
    }
}

impl Indicator for Adx {
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
        let out = self.calculate(series.high(), series.low(), series.close())?;
        let mut values = IndicatorValues::new();
        values.insert(format!("{}.adx", self.name), out.adx);
        values.insert(format!("{}.plus_di", self.name), out.plus_di);
        values.insert(format!("{}.minus_di", self.name), out.minus_di);
        Ok(values)
    }
}
