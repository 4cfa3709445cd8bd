//! Ichimoku Kinko Hyo.
//!
//! - Tenkan-sen: midpoint of highest high / lowest low over `tenkan` bars
//! - Kijun-sen: same over `kijun` bars
//! - Senkou Span A: (tenkan + kijun) / 2, plotted `shift` bars ahead
//! - Senkou Span B: midpoint over `senkou` bars, plotted `shift` bars ahead
//! - Chikou Span: close plotted `shift` bars behind
//!
//! Positions without a value (window not full, or projected off either end of
//! the series) are NaN. Chikou is a backward projection: its value at t
//! comes from bar t + shift.

use serde::Serialize;

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::BarSeries;
use crate::error::{check_lengths, require_len, require_period, IndicatorError};
use crate::indicators::primitives::channel_midpoint;

pub const DEFAULT_TENKAN: usize = 9;
pub const DEFAULT_KIJUN: usize = 26;
pub const DEFAULT_SENKOU: usize = 52;
pub const DEFAULT_SHIFT: usize = 26;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IchimokuOutput {
    pub tenkan: Vec<f64>,
    pub kijun: Vec<f64>,
    pub senkou_a: Vec<f64>,
    pub senkou_b: Vec<f64>,
    pub chikou: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Ichimoku {
    tenkan: usize,
    kijun: usize,
    senkou: usize,
    shift: usize,
    name: String,
}

/// Rolling high/low midpoint; NaN until `period` bars are available.
fn midpoint_line(high: &[f64], low: &[f64], period: usize) -> Vec<f64> {
    let n = high.len();
    let mut out = vec![f64::NAN; n];
    for (end, slot) in out.iter_mut().enumerate().skip(period - 1) {
        *slot = channel_midpoint(high, low, end + 1 - period, end);
    }
    out
}

impl Ichimoku {
    pub fn new(
        tenkan: usize,
        kijun: usize,
        senkou: usize,
        shift: usize,
    ) -> Result<Self, IndicatorError> {
        require_period("ichimoku", "tenkan", tenkan, 1)?;
        require_period("ichimoku", "kijun", kijun, 1)?;
        require_period("ichimoku", "senkou", senkou, 1)?;
        Ok(Self {
            tenkan,
            kijun,
            senkou,
            shift,
            name: format!("ichimoku_{tenkan}_{kijun}_{senkou}_{shift}"),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn shift(&self) -> usize {
        self.shift
    }

    fn longest_period(&self) -> usize {
        self.tenkan.max(self.kijun).max(self.senkou)
    }

    pub fn calculate(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<IchimokuOutput, IndicatorError> {
        let n = check_lengths("ichimoku", high, &[("low", low), ("close", close)])?;
        require_len("ichimoku", n, self.longest_period())?;

        let tenkan = midpoint_line(high, low, self.tenkan);
        let kijun = midpoint_line(high, low, self.kijun);
        let span_b_source = midpoint_line(high, low, self.senkou);

        let mut senkou_a = vec![f64::NAN; n];
        let mut senkou_b = vec![f64::NAN; n];
        for idx in 0..n.saturating_sub(self.shift) {
            let target = idx + self.shift;
            if !tenkan[idx].is_nan() && !kijun[idx].is_nan() {
                senkou_a[target] = (tenkan[idx] + kijun[idx]) / 2.0;
            }
            senkou_b[target] = span_b_source[idx];
        }

        let mut chikou = vec![f64::NAN; n];
        for idx in self.shift..n {
            chikou[idx - self.shift] = close[idx];
        }

        Ok(IchimokuOutput {
            tenkan,
            kijun,
            senkou_a,
            senkou_b,
            chikou,
        })
    }
}

impl Default for Ichimoku {
    fn default() -> Self {
        Self {
            tenkan: DEFAULT_TENKAN,
            kijun: DEFAULT_KIJUN,
            senkou: DEFAULT_SENKOU,
            shift: DEFAULT_SHIFT,
            name: format!(
                "ichimoku_{DEFAULT_TENKAN}_{DEFAULT_KIJUN}_{DEFAULT_SENKOU}_{DEFAULT_SHIFT}"
            ),
        }
    }
}

impl Indicator for Ichimoku {
    fn name(&self) -> &str {
        &self.name
    }

    /// Leading NaNs of the last span to become defined. Chikou's trailing
    /// NaNs are not counted.
    fn lookback(&self) -> usize {
        self.longest_period() - 1 + self.shift
    }

    fn min_len(&self) -> usize {
        self.longest_period()
    }

    fn compute(&self, series: &BarSeries) -> Result<IndicatorValues, IndicatorError> {
        let out = self.calculate(series.high(), series.low(), series.close())?;
        let mut values = IndicatorValues::new();
        values.insert(format!("{}.tenkan", self.name), out.tenkan);
        values.insert(format!("{}.kijun", self.name), out.kijun);
        values.insert(format!("{}.senkou_a", self.name), out.senkou_a);
        values.insert(format!("{}.senkou_b", self.name), out.senkou_b);
        values.insert(format!("{}.chikou", self.name), out.chikou);
        Ok(values)
    }
}
