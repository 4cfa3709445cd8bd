//! Supertrend: ATR-based directional indicator.
//!
//! Basic bands sit `multiplier * ATR` above and below the bar midpoint. The
//! final bands ratchet: the upper band can only fall and the lower band can
//! only rise while the previous close stays on the same side of them.
//!
//! Bar 0 takes the basic bands as final bands and starts in an uptrend
//! unconditionally. ATR warm-up bars contribute an ATR of 0, so the bands
//! equal the midpoint until ATR is seeded and every output is defined from
//! bar 0.
//!
//! Output line: lower band while trending up, upper band while trending down.

use serde::Serialize;
use tracing::trace;

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{BarSeries, Trend};
use crate::error::{check_lengths, require_len, require_period, IndicatorError};
use crate::indicators::param_label;
use crate::indicators::primitives::{true_range, wilder_smooth, WilderForm};

pub const DEFAULT_SUPERTREND_PERIOD: usize = 10;
pub const DEFAULT_SUPERTREND_MULTIPLIER: f64 = 3.0;

/// Trend plus the final bands at one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandState {
    pub trend: Trend,
    pub upper: f64,
    pub lower: f64,
}

impl BandState {
    pub fn initial(basic_upper: f64, basic_lower: f64) -> Self {
        Self {
            trend: Trend::Up,
            upper: basic_upper,
            lower: basic_lower,
        }
    }

    /// Active line: support while up, resistance while down.
    pub fn line(&self) -> f64 {
        match self.trend {
            Trend::Up => self.lower,
            Trend::Down => self.upper,
        }
    }

    /// Ratchet the bands against `prev_close`, then apply the flip rule to `close`.
    pub fn step(self, prev_close: f64, close: f64, basic_upper: f64, basic_lower: f64) -> Self {
        let upper = if prev_close <= self.upper {
            basic_upper.min(self.upper)
        } else {
            basic_upper
        };
        let lower = if prev_close >= self.lower {
            basic_lower.max(self.lower)
        } else {
            basic_lower
        };

        let trend = match self.trend {
            Trend::Up if close <= lower => Trend::Down,
            Trend::Down if close >= upper => Trend::Up,
            unchanged => unchanged,
        };

        Self {
            trend,
            upper,
            lower,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupertrendOutput {
    pub line: Vec<f64>,
    pub direction: Vec<Trend>,
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl SupertrendOutput {
    /// Direction as `1` (up) / `-1` (down).
    pub fn direction_signs(&self) -> Vec<i8> {
        self.direction.iter().map(|t| t.sign()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Supertrend {
    period: usize,
    multiplier: f64,
    name: String,
}

impl Supertrend {
    pub fn new(period: usize, multiplier: f64) -> Result<Self, IndicatorError> {
        require_period("supertrend", "period", period, 1)?;
        if !(multiplier.is_finite() && multiplier >= 0.0) {
            return Err(IndicatorError::invalid(
                "supertrend",
                "multiplier",
                format!("must be a finite value >= 0, got {multiplier}"),
            ));
        }
        Ok(Self {
            period,
            multiplier,
            name: format!("supertrend_{period}_{}", param_label(multiplier)),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn calculate(
        &self,
        high: &[f64],
        low: &[f64],
        close: &[f64],
    ) -> Result<SupertrendOutput, IndicatorError> {
        let n = check_lengths("supertrend", high, &[("low", low), ("close", close)])?;
        require_len("supertrend", n, self.period)?;

        let tr = true_range(high, low, close);
        let atr = wilder_smooth(&tr, self.period, WilderForm::Average);

        let basic = |i: usize| {
            let mid = (high[i] + low[i]) / 2.0;
            let offset = if atr[i].is_nan() {
                0.0
            } else {
                self.multiplier * atr[i]
            };
            (mid + offset, mid - offset)
        };

        let mut out = SupertrendOutput {
            line: Vec::with_capacity(n),
            direction: Vec::with_capacity(n),
            upper: Vec::with_capacity(n),
            lower: Vec::with_capacity(n),
        };

        let (bu, bl) = basic(0);
        let mut state = BandState::initial(bu, bl);
        push_state(&mut out, &state);

        for i in 1..n {
            let (bu, bl) = basic(i);
            let next = state.step(close[i - 1], close[i], bu, bl);
            if next.trend != state.trend {
                trace!(bar = i, to = ?next.trend, line = next.line(), "supertrend flip");
            }
            state = next;
            push_state(&mut out, &state);
        }

        Ok(out)
    }
}

fn push_state(out: &mut SupertrendOutput, state: &BandState) {
    out.line.push(state.line());
    out.direction.push(state.trend);
    out.upper.push(state.upper);
    out.lower.push(state.lower);
}

impl Default for Supertrend {
    fn default() -> Self {
        Self {
            period: DEFAULT_SUPERTREND_PERIOD,
            multiplier: DEFAULT_SUPERTREND_MULTIPLIER,
            name: format!(
                "supertrend_{DEFAULT_SUPERTREND_PERIOD}_{}",
                param_label(DEFAULT_SUPERTREND_MULTIPLIER)
            ),
        }
    }
}

impl Indicator for Supertrend {
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
        let out = self.calculate(series.high(), series.low(), series.close())?;
        let mut values = IndicatorValues::new();
        values.insert(
            format!("{}.direction", self.name),
            out.direction.iter().map(|t| f64::from(t.sign())).collect(),
        );
        values.insert(format!("{}.line", self.name), out.line);
        values.insert(format!("{}.upper", self.name), out.upper);
        values.insert(format!("{}.lower", self.name), out.lower);
        Ok(values)
    }
}
