//! Parabolic SAR: Wilder's acceleration factor system.
//!
//! Sequential: each bar advances a [`SarState`] (direction, extreme point and
//! acceleration factor) from the previous SAR value.
//!
//! Initial direction compares the midpoints of bars 0 and 1. A rising start
//! places SAR at low[0] with EP = high[0]; a falling start places SAR at
//! high[0] with EP = low[0]. A single-bar series yields low[0].
//!
//! Parameters: af_start (default 0.02), af_step (default 0.02), af_max (default 0.20).

use serde::Serialize;
use tracing::trace;

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{BarSeries, Trend};
use crate::error::{check_lengths, require_len, IndicatorError};
use crate::indicators::param_label;

/// Acceleration factor schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Acceleration {
    pub start: f64,
    pub step: f64,
    pub max: f64,
}

impl Acceleration {
    fn next(&self, af: f64) -> f64 {
        (af + self.step).min(self.max)
    }
}

impl Default for Acceleration {
    fn default() -> Self {
        Self {
            start: 0.02,
            step: 0.02,
            max: 0.20,
        }
    }
}

/// High and low of one bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighLow {
    pub high: f64,
    pub low: f64,
}

impl HighLow {
    fn at(high: &[f64], low: &[f64], i: usize) -> Self {
        Self {
            high: high[i],
            low: low[i],
        }
    }
}

/// Trend state carried from bar to bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SarState {
    Rising { ep: f64, af: f64 },
    Falling { ep: f64, af: f64 },
}

impl SarState {
    pub fn trend(&self) -> Trend {
        match self {
            SarState::Rising { .. } => Trend::Up,
            SarState::Falling { .. } => Trend::Down,
        }
    }

    /// Advance one bar. Returns the new state and the SAR value for `cur`.
    ///
    /// A flip resets AF to `accel.start`; otherwise AF only moves when the
    /// bar sets a new extreme.
    pub fn step(
        self,
        prev_sar: f64,
        prev: HighLow,
        cur: HighLow,
        accel: &Acceleration,
    ) -> (SarState, f64) {
        match self {
            SarState::Rising { ep, af } => {
                let candidate = prev_sar + af * (ep - prev_sar);
                if candidate > prev.low.min(cur.low) {
                    let sar = prev.high.max(cur.high);
                    let next = SarState::Falling {
                        ep: cur.low,
                        af: accel.start,
                    };
                    (next, sar)
                } else if cur.high > ep {
                    let next = SarState::Rising {
                        ep: cur.high,
                        af: accel.next(af),
                    };
                    (next, candidate)
                } else {
                    (self, candidate)
                }
            }
            SarState::Falling { ep, af } => {
                let candidate = prev_sar + af * (ep - prev_sar);
                if candidate < prev.high.max(cur.high) {
                    let sar = prev.low.min(cur.low);
                    let next = SarState::Rising {
                        ep: cur.high,
                        af: accel.start,
                    };
                    (next, sar)
                } else if cur.low < ep {
                    let next = SarState::Falling {
                        ep: cur.low,
                        af: accel.next(af),
                    };
                    (next, candidate)
                } else {
                    (self, candidate)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SarOutput {
    pub sar: Vec<f64>,
    /// Trend in effect at each bar; bar 0 carries the detected initial state.
    pub trend: Vec<Trend>,
}

#[derive(Debug, Clone)]
pub struct ParabolicSar {
    accel: Acceleration,
    name: String,
}

impl ParabolicSar {
    pub fn new(af_start: f64, af_step: f64, af_max: f64) -> Result<Self, IndicatorError> {
        if !(af_start.is_finite() && af_start > 0.0) {
            return Err(IndicatorError::invalid(
                "parabolic_sar",
                "af_start",
                format!("must be > 0, got {af_start}"),
            ));
        }
        if !(af_step.is_finite() && af_step > 0.0) {
            return Err(IndicatorError::invalid(
                "parabolic_sar",
                "af_step",
                format!("must be > 0, got {af_step}"),
            ));
        }
        if !(af_max.is_finite() && af_max >= af_start) {
            return Err(IndicatorError::invalid(
                "parabolic_sar",
                "af_max",
                format!("must be >= af_start ({af_start}), got {af_max}"),
            ));
        }
        Ok(Self {
            accel: Acceleration {
                start: af_start,
                step: af_step,
                max: af_max,
            },
            name: format!(
                "psar_{}_{}_{}",
                param_label(af_start),
                param_label(af_step),
                param_label(af_max)
            ),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn acceleration(&self) -> Acceleration {
        self.accel
    }

    pub fn calculate(&self, high: &[f64], low: &[f64]) -> Result<SarOutput, IndicatorError> {
        let n = check_lengths("parabolic_sar", high, &[("low", low)])?;
        require_len("parabolic_sar", n, 1)?;

        if n == 1 {
            return Ok(SarOutput {
                sar: vec![low[0]],
                trend: vec![Trend::Up],
            });
        }

        let mut sar = Vec::with_capacity(n);
        let mut trend = Vec::with_capacity(n);

        let rising = (high[1] + low[1]) / 2.0 > (high[0] + low[0]) / 2.0;
        let mut state = if rising {
            sar.push(low[0]);
            SarState::Rising {
                ep: high[0],
                af: self.accel.start,
            }
        } else {
            sar.push(high[0]);
            SarState::Falling {
                ep: low[0],
                af: self.accel.start,
            }
        };
        trend.push(state.trend());

        for i in 1..n {
            let (next, value) = state.step(
                sar[i - 1],
                HighLow::at(high, low, i - 1),
                HighLow::at(high, low, i),
                &self.accel,
            );
            if next.trend() != state.trend() {
                trace!(bar = i, to = ?next.trend(), sar = value, "parabolic sar flip");
            }
            state = next;
            sar.push(value);
            trend.push(state.trend());
        }

        Ok(SarOutput { sar, trend })
    }
}

impl Default for ParabolicSar {
    fn default() -> Self {
        let accel = Acceleration::default();
        Self {
            name: format!(
                "psar_{}_{}_{}",
                param_label(accel.start),
                param_label(accel.step),
                param_label(accel.max)
            ),
            accel,
        }
    }
}

impl Indicator for ParabolicSar {
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
        let out = self.calculate(series.high(), series.low())?;
        let mut values = IndicatorValues::new();
        values.insert(format!("{}.sar", self.name), out.sar);
        values.insert(
            format!("{}.trend", self.name),
            out.trend.iter().map(|t| f64::from(t.sign())).collect(),
        );
        Ok(values)
    }
}
