//! Concrete indicator implementations.
//!
//! Each engine exposes a validating constructor and an inherent `calculate`
//! over plain slices, and implements the `Indicator` trait from
//! `components::indicator` so it can be built from configuration and
//! computed over a `BarSeries`.
//!
//! Multi-output indicators (ADX, Parabolic SAR, Supertrend, Ichimoku) publish
//! each output as `<name>.<output>` in `IndicatorValues`.
//!
//! Placeholder convention: `f64::NAN` marks "not yet available". A computed
//! zero is always a real value.

pub mod adx;
pub mod atr;
pub mod ema;
pub mod ichimoku;
pub mod kama;
pub mod obv;
pub mod parabolic_sar;
pub mod primitives;
pub mod sma;
pub mod supertrend;

pub use adx::{Adx, AdxOutput};
pub use atr::Atr;
pub use ema::Ema;
pub use ichimoku::{Ichimoku, IchimokuOutput};
pub use kama::Kama;
pub use obv::Obv;
pub use parabolic_sar::{ParabolicSar, SarOutput, SarState};
pub use sma::Sma;
pub use supertrend::{BandState, Supertrend, SupertrendOutput};

/// Render a float parameter for use inside an indicator name.
///
/// `.` separates a name from its output in `IndicatorValues` keys, so the
/// decimal point is written as `p` (`0.02` becomes `0p02`).
pub(crate) fn param_label(value: f64) -> String {
    value.to_string().replace('.', "p")
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
