//! Numeric building blocks shared by several engines.
//!
//! True range and Wilder smoothing live here once so ATR, ADX and SuperTrend
//! cannot drift apart.

/// Largest of three values.
pub fn max_of3(a: f64, b: f64, c: f64) -> f64 {
    a.max(b).max(c)
}

/// Smallest of three values.
pub fn min_of3(a: f64, b: f64, c: f64) -> f64 {
    a.min(b).min(c)
}

/// Inclusive `(min, max)` of `series[start..=end]`.
///
/// Linear in the window length; callers keep windows small relative to the
/// series, so no monotonic deque is used.
pub fn window_min_max(series: &[f64], start: usize, end: usize) -> (f64, f64) {
    series[start..=end]
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

/// Midpoint of the highest high and lowest low over `start..=end`.
pub fn channel_midpoint(high: &[f64], low: &[f64], start: usize, end: usize) -> f64 {
    let (_, highest) = window_min_max(high, start, end);
    let (lowest, _) = window_min_max(low, start, end);
    (highest + lowest) / 2.0
}

/// True Range series.
///
/// TR[0] = high[0] - low[0] (no previous close).
/// TR[i] = max(high[i]-low[i], |high[i]-close[i-1]|, |low[i]-close[i-1]|).
///
/// Callers guarantee equal lengths.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let n = high.len();
    let mut tr = Vec::with_capacity(n);
    if n == 0 {
        return tr;
    }

    tr.push(high[0] - low[0]);
    for i in 1..n {
        let pc = close[i - 1];
        tr.push(max_of3(
            high[i] - low[i],
            (high[i] - pc).abs(),
            (low[i] - pc).abs(),
        ));
    }
    tr
}

/// Which Wilder recursion to apply.
///
/// The two forms differ by a constant factor of `period`; each engine picks
/// the one its reference formula uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WilderForm {
    /// Seed with the sum, then `s - s/period + x`. Used for ADX's TR/DM totals.
    Accumulator,
    /// Seed with the mean, then `(s*(period-1) + x) / period`. Used for ATR and ADX.
    Average,
}

/// Apply Wilder smoothing to `raw`.
///
/// Indices `< period-1` hold `NaN`; index `period-1` holds the seed computed
/// from `raw[0..period]`. Returns all-`NaN` when the input is shorter than
/// `period` or `period` is zero.
pub fn wilder_smooth(raw: &[f64], period: usize, form: WilderForm) -> Vec<f64> {
    let n = raw.len();
    let mut out = vec![f64::NAN; n];
    if period == 0 || n < period {
        return out;
    }

    let p = period as f64;
    let sum: f64 = raw[..period].iter().sum();
    let mut prev = match form {
        WilderForm::Accumulator => sum,
        WilderForm::Average => sum / p,
    };
    out[period - 1] = prev;

    for i in period..n {
        prev = match form {
            WilderForm::Accumulator => prev - prev / p + raw[i],
            WilderForm::Average => (prev * (p - 1.0) + raw[i]) / p,
        };
        out[i] = prev;
    }

    out
}
