//! Kaufman Adaptive Moving Average (KAMA).
//!
//! ER[t] = |p[t] - p[t-er+1]| / sum(|p[j+1] - p[j]|) over the same window (0 when flat).
//! SC[t] = (ER * (fast_sc - slow_sc) + slow_sc)^2 with sc = 2 / (period + 1).
//! KAMA[t] = KAMA[t-1] + SC * (p[t] - KAMA[t-1]), KAMA[0] = p[0].
//!
//! Until the ER window fills (t < er_period) the fixed fast_sc is used instead,
//! so the output is defined at every bar.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::BarSeries;
use crate::error::{require_len, require_period, IndicatorError};

pub const DEFAULT_ER_PERIOD: usize = 10;
pub const DEFAULT_FAST_PERIOD: usize = 2;
pub const DEFAULT_SLOW_PERIOD: usize = 30;

#[derive(Debug, Clone)]
pub struct Kama {
    er_period: usize,
    fast_period: usize,
    slow_period: usize,
    name: String,
}

/// Efficiency ratio of the window ending at `end` spanning `period` prices.
///
/// Callers guarantee `end + 1 >= period`.
pub fn efficiency_ratio(prices: &[f64], end: usize, period: usize) -> f64 {
    let start = end + 1 - period;
    let change = (prices[end] - prices[start]).abs();
    let volatility: f64 = prices[start..=end]
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .sum();
    if volatility == 0.0 {
        0.0
    } else {
        change / volatility
    }
}

fn smoothing_constant(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

impl Kama {
    pub fn new(
        er_period: usize,
        fast_period: usize,
        slow_period: usize,
    ) -> Result<Self, IndicatorError> {
        require_period("kama", "er_period", er_period, 2)?;
        require_period("kama", "fast_period", fast_period, 1)?;
        require_period("kama", "slow_period", slow_period, 1)?;
        Ok(Self {
            er_period,
            fast_period,
            slow_period,
            name: format!("kama_{er_period}_{fast_period}_{slow_period}"),
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn fast_sc(&self) -> f64 {
        smoothing_constant(self.fast_period)
    }

    pub fn slow_sc(&self) -> f64 {
        smoothing_constant(self.slow_period)
    }

    pub fn calculate(&self, prices: &[f64]) -> Result<Vec<f64>, IndicatorError> {
        let n = prices.len();
        require_len("kama", n, self.er_period)?;

        let fast_sc = self.fast_sc();
        let slow_sc = self.slow_sc();

        let mut kama = Vec::with_capacity(n);
        kama.push(prices[0]);

        for i in 1..n {
            let prev = kama[i - 1];
            let sc = if i < self.er_period {
                fast_sc
            } else {
                let er = efficiency_ratio(prices, i, self.er_period);
                let sc = er * (fast_sc - slow_sc) + slow_sc;
                sc * sc
            };
            kama.push(prev + sc * (prices[i] - prev));
        }

        Ok(kama)
    }
}

impl Default for Kama {
    fn default() -> Self {
        Self {
            er_period: DEFAULT_ER_PERIOD,
            fast_period: DEFAULT_FAST_PERIOD,
            slow_period: DEFAULT_SLOW_PERIOD,
            name: format!(
                "kama_{DEFAULT_ER_PERIOD}_{DEFAULT_FAST_PERIOD}_{DEFAULT_SLOW_PERIOD}"
            ),
        }
    }
}

impl Indicator for Kama {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn min_len(&self) -> usize {
        self.er_period
    }

    fn compute(&self, series: &BarSeries) -> Result<IndicatorValues, IndicatorError> {
        let kama = self.calculate(series.close())?;
        let mut values = IndicatorValues::new();
        values.insert(self.name.clone(), kama);
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn efficiency_ratio_extremes() {
        let trend = [1.0, 2.0, 3.0, 4.0];
        assert_approx(efficiency_ratio(&trend, 3, 4), 1.0, DEFAULT_EPSILON);

        let chop = [1.0, 2.0, 1.0, 2.0, 1.0];
        assert_approx(efficiency_ratio(&chop, 4, 5), 0.0, DEFAULT_EPSILON);

        let flat = [5.0; 4];
        assert_eq!(efficiency_ratio(&flat, 3, 4), 0.0);

        // |4 - 1| / (1 + 2 + 1 + 1) over [1, 2, 4, 3, 4]
        let mixed = [1.0, 2.0, 4.0, 3.0, 4.0];
        assert_approx(efficiency_ratio(&mixed, 4, 5), 0.6, DEFAULT_EPSILON);
    }

    #[test]
    fn warmup_uses_fast_sc() {
        let prices = [10.0, 12.0, 11.0, 15.0];
        let kama = Kama::new(3, 2, 30).unwrap().calculate(&prices).unwrap();
        let fast = 2.0 / 3.0;

        assert_eq!(kama[0], 10.0);
        assert_approx(kama[1], 10.0 + fast * 2.0, DEFAULT_EPSILON);
        assert_approx(kama[2], kama[1] + fast * (11.0 - kama[1]), DEFAULT_EPSILON);
    }

    #[test]
    fn adaptive_step_after_window() {
        let prices = [10.0, 12.0, 11.0, 15.0];
        let kama_ind = Kama::new(3, 2, 30).unwrap();
        let kama = kama_ind.calculate(&prices).unwrap();

        // window [12, 11, 15]: ER = 3 / (1 + 4) = 0.6
        let (fast, slow) = (kama_ind.fast_sc(), kama_ind.slow_sc());
        let sc = (0.6 * (fast - slow) + slow).powi(2);
        assert_approx(kama[3], kama[2] + sc * (15.0 - kama[2]), DEFAULT_EPSILON);
    }

    #[test]
    fn zero_net_change_smooths_at_slow_rate() {
        // Every 3-bar window returns to its start, so ER = 0 past warm-up.
        let prices = [10.0, 12.0, 10.0, 12.0, 10.0, 12.0, 10.0];
        let kama_ind = Kama::new(3, 2, 30).unwrap();
        let kama = kama_ind.calculate(&prices).unwrap();
        let sc = kama_ind.slow_sc().powi(2);

        for i in 3..prices.len() {
            assert_eq!(efficiency_ratio(&prices, i, 3), 0.0);
            assert_approx(
                kama[i],
                kama[i - 1] + sc * (prices[i] - kama[i - 1]),
                DEFAULT_EPSILON,
            );
        }
    }

    #[test]
    fn flat_prices_stay_flat() {
        let prices = vec![42.0; 25];
        let kama = Kama::default().calculate(&prices).unwrap();
        assert!(kama.iter().all(|&v| v == 42.0));
    }

    #[test]
    fn trending_tracks_faster_than_choppy() {
        let kama = Kama::new(5, 2, 30).unwrap();
        let trending: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let choppy: Vec<f64> = (0..40)
            .map(|i| 100.0 + i as f64 * 0.1 + if i % 2 == 0 { 3.0 } else { -3.0 })
            .collect();

        let trend_out = kama.calculate(&trending).unwrap();
        let chop_out = kama.calculate(&choppy).unwrap();

        // ER = 1 → SC = fast_sc^2; lag settles at (1 - sc) / sc.
        let sc = kama.fast_sc().powi(2);
        let trend_lag = trending[39] - trend_out[39];
        assert_approx(trend_lag, (1.0 - sc) / sc, 1e-6);

        // Near-zero ER → SC ≈ slow_sc^2, so the choppy series barely moves.
        let chop_move = (chop_out[39] - chop_out[20]).abs();
        assert!(chop_move < 1.0, "choppy KAMA moved {chop_move}");
    }

    #[test]
    fn errors() {
        assert_eq!(
            Kama::new(1, 2, 30).unwrap_err().kind(),
            ErrorKind::InvalidConfig
        );
        assert!(Kama::new(10, 0, 30).is_err());
        assert!(Kama::new(10, 2, 0).is_err());

        let kama = Kama::new(10, 2, 30).unwrap();
        assert_eq!(
            kama.calculate(&[1.0; 9]).unwrap_err().kind(),
            ErrorKind::InsufficientData
        );
        assert_eq!(
            kama.calculate(&[]).unwrap_err().kind(),
            ErrorKind::InsufficientData
        );
    }
}
