//! Trendstate Core: stateful trend indicators over OHLCV bar series.
//!
//! This crate contains:
//! - Domain types (bars, bar series, trend direction)
//! - Shared primitives (true range, Wilder smoothing, rolling extrema)
//! - Indicator engines: ATR, ADX, Parabolic SAR, Supertrend, KAMA, Ichimoku,
//!   plus the SMA, EMA and OBV collaborators
//! - The `Indicator` trait, a config-driven factory and batch precompute

pub mod components;
pub mod config;
pub mod domain;
pub mod error;
pub mod indicators;

pub use components::{compute_all, create_indicator, Indicator, IndicatorValues};
pub use config::{ConfigError, IndicatorConfig, IndicatorSet, IndicatorSpec};
pub use domain::{Bar, BarSeries, Trend};
pub use error::{ErrorKind, IndicatorError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: indicator engines and their outputs are Send + Sync,
    /// so a caller can fan computation out across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Bar>();
        require_sync::<Bar>();
        require_send::<BarSeries>();
        require_sync::<BarSeries>();
        require_send::<IndicatorValues>();
        require_sync::<IndicatorValues>();
        require_send::<IndicatorError>();
        require_sync::<IndicatorError>();

        require_send::<indicators::Atr>();
        require_sync::<indicators::Atr>();
        require_send::<indicators::Adx>();
        require_sync::<indicators::Adx>();
        require_send::<indicators::ParabolicSar>();
        require_sync::<indicators::ParabolicSar>();
        require_send::<indicators::Supertrend>();
        require_sync::<indicators::Supertrend>();
        require_send::<indicators::Kama>();
        require_sync::<indicators::Kama>();
        require_send::<indicators::Ichimoku>();
        require_sync::<indicators::Ichimoku>();

        require_send::<Box<dyn Indicator>>();
        require_sync::<Box<dyn Indicator>>();
    }

    #[test]
    fn config_to_values_end_to_end() {
        let set = IndicatorSet::from_toml_str(
            r#"
            [[indicator]]
            type = "atr"
            period = 2

            [[indicator]]
            name = "st"
            type = "supertrend"
            period = 2
            multiplier = 1.0
            "#,
        )
        .unwrap();
        let indicators = set.build().unwrap();
        let series = BarSeries::from_hlc(
            vec![10.0, 12.0, 11.0, 9.0, 13.0],
            vec![8.0, 10.0, 9.0, 7.0, 11.0],
            vec![9.0, 11.0, 10.0, 8.0, 12.5],
        )
        .unwrap();

        let values = compute_all(&indicators, &series).unwrap();
        assert_eq!(values.get_series("atr_2").unwrap().len(), 5);
        assert_eq!(values.get("st.direction", 3), Some(-1.0));
        assert_eq!(values.get("st.direction", 4), Some(1.0));
    }
}
