//! Factory: converts an `IndicatorConfig` into a validated `Indicator`
//! trait object.

use crate::components::indicator::Indicator;
use crate::config::IndicatorConfig;
use crate::error::IndicatorError;
use crate::indicators::{Adx, Atr, Ema, Ichimoku, Kama, Obv, ParabolicSar, Sma, Supertrend};

/// Build an indicator from its config, optionally overriding its name.
pub fn create_indicator(
    config: &IndicatorConfig,
    name: Option<&str>,
) -> Result<Box<dyn Indicator>, IndicatorError> {
    macro_rules! named {
        ($ind:expr) => {{
            let ind = $ind;
            match name {
                Some(n) => Box::new(ind.with_name(n)) as Box<dyn Indicator>,
                None => Box::new(ind) as Box<dyn Indicator>,
            }
        }};
    }

    let indicator = match *config {
        IndicatorConfig::Atr { period } => named!(Atr::new(period)?),
        IndicatorConfig::Adx { period } => named!(Adx::new(period)?),
        IndicatorConfig::ParabolicSar {
            af_start,
            af_step,
            af_max,
        } => named!(ParabolicSar::new(af_start, af_step, af_max)?),
        IndicatorConfig::Supertrend { period, multiplier } => {
            named!(Supertrend::new(period, multiplier)?)
        }
        IndicatorConfig::Kama {
            er_period,
            fast_period,
            slow_period,
        } => named!(Kama::new(er_period, fast_period, slow_period)?),
        IndicatorConfig::Ichimoku {
            tenkan,
            kijun,
            senkou,
            shift,
        } => named!(Ichimoku::new(tenkan, kijun, senkou, shift)?),
        IndicatorConfig::Sma { period } => named!(Sma::new(period)?),
        IndicatorConfig::Ema { period } => named!(Ema::new(period)?),
        IndicatorConfig::Obv => named!(Obv::new()),
    };

    Ok(indicator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn creates_with_default_and_custom_names() {
        let atr = create_indicator(&IndicatorConfig::Atr { period: 10 }, None).unwrap();
        assert_eq!(atr.name(), "atr_10");
        assert_eq!(atr.lookback(), 9);

        let st = create_indicator(
            &IndicatorConfig::Supertrend {
                period: 10,
                multiplier: 3.0,
            },
            Some("st"),
        )
        .unwrap();
        assert_eq!(st.name(), "st");
        assert_eq!(st.min_len(), 10);
    }

    #[test]
    fn invalid_config_is_reported() {
        let err = create_indicator(
            &IndicatorConfig::ParabolicSar {
                af_start: 0.02,
                af_step: 0.02,
                af_max: 0.01,
            },
            None,
        )
        .err()
        .unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
    }
}
