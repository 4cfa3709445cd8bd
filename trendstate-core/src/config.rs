//! Serializable indicator configuration.
//!
//! An `IndicatorSet` is a list of `[[indicator]]` TOML tables, each tagged
//! with a `type` and carrying that indicator's parameters. Missing
//! parameters fall back to the conventional defaults.
//!
//! ```toml
//! [[indicator]]
//! name = "trend"
//! type = "supertrend"
//! period = 10
//! multiplier = 3.0
//!
//! [[indicator]]
//! type = "adx"
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::factory::create_indicator;
use crate::components::indicator::Indicator;
use crate::error::IndicatorError;
use crate::indicators::{adx, atr, ema, ichimoku, kama, sma, supertrend};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse indicator config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] IndicatorError),
    #[error("duplicate indicator name: {0}")]
    DuplicateName(String),
    #[error("indicator name '{0}' must be non-empty and must not contain '.'")]
    InvalidName(String),
}

fn default_atr_period() -> usize {
    atr::DEFAULT_ATR_PERIOD
}
fn default_adx_period() -> usize {
    adx::DEFAULT_ADX_PERIOD
}
fn default_af_start() -> f64 {
    0.02
}
fn default_af_step() -> f64 {
    0.02
}
fn default_af_max() -> f64 {
    0.20
}
fn default_supertrend_period() -> usize {
    supertrend::DEFAULT_SUPERTREND_PERIOD
}
fn default_supertrend_multiplier() -> f64 {
    supertrend::DEFAULT_SUPERTREND_MULTIPLIER
}
fn default_er_period() -> usize {
    kama::DEFAULT_ER_PERIOD
}
fn default_fast_period() -> usize {
    kama::DEFAULT_FAST_PERIOD
}
fn default_slow_period() -> usize {
    kama::DEFAULT_SLOW_PERIOD
}
fn default_tenkan() -> usize {
    ichimoku::DEFAULT_TENKAN
}
fn default_kijun() -> usize {
    ichimoku::DEFAULT_KIJUN
}
fn default_senkou() -> usize {
    ichimoku::DEFAULT_SENKOU
}
fn default_shift() -> usize {
    ichimoku::DEFAULT_SHIFT
}
fn default_sma_period() -> usize {
    sma::DEFAULT_SMA_PERIOD
}
fn default_ema_period() -> usize {
    ema::DEFAULT_EMA_PERIOD
}

/// Parameters for one indicator, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorConfig {
    Atr {
        #[serde(default = "default_atr_period")]
        period: usize,
    },
    Adx {
        #[serde(default = "default_adx_period")]
        period: usize,
    },
    ParabolicSar {
        #[serde(default = "default_af_start")]
        af_start: f64,
        #[serde(default = "default_af_step")]
        af_step: f64,
        #[serde(default = "default_af_max")]
        af_max: f64,
    },
    Supertrend {
        #[serde(default = "default_supertrend_period")]
        period: usize,
        #[serde(default = "default_supertrend_multiplier")]
        multiplier: f64,
    },
    Kama {
        #[serde(default = "default_er_period")]
        er_period: usize,
        #[serde(default = "default_fast_period")]
        fast_period: usize,
        #[serde(default = "default_slow_period")]
        slow_period: usize,
    },
    Ichimoku {
        #[serde(default = "default_tenkan")]
        tenkan: usize,
        #[serde(default = "default_kijun")]
        kijun: usize,
        #[serde(default = "default_senkou")]
        senkou: usize,
        #[serde(default = "default_shift")]
        shift: usize,
    },
    Sma {
        #[serde(default = "default_sma_period")]
        period: usize,
    },
    Ema {
        #[serde(default = "default_ema_period")]
        period: usize,
    },
    Obv,
}

impl IndicatorConfig {
    /// The `type` tag for this config.
    pub fn type_name(&self) -> &'static str {
        match self {
            IndicatorConfig::Atr { .. } => "atr",
            IndicatorConfig::Adx { .. } => "adx",
            IndicatorConfig::ParabolicSar { .. } => "parabolic_sar",
            IndicatorConfig::Supertrend { .. } => "supertrend",
            IndicatorConfig::Kama { .. } => "kama",
            IndicatorConfig::Ichimoku { .. } => "ichimoku",
            IndicatorConfig::Sma { .. } => "sma",
            IndicatorConfig::Ema { .. } => "ema",
            IndicatorConfig::Obv => "obv",
        }
    }

    /// One config per supported type, each with default parameters.
    pub fn all_defaults() -> Vec<IndicatorConfig> {
        vec![
            IndicatorConfig::Atr {
                period: default_atr_period(),
            },
            IndicatorConfig::Adx {
                period: default_adx_period(),
            },
            IndicatorConfig::ParabolicSar {
                af_start: default_af_start(),
                af_step: default_af_step(),
                af_max: default_af_max(),
            },
            IndicatorConfig::Supertrend {
                period: default_supertrend_period(),
                multiplier: default_supertrend_multiplier(),
            },
            IndicatorConfig::Kama {
                er_period: default_er_period(),
                fast_period: default_fast_period(),
                slow_period: default_slow_period(),
            },
            IndicatorConfig::Ichimoku {
                tenkan: default_tenkan(),
                kijun: default_kijun(),
                senkou: default_senkou(),
                shift: default_shift(),
            },
            IndicatorConfig::Sma {
                period: default_sma_period(),
            },
            IndicatorConfig::Ema {
                period: default_ema_period(),
            },
            IndicatorConfig::Obv,
        ]
    }
}

/// One configured indicator. Without a `name`, the indicator's own default
/// name (e.g. "atr_14") is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub config: IndicatorConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    #[serde(rename = "indicator", default)]
    pub indicators: Vec<IndicatorSpec>,
}

impl IndicatorSet {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Validate every entry and build the trait objects.
    ///
    /// Fails on the first invalid parameter, on a name that is empty or
    /// contains the `.` output separator, or on two entries resolving to the
    /// same name.
    pub fn build(&self) -> Result<Vec<Box<dyn Indicator>>, ConfigError> {
        let mut seen = HashSet::new();
        let mut built = Vec::with_capacity(self.indicators.len());

        for spec in &self.indicators {
            if let Some(name) = spec.name.as_deref() {
                if name.is_empty() || name.contains('.') {
                    return Err(ConfigError::InvalidName(name.to_string()));
                }
            }
            let indicator = create_indicator(&spec.config, spec.name.as_deref())?;
            if !seen.insert(indicator.name().to_string()) {
                return Err(ConfigError::DuplicateName(indicator.name().to_string()));
            }
            built.push(indicator);
        }

        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_tables_with_defaults() {
        let set = IndicatorSet::from_toml_str(
            r#"
            [[indicator]]
            name = "trend"
            type = "supertrend"
            period = 7
            multiplier = 2

            [[indicator]]
            type = "adx"

            [[indicator]]
            type = "obv"
            "#,
        )
        .unwrap();

        assert_eq!(set.indicators.len(), 3);
        assert_eq!(set.indicators[0].name.as_deref(), Some("trend"));
        assert_eq!(
            set.indicators[0].config,
            IndicatorConfig::Supertrend {
                period: 7,
                multiplier: 2.0
            }
        );
        assert_eq!(set.indicators[1].config, IndicatorConfig::Adx { period: 14 });
        assert_eq!(set.indicators[2].config, IndicatorConfig::Obv);
    }

    #[test]
    fn build_names_and_validates() {
        let set = IndicatorSet::from_toml_str(
            r#"
            [[indicator]]
            name = "fast"
            type = "kama"
            er_period = 5

            [[indicator]]
            type = "ichimoku"
            "#,
        )
        .unwrap();
        let built = set.build().unwrap();
        assert_eq!(built[0].name(), "fast");
        assert_eq!(built[1].name(), "ichimoku_9_26_52_26");
    }

    #[test]
    fn build_rejects_invalid_parameters() {
        let set = IndicatorSet::from_toml_str(
            r#"
            [[indicator]]
            type = "kama"
            er_period = 1
            "#,
        )
        .unwrap();
        assert!(matches!(set.build(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn build_rejects_duplicate_names() {
        let set = IndicatorSet::from_toml_str(
            r#"
            [[indicator]]
            type = "atr"

            [[indicator]]
            type = "atr"
            period = 14
            "#,
        )
        .unwrap();
        match set.build() {
            Err(ConfigError::DuplicateName(name)) => assert_eq!(name, "atr_14"),
            other => panic!("expected duplicate name error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn build_rejects_names_with_output_separator() {
        let set = IndicatorSet::from_toml_str(
            r#"
            [[indicator]]
            name = "trend.fast"
            type = "supertrend"
            "#,
        )
        .unwrap();
        match set.build() {
            Err(ConfigError::InvalidName(name)) => assert_eq!(name, "trend.fast"),
            other => panic!("expected invalid name error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn default_names_are_unambiguous_keys() {
        for config in IndicatorConfig::all_defaults() {
            let indicator = create_indicator(&config, None).unwrap();
            assert!(!indicator.name().contains('.'), "{}", indicator.name());
        }
        let st = create_indicator(
            &IndicatorConfig::Supertrend {
                period: 7,
                multiplier: 2.5,
            },
            None,
        )
        .unwrap();
        assert_eq!(st.name(), "supertrend_7_2p5");
    }

    #[test]
    fn unknown_type_is_a_parse_error() {
        let err = IndicatorSet::from_toml_str(
            r#"
            [[indicator]]
            type = "macd"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn every_default_config_builds() {
        for config in IndicatorConfig::all_defaults() {
            let indicator = create_indicator(&config, None).unwrap();
            assert!(!indicator.name().is_empty(), "{}", config.type_name());
        }
    }

    #[test]
    fn empty_set_is_valid() {
        let set = IndicatorSet::from_toml_str("").unwrap();
        assert!(set.indicators.is_empty());
        assert!(set.build().unwrap().is_empty());
    }
}
