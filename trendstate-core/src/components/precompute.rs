//! Batch computation of a configured indicator set over one series.

use tracing::{debug, warn};

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::BarSeries;
use crate::error::IndicatorError;

/// Compute every indicator over `series` into one container.
///
/// Stops at the first failure; no partial container is returned.
pub fn compute_all(
    indicators: &[Box<dyn Indicator>],
    series: &BarSeries,
) -> Result<IndicatorValues, IndicatorError> {
    let mut values = IndicatorValues::new();

    for indicator in indicators {
        debug!(
            indicator = indicator.name(),
            bars = series.len(),
            "computing indicator"
        );
        match indicator.compute(series) {
            Ok(computed) => {
                debug_assert!(
                    computed.iter().all(|(_, s)| s.len() == series.len()),
                    "indicator '{}' produced a series of the wrong length",
                    indicator.name()
                );
                values.merge(computed);
            }
            Err(err) => {
                warn!(indicator = indicator.name(), error = %err, "indicator failed");
                return Err(err);
            }
        }
    }

    Ok(values)
}

/// Longest placeholder prefix across a set of indicators.
pub fn compute_warmup(indicators: &[Box<dyn Indicator>]) -> usize {
    indicators.iter().map(|i| i.lookback()).max().unwrap_or(0)
}
