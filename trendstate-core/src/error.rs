//! Error taxonomy shared by every indicator.
//!
//! All checks run before any computation starts, so a failed call never
//! returns partial output.

use thiserror::Error;

/// Coarse classification of an [`IndicatorError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input series have different lengths.
    Shape,
    /// Input is shorter than the minimum window the indicator needs.
    InsufficientData,
    /// A parameter is outside the indicator's valid range.
    InvalidConfig,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    #[error("{indicator}: series '{series}' has {actual} bars, expected {expected}")]
    LengthMismatch {
        indicator: &'static str,
        series: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{indicator}: not enough data, need at least {required} bars, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },
    #[error("{indicator}: invalid parameter '{param}': {reason}")]
    InvalidConfig {
        indicator: &'static str,
        param: &'static str,
        reason: String,
    },
}

impl IndicatorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndicatorError::LengthMismatch { .. } => ErrorKind::Shape,
            IndicatorError::InsufficientData { .. } => ErrorKind::InsufficientData,
            IndicatorError::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    pub(crate) fn invalid(
        indicator: &'static str,
        param: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        IndicatorError::InvalidConfig {
            indicator,
            param,
            reason: reason.into(),
        }
    }
}

/// Check that every `others` series matches the length of `reference`.
///
/// Returns the shared length on success.
pub(crate) fn check_lengths(
    indicator: &'static str,
    reference: &[f64],
    others: &[(&'static str, &[f64])],
) -> Result<usize, IndicatorError> {
    let expected = reference.len();
    for &(series, values) in others {
        if values.len() != expected {
            return Err(IndicatorError::LengthMismatch {
                indicator,
                series,
                expected,
                actual: values.len(),
            });
        }
    }
    Ok(expected)
}

pub(crate) fn require_len(
    indicator: &'static str,
    actual: usize,
    required: usize,
) -> Result<(), IndicatorError> {
    if actual < required {
        return Err(IndicatorError::InsufficientData {
            indicator,
            required,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn require_period(
    indicator: &'static str,
    param: &'static str,
    value: usize,
    min: usize,
) -> Result<(), IndicatorError> {
    if value < min {
        return Err(IndicatorError::invalid(
            indicator,
            param,
            format!("must be >= {min}, got {value}"),
        ));
    }
    Ok(())
}
