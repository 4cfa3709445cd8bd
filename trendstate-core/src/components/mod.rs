//! Indicator seam: the `Indicator` trait, the named-series container, the
//! config-driven factory and batch precomputation.

pub mod factory;
pub mod indicator;
pub mod precompute;

pub use factory::create_indicator;
pub use indicator::{Indicator, IndicatorValues};
pub use precompute::{compute_all, compute_warmup};
