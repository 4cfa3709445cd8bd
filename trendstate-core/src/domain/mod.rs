//! Domain types: bar records and the parallel-array series engines consume.

pub mod bar;
pub mod trend;

pub use bar::{Bar, BarSeries};
pub use trend::Trend;
