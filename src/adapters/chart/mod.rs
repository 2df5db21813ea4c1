//! Chart image adapters.

mod quickchart;

pub use quickchart::{QuickChartConfig, QuickChartProvider};
