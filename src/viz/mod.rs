//! Terminal visualization: the two-subplot training figure and sparklines

mod charts;
mod sparkline;

pub use charts::{Figure, LossCurveChart, ScatterChart};
pub use sparkline::{sparkline, SPARK_CHARS};
