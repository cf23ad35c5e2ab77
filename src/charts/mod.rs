//! Dashboard charts
//!
//! Chart datasets derived from the current metrics and their PNG rendering.

pub mod data;
pub mod render;

pub use data::{bmi_color, BmiGauge, CalorieLevels, ChartData, MacroSplit};
pub use render::render_dashboard;
