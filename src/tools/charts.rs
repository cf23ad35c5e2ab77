//! Chart tool
//!
//! Renders the dashboard charts for the live profile to a PNG file.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::charts::{render_dashboard, ChartData};
use crate::models::ProfileStore;

pub const DEFAULT_WIDTH: u32 = 1200;
pub const DEFAULT_HEIGHT: u32 = 900;

#[derive(Debug, Serialize)]
pub struct RenderChartsResponse {
    pub file_path: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: usize,
    pub chart_data: ChartData,
}

/// Chart datasets for the live profile
pub fn current_chart_data(store: &ProfileStore) -> Result<ChartData, String> {
    let profile = store
        .current()
        .ok_or("No profile available. Calculate health metrics first.")?;
    Ok(ChartData::from_metrics(&profile.metrics))
}

/// File names are kept inside the chart directory
fn chart_path(dir: &Path, file_name: Option<&str>) -> Result<PathBuf, String> {
    let name = file_name.unwrap_or("dashboard.png");
    let name = Path::new(name)
        .file_name()
        .ok_or_else(|| format!("Invalid chart file name: {}", name))?;

    let mut path = dir.join(name);
    if path.extension().is_none() {
        path.set_extension("png");
    }
    Ok(path)
}

/// Render the live profile's charts and write them under `dir`
pub fn render_health_charts(
    store: &ProfileStore,
    dir: &Path,
    file_name: Option<&str>,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<RenderChartsResponse, String> {
    let chart_data = current_chart_data(store)?;
    let width = width.unwrap_or(DEFAULT_WIDTH);
    let height = height.unwrap_or(DEFAULT_HEIGHT);
    let path = chart_path(dir, file_name)?;

    let png = render_dashboard(&chart_data, width, height)?;

    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create chart directory {}: {}", dir.display(), e))?;
    std::fs::write(&path, &png)
        .map_err(|e| format!("Failed to write chart {}: {}", path.display(), e))?;

    tracing::info!("Wrote dashboard chart to {}", path.display());

    Ok(RenderChartsResponse {
        file_path: path.display().to_string(),
        width,
        height,
        size_bytes: png.len(),
        chart_data,
    })
}
