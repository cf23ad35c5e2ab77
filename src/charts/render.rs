//! Dashboard chart rendering (plotters)
//!
//! Draws the four dashboard charts into a 2×2 grid and encodes it as PNG.

use image::{DynamicImage, ImageFormat, RgbImage};
use plotters::prelude::*;

use super::data::{
    ChartData, CalorieLevels, BMI_GAUGE_MAX, BODY_FAT_AXIS_MAX, COLOR_BODY_FAT, COLOR_CALORIE_LINE,
    COLOR_CARBS, COLOR_FAT, COLOR_NORMAL, COLOR_OBESE, COLOR_OVERWEIGHT, COLOR_PROTEIN,
    COLOR_UNDERWEIGHT,
};

/// Smallest accepted edge length in pixels
pub const MIN_DIMENSION: u32 = 200;
/// Largest accepted edge length in pixels
pub const MAX_DIMENSION: u32 = 4000;

fn rgb(color: (u8, u8, u8)) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Render the dashboard as PNG bytes
pub fn render_dashboard(data: &ChartData, width: u32, height: u32) -> Result<Vec<u8>, String> {
    if width < MIN_DIMENSION || height < MIN_DIMENSION {
        return Err(format!(
            "Chart dimensions must be at least {}x{} pixels",
            MIN_DIMENSION, MIN_DIMENSION
        ));
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(format!(
            "Chart dimensions must be at most {}x{} pixels",
            MAX_DIMENSION, MAX_DIMENSION
        ));
    }

    let buffer_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or("Chart dimensions are too large")?;
    let mut buffer = vec![0u8; buffer_len];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| e.to_string())?;

        let areas = root.split_evenly((2, 2));

        // ---- BMI gauge: category bands with the value bar on top ----
        let gauge = &data.bmi_gauge;
        let mut chart = ChartBuilder::on(&areas[0])
            .caption(
                format!("BMI {:.1} ({})", gauge.value, gauge.category.display_name()),
                ("sans-serif", 20),
            )
            .margin(15)
            .x_label_area_size(30)
            .y_label_area_size(10)
            .build_cartesian_2d(0f64..BMI_GAUGE_MAX, 0f64..1f64)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_label_formatter(&|_| String::new())
            .x_desc("kg/m²")
            .draw()
            .map_err(|e| e.to_string())?;

        let bands = [
            (0.0, 18.5, COLOR_UNDERWEIGHT),
            (18.5, 25.0, COLOR_NORMAL),
            (25.0, 30.0, COLOR_OVERWEIGHT),
            (30.0, BMI_GAUGE_MAX, COLOR_OBESE),
        ];
        chart
            .draw_series(bands.iter().map(|(from, to, color)| {
                Rectangle::new([(*from, 0.1), (*to, 0.25)], rgb(*color).mix(0.35).filled())
            }))
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0.0, 0.35), (gauge.value.min(BMI_GAUGE_MAX), 0.75)],
                rgb(gauge.color).filled(),
            )))
            .map_err(|e| e.to_string())?;

        // ---- Body fat: single horizontal bar ----
        let mut chart = ChartBuilder::on(&areas[1])
            .caption(format!("Estimated Body Fat {:.1}%", data.body_fat), ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(30)
            .y_label_area_size(10)
            .build_cartesian_2d(0f64..BODY_FAT_AXIS_MAX, 0f64..1f64)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_label_formatter(&|_| String::new())
            .x_label_formatter(&|x| format!("{:.0}%", x))
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(0.0, 0.3), (data.body_fat.min(BODY_FAT_AXIS_MAX), 0.7)],
                rgb(COLOR_BODY_FAT).filled(),
            )))
            .map_err(|e| e.to_string())?;

        // ---- Macronutrients: kcal per macro ----
        let macros = &data.macros;
        let bars = [
            (macros.protein_kcal, COLOR_PROTEIN),
            (macros.carbs_kcal, COLOR_CARBS),
            (macros.fat_kcal, COLOR_FAT),
        ];
        let kcal_max = bars.iter().map(|(k, _)| *k).fold(0.0, f64::max).max(1.0) * 1.15;

        let mut chart = ChartBuilder::on(&areas[2])
            .caption(
                format!(
                    "Protein {}g / Carbs {}g / Fats {}g",
                    macros.protein_g, macros.carbs_g, macros.fat_g
                ),
                ("sans-serif", 18),
            )
            .margin(15)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..3f64, 0f64..kcal_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(3)
            .x_label_formatter(&|x| {
                match x.floor() as i32 {
                    0 => format!("Protein {}%", macros.percent_of_total(macros.protein_kcal)),
                    1 => format!("Carbs {}%", macros.percent_of_total(macros.carbs_kcal)),
                    2 => format!("Fats {}%", macros.percent_of_total(macros.fat_kcal)),
                    _ => String::new(),
                }
            })
            .y_desc("kcal")
            .draw()
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(bars.iter().enumerate().map(|(i, (kcal, color))| {
                let x = i as f64;
                Rectangle::new([(x + 0.2, 0.0), (x + 0.8, *kcal)], rgb(*color).filled())
            }))
            .map_err(|e| e.to_string())?;

        // ---- Calorie levels: BMR -> TDEE -> goal ----
        let levels = data.calorie_levels.values();
        let labels = CalorieLevels::labels();
        let y_min = levels.iter().copied().fold(f64::INFINITY, f64::min).min(0.0);
        let y_max = levels.iter().copied().fold(f64::NEG_INFINITY, f64::max) * 1.1 + 100.0;

        let mut chart = ChartBuilder::on(&areas[3])
            .caption("Estimated Calorie Levels", ("sans-serif", 20))
            .margin(15)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(0i32..2i32, y_min..y_max)
            .map_err(|e| e.to_string())?;

        chart
            .configure_mesh()
            .x_labels(3)
            .x_label_formatter(&|x| {
                labels
                    .get(*x as usize)
                    .map(|s| s.to_string())
                    .unwrap_or_default()
            })
            .y_desc("kcal")
            .draw()
            .map_err(|e| e.to_string())?;

        let points: Vec<(i32, f64)> = levels
            .iter()
            .enumerate()
            .map(|(i, v)| (i as i32, *v))
            .collect();
        let line_color = rgb(COLOR_CALORIE_LINE);

        chart
            .draw_series(LineSeries::new(points.clone(), line_color.stroke_width(2)))
            .map_err(|e| e.to_string())?;

        chart
            .draw_series(points.iter().map(|(x, y)| Circle::new((*x, *y), 4, line_color.filled())))
            .map_err(|e| e.to_string())?;

        root.present().map_err(|e| e.to_string())?;
    }

    let img = RgbImage::from_raw(width, height, buffer)
        .ok_or("Failed to create image from buffer")?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;

    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BmiCategory, MetricsResult, Micronutrients};

    fn sample_data() -> ChartData {
        ChartData::from_metrics(&MetricsResult {
            bmi: 22.0,
            bmi_category: BmiCategory::Normal,
            bmr: 1500.0,
            tdee: 2000.0,
            calories: 2000,
            body_fat: 20.0,
            water: 2.4,
            micronutrients: Micronutrients { zinc: 8, iron: 18, magnesium: 310, calcium: 1000 },
        })
    }

    #[test]
    fn test_rejects_tiny_canvas() {
        let err = render_dashboard(&sample_data(), 100, 600).unwrap_err();
        assert!(err.contains("at least"));
    }

    #[test]
    fn test_rejects_oversized_canvas() {
        let err = render_dashboard(&sample_data(), 40000, 40000).unwrap_err();
        assert!(err.contains("at most"));

        let err = render_dashboard(&sample_data(), 800, MAX_DIMENSION + 1).unwrap_err();
        assert!(err.contains("at most"));
    }

    #[test]
    fn test_renders_png() {
        let png = render_dashboard(&sample_data(), 600, 400).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
    }
}
