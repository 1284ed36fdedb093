//! Visualization: render collected GDP series to **SVG** or **PNG**.
//!
//! - One colour per country (Microsoft Office palette)
//! - Locale-aware tick labels (`30,000` vs `30.000`), Y axis scaled to thousands/millions/…
//! - Line, scatter, or line + markers
//! - Countries without data still get a legend entry

pub mod types;
pub mod util;

pub use types::{PlotKind, PlotOptions};

use crate::models::ResultSet;
use anyhow::{Result, anyhow};
use log::debug;
use num_format::Locale;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use util::{choose_axis_scale, compute_left_label_area_px, format_tick, map_locale, office_color};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Axis extents shared by both backends.
struct Frame {
    min_year: i32,
    max_year: i32,
    y_max: f64,
    yscale: f64,
    y_desc: String,
}

/// Render `results` as an XY chart at `out_path`.
///
/// `.svg` paths use the SVG backend; anything else is written as a bitmap
/// (format from the extension, e.g. `.png`). Fails with "no data to plot"
/// when no country has a single point.
pub fn render_xy_plot<P: AsRef<Path>>(
    results: &ResultSet,
    out_path: P,
    opts: &PlotOptions,
) -> Result<()> {
    let years: Vec<i32> = results.values().flatten().map(|(y, _)| *y).collect();
    let (Some(&first_year), Some(&last_year)) = (years.iter().min(), years.iter().max()) else {
        return Err(anyhow!("no data to plot"));
    };
    ensure_fonts_registered();

    let (mut min_year, mut max_year) = (first_year, last_year);
    if min_year == max_year {
        min_year -= 1;
        max_year += 1;
    }

    // GDP is never negative, so the Y axis starts at zero.
    let max_val = results
        .values()
        .flatten()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);
    let (yscale, scale_word) = choose_axis_scale(max_val);
    let y_desc = if scale_word.is_empty() {
        "GDP".to_string()
    } else {
        format!("GDP ({scale_word})")
    };
    let y_max = if max_val > 0.0 {
        max_val / yscale * 1.05
    } else {
        1.0
    };

    let title = opts.title.clone().unwrap_or_else(|| {
        format!("Plot of GDP for select countries spanning {first_year} to {last_year}")
    });
    let frame = Frame {
        min_year,
        max_year,
        y_max,
        yscale,
        y_desc,
    };
    let (num_locale, dec_sep) = map_locale(&opts.locale);

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    debug!(
        "rendering {} series to {} ({}x{})",
        results.len(),
        path_string,
        opts.width,
        opts.height
    );

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root =
            SVGBackend::new(path_string.as_str(), (opts.width, opts.height)).into_drawing_area();
        draw_chart(root, results, &frame, &title, opts.kind, num_locale, dec_sep)?;
    } else {
        let root =
            BitMapBackend::new(path_string.as_str(), (opts.width, opts.height)).into_drawing_area();
        draw_chart(root, results, &frame, &title, opts.kind, num_locale, dec_sep)?;
    }
    Ok(())
}

/// Helper that draws to any Plotters backend.
fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    results: &ResultSet,
    frame: &Frame,
    title: &str,
    kind: PlotKind,
    num_locale: &Locale,
    dec_sep: char,
) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let y_label_count = 8usize;
    let left_px =
        compute_left_label_area_px(0.0, frame.y_max, y_label_count, 12, num_locale, dec_sep);

    let mut chart = ChartBuilder::on(&root)
        .margin(16)
        .caption(title, ("sans-serif", 20))
        .set_label_area_size(LabelAreaPosition::Left, left_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 44)
        .build_cartesian_2d(frame.min_year..frame.max_year, 0f64..frame.y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    let x_label_fmt = |y: &i32| y.to_string();
    let y_label_fmt = |v: &f64| format_tick(*v, num_locale, dec_sep);
    let x_label_count = ((frame.max_year - frame.min_year + 1) as usize).min(12);

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc(frame.y_desc.as_str())
        .x_labels(x_label_count)
        .y_labels(y_label_count)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style(("sans-serif", 12))
        .axis_desc_style(("sans-serif", 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    for (idx, (country, series)) in results.iter().enumerate() {
        let color = office_color(idx);
        let scaled: Vec<(i32, f64)> = series
            .iter()
            .map(|(y, v)| (*y, *v / frame.yscale))
            .collect();

        let line_style = ShapeStyle {
            color,
            filled: false,
            stroke_width: 2,
        };

        // The first drawn element of each country carries the legend entry.
        let anno = match kind {
            PlotKind::Line | PlotKind::LinePoints => chart
                .draw_series(LineSeries::new(scaled.clone(), line_style))
                .map_err(|e| anyhow!("{:?}", e))?,
            PlotKind::Scatter => chart
                .draw_series(scaled.iter().map(|p| Circle::new(*p, 3, color.filled())))
                .map_err(|e| anyhow!("{:?}", e))?,
        };
        anno.label(country.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        if kind == PlotKind::LinePoints {
            chart
                .draw_series(scaled.iter().map(|p| Circle::new(*p, 3, color.filled())))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .label_font(("sans-serif", 12))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
