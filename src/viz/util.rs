//! Utility functions for visualization: colors, scaling, locale mapping, tick text.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Pick a single Y-axis scale and its human label based on the overall magnitude.
/// Returns (scale, label), e.g. (1e9, "billions").
pub fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e12 {
        (1.0e12, "trillions")
    } else if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'),
    }
}

/// Y tick text: whole numbers with thousands separators from 100 up,
/// otherwise one or two decimals with the locale's decimal separator.
pub fn format_tick(v: f64, locale: &Locale, dec_sep: char) -> String {
    let a = v.abs();
    if a >= 100.0 {
        let n = v.round() as i64;
        return n.to_formatted_string(locale);
    }
    let prec = if a >= 10.0 { 1 } else { 2 };
    let s = format!("{:.*}", prec, v);
    if dec_sep == '.' {
        s
    } else {
        s.replace('.', &dec_sep.to_string())
    }
}

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Left label area width (px) wide enough for the widest Y tick label.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
    dec_sep: char,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        let s = format_tick(v, locale, dec_sep);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }
    // tick marks + axis description
    max_px.saturating_add(34).clamp(48, 160)
}
