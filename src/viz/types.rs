//! Public types for the visualization module.

/// How each country's points are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotKind {
    /// Connected line only.
    Line,
    /// Markers only.
    Scatter,
    /// Line with a marker on every point (XY chart look).
    #[default]
    LinePoints,
}

/// Rendering options for [`super::render_xy_plot`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    /// Chart caption; derived from the plotted years when `None`.
    pub title: Option<String>,
    pub kind: PlotKind,
    /// Locale tag for Y tick labels, e.g. `"en"` or `"de"`.
    pub locale: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 400,
            title: None,
            kind: PlotKind::default(),
            locale: "en".to_string(),
        }
    }
}
