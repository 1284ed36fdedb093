//! gdp_plot
//!
//! A small Rust library for reading country GDP-by-year tables, turning each
//! requested country's row into a clean `(year, gdp)` series, and plotting the
//! result. Pairs with the `gdpplot` CLI.
//!
//! ### Features
//! - Index a delimited table (configurable separator and quote) by a key column
//! - Build series that silently skip missing, malformed, or negative figures
//! - Collect series for a list of countries; unknown names map to an empty series
//! - Save series as CSV or JSON, print per-country summary statistics
//! - Render SVG/PNG XY charts
//!
//! ### Example
//! ```no_run
//! use gdp_plot::{Config, collect_series};
//! use gdp_plot::viz::{self, PlotOptions};
//!
//! let mut cfg = Config::new("isp_gdp.csv");
//! cfg.min_year = 1960;
//! cfg.max_year = 2015;
//! let data = collect_series(&cfg, &["United Kingdom", "China", "India"])?;
//! viz::render_xy_plot(&data, "gdp.svg", &PlotOptions::default())?;
//! for s in gdp_plot::stats::summarize(&data) {
//!     println!("{:?}", s);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod error;
pub mod models;
pub mod series;
pub mod stats;
pub mod storage;
pub mod table;
pub mod viz;

pub use error::GdpError;
pub use models::{Config, ResultSet, Series};
pub use series::{build_series, collect_series};
pub use table::{RawTable, Row, index_rows};
