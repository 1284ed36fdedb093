//! Per-country GDP series: turn one row's `year -> raw value` cells into sorted
//! points, and collect those series for a list of countries.

use crate::error::Result;
use crate::models::{Config, ResultSet, Series};
use crate::table::{RawTable, Row, index_rows};
use log::{info, warn};
use std::collections::BTreeMap;

/// Column label as a year, or `None` for non-year columns such as the country name.
fn parse_year(key: &str) -> Option<i32> {
    key.trim().parse::<i32>().ok()
}

/// Cell as a GDP figure, or `None` if missing, malformed, negative or not finite.
fn parse_gdp(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Build the plottable series for one country.
///
/// Cells that are not a `(year, non-negative number)` pair are skipped, never
/// reported. A year seen twice keeps its last value. The result is sorted by
/// year and clipped to `min_year..=max_year`.
///
/// ```
/// use gdp_plot::series::build_series;
///
/// let row = [("Country Name", "Foo"), ("1960", "100.5"), ("1961", ""), ("1962", "-5"), ("1963abc", "200")];
/// assert_eq!(build_series(row, 1960, 1963), vec![(1960, 100.5)]);
/// ```
pub fn build_series<I, K, V>(pairs: I, min_year: i32, max_year: i32) -> Series
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    // BTreeMap::range panics on an inverted range
    if min_year > max_year {
        return Series::new();
    }
    let by_year: BTreeMap<i32, f64> = pairs
        .into_iter()
        .filter_map(|(k, v)| Some((parse_year(k.as_ref())?, parse_gdp(v.as_ref())?)))
        .collect();
    by_year.range(min_year..=max_year).map(|(y, v)| (*y, *v)).collect()
}

/// The row's year columns as `year -> raw cell`. When two headers name the
/// same year the rightmost cell is kept, even if it is blank.
fn year_cells(row: &Row) -> BTreeMap<i32, &str> {
    row.iter()
        .filter_map(|(k, v)| Some((parse_year(k)?, v)))
        .collect()
}

/// Assemble series for `countries` from an already indexed table.
///
/// Unknown names map to an empty series. Repeated names collapse to one entry.
pub fn collect_from_table<S: AsRef<str>>(
    table: &RawTable,
    countries: &[S],
    min_year: i32,
    max_year: i32,
) -> ResultSet {
    let mut out = ResultSet::new();
    for country in countries {
        let country = country.as_ref();
        let series = match table.get(country) {
            Some(row) => build_series(
                year_cells(row)
                    .into_iter()
                    .map(|(year, cell)| (year.to_string(), cell)),
                min_year,
                max_year,
            ),
            None => {
                warn!("country {:?} not found in table", country);
                Series::new()
            }
        };
        info!("{}: {} points in {}..={}", country, series.len(), min_year, max_year);
        out.insert(country.to_string(), series);
    }
    out
}

/// Read the table described by `config` once and build a series for every
/// requested country.
///
/// Only reading the file can fail; see [`index_rows`].
pub fn collect_series<S: AsRef<str>>(config: &Config, countries: &[S]) -> Result<ResultSet> {
    let table = index_rows(
        &config.data_file,
        &config.key_field,
        config.separator,
        config.quote,
    )?;
    Ok(collect_from_table(
        &table,
        countries,
        config.min_year,
        config.max_year,
    ))
}
