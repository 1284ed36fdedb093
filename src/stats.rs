use crate::models::ResultSet;
use serde::{Deserialize, Serialize};

/// Summary statistics for one country's series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub country: String,
    pub count: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Compound annual growth rate from the first to the last point, as a fraction.
    pub cagr: Option<f64>,
}

/// Compute per-country statistics, in country order.
pub fn summarize(results: &ResultSet) -> Vec<Summary> {
    let mut out = Vec::with_capacity(results.len());
    for (country, series) in results {
        let mut vals: Vec<f64> = series.iter().map(|(_, v)| *v).collect();
        vals.sort_by(f64::total_cmp);
        let count = vals.len();
        let min = vals.first().copied();
        let max = vals.last().copied();
        let mean = if count > 0 {
            Some(vals.iter().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };

        let first = series.first().copied();
        let last = series.last().copied();
        let cagr = match (first, last) {
            (Some((y0, v0)), Some((y1, v1))) if y1 > y0 && v0 > 0.0 => {
                Some((v1 / v0).powf(1.0 / f64::from(y1 - y0)) - 1.0)
            }
            _ => None,
        };

        out.push(Summary {
            country: country.clone(),
            count,
            first_year: first.map(|(y, _)| y),
            last_year: last.map(|(y, _)| y),
            min,
            max,
            mean,
            median,
            cagr,
        });
    }
    out
}
