use crate::models::ResultSet;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Spreadsheet apps treat cells starting with these as formulas.
fn neutralize_formula(cell: &str) -> Cow<'_, str> {
    if cell.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{cell}"))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Save series as tidy CSV (`country,year,gdp`), one row per point.
pub fn save_csv<P: AsRef<Path>>(results: &ResultSet, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    wtr.write_record(["country", "year", "gdp"])?;
    for (country, series) in results {
        let country = neutralize_formula(country);
        for (year, gdp) in series {
            wtr.serialize((country.as_ref(), year, gdp))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save series as a pretty JSON object: `{ "Country": [[year, gdp], ...] }`.
pub fn save_json<P: AsRef<Path>>(results: &ResultSet, path: P) -> Result<()> {
    let path = path.as_ref();
    let f = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, results)?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let mut rs = ResultSet::new();
        rs.insert("Germany".into(), vec![(2000, 1.23), (2001, 2.5)]);
        rs.insert("Nowhere".into(), vec![]);
        save_csv(&rs, &csvp).unwrap();
        save_json(&rs, &jsonp).unwrap();
        assert_eq!(std::fs::read_to_string(&csvp).unwrap().lines().count(), 3);
        assert!(jsonp.exists());
    }

    #[test]
    fn formula_prefix() {
        assert_eq!(neutralize_formula("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(neutralize_formula("Chad"), "Chad");
    }
}
