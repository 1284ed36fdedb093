use gdp_plot::{ResultSet, storage};
use std::fs;
use tempfile::tempdir;

fn sample() -> ResultSet {
    let mut rs = ResultSet::new();
    rs.insert("Chad".into(), vec![(1990, 1.5), (1991, 2.0)]);
    rs.insert("Empty".into(), vec![]);
    rs
}

#[test]
fn csv_is_tidy_with_header() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("s.csv");
    storage::save_csv(&sample(), &p).unwrap();
    let txt = fs::read_to_string(&p).unwrap();
    let lines: Vec<&str> = txt.lines().collect();
    assert_eq!(lines, vec!["country,year,gdp", "Chad,1990,1.5", "Chad,1991,2.0"]);
}

#[test]
fn json_maps_country_to_pairs() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("s.json");
    storage::save_json(&sample(), &p).unwrap();
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&p).unwrap()).unwrap();
    assert_eq!(v["Chad"][1][0], 1991);
    assert_eq!(v["Chad"][1][1], 2.0);
    assert_eq!(v["Empty"].as_array().unwrap().len(), 0);
}

// A country cell such as "=HYPERLINK(..)" would run as a formula in a
// spreadsheet; it is written with a leading single quote.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let dir = tempdir().unwrap();
    let p = dir.path().join("inj.csv");
    let mut rs = ResultSet::new();
    rs.insert("=HYPERLINK(\"http://evil\")".into(), vec![(2000, 1.0)]);
    rs.insert("@foo".into(), vec![(2000, 2.0)]);
    storage::save_csv(&rs, &p).unwrap();

    let mut rdr = csv::Reader::from_path(&p).unwrap();
    let countries: Vec<String> = rdr
        .records()
        .map(|r| r.unwrap().get(0).unwrap().to_string())
        .collect();
    assert_eq!(countries.len(), 2);
    for c in &countries {
        assert!(c.starts_with('\''), "not prefixed: {c}");
    }
    assert!(countries.iter().any(|c| c.contains("=HYPERLINK")));
}
