use gdp_plot::ResultSet;
use gdp_plot::viz::{self, PlotKind, PlotOptions};
use std::fs;
use tempfile::tempdir;

fn sample() -> ResultSet {
    let mut rs = ResultSet::new();
    rs.insert(
        "Germany".into(),
        vec![(2019, 3.9e12), (2020, 3.8e12), (2021, 4.2e12)],
    );
    rs.insert("France".into(), vec![(2019, 2.7e12), (2021, 2.9e12)]);
    rs.insert("Atlantis".into(), vec![]);
    rs
}

#[test]
fn plot_kinds_produce_svg_files() {
    let dir = tempdir().unwrap();
    for (i, kind) in [PlotKind::Line, PlotKind::Scatter, PlotKind::LinePoints]
        .into_iter()
        .enumerate()
    {
        let path = dir.path().join(format!("gdp_{i}.svg"));
        let opts = PlotOptions {
            kind,
            ..PlotOptions::default()
        };
        viz::render_xy_plot(&sample(), &path, &opts).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"), "not an svg for {kind:?}");
        assert!(svg.contains("Germany"));
        assert!(svg.contains("Atlantis"), "empty series keeps its legend entry");
    }
}

#[test]
fn default_title_names_the_year_span() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("title.svg");
    viz::render_xy_plot(&sample(), &path, &PlotOptions::default()).unwrap();
    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("spanning 2019 to 2021"));
    assert!(svg.contains("GDP (trillions)"));
}

#[test]
fn png_backend_and_single_year() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("one.png");
    let mut rs = ResultSet::new();
    rs.insert("Solo".into(), vec![(2000, 0.0)]);
    let opts = PlotOptions {
        width: 320,
        height: 200,
        locale: "de".into(),
        title: Some("Solo".into()),
        ..PlotOptions::default()
    };
    viz::render_xy_plot(&rs, &path, &opts).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
