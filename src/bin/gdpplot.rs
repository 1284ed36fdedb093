use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gdp_plot::viz::{self, PlotKind, PlotOptions};
use gdp_plot::{Config, collect_series, stats, storage, table};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gdpplot",
    version,
    about = "Plot and summarize country GDP series from a delimited table"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build series for some countries (and optionally plot, save, and print stats).
    Plot(PlotArgs),
    /// Print the header fields of a table.
    Fields(FieldsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Kind {
    Line,
    Scatter,
    LinePoints,
}

impl From<Kind> for PlotKind {
    fn from(k: Kind) -> Self {
        match k {
            Kind::Line => PlotKind::Line,
            Kind::Scatter => PlotKind::Scatter,
            Kind::LinePoints => PlotKind::LinePoints,
        }
    }
}

#[derive(Args, Debug)]
struct Dialect {
    /// Field separator (single ASCII character).
    #[arg(long)]
    separator: Option<char>,
    /// Quote character (single ASCII character).
    #[arg(long)]
    quote: Option<char>,
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// GDP table to read. Overrides `data_file` from --config.
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// JSON config file; flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Country to include; repeat the flag or separate names with ';'.
    #[arg(short, long = "country", value_delimiter = ';', required = true)]
    countries: Vec<String>,
    /// Column holding the country name.
    #[arg(long)]
    key_field: Option<String>,
    #[command(flatten)]
    dialect: Dialect,
    /// First year to keep (inclusive).
    #[arg(long)]
    min_year: Option<i32>,
    /// Last year to keep (inclusive).
    #[arg(long)]
    max_year: Option<i32>,
    /// Create a chart at the given path (.svg or .png).
    #[arg(short, long)]
    out: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = Kind::LinePoints)]
    kind: Kind,
    /// Width of the plot.
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Height of the plot.
    #[arg(long, default_value_t = 400)]
    height: u32,
    /// Chart title (default mentions the plotted year span).
    #[arg(long)]
    title: Option<String>,
    /// Locale for Y tick labels (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Save the series to a file (.csv or .json).
    #[arg(long)]
    save: Option<PathBuf>,
    /// Print per-country statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct FieldsArgs {
    #[arg(short, long)]
    file: PathBuf,
    #[command(flatten)]
    dialect: Dialect,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plot(args) => cmd_plot(args),
        Command::Fields(args) => cmd_fields(args),
    }
}

fn build_config(args: &PlotArgs) -> Result<Config> {
    let mut cfg = match &args.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    match (&args.file, &args.config) {
        (Some(file), _) => cfg.data_file = file.clone(),
        (None, None) => anyhow::bail!("either --file or --config is required"),
        (None, Some(_)) => {}
    }
    if let Some(k) = &args.key_field {
        cfg.key_field = k.clone();
    }
    if let Some(c) = args.dialect.separator {
        cfg.separator = c;
    }
    if let Some(c) = args.dialect.quote {
        cfg.quote = c;
    }
    if let Some(y) = args.min_year {
        cfg.min_year = y;
    }
    if let Some(y) = args.max_year {
        cfg.max_year = y;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn cmd_plot(args: PlotArgs) -> Result<()> {
    let cfg = build_config(&args)?;
    // names are matched exactly as given, surrounding spaces included
    let results = collect_series(&cfg, &args.countries)
        .with_context(|| format!("reading {}", cfg.data_file.display()))?;

    if let Some(path) = args.save.as_ref() {
        let fmt = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&results, path)?,
            "json" => storage::save_json(&results, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} series to {}", results.len(), path.display());
    }

    if let Some(plot_path) = args.out.as_ref() {
        let opts = PlotOptions {
            width: args.width,
            height: args.height,
            title: args.title.clone(),
            kind: args.kind.into(),
            locale: args.locale.clone(),
        };
        viz::render_xy_plot(&results, plot_path, &opts)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    if args.stats {
        for s in stats::summarize(&results) {
            let span = match (s.first_year, s.last_year) {
                (Some(a), Some(b)) => format!("{a}-{b}"),
                _ => "NA".to_string(),
            };
            println!(
                "{}  years={} count={}  min={} max={} mean={} median={} cagr={}",
                s.country,
                span,
                s.count,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median),
                fmt_opt(s.cagr)
            );
        }
    }

    Ok(())
}

fn cmd_fields(args: FieldsArgs) -> Result<()> {
    let names = table::read_fieldnames(
        &args.file,
        args.dialect.separator.unwrap_or(','),
        args.dialect.quote.unwrap_or('"'),
    )?;
    for name in names {
        println!("{name}");
    }
    Ok(())
}
