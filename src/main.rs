use anyhow::{bail, Context};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use twinscout::{loader, ComparisonChart, Error, RosterSource, Scout, ScoutConfig, TwinReport};
use twinscout_similarity::{display_rows, DisplayRow, MAX_ASSIST_WEIGHT, MIN_ASSIST_WEIGHT};

/// Performance twin finder: ranks the players most similar to a benchmark
#[derive(Parser, Debug)]
#[command(name = "twinscout")]
#[command(about = "Find statistically similar players", long_about = None)]
struct Args {
    /// Roster CSV (player, position, goals, assists, sh, sot_pct, g_sh)
    #[arg(short, long, default_value = loader::DEFAULT_ROSTER_FILE)]
    data: PathBuf,

    /// Benchmark player
    #[arg(short, long)]
    player: Option<String>,

    /// Assist importance, 1.0 to 3.0
    #[arg(short, long)]
    assist_weight: Option<f64>,

    /// Number of twins
    #[arg(short)]
    k: Option<usize>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Export the report as CSV; without a path writes Scout_Report_<player>.csv
    #[arg(long, num_args = 0..=1)]
    export: Option<Option<PathBuf>>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// List the players in the roster and exit
    #[arg(long)]
    list: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &args.config {
        Some(path) => ScoutConfig::from_json_file(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?,
        None => ScoutConfig::default(),
    };
    if let Some(weight) = args.assist_weight {
        config.assist_weight = weight;
    }
    if let Some(k) = args.k {
        config.k = k;
    }
    if !(MIN_ASSIST_WEIGHT..=MAX_ASSIST_WEIGHT).contains(&config.assist_weight) {
        bail!(
            "Assist weight must be between {} and {}, got {}",
            MIN_ASSIST_WEIGHT,
            MAX_ASSIST_WEIGHT,
            config.assist_weight
        );
    }

    let (table, source) = loader::load_or_fallback(&args.data)
        .map_err(|e| anyhow::anyhow!(describe(&e)))
        .with_context(|| format!("Failed to load roster {}", args.data.display()))?;
    match source {
        RosterSource::File => info!("Loaded {} players from {:?}", table.len(), args.data),
        RosterSource::Fallback => info!("Using built-in roster of {} players", table.len()),
    }

    if args.list {
        for name in table.player_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let Some(player) = args.player.as_deref() else {
        bail!("No benchmark player given; use --player or --list");
    };

    let scout = Scout::with_config(table.into_snapshot(), config);
    let report = scout
        .report(player)
        .map_err(|e| anyhow::anyhow!(describe(&e)))?;

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print_report(&report);
        if report.top().is_some() {
            let chart = scout
                .top_comparison(&report)
                .map_err(|e| anyhow::anyhow!(describe(&e)))?;
            print_chart(&chart);
        }
    }

    if let Some(export) = args.export {
        let path = export.unwrap_or_else(|| PathBuf::from(report.default_export_name()));
        report
            .export_csv(&path)
            .with_context(|| format!("Failed to export {}", path.display()))?;
        info!("Report written to {:?}", path);
    }

    Ok(())
}

/// User-facing message for each failure kind
fn describe(err: &Error) -> String {
    match err {
        Error::UnknownPlayer(player) => format!("Player '{}' is not in the roster", player),
        Error::DegenerateFeature { feature } => format!(
            "Every player has the same '{}' value; drop that feature or fix the data",
            feature.label()
        ),
        Error::InsufficientData { requested, available } => format!(
            "Cannot build a full report: asked for {} twins but only {} other players exist",
            requested, available
        ),
        Error::Schema(e) => format!("Roster is malformed: {}", e),
        Error::DuplicatePlayer(player) => format!("Roster lists '{}' more than once", player),
        other => other.to_string(),
    }
}

fn print_report(report: &TwinReport) {
    println!("Scouting Report for {}", report.target.player);
    if !report.dropped_features.is_empty() {
        let dropped: Vec<_> = report.dropped_features.iter().map(|f| f.label()).collect();
        println!("Warning: no variance in {}, ignored", dropped.join(", "));
    }
    println!();

    let rows = display_rows(report);
    let mut widths = DisplayRow::HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.cells()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: [&str; 8], marker: &str| {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        println!("{} {}", marker, padded.join("  "));
    };

    line(DisplayRow::HEADERS, " ");
    for row in &rows {
        line(row.cells(), if row.highlight { "*" } else { " " });
    }
}

fn print_chart(chart: &ComparisonChart) {
    const BAR: usize = 30;

    println!();
    println!(
        "Performance DNA Match: {} vs {}",
        chart.target.player, chart.twin.player
    );
    let bar = |value: f64| {
        let filled = if chart.radial_max > 0.0 {
            ((value / chart.radial_max) * BAR as f64).round().clamp(0.0, BAR as f64) as usize
        } else {
            0
        };
        format!("{:<width$}", "#".repeat(filled), width = BAR)
    };

    for (t, w) in chart.target.values.iter().zip(chart.twin.values.iter()) {
        println!(
            "{:>16}  {} {:>8.2}  |  {} {:>8.2}",
            t.label,
            bar(t.value),
            t.value,
            bar(w.value),
            w.value
        );
    }
}
