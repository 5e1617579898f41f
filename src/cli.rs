// src/cli.rs
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::config::Options;
use crate::data::Dataset;
use crate::filter::{day_end, day_start, FilterSpec};
use crate::report::Report;
use crate::store::DatasetStore;

#[derive(Parser)]
#[command(name = "matchstats", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file listing the report sections to read
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the filter vocabulary and date bounds of each dataset
    Options(Source),
    /// Print statistics for the selected matches
    Report(ReportArgs),
}

#[derive(Args)]
pub struct Source {
    /// Exported report (HTML)
    pub file: PathBuf,

    /// Only load this game key (e.g. bo6)
    #[arg(long, value_name = "KEY")]
    pub game: Option<String>,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: Source,

    /// Operator to include (repeatable; default all)
    #[arg(long = "operator", value_name = "NAME", help_heading = "Filters")]
    pub operators: Vec<String>,

    /// Game type to include (repeatable; default all)
    #[arg(long = "game-type", value_name = "NAME", help_heading = "Filters")]
    pub game_types: Vec<String>,

    /// Map to include (repeatable; default all)
    #[arg(long = "map", value_name = "NAME", help_heading = "Filters")]
    pub maps: Vec<String>,

    /// First day, inclusive (YYYY-MM-DD, UTC)
    #[arg(long, value_name = "DATE", help_heading = "Filters")]
    pub from: Option<NaiveDate>,

    /// Last day, inclusive (YYYY-MM-DD, UTC)
    #[arg(long, value_name = "DATE", help_heading = "Filters")]
    pub to: Option<NaiveDate>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let opts = match &cli.config {
        Some(path) => Options::load(path)
            .wrap_err_with(|| format!("could not load options from {}", path.display()))?,
        None => Options::default(),
    };

    let result = dispatch(&cli.command, &opts);
    if let Err(e) = &result {
        loge!("{e:#}");
    }
    result
}

fn dispatch(cmd: &Command, opts: &Options) -> Result<()> {
    match cmd {
        Command::Options(src) => print_options(&load(src, opts)?),
        Command::Report(args) => print_reports(&load(&args.source, opts)?, args),
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose { ::log::LevelFilter::Debug } else { ::log::LevelFilter::Warn };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .init();
}

fn read_lossy(path: &Path) -> Result<String> {
    let bytes = fs::read(path).wrap_err_with(|| format!("could not read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn load(src: &Source, opts: &Options) -> Result<DatasetStore> {
    let sections = opts.sections_for(src.game.as_deref())?;
    let text = read_lossy(&src.file)?;
    let mut store = DatasetStore::new();
    store.load_document(&text, &sections)?;
    Ok(store)
}

fn print_options(store: &DatasetStore) -> Result<()> {
    for ds in store.iter() {
        let o = ds.options();
        println!("[{}] {} match(es)", ds.key(), ds.len());
        println!("  operators:  {}", o.operators.join(", "));
        println!("  game types: {}", o.game_types.join(", "));
        println!("  maps:       {}", o.maps.join(", "));
        println!("  dates:      {} .. {}", fmt_opt_day(o.first), fmt_opt_day(o.last));
    }
    Ok(())
}

/// Omitted categorical flags select everything; omitted dates fall back to
/// the dataset bounds.
pub fn build_filter(ds: &Dataset, args: &ReportArgs) -> FilterSpec {
    let mut spec = ds.select_all();
    if !args.operators.is_empty() {
        spec = spec.with_operators(args.operators.iter().cloned());
    }
    if !args.game_types.is_empty() {
        spec = spec.with_game_types(args.game_types.iter().cloned());
    }
    if !args.maps.is_empty() {
        spec = spec.with_maps(args.maps.iter().cloned());
    }
    let start = args.from.map(day_start).unwrap_or(spec.start);
    let end = args.to.map(day_end).unwrap_or(spec.end);
    spec.with_range(start, end)
}

fn check_dates(args: &ReportArgs) -> Result<()> {
    match (args.from, args.to) {
        (Some(from), Some(to)) if from > to => Err(eyre!("--from {from} is after --to {to}")),
        _ => Ok(()),
    }
}

fn print_reports(store: &DatasetStore, args: &ReportArgs) -> Result<()> {
    check_dates(args)?;
    let reports: Vec<Report> = store.iter().map(|ds| Report::build(ds, &build_filter(ds, args))).collect();

    if args.json {
        let json = match reports.as_slice() {
            [one] => one.to_json()?,
            many => serde_json::to_string_pretty(many)?,
        };
        println!("{json}");
        return Ok(());
    }

    if reports.is_empty() {
        return Err(eyre!("no datasets loaded"));
    }
    for r in &reports {
        print_text(r);
    }
    Ok(())
}

fn print_text(r: &Report) {
    let l = &r.lifetime;
    let f = &r.filtered;

    println!("[{}]", r.key);
    println!(
        "  lifetime: {} matches, {} wins ({:.1}%), K/D {:.2}, accuracy {:.1}%, {}",
        l.matches, l.wins, l.win_rate, l.kd, l.accuracy, fmt_duration(l.play_time_secs)
    );
    println!(
        "  filtered: {} matches, skill {:.0}, K/D {:.2}, win rate {:.1}%, accuracy {:.1}%",
        f.matches, f.avg_skill, f.kd, f.win_rate, f.accuracy
    );
    println!(
        "            best streak {}, avg score {:.0}, {}",
        f.best_streak, f.avg_score, fmt_duration(f.play_time_secs)
    );

    if !r.buckets.maps.is_empty() {
        println!("  maps:");
        for m in &r.buckets.maps {
            println!("    {:<24} {:>4} K/D {:.2}", m.map, m.matches, m.kd);
        }
    }
    if !r.buckets.hourly.is_empty() {
        println!("  hours (UTC):");
        for h in &r.buckets.hourly {
            println!("    {:02}:00 {:>4} K/D {:.2}", h.hour, h.matches, h.kd);
        }
    }
    if !r.buckets.outcomes.is_empty() {
        let parts: Vec<String> = r.buckets.outcomes.iter().map(|(k, n)| format!("{k}: {n}")).collect();
        println!("  outcomes: {}", parts.join(", "));
    }
}

fn fmt_opt_day(t: Option<DateTime<Utc>>) -> String {
    t.map_or_else(|| s!("-"), |t| t.format(crate::config::consts::DATE_FORMAT).to_string())
}

fn fmt_duration(secs: f64) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}h {:02}m played", total / 3600, (total % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeatable_filters() {
        let cli = Cli::try_parse_from([
            "matchstats", "report", "r.html", "--map", "Skyline", "--map", "Rewind", "--from", "2024-11-01", "--json",
        ])
        .unwrap();
        let Command::Report(args) = cli.command else { panic!("expected report") };
        assert_eq!(args.maps, vec!["Skyline", "Rewind"]);
        assert_eq!(args.from, NaiveDate::from_ymd_opt(2024, 11, 1));
        assert!(args.json && args.to.is_none());
    }

    #[test]
    fn duration_format() {
        assert_eq!(fmt_duration(3725.0), "1h 02m played");
        assert_eq!(fmt_duration(0.0), "0h 00m played");
    }

    #[test]
    fn reversed_date_range_is_an_error() {
        let parse = |from: &str, to: &str| {
            let cli = Cli::try_parse_from(["matchstats", "report", "r.html", "--from", from, "--to", to]).unwrap();
            let Command::Report(args) = cli.command else { panic!("expected report") };
            args
        };
        assert!(check_dates(&parse("2024-11-05", "2024-11-01")).is_err());
        assert!(check_dates(&parse("2024-11-01", "2024-11-01")).is_ok());
        assert!(check_dates(&parse("2024-11-01", "2024-11-05")).is_ok());
    }
}
