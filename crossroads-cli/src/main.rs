mod narrative;
mod play;
mod sim;
mod store;
mod terminal;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use crossroads_game::EncounterRules;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use sim::{Strategy, aggregate_runs, resolve_seed_inputs, run_simulation};
use util::split_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Interactive game in the terminal
    Play,
    /// Automated seeded runs with a summary report
    Simulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "crossroads", version = "0.1.0")]
#[command(about = "Crossroads - pick a path, survive ten levels, keep your gold")]
struct Args {
    /// Play interactively or simulate automated runs
    #[arg(long, value_enum, default_value_t = Mode::Play)]
    mode: Mode,

    /// Save file holding health and treasure between sessions
    #[arg(long, default_value = "crossroads-save.json")]
    save: PathBuf,

    /// Directory containing treasure.txt, thief.txt and snake.txt
    #[arg(long, default_value = "assets/narrative")]
    narrative_dir: PathBuf,

    /// Optional JSON file overriding encounter tuning
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Seed for play mode; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,

    /// Restore default health and treasure before playing
    #[arg(long)]
    reset: bool,

    /// Seeds to simulate (comma-separated integers, or all for 1..=iterations)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Runs per seed (simulate mode only)
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Strategies to simulate (comma-separated: left,straight,balanced,random or all)
    #[arg(long, default_value = "all")]
    strategies: String,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let rules = load_rules(args.rules.as_deref())?;

    match args.mode {
        Mode::Play => {
            let options = play::PlayOptions {
                save: args.save.clone(),
                narrative_dir: args.narrative_dir.clone(),
                seed: args.seed.unwrap_or_else(util::clock_seed),
                reset: args.reset,
            };
            play::run(&options, rules).await
        }
        Mode::Simulate => simulate(&args, rules).await,
    }
}

fn load_rules(path: Option<&Path>) -> Result<EncounterRules> {
    let Some(path) = path else {
        return Ok(EncounterRules::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rules from {}", path.display()))?;
    EncounterRules::from_json(&json)
        .with_context(|| format!("invalid rules in {}", path.display()))
}

async fn simulate(args: &Args, rules: EncounterRules) -> Result<()> {
    if args.report == ReportFormat::Console {
        announce_banner();
    }
    let start_time = Instant::now();
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds), args.iterations)?;
    let strategies = Strategy::parse_list(&split_csv(&args.strategies))?;

    let records = run_simulation(&rules, &strategies, &seeds, args.iterations, args.verbose).await;
    let aggregates = aggregate_runs(&records);

    let mut output_target = OutputTarget::new(args.output.clone())?;
    match args.report {
        ReportFormat::Json => sim::reports::generate_json_report(&mut output_target, &aggregates)?,
        ReportFormat::Markdown => {
            sim::reports::generate_markdown_report(&mut output_target, &aggregates)?;
        }
        ReportFormat::Console => {
            sim::reports::generate_console_report(
                &mut output_target,
                &aggregates,
                start_time.elapsed(),
            )?;
        }
    }
    output_target.flush_inner()?;
    Ok(())
}

fn announce_banner() {
    println!("{}", "🧭 Crossroads Simulator".bright_cyan().bold());
    println!("{}", "=======================".cyan());
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_simulate_flags() {
        let args = Args::try_parse_from([
            "crossroads",
            "--mode",
            "simulate",
            "--seeds",
            "1,2",
            "--report",
            "json",
        ])
        .unwrap();
        assert_eq!(args.mode, Mode::Simulate);
        assert_eq!(args.report, ReportFormat::Json);
        assert_eq!(args.iterations, 10);
        assert_eq!(args.narrative_dir, PathBuf::from("assets/narrative"));
    }

    #[test]
    fn missing_rules_file_is_reported() {
        let err = load_rules(Some(Path::new("/nonexistent/rules.json"))).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read rules"));
    }

    #[test]
    fn default_rules_without_path() {
        assert_eq!(load_rules(None).unwrap(), EncounterRules::default());
    }
}
