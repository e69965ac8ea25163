mod feed;
mod reports;
mod scenarios;

use anyhow::{Context, Result};
use charis_engine::{AssessmentData, AssessmentEngine};
use clap::Parser;
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use feed::{EmbeddedFeed, FsDataFeed, ReportDrain};

#[derive(Debug, Parser)]
#[command(name = "charis-tester", version)]
#[command(about = "Headless QA harness for the Charis spiritual gifts assessment engine")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "all")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 25)]
    iterations: usize,

    /// Read questions.json and gifts.json from this directory instead of
    /// the embedded feeds
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["console", "json", "markdown"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenario_names = scenarios::expand_scenarios(&split_csv(&args.scenarios));
    let seeds = parse_seeds(&split_csv(&args.seeds))?;
    let data = load_data(&args)?;
    log::info!(
        "loaded {} questions across {} gifts",
        data.question_count(),
        data.gifts.len()
    );

    let results = run_scenarios(&args, &scenario_names, &seeds, &data);

    write_reports(&args, &results, start_time)?;

    if results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in scenarios::CATALOG {
        writeln!(output_target.writer(), "  {key:22} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "Charis Assessment Tester".bright_cyan().bold());
    println!("{}", "========================".cyan());
}

fn split_csv(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}

fn parse_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed '{token}'"))
        })
        .collect()
}

fn load_data(args: &Args) -> Result<AssessmentData> {
    match &args.data_dir {
        Some(dir) => AssessmentEngine::new(FsDataFeed::new(dir.clone()), ReportDrain::default())
            .load()
            .with_context(|| format!("loading feeds from {}", dir.display())),
        None => AssessmentEngine::new(EmbeddedFeed, ReportDrain::default())
            .load()
            .context("loading embedded feeds"),
    }
}

fn run_scenarios(
    args: &Args,
    scenario_names: &[String],
    seeds: &[u64],
    data: &AssessmentData,
) -> Vec<scenarios::ScenarioResult> {
    println!("{}", "Running engine scenarios".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let mut results = Vec::new();
    for name in scenario_names {
        if !scenarios::CATALOG.iter().any(|(key, _)| key == name) {
            eprintln!("unknown scenario: {}", name.yellow());
            continue;
        }
        for &seed in seeds {
            let Some(result) =
                scenarios::run_scenario(name, data, seed, args.iterations, args.verbose)
            else {
                continue;
            };
            let status = if result.passed {
                "PASS".green()
            } else {
                "FAIL".red()
            };
            println!(
                "{status} {name} (seed {seed}): {}/{} iterations",
                result.successful_iterations, result.iterations_run
            );
            results.push(result);
        }
    }
    results
}

fn write_reports(
    args: &Args,
    results: &[scenarios::ScenarioResult],
    start_time: Instant,
) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => {
            if results.is_empty() {
                writeln!(&mut output_target, "[]")?;
            } else {
                reports::generate_json_report(&mut output_target, results)?;
            }
        }
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Charis Assessment Scenario Results\n\n_No scenarios executed._"
                )?;
            } else {
                reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
        }
    }

    writeln!(&mut output_target)?;
    writeln!(&mut output_target, "Total time: {:?}", start_time.elapsed())?;
    output_target.flush_inner()?;
    Ok(())
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
