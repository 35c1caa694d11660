//! phonescore: score phone-number candidates from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use phonescore::config::{load_config, starter_config, Config, CONFIG_FILENAME};
use phonescore::logging::init_tracing;
use phonescore::reporter::{ConsoleReporter, JsonReporter};
use phonescore::{BatchSummary, Culture, ExtractResult, PhoneNumberParser};
use std::io::{self, BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// phonescore: confidence scores for phone-number candidates
#[derive(Parser, Debug)]
#[command(name = "phonescore")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Candidate texts to score (omit to read from --file or stdin)
    candidates: Vec<String>,

    /// Read candidates from a file, one per line
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Output format as JSON
    #[arg(long, short)]
    json: bool,

    /// Include the per-rule score breakdown
    #[arg(long, short)]
    explain: bool,

    /// Minimum acceptable score in [0, 1] (exit 1 if any candidate is below)
    #[arg(long, short)]
    threshold: Option<f64>,

    /// Culture code selecting the pattern bundle (e.g. en-us)
    #[arg(long)]
    culture: Option<String>,

    /// Path to config file (default: search .phonescorerc.json in current dir and parents)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Quiet mode (text and score only)
    #[arg(long, short)]
    quiet: bool,

    /// Verbose output (debug logging)
    #[arg(long, short)]
    verbose: bool,

    /// Number of parallel threads for batch scoring (default: number of CPU cores)
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create .phonescorerc.json with sensible defaults
    Init {
        /// Minimum score threshold (e.g. 0.5)
        #[arg(long)]
        threshold: Option<f64>,

        /// Culture code (e.g. en-us)
        #[arg(long)]
        culture: Option<String>,

        /// Directory in which to create config (default: current)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Some(Commands::Init {
        threshold,
        culture,
        dir,
    }) = &args.command
    {
        return run_init(*threshold, culture.as_deref(), dir.as_deref());
    }

    let work_dir = std::env::current_dir().context("Failed to resolve current directory")?;
    let config = load_config(&work_dir, args.config.as_deref())?
        .merge_with_cli(args.threshold, args.culture.as_deref());
    config.validate()?;

    let parser = build_parser(&config)?;
    let candidates = collect_candidates(&args)?;

    if candidates.is_empty() {
        if !args.quiet {
            eprintln!("{}: No candidates to score", "Warning".yellow());
        }
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(jobs) = args.jobs {
        rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build_global()
            .ok();
    }

    let sources: Vec<ExtractResult> = candidates.into_iter().map(ExtractResult::new).collect();
    let reports = parser.report_batch(&sources, args.explain);

    let summary = BatchSummary::from_reports(&reports, config.threshold);
    tracing::debug!(
        candidates = summary.candidates,
        below_threshold = summary.below_threshold,
        "scoring complete"
    );

    if args.json {
        println!("{}", JsonReporter::new().pretty().report_with_summary(&reports, &summary));
    } else if args.quiet {
        let reporter = ConsoleReporter::new();
        for report in &reports {
            reporter.report_quiet(report);
        }
    } else {
        let mut reporter = ConsoleReporter::new().with_threshold(config.threshold);
        if args.explain {
            reporter = reporter.verbose();
        }
        if !io::stdout().is_terminal() {
            reporter = reporter.without_colors();
        }
        reporter.report_many(&reports, &summary);
    }

    if summary.below_threshold > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn build_parser(config: &Config) -> Result<PhoneNumberParser> {
    let patterns = config
        .resolve_patterns()
        .context("Failed to build pattern bundle")?;
    Ok(PhoneNumberParser::with_patterns(patterns))
}

/// Candidates from positional args, --file, or stdin (in that order of preference)
fn collect_candidates(args: &Args) -> Result<Vec<String>> {
    if !args.candidates.is_empty() {
        return Ok(args.candidates.clone());
    }

    let lines: Vec<String> = if let Some(ref path) = args.file {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read candidates file: {}", path.display()))?
            .lines()
            .map(str::to_string)
            .collect()
    } else {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<_>>()
            .context("Failed to read candidates from stdin")?
    };

    // Candidates are scored verbatim; only blank lines are dropped
    Ok(lines.into_iter().filter(|l| !l.trim().is_empty()).collect())
}

fn run_init(threshold: Option<f64>, culture: Option<&str>, dir: Option<&Path>) -> Result<ExitCode> {
    let dir = dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() {
        eprintln!(
            "{}: {} already exists, not overwriting",
            "Warning".yellow(),
            config_path.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let culture: Culture = match culture {
        Some(code) => code.parse()?,
        None => Culture::default(),
    };
    let threshold = threshold.unwrap_or(0.5);
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("threshold must be between 0 and 1, got {}", threshold);
    }

    std::fs::write(&config_path, starter_config(threshold, &culture.to_string()))
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!(
        "{}: Created {} with threshold={}, culture={}",
        "Done".green().bold(),
        config_path.display(),
        threshold,
        culture
    );
    Ok(ExitCode::SUCCESS)
}
