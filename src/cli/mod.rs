//! # CLI Module
//!
//! Command-line interface for the duplicate report planner.
//!
//! ## Usage
//! ```bash
//! # Preview what the scanner would delete
//! czk test ~/Photos
//!
//! # Only videos, looser matching
//! czk test ~/Photos --media videos --video-tolerance 15
//!
//! # Delete duplicates, then reconcile the plan with what is left
//! czk execute ~/Photos --out-dir ~/reports
//!
//! # JSON summary for scripting
//! czk test ~/Photos --output json
//! ```

mod render;

use clap::{Args, Parser, Subcommand, ValueEnum};
use czk_planner::core::engine::Mode;
use czk_planner::core::inventory::MediaKind;
use czk_planner::core::scanner::{
    CzkawkaCli, HashAlgorithm, ImageSimilarity, ResizeFilter, ScannerSettings, MAX_VIDEO_TOLERANCE,
};
use czk_planner::core::workflow::{NullReporter, RunConfig, Workflow};
use czk_planner::error::{ReportError, Result};
use render::{PlainReporter, PrettyReporter};
use std::path::PathBuf;
use tracing::debug;

/// czk - Czkawka duplicate workflows with CSV keep/remove plans
#[derive(Parser, Debug)]
#[command(name = "czk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run dry-run duplicate analysis
    Test(RunArgs),
    /// Run duplicate deletion and reconcile the plan afterwards
    Execute(RunArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Which media scans to run
    #[arg(long, value_enum, default_value_t = MediaChoice::Both)]
    media: MediaChoice,

    /// Image perceptual hash size
    #[arg(long, default_value_t = 32, value_parser = parse_hash_size)]
    hash_size: u8,

    /// Image similarity preset passed to the scanner
    #[arg(long, value_enum, default_value_t = Similarity::High)]
    image_similarity: Similarity,

    /// Image hash algorithm
    #[arg(long, value_enum, default_value_t = HashAlg::Gradient)]
    hash_alg: HashAlg,

    /// Resize filter used before image hashing
    #[arg(long, value_enum, default_value_t = Filter::Lanczos3)]
    image_filter: Filter,

    /// Video tolerance in range [0, 20]
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(0..=MAX_VIDEO_TOLERANCE as i64))]
    video_tolerance: u8,

    /// Number of CSV rows to preview
    #[arg(long, default_value_t = 50, value_parser = parse_positive)]
    top: usize,

    /// Directory where JSON and CSV artifacts are written
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write a CSV with one row per removed file
    #[arg(long)]
    expanded: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    output: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MediaChoice {
    Both,
    Images,
    Videos,
}

impl MediaChoice {
    fn kinds(self) -> Vec<MediaKind> {
        match self {
            MediaChoice::Both => MediaKind::ALL.to_vec(),
            MediaChoice::Images => vec![MediaKind::Images],
            MediaChoice::Videos => vec![MediaKind::Videos],
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "PascalCase")]
enum Similarity {
    Minimal,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
    None,
}

impl From<Similarity> for ImageSimilarity {
    fn from(similarity: Similarity) -> Self {
        match similarity {
            Similarity::Minimal => ImageSimilarity::Minimal,
            Similarity::VeryLow => ImageSimilarity::VeryLow,
            Similarity::Low => ImageSimilarity::Low,
            Similarity::Medium => ImageSimilarity::Medium,
            Similarity::High => ImageSimilarity::High,
            Similarity::VeryHigh => ImageSimilarity::VeryHigh,
            Similarity::None => ImageSimilarity::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "PascalCase")]
enum HashAlg {
    Mean,
    Gradient,
    Blockhash,
    VertGradient,
    DoubleGradient,
    Median,
}

impl From<HashAlg> for HashAlgorithm {
    fn from(alg: HashAlg) -> Self {
        match alg {
            HashAlg::Mean => HashAlgorithm::Mean,
            HashAlg::Gradient => HashAlgorithm::Gradient,
            HashAlg::Blockhash => HashAlgorithm::Blockhash,
            HashAlg::VertGradient => HashAlgorithm::VertGradient,
            HashAlg::DoubleGradient => HashAlgorithm::DoubleGradient,
            HashAlg::Median => HashAlgorithm::Median,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "PascalCase")]
enum Filter {
    Lanczos3,
    Nearest,
    Triangle,
    Faussian,
    Catmullrom,
}

impl From<Filter> for ResizeFilter {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Lanczos3 => ResizeFilter::Lanczos3,
            Filter::Nearest => ResizeFilter::Nearest,
            Filter::Triangle => ResizeFilter::Triangle,
            Filter::Faussian => ResizeFilter::Faussian,
            Filter::Catmullrom => ResizeFilter::Catmullrom,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// Plain `key: value` lines and a fixed-width table
    Plain,
    /// JSON output for scripting
    Json,
}

fn parse_hash_size(value: &str) -> std::result::Result<u8, String> {
    match value.parse::<u8>() {
        Ok(size @ (8 | 16 | 32 | 64)) => Ok(size),
        _ => Err("must be one of 8, 16, 32, 64".to_string()),
    }
}

fn parse_positive(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err("value must be greater than 0".to_string()),
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let (mode, args) = match cli.command {
        Commands::Test(args) => (Mode::Projected, args),
        Commands::Execute(args) => (Mode::Reconciled, args),
    };

    czk_planner::init_tracing(args.verbose);
    if args.no_color {
        console::set_colors_enabled(false);
    }

    let scanner = CzkawkaCli::locate()?;
    debug!(executable = %scanner.executable().display(), "located scanner");

    let settings = ScannerSettings::default()
        .image_similarity(args.image_similarity.into())
        .hash_size(args.hash_size)
        .hash_algorithm(args.hash_alg.into())
        .image_filter(args.image_filter.into())
        .video_tolerance(args.video_tolerance);

    let config = RunConfig::builder()
        .mode(mode)
        .target_dir(args.directory)
        .out_dir(args.out_dir)
        .media(args.media.kinds())
        .settings(settings)
        .write_expanded(args.expanded)
        .build()?;

    let workflow = Workflow::new(config, Box::new(scanner));

    match args.output {
        OutputFormat::Pretty => {
            workflow.run(&mut PrettyReporter::new(args.top))?;
        }
        OutputFormat::Plain => {
            workflow.run(&mut PlainReporter::new(args.top))?;
        }
        OutputFormat::Json => {
            let result = workflow.run(&mut NullReporter)?;
            let json = serde_json::to_string_pretty(&result).map_err(ReportError::from)?;
            println!("{}", json);
        }
    }

    Ok(())
}
