//! Region Strata: label variant records with the regions they fall in
//!
//! Usage: strata <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use region_strata::bed::open_input;
use region_strata::commands::{AnnotateCommand, SizesCommand};
use region_strata::config::LoadOptions;
use region_strata::error::{RegionError, Result};
use region_strata::spec_token::RegionSpec;

#[derive(Parser)]
#[command(name = "strata")]
#[command(version)]
#[command(about = "Region Strata: annotate sorted variant records with named BED region sets", long_about = None)]
struct Cli {
    /// Prefix bare chromosome names (1-22, X, Y, M) in region files with "chr"
    #[arg(long, global = true)]
    fixchr: bool,

    /// Also log per-chromosome progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a Regions INFO field to every record of a sorted VCF
    Annotate {
        /// Region file as `path` or `LABEL:path` (repeatable, CONF is reserved)
        #[arg(short = 'r', long = "regions", required = true)]
        regions: Vec<String>,

        /// Input VCF, optionally gzipped (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print annotation statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Print the total size of every region label
    Sizes {
        /// Region file as `path` or `LABEL:path` (repeatable, CONF is reserved)
        #[arg(short = 'r', long = "regions", required = true)]
        regions: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let options = LoadOptions::new().with_fix_chr(cli.fixchr);

    let result = match cli.command {
        Commands::Annotate {
            regions,
            input,
            stats,
        } => run_annotate(regions, input, stats, options),
        Commands::Sizes { regions } => run_sizes(regions, options),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_annotate(
    regions: Vec<String>,
    input: Option<PathBuf>,
    stats: bool,
    options: LoadOptions,
) -> Result<()> {
    let cmd = AnnotateCommand::new(RegionSpec::parse_all(&regions)?).with_options(options);

    let reader: Box<dyn BufRead> = match input {
        Some(path) if path.as_os_str() != "-" => {
            open_input(&path).map_err(|e| RegionError::io(&path, e))?
        }
        _ => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    let summary = cmd.run(reader, &mut handle)?;
    if stats {
        eprintln!("{}", summary);
    }
    Ok(())
}

fn run_sizes(regions: Vec<String>, options: LoadOptions) -> Result<()> {
    let cmd = SizesCommand::new(RegionSpec::parse_all(&regions)?).with_options(options);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    cmd.run(&mut handle)
}
