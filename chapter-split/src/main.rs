//! chapter-split - Split a chat export and text files into per-chapter files

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use corpus_segmenter::{ExtractMode, Pipeline, RunOutcome, RunReport, SegmenterConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit code when the corpus contained no chapter markers
const EXIT_NO_MARKERS: u8 = 3;

#[derive(Parser, Debug)]
#[command(name = "chapter-split")]
#[command(about = "Split a text corpus into per-chapter files", long_about = None)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write each chapter block as found
    Extract(RunArgs),
    /// Write each chapter block rewritten one verse per line
    Verses(RunArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show the effective configuration as TOML
    Show {
        /// Configuration file to load
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug)]
struct RunArgs {
    /// Configuration file (TOML); flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Chat export (JSON) to read first
    #[arg(long)]
    export: Option<PathBuf>,

    /// Plain-text file to append, in order (repeatable)
    #[arg(short, long = "text")]
    texts: Vec<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum digits of the chapter number in file names
    #[arg(long)]
    pad_width: Option<usize>,

    /// Book label for the book-name rules (repeatable, replaces configured labels)
    #[arg(long = "book")]
    books: Vec<String>,

    /// Skip chat export chunks flagged as model thoughts
    #[arg(long)]
    skip_thoughts: bool,

    /// Report the files that would be written without writing them
    #[arg(long)]
    dry_run: bool,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl RunArgs {
    /// Config file values with command-line overrides applied
    fn resolve_config(&self) -> Result<SegmenterConfig> {
        let mut config = load_config(self.config.as_ref())?;

        if let Some(export) = &self.export {
            config.export_path = Some(export.clone());
        }
        if !self.texts.is_empty() {
            config.text_paths = self.texts.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(pad_width) = self.pad_width {
            config.pad_width = pad_width;
        }
        if !self.books.is_empty() {
            config.book_names = self.books.clone();
        }
        if self.skip_thoughts {
            config.skip_thoughts = true;
        }

        Ok(config)
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SegmenterConfig> {
    match path {
        Some(path) => SegmenterConfig::load(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display())),
        None => Ok(SegmenterConfig::default()),
    }
}

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    match args.command {
        Commands::Extract(run_args) => extract(&run_args, ExtractMode::Raw),
        Commands::Verses(run_args) => extract(&run_args, ExtractMode::Verses),
        Commands::Config { action } => {
            handle_config_command(&action)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn extract(run_args: &RunArgs, mode: ExtractMode) -> Result<ExitCode> {
    init_logging(run_args.debug);

    let config = run_args.resolve_config()?;
    log::debug!("Configuration: {:?}", config);

    let pipeline = Pipeline::new(config).context("Invalid configuration")?;
    let outcome = if run_args.dry_run {
        pipeline.run_dry(mode)?
    } else {
        pipeline.run(mode)?
    };

    match outcome {
        RunOutcome::NoMarkers => {
            println!("No chapter markers found; nothing written.");
            Ok(ExitCode::from(EXIT_NO_MARKERS))
        }
        RunOutcome::Completed(report) => {
            print_summary(&report, run_args.dry_run);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_summary(report: &RunReport, dry_run: bool) {
    if dry_run {
        for file in &report.files {
            println!("  would write {}", file.display());
        }
    }
    println!(
        "Markers found: {} ({} unique)",
        report.markers_found, report.unique_markers
    );
    println!("Unique chapters: {}", report.chapters);
    println!("Blocks: {}", report.blocks);
    println!("Files {}: {}", if dry_run { "planned" } else { "written" }, report.files.len());
    println!("Output directory: {}", report.output_dir.display());
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show { config } => {
            let config = load_config(config.as_ref())?;
            print!("{}", config.to_toml()?);
        }
    }
    Ok(())
}
