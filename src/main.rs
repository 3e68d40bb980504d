use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use print_friendly::config::settings::Settings;
use print_friendly::config::{
    CleanConfig, DEFAULT_BACKGROUND, DEFAULT_CLEAR_DISTANCE, DEFAULT_DPI, DEFAULT_SEED_DISTANCE,
    DEFAULT_WHITE_THRESHOLD,
};
use print_friendly::pipeline::job_runner::{clean_directory, clean_document, rasterize_to_pngs};
use print_friendly::pipeline::layout;
use print_friendly::pipeline::orchestrator::{BatchOptions, BatchReport, PageStatus};
use print_friendly::render::pdfium::PdfiumRasterizer;

#[derive(Parser, Debug)]
#[command(name = "print_friendly")]
#[command(version, about = "Make instruction-booklet pages printer friendly", long_about = None)]
#[command(
    after_help = "Cancellation: the CLI does not cancel between pages. Ctrl-C stops the process; pages already written stay complete. Library callers can cancel through BatchOptions::cancel."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rasterize a PDF and clean every page
    Document {
        /// Input PDF file path
        pdf: PathBuf,

        /// Rendering resolution in DPI
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: u32,

        /// Directory that receives the <name>_raw_png and <name>_cleaned_png folders
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        #[command(flatten)]
        clean: CleanArgs,
    },

    /// Rasterize a PDF into PNG pages without cleaning
    Rasterize {
        /// Input PDF file path
        pdf: PathBuf,

        /// Rendering resolution in DPI
        #[arg(long, default_value_t = DEFAULT_DPI)]
        dpi: u32,

        /// Directory that receives the <name>_raw_png folder
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Clean every PNG in a directory into <dir>_processed
    Directory {
        /// Directory containing PNG images
        input_directory: PathBuf,

        #[command(flatten)]
        clean: CleanArgs,
    },
}

#[derive(Args, Debug)]
struct CleanArgs {
    /// Hex code of the background colour to remove
    #[arg(long, visible_alias = "background-color", default_value = DEFAULT_BACKGROUND)]
    background_colour: String,

    /// R, G and B must all exceed this for a pixel to count as white
    #[arg(long, default_value_t = DEFAULT_WHITE_THRESHOLD)]
    white_threshold: u8,

    /// Colour distance below which a pixel counts as exact background
    #[arg(long, default_value_t = DEFAULT_SEED_DISTANCE)]
    seed_distance: f32,

    /// Colour distance below which a pixel is made transparent
    #[arg(long, default_value_t = DEFAULT_CLEAR_DISTANCE)]
    clear_distance: f32,

    /// Worker threads (0 = one per CPU)
    #[arg(short, long, default_value_t = 0)]
    jobs: usize,

    /// Write a JSON summary of every page to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

impl CleanArgs {
    fn settings(&self, dpi: u32) -> Settings {
        Settings {
            dpi,
            background: self.background_colour.clone(),
            parallel_workers: self.jobs,
            white_threshold: self.white_threshold,
            seed_distance: self.seed_distance,
            clear_distance: self.clear_distance,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "print_friendly=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Document {
            pdf,
            dpi,
            out_dir,
            clean,
        } => run_document(&pdf, &out_dir, &clean.settings(dpi), clean.report.as_deref()),
        Commands::Rasterize { pdf, dpi, out_dir } => run_rasterize(&pdf, &out_dir, dpi),
        Commands::Directory {
            input_directory,
            clean,
        } => run_directory(
            &input_directory,
            &clean.settings(DEFAULT_DPI),
            clean.report.as_deref(),
        ),
    }
}

/// Validate settings up front; nothing is written when this fails.
fn prepare(settings: &Settings) -> Result<(CleanConfig, BatchOptions), ExitCode> {
    let config = settings.clean_config().map_err(|e| {
        eprintln!("ERROR: {e}");
        ExitCode::FAILURE
    })?;
    let options = BatchOptions {
        parallel_workers: settings.parallel_workers,
        cancel: None,
    };
    Ok((config, options))
}

fn run_document(
    pdf: &Path,
    out_dir: &Path,
    settings: &Settings,
    report_path: Option<&Path>,
) -> ExitCode {
    if !pdf.is_file() {
        eprintln!("ERROR: File '{}' does not exist.", pdf.display());
        return ExitCode::FAILURE;
    }
    let (config, options) = match prepare(settings) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };
    let dpi = match settings.validate_dpi() {
        Ok(dpi) => dpi,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    match clean_document(&PdfiumRasterizer::new(), pdf, out_dir, dpi, &config, &options) {
        Ok(result) => {
            eprintln!(
                "Rasterized {} pages into {}",
                result.raw_pages.len(),
                result.raw_dir.display()
            );
            finish(&result.report, &result.cleaned_dir, report_path)
        }
        Err(e) => {
            eprintln!("ERROR: {}: {e}", pdf.display());
            ExitCode::FAILURE
        }
    }
}

fn run_rasterize(pdf: &Path, out_dir: &Path, dpi: u32) -> ExitCode {
    if !pdf.is_file() {
        eprintln!("ERROR: File '{}' does not exist.", pdf.display());
        return ExitCode::FAILURE;
    }

    let raw_dir = layout::raw_dir(out_dir, pdf);
    match rasterize_to_pngs(&PdfiumRasterizer::new(), pdf, dpi, &raw_dir) {
        Ok(pages) => {
            for page in &pages {
                eprintln!("OK: {}", page.display());
            }
            eprintln!("Rasterized {} pages into {}", pages.len(), raw_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {}: {e}", pdf.display());
            ExitCode::FAILURE
        }
    }
}

fn run_directory(input_dir: &Path, settings: &Settings, report_path: Option<&Path>) -> ExitCode {
    if !input_dir.is_dir() {
        eprintln!(
            "ERROR: '{}' is not a valid directory.",
            input_dir.display()
        );
        return ExitCode::FAILURE;
    }
    let (config, options) = match prepare(settings) {
        Ok(prepared) => prepared,
        Err(code) => return code,
    };

    match clean_directory(input_dir, &config, &options) {
        Ok(result) => finish(&result.report, &result.output_dir, report_path),
        Err(e) => {
            eprintln!("ERROR: {}: {e}", input_dir.display());
            ExitCode::FAILURE
        }
    }
}

/// Print per-page lines and the summary; optionally write the JSON report.
fn finish(report: &BatchReport, output_dir: &Path, report_path: Option<&Path>) -> ExitCode {
    for page in &report.pages {
        match &page.status {
            PageStatus::Cleaned { .. } => eprintln!("OK: {}", page.output.display()),
            PageStatus::Failed { error } => {
                eprintln!("ERROR: {}: {error}", page.input.display())
            }
            PageStatus::Cancelled => eprintln!("CANCELLED: {}", page.input.display()),
        }
    }

    let mut has_error = !report.is_success();
    if let Some(path) = report_path
        && let Err(e) = report.write_json(path)
    {
        eprintln!("ERROR: {e}");
        has_error = true;
    }

    eprintln!(
        "{} cleaned, {} failed, {} cancelled. Output directory: {}",
        report.succeeded().count(),
        report.failed().count(),
        report.cancelled().count(),
        output_dir.display()
    );

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
