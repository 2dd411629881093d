//! `makehistory` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments into a painting configuration and image selection.
//! - Print the image preview and run summary.
//! - Map every pipeline error to a non-zero exit status.

use chrono::{Datelike, Local, NaiveDate, Weekday};
use clap::Parser;
use log::warn;
use makehistory_core::{
    default_log_level, init_console_logging, init_logging, named_image, render_text,
    CalendarAnchor, ConfigError, IntensityMatrix, PaintConfig, PaintError, PaintService,
    RepositoryRegistry, DEFAULT_COMMITS_PER_UNIT, DEFAULT_MARKER_PREFIX, GRID_COLUMNS,
};
use serde_json::json;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_IMAGE: &str = "hi";
const CONSOLE_LOG_LEVEL: &str = "warn";

/// Paint an image onto a git contribution calendar with backdated commits.
#[derive(Debug, Parser)]
#[command(name = "makehistory", version)]
struct Args {
    /// Repository to paint.
    #[arg(long, default_value = ".")]
    path: PathBuf,

    /// Marker that identifies painting commits.
    #[arg(long, default_value = DEFAULT_MARKER_PREFIX)]
    prefix: String,

    /// Commits per unit of cell intensity.
    #[arg(long = "commits-per-day", default_value_t = DEFAULT_COMMITS_PER_UNIT)]
    commits_per_day: u32,

    /// Built-in image to paint.
    #[arg(long, conflicts_with = "text")]
    image: Option<String>,

    /// Text banner to paint instead of a built-in image.
    #[arg(long)]
    text: Option<String>,

    /// Center the text banner across the calendar.
    #[arg(long, requires = "text")]
    center: bool,

    /// Date of the top-left calendar cell (YYYY-MM-DD).
    #[arg(long)]
    anchor: Option<NaiveDate>,

    /// Scan and report pending commits without creating any.
    #[arg(long)]
    dry_run: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logs go to stderr otherwise.
    #[arg(long)]
    log_dir: Option<String>,
}

#[derive(Debug)]
enum CliError {
    Logging(String),
    Paint(PaintError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "cannot initialize logging: {message}"),
            Self::Paint(err) => write!(f, "{err}"),
        }
    }
}

impl From<PaintError> for CliError {
    fn from(value: PaintError) -> Self {
        Self::Paint(value)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("makehistory: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    setup_logging(args)?;

    let matrix = select_image(args)?;
    let config = build_config(args)?;
    let anchor = config.anchor();

    if !args.json {
        println!("Writing:");
        print!("{}", render_preview(&matrix));
    }

    let mut registry = RepositoryRegistry::new();
    let repo = registry
        .open(&args.path)
        .map_err(PaintError::RepositoryAccess)?;
    let service = PaintService::new(repo, config);

    if args.dry_run {
        let pending = service.pending(&matrix)?;
        if args.json {
            println!(
                "{}",
                json!({
                    "dry_run": true,
                    "anchor": anchor.date().to_string(),
                    "planned": pending.planned,
                    "already_present": pending.already_present,
                    "pending": pending.requests.len(),
                    "skipped_commits": pending.scan.skipped,
                })
            );
        } else {
            println!(
                "anchor {}: {} planned, {} already present, {} pending (dry run)",
                anchor.date(),
                pending.planned,
                pending.already_present,
                pending.requests.len()
            );
        }
        return Ok(());
    }

    let outcome = service.paint(&matrix)?;
    if args.json {
        println!(
            "{}",
            json!({
                "dry_run": false,
                "anchor": anchor.date().to_string(),
                "planned": outcome.planned,
                "already_present": outcome.already_present,
                "applied": outcome.applied,
                "skipped_commits": outcome.scan.skipped,
            })
        );
    } else {
        println!(
            "anchor {}: {} planned, {} already present, {} created",
            anchor.date(),
            outcome.planned,
            outcome.already_present,
            outcome.applied
        );
    }
    Ok(())
}

fn setup_logging(args: &Args) -> Result<(), CliError> {
    let result = match &args.log_dir {
        Some(dir) => init_logging(
            args.log_level.as_deref().unwrap_or(default_log_level()),
            dir,
        ),
        None => init_console_logging(args.log_level.as_deref().unwrap_or(CONSOLE_LOG_LEVEL)),
    };
    result.map_err(CliError::Logging)
}

/// Validates every run input before the repository is opened.
fn build_config(args: &Args) -> Result<PaintConfig, PaintError> {
    let anchor = match args.anchor {
        Some(date) => CalendarAnchor::new(date).map_err(ConfigError::from)?,
        None => CalendarAnchor::for_today(Local::now().date_naive()),
    };
    if anchor.date().weekday() != Weekday::Sun {
        warn!(
            "event=anchor_check module=cli status=warn anchor={} reason=not_sunday",
            anchor.date()
        );
    }
    Ok(PaintConfig::new(
        args.prefix.as_str(),
        args.commits_per_day,
        anchor,
    )?)
}

fn select_image(args: &Args) -> Result<IntensityMatrix, PaintError> {
    let matrix = match &args.text {
        Some(text) if args.center => render_text(text)?.center_in(GRID_COLUMNS)?,
        Some(text) => render_text(text)?,
        None => named_image(args.image.as_deref().unwrap_or(DEFAULT_IMAGE))?,
    };
    Ok(matrix)
}

/// One line per calendar row; digits for painted cells, blanks otherwise.
fn render_preview(matrix: &IntensityMatrix) -> String {
    let mut out = String::with_capacity((matrix.columns() + 1) * matrix.rows());
    for row in matrix.row_values() {
        for &value in row {
            out.push(if value == 0 {
                ' '
            } else {
                char::from(b'0' + value)
            });
        }
        out.push('\n');
    }
    out
}
