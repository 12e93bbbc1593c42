use std::path::{Path, PathBuf};

use clap::Parser;
use mazecarve::app::{App, AppConfig, AppError};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Generate a random perfect maze and walk it in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Grid rows including walls. Odd values put rooms on the last row. [default: 21]
    #[arg(short, long)]
    rows: Option<u16>,
    /// Grid columns including walls. Odd values put rooms on the last column. [default: 21]
    #[arg(short, long)]
    cols: Option<u16>,
    /// Seed for reproducible mazes
    #[arg(short, long)]
    seed: Option<u64>,
    /// Print a single maze to stdout instead of playing
    #[arg(short, long)]
    print: bool,
    /// Write logs to this file. Logging is off without it.
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Maximum level of logs written to the log file
    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        let default = AppConfig::default();
        AppConfig {
            rows: args.rows.unwrap_or(default.rows),
            cols: args.cols.unwrap_or(default.cols),
            seed: args.seed,
        }
    }
}

/// Send logs to a file, since stdout belongs to the maze while playing.
fn init_logging(log_file: &Path, level: tracing::Level) -> std::io::Result<()> {
    let file_name = log_file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid log file path: {}", log_file.display()),
            )
        })?;
    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(std::io::Error::other)?;

    tracing_subscriber::fmt()
        .with_writer(appender)
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    if let Some(log_file) = &args.log_file {
        init_logging(log_file, args.log_level)?;
    }

    let app = App::new(AppConfig::from(&args));
    let mut stdout = std::io::stdout();

    if args.print {
        return app.run_print(&mut stdout);
    }

    App::setup_terminal(&mut stdout)?;
    let result = app.run_game(&mut stdout);
    // Restore the terminal even when the game failed
    App::restore_terminal(&mut stdout)?;
    result
}
