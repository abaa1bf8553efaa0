//! CLI entry point for the music data plots tool.
//!
//! Provides one subcommand per pipeline: `genres` aggregates streaming audio
//! features by genre and year, `reviews` joins critic review scores against
//! per-artist feature averages. Both load and aggregate silently unless
//! `--plot` is passed, in which case the pipeline's charts are rendered to
//! the working directory as PNG files.

use anyhow::Result;
use clap::{Parser, Subcommand};
use music_data_plots::pipelines::{genres::GenreData, reviews::ReviewData};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "music_data_plots")]
#[command(about = "Aggregates streaming audio features and critic review scores", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate audio features by genre and by year
    Genres {
        /// Render and save the genre charts
        #[arg(short, long, default_value_t = false)]
        plot: bool,
    },
    /// Join critic review scores against per-artist audio features
    Reviews {
        /// Render and save the review charts
        #[arg(short, long, default_value_t = false)]
        plot: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/music_data_plots.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("music_data_plots.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let data_dir = Path::new("data");
    let out_dir = Path::new(".");

    match cli.command {
        Commands::Genres { plot } => {
            let data = GenreData::load(data_dir)?;
            info!(
                genres = data.by_genre.len(),
                years = data.by_year.len(),
                "genre aggregates ready"
            );
            if plot {
                data.render_charts(out_dir)?;
            }
        }
        Commands::Reviews { plot } => {
            let data = ReviewData::load(data_dir)?;
            info!(
                artists = data.artist_count(),
                reviews = data.review_count(),
                "review tables ready"
            );
            if plot {
                data.render_charts(out_dir)?;
            }
        }
    }

    info!("complete");
    Ok(())
}
