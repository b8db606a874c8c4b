use std::time::Duration;

use clap::Parser;
use hlsgrab_engine::hls::config::{HlsPipelineConfig, HlsPlaylistConfig};
use hlsgrab_engine::{
    DownloaderConfig, HlsConfig, Recorder, RecorderConfig, RecordingOutcome, StreamConfig,
    StreamOutcome, TimelineMode,
};
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod error;
mod utils;

use cli::CliArgs;
use error::AppError;
use utils::{format_duration, parse_headers, parse_time};

fn main() {
    if let Err(e) = bootstrap() {
        eprintln!("Error: {e}");
        error!(error = ?e, "Application failed");
        std::process::exit(1);
    }
}

#[tokio::main]
async fn bootstrap() -> Result<(), AppError> {
    let args = CliArgs::parse();

    // Held until exit so buffered file logs are flushed.
    let _log_guard = init_logging(&args)?;

    info!(
        "hlsgrab {} - HTTP Live Streaming (HLS) recorder",
        env!("CARGO_PKG_VERSION")
    );

    let max_duration = parse_time(&args.max_duration)?;
    let max_duration = (!max_duration.is_zero()).then_some(max_duration);
    match max_duration {
        Some(limit) => info!("Recording limit: {}", format_duration(limit)),
        None => info!("Recording limit: unlimited"),
    }

    info!(
        "HTTP timeout configuration: overall={}s, connect={}s",
        args.timeout, args.connect_timeout
    );

    let downloader = DownloaderConfig::builder()
        .with_user_agent(args.user_agent.clone())
        .with_headers(parse_headers(&args.headers))
        .with_timeout(Duration::from_secs(args.timeout))
        .with_connect_timeout(Duration::from_secs(args.connect_timeout))
        .build();

    if args.channel_size == 0 {
        return Err(AppError::InvalidInput(
            "--channel-size must be at least 1".to_string(),
        ));
    }

    let hls = HlsConfig {
        playlist_config: HlsPlaylistConfig {
            timeline_mode: if args.local_time {
                TimelineMode::LocalTime
            } else {
                TimelineMode::DeclaredDuration
            },
            max_duration,
            ..HlsPlaylistConfig::default()
        },
        pipeline_config: HlsPipelineConfig {
            channel_capacity: args.channel_size,
        },
    };

    let config = RecorderConfig {
        mode: args.mode,
        downloader,
        hls,
        stream: StreamConfig::default(),
    };

    let recorder = Recorder::new(config)?;
    let outcome = recorder.record(&args.url, &args.output).await?;
    report(&outcome);
    Ok(())
}

fn init_logging(args: &CliArgs) -> Result<Option<WorkerGuard>, AppError> {
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match &args.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Initialization(e.to_string()))?;

    Ok(guard)
}

fn report(outcome: &RecordingOutcome) {
    match outcome {
        RecordingOutcome::InProgress => {
            info!("Output is being written by another recorder. Nothing to do.");
        }
        RecordingOutcome::Stream(StreamOutcome::NotAStream) => {
            info!("URL is not a raw audio stream. Nothing recorded.");
        }
        RecordingOutcome::Stream(outcome) => {
            info!(outcome = ?outcome, "Stream recording finished");
        }
        RecordingOutcome::Playlist(summary) => {
            info!(
                outcome = ?summary.outcome,
                segments = summary.stats.segments_written,
                dropped = summary.stats.segments_dropped,
                bytes = summary.stats.bytes_written,
                "Playlist recording finished"
            );
        }
    }
}
