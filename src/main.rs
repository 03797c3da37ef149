//! streamwatch command-line entry point
//!
//! Run with: streamwatch <INTERVAL> [--streams streams.txt]
//!
//! The status table goes to stdout, diagnostics to stderr.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use streamwatch::orchestrator::load_stream_list;
use streamwatch::report::DEFAULT_DEGRADED_BELOW;
use streamwatch::supervisor::DEFAULT_RECONNECT_THRESHOLD;
use streamwatch::{DefaultSourceFactory, MonitorConfig, Orchestrator};

#[derive(Parser, Debug)]
#[command(
    name = "streamwatch",
    about = "Monitor frame rates of many media streams and reconnect stalled ones",
    version
)]
struct Args {
    /// Sampling and report interval in seconds
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Stream list, one `<location>` or `<id> <location>` per line ("-" for stdin)
    #[arg(short = 'f', long, default_value = "streams.txt")]
    streams: PathBuf,

    /// Stop after this many seconds (0 = run until Ctrl-C)
    #[arg(short, long, default_value_t = 300)]
    duration: u64,

    /// Consecutive zero-FPS windows before a stream is reconnected
    #[arg(long, default_value_t = DEFAULT_RECONNECT_THRESHOLD, value_parser = clap::value_parser!(u32).range(1..))]
    reconnect_after: u32,

    /// Highlight streams below this FPS
    #[arg(long, default_value_t = DEFAULT_DEGRADED_BELOW)]
    degraded_below: u64,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    let streams = load_stream_list(&args.streams)
        .with_context(|| format!("cannot load stream list from {}", args.streams.display()))?;

    let config = MonitorConfig::default()
        .interval(Duration::from_secs(args.interval))
        .reconnect_threshold(args.reconnect_after)
        .degraded_below(args.degraded_below)
        .colored(!args.no_color)
        .run_duration((args.duration > 0).then(|| Duration::from_secs(args.duration)));

    let summary = Orchestrator::new(config, DefaultSourceFactory)
        .run_until(&streams, shutdown_signal())
        .await?;

    tracing::info!(
        monitored = summary.monitored.len(),
        skipped = summary.skipped.len(),
        reconnects = summary.reconnects(),
        "Run finished"
    );

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Cannot listen for Ctrl-C, relying on run duration");
        std::future::pending::<()>().await;
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(log_filter(verbose, quiet))
        .init();
}

/// `-q`/`-v` win over `RUST_LOG`, which falls back to `info`
fn log_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_interval_is_required() {
        assert!(Args::try_parse_from(["streamwatch"]).is_err());
    }

    #[test]
    fn test_interval_must_be_positive_integer() {
        assert!(Args::try_parse_from(["streamwatch", "0"]).is_err());
        assert!(Args::try_parse_from(["streamwatch", "fast"]).is_err());
        assert!(Args::try_parse_from(["streamwatch", "-3"]).is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["streamwatch", "2"]).unwrap();

        assert_eq!(args.interval, 2);
        assert_eq!(args.streams, PathBuf::from("streams.txt"));
        assert_eq!(args.duration, 300);
        assert_eq!(args.reconnect_after, 5);
        assert_eq!(args.degraded_below, 5);
        assert!(!args.no_color);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "streamwatch",
            "5",
            "-f",
            "-",
            "--duration",
            "0",
            "--reconnect-after",
            "3",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(args.streams, PathBuf::from("-"));
        assert_eq!(args.duration, 0);
        assert_eq!(args.reconnect_after, 3);
        assert!(args.no_color);
    }

    #[test]
    fn test_log_filter_honours_rust_log() {
        std::env::set_var("RUST_LOG", "debug");
        assert_eq!(log_filter(false, false).to_string(), "debug");
        assert_eq!(log_filter(false, true).to_string(), "error");

        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter(false, false).to_string(), "info");
        assert_eq!(log_filter(true, false).to_string(), "debug");
    }
}
