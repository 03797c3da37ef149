//! Synthetic fleet demo
//!
//! Run with: cargo run --example synthetic_fleet [SECONDS]
//!
//! Monitors three fabricated streams for a short run (default 20s):
//!
//! - `lobby`  steady 25 fps
//! - `garage` steady 3 fps, always rendered as degraded
//! - `yard`   10 fps that freezes 4s after every start, so it is
//!            reconnected after five empty windows and recovers
//!
//! An `rtsp://` entry is included to show a stream being skipped when no
//! pipeline can be built for it.

use std::time::Duration;

use streamwatch::{DefaultSourceFactory, MonitorConfig, Orchestrator, StreamSpec};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streamwatch=info".into()),
        )
        .init();

    let seconds = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(20);

    let streams = vec![
        StreamSpec::new("lobby", "synthetic://h264/25"),
        StreamSpec::new("garage", "synthetic://jpeg/3"),
        StreamSpec::new("yard", "synthetic://h265/10?stall_after=4"),
        StreamSpec::new("gate", "rtsp://192.168.1.40:554/stream1"),
    ];

    let config = MonitorConfig::default()
        .interval(Duration::from_secs(1))
        .run_duration(Some(Duration::from_secs(seconds)));

    let summary = Orchestrator::new(config, DefaultSourceFactory)
        .run_until(&streams, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    println!();
    for (id, stats) in &summary.monitored {
        println!(
            "{:<8} windows={:<4} frames={:<6} mean={:<6.1} reconnects={:<3} availability={:.0}%",
            id,
            stats.windows,
            stats.frames,
            stats.mean_frames_per_window(),
            stats.reconnects,
            stats.availability() * 100.0
        );
    }
    for skipped in &summary.skipped {
        println!("{:<8} skipped: {}", skipped.id, skipped.reason);
    }

    Ok(())
}
