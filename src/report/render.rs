//! Status line rendering

use colored::Colorize;

use crate::registry::{StatusSnapshot, StreamId};

use super::config::ReporterConfig;

/// Timestamp format at the start of every line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render one status line
///
/// `[<timestamp>] id1: n1 FPS, id2: n2 FPS, ...` in ascending identifier
/// order. Entries below `degraded_below` are drawn bold red when coloring
/// is enabled.
pub fn render_line(snapshot: &StatusSnapshot, timestamp: &str, config: &ReporterConfig) -> String {
    let entries: Vec<String> = snapshot
        .iter()
        .map(|(id, fps)| render_entry(id, fps, config))
        .collect();

    if entries.is_empty() {
        format!("[{}]", timestamp)
    } else {
        format!("[{}] {}", timestamp, entries.join(", "))
    }
}

fn render_entry(id: &StreamId, fps: u64, config: &ReporterConfig) -> String {
    let text = format!("{}: {} FPS", id, fps);
    if config.colored && fps < config.degraded_below {
        text.as_str().red().bold().to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StatusRegistry;

    fn plain() -> ReporterConfig {
        ReporterConfig::default().colored(false)
    }

    #[test]
    fn test_render_orders_by_id() {
        let registry = StatusRegistry::new();
        // Written out of order on purpose
        registry.set(&StreamId::from("camC"), 7);
        registry.set(&StreamId::from("camA"), 25);
        registry.set(&StreamId::from("camB"), 0);

        let line = render_line(&registry.snapshot(), "2024-05-01 12:00:00", &plain());
        assert_eq!(
            line,
            "[2024-05-01 12:00:00] camA: 25 FPS, camB: 0 FPS, camC: 7 FPS"
        );
    }

    #[test]
    fn test_render_empty_snapshot() {
        let line = render_line(&StatusSnapshot::default(), "ts", &plain());
        assert_eq!(line, "[ts]");
    }

    #[test]
    fn test_single_entry_has_no_separator() {
        let registry = StatusRegistry::new();
        registry.set(&StreamId::from("cam0"), 30);

        let line = render_line(&registry.snapshot(), "ts", &plain());
        assert_eq!(line, "[ts] cam0: 30 FPS");
    }

    #[test]
    fn test_highlight_only_below_floor() {
        colored::control::set_override(true);

        let config = ReporterConfig::default().degraded_below(5);
        let healthy = render_entry(&StreamId::from("cam0"), 5, &config);
        let degraded = render_entry(&StreamId::from("cam1"), 4, &config);

        assert_eq!(healthy, "cam0: 5 FPS");
        assert!(degraded.contains("cam1: 4 FPS"));
        assert_ne!(degraded, "cam1: 4 FPS");

        colored::control::unset_override();
    }
}
