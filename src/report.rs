//! Text and JSON reports for the CLI

use crate::cli::OutputFormat;
use crate::stats::SessionStats;
use crate::sync::SyncReport;
use crate::transition::{Prediction, Transition, TransitionGraph};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonTransitions<'a> {
    source_files: usize,
    transitions: &'a [Transition],
}

#[derive(Serialize)]
struct JsonPredictions<'a> {
    current_files: &'a [String],
    predictions: &'a [Prediction],
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

/// Format a probability as a percentage with one decimal (0.4213 → "42.1%")
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}

pub fn write_stats<W: Write>(out: &mut W, stats: &SessionStats, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, stats),
        OutputFormat::Text => {
            writeln!(out, "Sessions: {}", stats.session_count)?;
            writeln!(out, "Total events: {}", stats.total_events)?;
            writeln!(out, "Total reads: {}", stats.total_reads)?;
            writeln!(out, "Total writes: {}", stats.total_writes)?;
            writeln!(out, "Unique files: {}", stats.unique_files)?;
            writeln!(out, "Base path: {}", stats.base_path)
        }
    }
}

pub fn write_transitions<W: Write>(
    out: &mut W,
    graph: &TransitionGraph,
    top: usize,
    format: OutputFormat,
) -> io::Result<()> {
    let transitions = graph.top_transitions(top);
    match format {
        OutputFormat::Json => write_json(
            out,
            &JsonTransitions {
                source_files: graph.source_count(),
                transitions: &transitions,
            },
        ),
        OutputFormat::Text => {
            writeln!(out, "Transition matrix ({} source files):", graph.source_count())?;
            writeln!(out)?;
            writeln!(out, "Top {} transitions:", top)?;
            for t in &transitions {
                writeln!(out, "  {} -> {}: {}", t.from, t.to, t.count)?;
            }
            Ok(())
        }
    }
}

pub fn write_sync<W: Write>(out: &mut W, report: &SyncReport, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, report),
        OutputFormat::Text => {
            writeln!(out, "Synced to Redis:")?;
            writeln!(out, "  Keys written: {}", report.keys_written)?;
            writeln!(out, "  Total transitions: {}", report.total_transitions)
        }
    }
}

pub fn write_predictions<W: Write>(
    out: &mut W,
    current_files: &[String],
    predictions: &[Prediction],
    format: OutputFormat,
) -> io::Result<()> {
    if let OutputFormat::Json = format {
        return write_json(
            out,
            &JsonPredictions {
                current_files,
                predictions,
            },
        );
    }

    let label = current_files.join(", ");
    if predictions.is_empty() {
        return writeln!(out, "No predictions for {}", label);
    }

    writeln!(out, "Predictions for {}:", label)?;
    for p in predictions {
        writeln!(out, "  {}: {}", p.path, format_percent(p.probability))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.4213), "42.1%");
        assert_eq!(format_percent(1.0), "100.0%");
    }

    #[test]
    fn test_stats_text() {
        let stats = SessionStats {
            session_count: 2,
            total_events: 10,
            total_reads: 6,
            total_writes: 1,
            unique_files: 4,
            base_path: "/logs".to_string(),
        };

        let text = render(|out| write_stats(out, &stats, OutputFormat::Text));

        assert!(text.starts_with("Sessions: 2\n"));
        assert!(text.contains("Unique files: 4\n"));
        assert!(text.ends_with("Base path: /logs\n"));
    }

    #[test]
    fn test_stats_json() {
        let text = render(|out| write_stats(out, &SessionStats::default(), OutputFormat::Json));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["session_count"], 0);
        assert_eq!(value["unique_files"], 0);
    }

    #[test]
    fn test_transitions_text() {
        let mut graph = TransitionGraph::new();
        graph.record_count("a", "b", 4);
        graph.record_count("b", "c", 1);

        let text = render(|out| write_transitions(out, &graph, 1, OutputFormat::Text));

        assert!(text.contains("Transition matrix (2 source files):"));
        assert!(text.contains("Top 1 transitions:"));
        assert!(text.contains("  a -> b: 4\n"));
        assert!(!text.contains("b -> c"));
    }

    #[test]
    fn test_sync_text() {
        let report = SyncReport {
            keys_written: 3,
            total_transitions: 8,
        };

        let text = render(|out| write_sync(out, &report, OutputFormat::Text));

        assert_eq!(text, "Synced to Redis:\n  Keys written: 3\n  Total transitions: 8\n");
    }

    #[test]
    fn test_predictions_text() {
        let current = vec!["src/a.rs".to_string()];
        let predictions = vec![Prediction::new("src/b.rs", 0.75), Prediction::new("src/c.rs", 0.25)];

        let text = render(|out| write_predictions(out, &current, &predictions, OutputFormat::Text));

        assert_eq!(text, "Predictions for src/a.rs:\n  src/b.rs: 75.0%\n  src/c.rs: 25.0%\n");
    }

    #[test]
    fn test_predictions_empty_text() {
        let current = vec!["x".to_string()];

        let text = render(|out| write_predictions(out, &current, &[], OutputFormat::Text));

        assert_eq!(text, "No predictions for x\n");
    }

    #[test]
    fn test_predictions_json() {
        let current = vec!["x".to_string()];
        let predictions = vec![Prediction::new("y", 1.0)];

        let text = render(|out| write_predictions(out, &current, &predictions, OutputFormat::Json));

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["predictions"][0]["path"], "y");
        assert_eq!(value["current_files"][0], "x");
    }
}
