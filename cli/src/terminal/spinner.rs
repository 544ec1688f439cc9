use std::sync::Arc;

use colored::*;
use indicatif::ProgressStyle;
use ipsieve_core::batch::{BatchProgress, ProgressCallback};
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICKS: &[&str] = &["▁▁▁▁▁", "▁▂▂▂▁", "▁▄▂▄▁", "▂▄▆▄▂", "▄▆█▆▄", "▂▄▆▄▂", "▁▄▂▄▁", "▁▂▂▂▁"];

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} [{bar:24.green/black}] {pos}/{len} batches {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .tick_strings(TICKS)
        .progress_chars("█▓░")
}

/// Turns `span` into a spinner with `message`.
pub fn spin(span: &Span, message: &str) {
    span.pb_set_style(&spinner_style());
    span.pb_set_message(message);
    span.pb_start();
}

/// A batch progress callback that drives the bar attached to `span`.
pub fn batch_progress(span: Span) -> ProgressCallback {
    Arc::new(move |progress: BatchProgress| {
        if progress.batches_done == 1 {
            span.pb_set_style(&bar_style());
            span.pb_set_length(progress.batches_total as u64);
        }
        span.pb_set_position(progress.batches_done as u64);
        span.pb_set_message(&format!(
            "{} reachable of {}",
            progress.successes.to_string().green().bold(),
            progress.probed.to_string().color(colors::TEXT_DEFAULT)
        ));
    })
}
