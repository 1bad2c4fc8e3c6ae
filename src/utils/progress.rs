//! Per-item progress display for batch transforms.

use indicatif::{ProgressBar, ProgressStyle};

/// Creates a progress bar over `len` items, labelled with the step name.
///
/// When `enabled` is false a hidden bar is returned, so callers can drive
/// it unconditionally. Purely cosmetic; has no effect on results.
pub fn progress_bar(len: u64, label: &str, enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb.set_message(label.to_string());
    pb
}
