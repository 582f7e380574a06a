//! Progress reporting for conversions.
//!
//! The converter reports an overall percentage plus a status line at each
//! stage boundary, and forwards user-facing notices (such as the OCR
//! fallback being unavailable). Attach a reporter with
//! [`Converter::with_progress`](super::Converter::with_progress).

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Extraction covers this share of the overall progress.
pub const EXTRACT_RANGE: (u8, u8) = (0, 40);

/// Segmentation and classification.
pub const LAYOUT_RANGE: (u8, u8) = (40, 60);

/// Assembly and serialization.
pub const ASSEMBLE_RANGE: (u8, u8) = (60, 95);

/// Receives progress events from a conversion.
///
/// All methods default to no-ops.
pub trait ProgressReporter: Send + Sync {
    /// Overall progress (0-100) with a short status line.
    fn on_progress(&self, percent: u8, status: &str) {
        let _ = (percent, status);
    }

    /// A message meant for the user rather than a progress bar.
    fn on_notice(&self, message: &str) {
        let _ = message;
    }
}

/// Reporter that ignores every event.
pub struct NoopProgress;

impl ProgressReporter for NoopProgress {}

/// Shared reporter handle stored by the converter.
pub type SharedProgress = Arc<dyn ProgressReporter>;

/// Wraps a reporter so the reported percentage never decreases and never
/// exceeds 100.
pub struct MonotonicProgress<'a> {
    inner: &'a dyn ProgressReporter,
    last: AtomicU8,
}

impl<'a> MonotonicProgress<'a> {
    /// Wrap a reporter.
    pub fn new(inner: &'a dyn ProgressReporter) -> Self {
        Self {
            inner,
            last: AtomicU8::new(0),
        }
    }

    /// Report a position within a stage range: `done` of `total` units.
    pub fn report_within(&self, range: (u8, u8), done: u32, total: u32, status: &str) {
        self.on_progress(scale(range, done, total), status);
    }

    /// Highest percentage reported so far.
    pub fn current(&self) -> u8 {
        self.last.load(Ordering::SeqCst)
    }
}

impl ProgressReporter for MonotonicProgress<'_> {
    fn on_progress(&self, percent: u8, status: &str) {
        let percent = percent.min(100);
        let previous = self.last.fetch_max(percent, Ordering::SeqCst);
        self.inner.on_progress(previous.max(percent), status);
    }

    fn on_notice(&self, message: &str) {
        self.inner.on_notice(message);
    }
}

/// Map `done / total` linearly onto `range`.
fn scale((start, end): (u8, u8), done: u32, total: u32) -> u8 {
    if total == 0 {
        return end;
    }
    let span = end.saturating_sub(start) as u64;
    let done = done.min(total) as u64;
    start + (span * done / total as u64) as u8
}
