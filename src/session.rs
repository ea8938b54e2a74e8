//! Run orchestration: composite, fill and hand every view to a [`ViewSink`].
//!
//! The split run and the combined run are independent. A failure in one (allocation, encoding)
//! is logged and recorded in the [`RunReport`]; the other run still executes.

use std::fmt;

use crate::{
    foundation::{
        core::{OutputMode, ViewKind},
        error::{StereoError, StereoResult},
    },
    io::sink::ViewSink,
    raster::buffer::{SourceImage, ViewBuffer},
    stereo::{compositor::StereoViews, renderer::StereoRenderer},
};

/// One top-level run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunKind {
    /// Two separate views, `left` and `right`.
    Split,
    /// One side-by-side view, `pair`.
    Combined,
}

impl fmt::Display for RunKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split => f.write_str("split"),
            Self::Combined => f.write_str("combined"),
        }
    }
}

/// A run that was aborted.
#[derive(Debug)]
pub struct RunFailure {
    /// Which run failed.
    pub run: RunKind,
    /// Why it failed.
    pub error: StereoError,
}

/// Outcome of [`run_stereo`].
#[derive(Debug, Default)]
pub struct RunReport {
    /// Views delivered to the sink, in completion order.
    pub written: Vec<ViewKind>,
    /// Runs that were aborted.
    pub failures: Vec<RunFailure>,
}

impl RunReport {
    /// Return `true` when every requested run completed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Perform the runs selected by `mode` on `src`, writing finished views into `sink`.
#[tracing::instrument(
    skip(renderer, src, sink),
    fields(width = src.width(), height = src.height(), workers = renderer.workers())
)]
pub fn run_stereo(
    renderer: &StereoRenderer,
    src: &SourceImage,
    mode: OutputMode,
    sink: &dyn ViewSink,
) -> RunReport {
    let mut report = RunReport::default();

    if mode.runs_split() {
        match run_split(renderer, src, sink) {
            Ok(()) => report.written.extend([ViewKind::Left, ViewKind::Right]),
            Err(error) => record_failure(&mut report, RunKind::Split, error),
        }
    }

    if mode.runs_combined() {
        match run_combined(renderer, src, sink) {
            Ok(()) => report.written.push(ViewKind::Pair),
            Err(error) => record_failure(&mut report, RunKind::Combined, error),
        }
    }

    report
}

fn record_failure(report: &mut RunReport, run: RunKind, error: StereoError) {
    if error.is_allocation() {
        tracing::error!(%run, %error, "run aborted: out of memory");
    } else {
        tracing::warn!(%run, %error, "run aborted");
    }
    report.failures.push(RunFailure { run, error });
}

/// Composite both views, then fill and write each one concurrently.
fn run_split(
    renderer: &StereoRenderer,
    src: &SourceImage,
    sink: &dyn ViewSink,
) -> StereoResult<()> {
    let StereoViews {
        mut left,
        mut right,
    } = renderer.composite_split(src)?;

    let (left_res, right_res) = renderer.join(
        || finish_view(renderer, ViewKind::Left, &mut left, sink),
        || finish_view(renderer, ViewKind::Right, &mut right, sink),
    );
    left_res?;
    right_res
}

fn run_combined(
    renderer: &StereoRenderer,
    src: &SourceImage,
    sink: &dyn ViewSink,
) -> StereoResult<()> {
    let mut pair = renderer.composite_combined(src)?;
    finish_view(renderer, ViewKind::Pair, &mut pair, sink)
}

fn finish_view(
    renderer: &StereoRenderer,
    kind: ViewKind,
    view: &mut ViewBuffer,
    sink: &dyn ViewSink,
) -> StereoResult<()> {
    let filled = renderer.fill_holes(view);
    tracing::debug!(view = kind.file_stem(), filled, "holes filled");
    sink.write_view(kind, view)
}

#[cfg(test)]
#[path = "../tests/unit/session/session.rs"]
mod tests;
