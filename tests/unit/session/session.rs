use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::{
    foundation::core::ParallaxParams, io::sink::InMemorySink, stereo::renderer::RenderThreading,
};

fn renderer() -> StereoRenderer {
    let threading = RenderThreading { threads: Some(2) };
    StereoRenderer::new(ParallaxParams::new(4.0, 10, 5).unwrap(), &threading).unwrap()
}

fn source() -> SourceImage {
    let mut src = SourceImage::solid(24, 6, [30, 30, 30]).unwrap();
    for y in 0..6 {
        for x in 8..14 {
            src.set_pixel(x, y, [240, 240, 240]);
        }
    }
    src
}

struct FailingSink {
    fail_on: ViewKind,
    calls: AtomicUsize,
}

impl ViewSink for FailingSink {
    fn write_view(&self, kind: ViewKind, _view: &ViewBuffer) -> StereoResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if kind == self.fail_on {
            return Err(StereoError::encode("disk full"));
        }
        Ok(())
    }
}

#[test]
fn both_mode_writes_three_views() {
    let sink = InMemorySink::new();
    let report = run_stereo(&renderer(), &source(), OutputMode::Both, &sink);
    assert!(report.is_success());
    assert_eq!(
        report.written,
        vec![ViewKind::Left, ViewKind::Right, ViewKind::Pair]
    );
    for kind in [ViewKind::Left, ViewKind::Right, ViewKind::Pair] {
        let view = sink.view(kind).unwrap();
        assert_eq!(view.hole_count(), 0);
        assert_eq!((view.width(), view.height()), (24, 6));
    }
}

#[test]
fn pair_mode_skips_split_run() {
    let sink = InMemorySink::new();
    let report = run_stereo(&renderer(), &source(), OutputMode::Pair, &sink);
    assert_eq!(report.written, vec![ViewKind::Pair]);
    assert_eq!(sink.kinds(), vec![ViewKind::Pair]);
}

#[test]
fn split_mode_skips_combined_run() {
    let sink = InMemorySink::new();
    let report = run_stereo(&renderer(), &source(), OutputMode::Split, &sink);
    assert_eq!(report.written, vec![ViewKind::Left, ViewKind::Right]);
    assert!(sink.view(ViewKind::Pair).is_none());
}

#[test]
fn split_failure_does_not_stop_combined_run() {
    let sink = FailingSink {
        fail_on: ViewKind::Right,
        calls: AtomicUsize::new(0),
    };
    let report = run_stereo(&renderer(), &source(), OutputMode::Both, &sink);
    assert!(!report.is_success());
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].run, RunKind::Split);
    assert_eq!(report.written, vec![ViewKind::Pair]);
    assert_eq!(sink.calls.load(Ordering::SeqCst), 3);
}

#[test]
fn run_kind_display() {
    assert_eq!(RunKind::Split.to_string(), "split");
    assert_eq!(RunKind::Combined.to_string(), "combined");
}
