use std::{
    path::{Path, PathBuf},
    sync::{
        Mutex,
        atomic::{AtomicU64, Ordering},
    },
    time::{SystemTime, UNIX_EPOCH},
};

use image::{
    ExtendedColorType, ImageEncoder,
    codecs::{jpeg::JpegEncoder, png::PngEncoder},
};

use crate::{
    foundation::{
        core::ViewKind,
        error::{StereoError, StereoResult},
    },
    raster::buffer::ViewBuffer,
};

/// Encoded file format for written views.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Baseline JPEG. The coverage channel is dropped.
    #[default]
    Jpeg,
    /// PNG with the RGBA8 view written as-is.
    Png,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }
}

/// Encode `view` in memory. `quality` (1..=100) applies to JPEG only.
pub fn encode_view(view: &ViewBuffer, format: OutputFormat, quality: u8) -> StereoResult<Vec<u8>> {
    let mut buf = Vec::new();
    let (w, h) = (view.width(), view.height());
    let res = match format {
        OutputFormat::Jpeg => JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100))
            .write_image(&view.to_rgb8(), w, h, ExtendedColorType::Rgb8),
        OutputFormat::Png => {
            PngEncoder::new(&mut buf).write_image(view.data(), w, h, ExtendedColorType::Rgba8)
        }
    };
    res.map_err(|e| StereoError::encode(format!("failed to encode {w}x{h} view: {e}")))?;
    Ok(buf)
}

/// Destination for finished (hole-filled) views.
///
/// Views of a split run are delivered concurrently, so implementations must be `Sync`.
pub trait ViewSink: Sync {
    /// Consume one finished view.
    fn write_view(&self, kind: ViewKind, view: &ViewBuffer) -> StereoResult<()>;
}

/// Sink writing `left.<ext>`, `right.<ext>` and `pair.<ext>` into one directory.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
    format: OutputFormat,
    quality: u8,
}

impl DirSink {
    /// Create the sink, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat, quality: u8) -> StereoResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StereoError::encode(format!(
                "failed to create output directory '{}': {e}",
                dir.display()
            ))
        })?;
        Ok(Self {
            dir,
            format,
            quality,
        })
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a view of `kind` is written to.
    pub fn path_for(&self, kind: ViewKind) -> PathBuf {
        self.dir
            .join(format!("{}.{}", kind.file_stem(), self.format.extension()))
    }

    /// Atomically point `latest.<ext>` at the preferred view among `written`.
    ///
    /// `pair` is preferred; otherwise the most recently modified of `left`/`right`. Returns the
    /// path of the published file, or `None` when nothing was written.
    pub fn publish_latest(&self, written: &[ViewKind]) -> StereoResult<Option<PathBuf>> {
        let chosen = if written.contains(&ViewKind::Pair) {
            Some(self.path_for(ViewKind::Pair))
        } else {
            written
                .iter()
                .map(|&k| self.path_for(k))
                .filter_map(|p| {
                    let modified = std::fs::metadata(&p).and_then(|m| m.modified()).ok()?;
                    Some((modified, p))
                })
                .max_by_key(|(modified, _)| *modified)
                .map(|(_, p)| p)
        };
        let Some(src) = chosen else {
            return Ok(None);
        };

        let ext = self.format.extension();
        let tmp = self.dir.join(latest_tmp_name(ext));
        let dst = self.dir.join(format!("latest.{ext}"));
        std::fs::copy(&src, &tmp)
            .and_then(|_| std::fs::rename(&tmp, &dst))
            .map_err(|e| {
                let _ = std::fs::remove_file(&tmp);
                StereoError::encode(format!("failed to publish '{}': {e}", dst.display()))
            })?;
        tracing::info!(from = %src.display(), to = %dst.display(), "published latest view");
        Ok(Some(dst))
    }
}

/// Temp file name for one publish, unique per process, time and call.
pub(crate) fn latest_tmp_name(ext: &str) -> String {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    format!("latest_tmp_{}_{nanos}_{seq}.{ext}", std::process::id())
}

impl ViewSink for DirSink {
    fn write_view(&self, kind: ViewKind, view: &ViewBuffer) -> StereoResult<()> {
        let path = self.path_for(kind);
        let bytes = encode_view(view, self.format, self.quality)?;
        std::fs::write(&path, bytes).map_err(|e| {
            StereoError::encode(format!("failed to write '{}': {e}", path.display()))
        })?;
        tracing::info!(path = %path.display(), "wrote view");
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    views: Mutex<Vec<(ViewKind, ViewBuffer)>>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the captured view of `kind`, if any.
    pub fn view(&self, kind: ViewKind) -> Option<ViewBuffer> {
        let views = self.views.lock().unwrap_or_else(|e| e.into_inner());
        views.iter().find(|(k, _)| *k == kind).map(|(_, v)| v.clone())
    }

    /// Kinds captured so far, in arrival order.
    pub fn kinds(&self) -> Vec<ViewKind> {
        let views = self.views.lock().unwrap_or_else(|e| e.into_inner());
        views.iter().map(|(k, _)| *k).collect()
    }
}

impl ViewSink for InMemorySink {
    fn write_view(&self, kind: ViewKind, view: &ViewBuffer) -> StereoResult<()> {
        let mut views = self.views.lock().unwrap_or_else(|e| e.into_inner());
        views.push((kind, view.clone()));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/sink.rs"]
mod tests;
