use std::path::{Path, PathBuf};

use crate::{
    foundation::{
        core::{OutputMode, ParallaxParams},
        error::{StereoError, StereoResult},
    },
    io::{decode::ResizeOpts, sink::OutputFormat},
    stereo::renderer::RenderThreading,
};

const MAX_BAND_COUNT: i64 = 255;
const MAX_RESIZE_TARGET: u32 = 10_000;
const DEFAULT_JPEG_QUALITY: i64 = 100;

/// Conversion settings, loadable from a JSON file.
///
/// Missing fields take their defaults; out-of-range values are clamped by [`StereoConfig::sanitize`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StereoConfig {
    /// Maximum shift as a percentage of image width.
    pub parallax_perc: f64,
    /// Number of depth bands.
    pub layers_count: i64,
    /// Band rendered without shift.
    pub zero_parallax_layer_num: i64,
    /// Which runs to perform.
    pub output_mode: OutputMode,
    /// Optional pre-resize of the input.
    pub resize: ResizeOpts,
    /// Encoded output format.
    pub format: OutputFormat,
    /// JPEG quality, clamped to 1..=100 by [`StereoConfig::sanitize`].
    pub jpeg_quality: i64,
    /// Worker override; `None` uses hardware parallelism.
    pub threads: Option<usize>,
    /// Directory receiving `left`, `right` and `pair` files.
    pub output_dir: PathBuf,
    /// Also refresh `latest.<ext>` after a conversion.
    pub publish_latest: bool,
}

impl Default for StereoConfig {
    fn default() -> Self {
        let params = ParallaxParams::default();
        Self {
            parallax_perc: params.parallax_perc,
            layers_count: i64::from(params.layers_count),
            zero_parallax_layer_num: i64::from(params.zero_parallax_layer_num),
            output_mode: OutputMode::default(),
            resize: ResizeOpts::default(),
            format: OutputFormat::default(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            threads: None,
            output_dir: PathBuf::from("converted_images"),
            publish_latest: false,
        }
    }
}

impl StereoConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(s: &str) -> StereoResult<Self> {
        serde_json::from_str(s).map_err(|e| StereoError::serde(format!("invalid config: {e}")))
    }

    /// Read a config from a JSON file.
    pub fn from_path(path: &Path) -> StereoResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            StereoError::serde(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&text)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> StereoResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StereoError::serde(e.to_string()))
    }

    /// Clamp every knob into its accepted range.
    pub fn sanitize(mut self) -> Self {
        let defaults = Self::default();
        self.parallax_perc = if self.parallax_perc.is_finite() {
            self.parallax_perc.clamp(0.0, 100.0)
        } else {
            defaults.parallax_perc
        };
        self.layers_count = self.layers_count.clamp(1, MAX_BAND_COUNT);
        self.zero_parallax_layer_num = self.zero_parallax_layer_num.clamp(1, MAX_BAND_COUNT);
        self.jpeg_quality = self.jpeg_quality.clamp(1, 100);
        self.resize.target_width = self.resize.target_width.min(MAX_RESIZE_TARGET);
        self.resize.target_height = self.resize.target_height.min(MAX_RESIZE_TARGET);
        self.threads = self.threads.filter(|&n| n > 0);
        self
    }

    /// Parallax parameters described by this config.
    pub fn parallax_params(&self) -> StereoResult<ParallaxParams> {
        ParallaxParams::new(
            self.parallax_perc,
            self.layers_count,
            self.zero_parallax_layer_num,
        )
    }

    /// JPEG quality handed to the encoder.
    pub fn encoder_quality(&self) -> u8 {
        u8::try_from(self.jpeg_quality.clamp(1, 100)).unwrap_or(100)
    }

    /// Worker-pool settings described by this config.
    pub fn threading(&self) -> RenderThreading {
        RenderThreading {
            threads: self.threads,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
