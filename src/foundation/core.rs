use crate::foundation::error::{StereoError, StereoResult};

/// Depth-to-parallax mapping knobs shared by every run.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ParallaxParams {
    /// Maximum horizontal shift as a percentage of the image width.
    pub parallax_perc: f64,
    /// Number of depth bands (at least 1).
    pub layers_count: u32,
    /// Band rendered with zero shift (at least 1).
    pub zero_parallax_layer_num: u32,
}

impl Default for ParallaxParams {
    fn default() -> Self {
        Self {
            parallax_perc: 0.5,
            layers_count: 10,
            zero_parallax_layer_num: 5,
        }
    }
}

impl ParallaxParams {
    /// Build parameters, clamping non-positive band counts up to 1.
    ///
    /// `parallax_perc` may be negative (mirrors the shift direction) but must be finite.
    pub fn new(
        parallax_perc: f64,
        layers_count: i64,
        zero_parallax_layer_num: i64,
    ) -> StereoResult<Self> {
        if !parallax_perc.is_finite() {
            return Err(StereoError::validation("parallax_perc must be finite"));
        }
        Ok(Self {
            parallax_perc,
            layers_count: clamp_band_count(layers_count),
            zero_parallax_layer_num: clamp_band_count(zero_parallax_layer_num),
        })
    }

    /// Largest shift in pixels for an image `width` pixels wide.
    pub fn max_shift(self, width: u32) -> f64 {
        f64::from(width) * self.parallax_perc / 100.0
    }
}

fn clamp_band_count(v: i64) -> u32 {
    v.clamp(1, i64::from(u32::MAX)) as u32
}

/// Which runs a conversion performs.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Split run and combined run.
    #[default]
    Both,
    /// Combined side-by-side frame only.
    Pair,
    /// Separate left and right views only.
    Split,
}

impl OutputMode {
    /// Return `true` when the split (left/right) run is requested.
    pub fn runs_split(self) -> bool {
        matches!(self, Self::Both | Self::Split)
    }

    /// Return `true` when the combined (pair) run is requested.
    pub fn runs_combined(self) -> bool {
        matches!(self, Self::Both | Self::Pair)
    }
}

/// Identity of one encoded output view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Left eye view of a split run.
    Left,
    /// Right eye view of a split run.
    Right,
    /// Side-by-side frame of a combined run.
    Pair,
}

impl ViewKind {
    /// File stem used when the view is written to disk.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Pair => "pair",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
