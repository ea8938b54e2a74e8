use std::path::Path;

use image::{DynamicImage, imageops::FilterType};

use crate::{
    foundation::error::{StereoError, StereoResult},
    raster::buffer::SourceImage,
};

/// How the decoded input is resized before synthesis.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Keep the decoded size.
    #[default]
    None,
    /// Shrink to fit inside the target box, preserving aspect ratio. Never enlarges.
    Fit,
    /// Resample to exactly the target size (Lanczos3).
    Exact,
}

/// Pre-resize settings. A zero target dimension disables resizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ResizeOpts {
    /// Resize strategy.
    pub mode: ResizeMode,
    /// Target width in pixels.
    pub target_width: u32,
    /// Target height in pixels.
    pub target_height: u32,
}

/// Read and decode the image at `path` into an RGB8 [`SourceImage`].
pub fn load_source(path: &Path, resize: &ResizeOpts) -> StereoResult<SourceImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| StereoError::decode(format!("failed to read '{}': {e}", path.display())))?;
    decode_source(&bytes, resize).map_err(|e| match e {
        StereoError::Decode(msg) => StereoError::decode(format!("'{}': {msg}", path.display())),
        other => other,
    })
}

/// Decode an encoded image (any format the `image` crate recognises) into RGB8.
pub fn decode_source(bytes: &[u8], resize: &ResizeOpts) -> StereoResult<SourceImage> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| StereoError::decode(format!("failed to decode image: {e}")))?;
    let rgb = apply_resize(img, resize).into_rgb8();
    let (width, height) = rgb.dimensions();
    SourceImage::from_raw(width, height, rgb.into_raw())
}

fn apply_resize(img: DynamicImage, opts: &ResizeOpts) -> DynamicImage {
    let (tw, th) = (opts.target_width, opts.target_height);
    if tw == 0 || th == 0 {
        return img;
    }
    match opts.mode {
        ResizeMode::None => img,
        ResizeMode::Fit => {
            if img.width() <= tw && img.height() <= th {
                img
            } else {
                img.thumbnail(tw, th)
            }
        }
        ResizeMode::Exact => img.resize_exact(tw, th, FilterType::Lanczos3),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/io/decode.rs"]
mod tests;
