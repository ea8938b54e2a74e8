//! Stereopair turns one 2-D image into a stereoscopic pair (depth-image-based rendering).
//!
//! Pixel luma serves as a depth proxy. Each pixel is shifted horizontally in proportion to its
//! depth band, overlapping writes are resolved by a z-test, and the disocclusion holes left behind
//! are repaired by linear interpolation along each row.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: `path -> SourceImage` (RGB8, optional pre-resize)
//! 2. **Composite**: `SourceImage -> ViewBuffer(s)` (split `left`/`right`, or combined `pair`)
//! 3. **Fill**: close alpha-0 runs in place
//! 4. **Encode**: hand finished views to a [`ViewSink`] (JPEG/PNG files, or memory)
//!
//! Compositing and filling each split the image into one contiguous row band per worker and
//! join before the next phase starts. A source pixel only ever lands in its own row, so workers
//! never contend for a destination pixel.
//!
//! # Example
//!
//! ```no_run
//! use stereopair::{
//!     DirSink, OutputFormat, OutputMode, ParallaxParams, RenderThreading, ResizeOpts,
//!     StereoRenderer, load_source, run_stereo,
//! };
//!
//! let src = load_source("photo.jpg".as_ref(), &ResizeOpts::default())?;
//! let renderer = StereoRenderer::new(ParallaxParams::default(), &RenderThreading::default())?;
//! let sink = DirSink::new("converted_images", OutputFormat::Jpeg, 100)?;
//! let report = run_stereo(&renderer, &src, OutputMode::Both, &sink);
//! assert!(report.is_success());
//! # Ok::<(), stereopair::StereoError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod io;
mod raster;
mod session;
mod stereo;

pub use config::StereoConfig;
pub use foundation::bands::{detected_parallelism, row_bands};
pub use foundation::core::{OutputMode, ParallaxParams, ViewKind};
pub use foundation::error::{StereoError, StereoResult};
pub use io::decode::{ResizeMode, ResizeOpts, decode_source, load_source};
pub use io::sink::{DirSink, InMemorySink, OutputFormat, ViewSink, encode_view};
pub use raster::buffer::{
    COVERED, DepthBuffer, HOLE, SOURCE_BPP, SourceImage, VIEW_BPP, ViewBuffer,
};
pub use session::{RunFailure, RunKind, RunReport, run_stereo};
pub use stereo::compositor::{StereoViews, composite_combined, composite_split};
pub use stereo::depth::{ShiftTable, depth_layer, estimate_depth, layer_shift, round_shift};
pub use stereo::hole_fill::{fill_holes, fill_row};
pub use stereo::renderer::{RenderThreading, StereoRenderer};
