use crate::foundation::error::{StereoError, StereoResult};

/// Bytes per source pixel (RGB8).
pub const SOURCE_BPP: usize = 3;
/// Bytes per output view pixel (RGBA8, alpha is a coverage flag).
pub const VIEW_BPP: usize = 4;

/// Alpha value of a pixel claimed by some source pixel.
pub const COVERED: u8 = 255;
/// Alpha value of a pixel nobody claimed (a disocclusion hole).
pub const HOLE: u8 = 0;

/// Allocate `len` zeroed bytes, reporting allocator refusal instead of aborting.
pub(crate) fn zeroed_bytes(len: usize, what: &str) -> StereoResult<Vec<u8>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len).map_err(|e| {
        StereoError::allocation(format!("failed to allocate {len} bytes for {what}: {e}"))
    })?;
    v.resize(len, 0);
    Ok(v)
}

fn checked_len(width: u32, height: u32, bpp: usize, what: &str) -> StereoResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(bpp))
        .ok_or_else(|| {
            StereoError::allocation(format!("{what} size overflow for {width}x{height}"))
        })
}

/// Immutable RGB8 source image, row-major and tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl SourceImage {
    /// Wrap raw RGB8 bytes; `data.len()` must equal `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> StereoResult<Self> {
        let expected = checked_len(width, height, SOURCE_BPP, "source image")?;
        if data.len() != expected {
            return Err(StereoError::validation(format!(
                "source image expects {expected} bytes for {width}x{height} rgb8, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Fill a `width x height` image with one color.
    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> StereoResult<Self> {
        let len = checked_len(width, height, SOURCE_BPP, "source image")?;
        let mut data = zeroed_bytes(len, "source image")?;
        for px in data.chunks_exact_mut(SOURCE_BPP) {
            px.copy_from_slice(&rgb);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * SOURCE_BPP
    }

    /// RGB8 bytes of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.stride();
        &self.data[y * stride..(y + 1) * stride]
    }

    /// Color of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * SOURCE_BPP;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Overwrite pixel `(x, y)`.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let i = (y as usize * self.width as usize + x as usize) * SOURCE_BPP;
        self.data[i..i + SOURCE_BPP].copy_from_slice(&rgb);
    }
}

/// Mutable RGBA8 output view. Alpha is [`COVERED`] or [`HOLE`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ViewBuffer {
    /// Allocate a fully transparent view (every pixel a hole).
    pub fn new(width: u32, height: u32) -> StereoResult<Self> {
        let len = checked_len(width, height, VIEW_BPP, "view buffer")?;
        Ok(Self {
            width,
            height,
            data: zeroed_bytes(len, "view buffer")?,
        })
    }

    /// Wrap raw RGBA8 bytes; `data.len()` must equal `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> StereoResult<Self> {
        let expected = checked_len(width, height, VIEW_BPP, "view buffer")?;
        if data.len() != expected {
            return Err(StereoError::validation(format!(
                "view buffer expects {expected} bytes for {width}x{height} rgba8, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * VIEW_BPP
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the view and return its RGBA8 bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA8 bytes of row `y`.
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.stride();
        &self.data[y * stride..(y + 1) * stride]
    }

    /// RGBA of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * VIEW_BPP;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Return `true` when pixel `(x, y)` was never claimed.
    pub fn is_hole(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y)[3] == HOLE
    }

    /// Number of hole pixels in the view.
    pub fn hole_count(&self) -> usize {
        self.data
            .chunks_exact(VIEW_BPP)
            .filter(|px| px[3] == HOLE)
            .count()
    }

    /// Drop the coverage channel, producing tightly packed RGB8.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len() / VIEW_BPP * SOURCE_BPP);
        for px in self.data.chunks_exact(VIEW_BPP) {
            out.extend_from_slice(&px[..SOURCE_BPP]);
        }
        out
    }
}

/// Per-pixel record of the highest depth that has claimed each destination pixel.
///
/// Scratch storage for one compositing phase.
#[derive(Debug)]
pub struct DepthBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl DepthBuffer {
    /// Allocate a zeroed depth buffer.
    pub fn new(width: u32, height: u32) -> StereoResult<Self> {
        let len = checked_len(width, height, 1, "depth buffer")?;
        Ok(Self {
            width,
            height,
            data: zeroed_bytes(len, "depth buffer")?,
        })
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Stored depth at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/buffer.rs"]
mod tests;
