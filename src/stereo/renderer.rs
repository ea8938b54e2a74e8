use std::time::Instant;

use crate::{
    foundation::{
        bands::detected_parallelism,
        core::ParallaxParams,
        error::{StereoError, StereoResult},
    },
    raster::buffer::{SourceImage, ViewBuffer},
    stereo::{
        compositor::{StereoViews, composite_combined, composite_split},
        hole_fill::fill_holes,
    },
};

/// Worker-pool settings for the compositing and hole-filling phases.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Override the number of workers. `None` uses the detected hardware parallelism.
    pub threads: Option<usize>,
}

/// Parallel stereo synthesis engine bound to one set of [`ParallaxParams`].
///
/// Each phase (compositing, then hole filling) splits the image into one contiguous row band per
/// worker and returns only after every band has finished.
pub struct StereoRenderer {
    params: ParallaxParams,
    pool: rayon::ThreadPool,
}

impl StereoRenderer {
    /// Build a renderer with its own worker pool.
    pub fn new(params: ParallaxParams, threading: &RenderThreading) -> StereoResult<Self> {
        Ok(Self {
            params,
            pool: build_thread_pool(threading.threads)?,
        })
    }

    /// Parameters used by every run of this renderer.
    pub fn params(&self) -> ParallaxParams {
        self.params
    }

    /// Number of workers, which is also the number of row bands per phase.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Composite left and right views without filling holes.
    pub fn composite_split(&self, src: &SourceImage) -> StereoResult<StereoViews> {
        let started = Instant::now();
        let views = composite_split(src, self.params, &self.pool)?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "split compositing done"
        );
        Ok(views)
    }

    /// Composite the side-by-side frame without filling holes.
    pub fn composite_combined(&self, src: &SourceImage) -> StereoResult<ViewBuffer> {
        let started = Instant::now();
        let pair = composite_combined(src, self.params, &self.pool)?;
        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "combined compositing done"
        );
        Ok(pair)
    }

    /// Fill the holes of `view` in place; returns the number of pixels filled.
    pub fn fill_holes(&self, view: &mut ViewBuffer) -> usize {
        fill_holes(view, &self.pool)
    }

    /// Composite and hole-fill both views of a split run.
    pub fn render_split(&self, src: &SourceImage) -> StereoResult<StereoViews> {
        let StereoViews {
            mut left,
            mut right,
        } = self.composite_split(src)?;
        self.join(
            || self.fill_holes(&mut left),
            || self.fill_holes(&mut right),
        );
        Ok(StereoViews { left, right })
    }

    /// Composite and hole-fill the side-by-side frame of a combined run.
    pub fn render_combined(&self, src: &SourceImage) -> StereoResult<ViewBuffer> {
        let mut pair = self.composite_combined(src)?;
        self.fill_holes(&mut pair);
        Ok(pair)
    }

    /// Run two closures concurrently on this renderer's pool and wait for both.
    pub(crate) fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        self.pool.install(|| rayon::join(a, b))
    }
}

fn build_thread_pool(threads: Option<usize>) -> StereoResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(StereoError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or_else(detected_parallelism))
        .thread_name(|i| format!("stereo-worker-{i}"))
        .build()
        .map_err(|e| StereoError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/stereo/renderer.rs"]
mod tests;
