//! Descriptor engine: one expensive `process` per image, cheap `retrieve`s.
//!
//! `process` rescales the image, extracts gradients and accumulates the cell
//! histogram grid, then swaps the result into the cache in one step. A call
//! rejected for size leaves the previous cache untouched.
//!
//! `retrieve` only reads the cache, so any number of rectangles can be
//! evaluated against one processed image, also concurrently through `&self`
//! (see [`HogDescriptor::retrieve_batch`]). `process` takes `&mut self`, which
//! keeps it exclusive of every reader.
use crate::blocks::{assemble, BlockLayout, Rect};
use crate::cells::CellGrid;
use crate::diagnostics::TimingBreakdown;
use crate::error::{BoundsError, ConfigError, SizeError};
use crate::gradient::{central_difference, normalize_min_max, GradientField};
use crate::image::{ImageF32, ImageView};
use crate::params::HogParams;
use log::debug;
use rayon::prelude::*;
use std::time::Instant;

#[derive(Clone, Debug)]
struct HogCache {
    width: usize,
    height: usize,
    field: GradientField,
    grid: CellGrid,
}

/// HOG descriptor engine bound to one immutable configuration.
#[derive(Clone, Debug)]
pub struct HogDescriptor {
    params: HogParams,
    cache: Option<HogCache>,
    timing: Option<TimingBreakdown>,
}

impl HogDescriptor {
    /// Validate `params` and build an engine with an empty cache.
    pub fn new(params: HogParams) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params,
            cache: None,
            timing: None,
        })
    }

    pub fn params(&self) -> &HogParams {
        &self.params
    }

    /// Compute gradients and cell histograms for `image`, replacing the cache.
    pub fn process<I>(&mut self, image: &I) -> Result<(), SizeError>
    where
        I: ImageView,
        I::Pixel: Into<f32>,
    {
        let (w, h) = (image.width(), image.height());
        let blocksize = self.params.blocksize;
        if w < blocksize || h < blocksize {
            debug!("HogDescriptor::process rejected {w}x{h} image (block {blocksize}px)");
            return Err(SizeError {
                width: w,
                height: h,
                blocksize,
            });
        }

        let t0 = Instant::now();
        let mut timing = TimingBreakdown::default();

        let stage = Instant::now();
        let norm = normalize_min_max(image);
        timing.push("normalize", elapsed_ms(stage));

        let stage = Instant::now();
        let field = central_difference(&norm);
        timing.push("gradient", elapsed_ms(stage));

        let stage = Instant::now();
        let grid = CellGrid::build(&field, &self.params);
        timing.push("cells", elapsed_ms(stage));

        timing.total_ms = elapsed_ms(t0);
        debug!(
            "HogDescriptor::process {}x{} -> {}x{} cells in {:.3} ms (grad {:.3}, cells {:.3})",
            w,
            h,
            grid.cols(),
            grid.rows(),
            timing.total_ms,
            timing.stage_ms("gradient").unwrap_or_default(),
            timing.stage_ms("cells").unwrap_or_default(),
        );

        self.cache = Some(HogCache {
            width: w,
            height: h,
            field,
            grid,
        });
        self.timing = Some(timing);
        Ok(())
    }

    /// Whether a successful `process` has populated the cache.
    pub fn is_processed(&self) -> bool {
        self.cache.is_some()
    }

    /// `(width, height)` of the processed image.
    pub fn image_size(&self) -> Option<(usize, usize)> {
        self.cache.as_ref().map(|c| (c.width, c.height))
    }

    /// Descriptor of `rect` over the processed image.
    pub fn retrieve(&self, rect: Rect) -> Result<Vec<f32>, BoundsError> {
        let (cache, layout) = self.layout(rect)?;
        assemble(&cache.grid, &layout, self.params.norm, self.params.epsilon)
    }

    /// Descriptor of the whole processed image.
    pub fn retrieve_full(&self) -> Result<Vec<f32>, BoundsError> {
        let (w, h) = self.image_size().ok_or(BoundsError::NotProcessed)?;
        self.retrieve(Rect::full(w, h))
    }

    /// Evaluate many rectangles in parallel; one result per input, in order.
    pub fn retrieve_batch(&self, rects: &[Rect]) -> Vec<Result<Vec<f32>, BoundsError>> {
        rects.par_iter().map(|&rect| self.retrieve(rect)).collect()
    }

    /// Length `retrieve(rect)` would produce, without assembling it.
    pub fn descriptor_len(&self, rect: Rect) -> Result<usize, BoundsError> {
        let (_, layout) = self.layout(rect)?;
        Ok(layout.num_blocks() * self.params.block_len())
    }

    /// Gradient magnitudes of the processed image.
    pub fn gradient_magnitudes(&self) -> Option<&ImageF32> {
        self.cache.as_ref().map(|c| &c.field.magnitude)
    }

    /// Gradient orientations (degrees, [0, 360)) of the processed image.
    pub fn gradient_orientations(&self) -> Option<&ImageF32> {
        self.cache.as_ref().map(|c| &c.field.orientation)
    }

    /// Magnitude and orientation buffers of the processed image together.
    pub fn gradient_field(&self) -> Option<&GradientField> {
        self.cache.as_ref().map(|c| &c.field)
    }

    /// Cell histograms of the processed image, e.g. for overlay rendering.
    pub fn cell_grid(&self) -> Option<&CellGrid> {
        self.cache.as_ref().map(|c| &c.grid)
    }

    /// Stage timings of the last successful `process`.
    pub fn last_timing(&self) -> Option<&TimingBreakdown> {
        self.timing.as_ref()
    }

    fn layout(&self, rect: Rect) -> Result<(&HogCache, BlockLayout), BoundsError> {
        let cache = self.cache.as_ref().ok_or(BoundsError::NotProcessed)?;
        let layout = BlockLayout::plan(rect, cache.width, cache.height, &cache.grid, &self.params)
            .inspect_err(|err| debug!("HogDescriptor::retrieve rejected {rect:?}: {err}"))?;
        Ok((cache, layout))
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
