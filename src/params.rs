//! Descriptor configuration.
//!
//! Geometry is expressed in pixels: cells tile the image, blocks group
//! `blocksize / cellsize` cells per side, and consecutive blocks start
//! `stride` pixels apart. All three must line up on the cell grid, which
//! [`HogParams::validate`] enforces before an engine is built.
//!
//! Defaults follow the classic pedestrian setup: 16px blocks of 8px cells,
//! 8px stride, 9 unsigned bins, L2-Hys.

use crate::error::ConfigError;
use crate::normalize::{BlockNorm, DEFAULT_EPSILON};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Orientation range covered by the histogram bins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum AngularRange {
    /// 0..180°: opposite gradient directions share a bin.
    #[default]
    Unsigned,
    /// 0..360°: gradient direction is kept.
    Signed,
}

impl AngularRange {
    #[inline]
    pub fn degrees(self) -> u32 {
        match self {
            AngularRange::Unsigned => 180,
            AngularRange::Signed => 360,
        }
    }
}

impl TryFrom<u32> for AngularRange {
    type Error = ConfigError;

    fn try_from(deg: u32) -> Result<Self, Self::Error> {
        match deg {
            180 => Ok(AngularRange::Unsigned),
            360 => Ok(AngularRange::Signed),
            other => Err(ConfigError::UnknownAngularRange(other)),
        }
    }
}

impl From<AngularRange> for u32 {
    fn from(range: AngularRange) -> Self {
        range.degrees()
    }
}

/// Immutable engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HogParams {
    /// Block side in pixels (multiple of `cellsize`).
    pub blocksize: usize,
    /// Cell side in pixels.
    pub cellsize: usize,
    /// Pixel step between block origins (multiple of `cellsize`).
    pub stride: usize,
    /// Histogram bins per cell (>= 2).
    pub binning: usize,
    pub angular_range: AngularRange,
    pub norm: BlockNorm,
    /// Stabilizer added to every normalization denominator.
    pub epsilon: f32,
    /// Build the cell grid on the rayon pool.
    pub parallel: bool,
}

impl Default for HogParams {
    fn default() -> Self {
        Self {
            blocksize: 16,
            cellsize: 8,
            stride: 8,
            binning: 9,
            angular_range: AngularRange::Unsigned,
            norm: BlockNorm::L2Hys,
            epsilon: DEFAULT_EPSILON,
            parallel: true,
        }
    }
}

impl HogParams {
    /// Block of `blocksize` pixels split into 2×2 cells with half-block stride.
    pub fn with_blocksize(blocksize: usize) -> Self {
        Self {
            blocksize,
            cellsize: blocksize / 2,
            stride: blocksize / 2,
            ..Default::default()
        }
    }

    pub fn with_cellsize(mut self, cellsize: usize) -> Self {
        self.cellsize = cellsize;
        self
    }

    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    pub fn with_binning(mut self, binning: usize) -> Self {
        self.binning = binning;
        self
    }

    pub fn with_angular_range(mut self, range: AngularRange) -> Self {
        self.angular_range = range;
        self
    }

    pub fn with_norm(mut self, norm: BlockNorm) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Cells per block side.
    #[inline]
    pub fn cells_per_block(&self) -> usize {
        self.blocksize / self.cellsize
    }

    /// Block stride in cells.
    #[inline]
    pub fn stride_cells(&self) -> usize {
        self.stride / self.cellsize
    }

    /// Width of one bin in degrees.
    #[inline]
    pub fn bin_width(&self) -> f32 {
        self.angular_range.degrees() as f32 / self.binning as f32
    }

    /// Length of one normalized block vector.
    #[inline]
    pub fn block_len(&self) -> usize {
        let span = self.cells_per_block();
        span * span * self.binning
    }

    /// Check the geometric and numeric invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cellsize == 0 {
            return Err(ConfigError::invalid("cellsize", 0, "must be positive"));
        }
        if self.blocksize < self.cellsize {
            return Err(ConfigError::invalid(
                "blocksize",
                self.blocksize,
                "must be at least cellsize",
            ));
        }
        if self.blocksize % self.cellsize != 0 {
            return Err(ConfigError::invalid(
                "blocksize",
                self.blocksize,
                "must be a multiple of cellsize",
            ));
        }
        if self.stride < self.cellsize {
            return Err(ConfigError::invalid(
                "stride",
                self.stride,
                "must be at least cellsize",
            ));
        }
        if self.stride % self.cellsize != 0 {
            return Err(ConfigError::invalid(
                "stride",
                self.stride,
                "must be a multiple of cellsize",
            ));
        }
        if self.binning < 2 {
            return Err(ConfigError::invalid(
                "binning",
                self.binning,
                "needs at least two bins",
            ));
        }
        // integer bin width `range / binning` must stay positive
        if self.binning > self.angular_range.degrees() as usize {
            return Err(ConfigError::invalid(
                "binning",
                self.binning,
                "exceeds the angular range in degrees",
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConfigError::invalid(
                "epsilon",
                self.epsilon,
                "must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Load and validate parameters from a JSON file.
///
/// Missing fields fall back to [`HogParams::default`].
pub fn load_params(path: &Path) -> Result<HogParams, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let params = parse_params(&data).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    params.validate()?;
    Ok(params)
}

fn parse_params(json: &str) -> Result<HogParams, serde_json::Error> {
    serde_json::from_str(json)
}
