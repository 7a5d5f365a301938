//! Per-cell orientation histograms over the gradient field.
//!
//! The field is tiled with non-overlapping `cellsize × cellsize` cells;
//! trailing pixels that do not fill a whole cell are dropped, so the grid is
//! `floor(H / cellsize) × floor(W / cellsize)`. Every pixel votes its full
//! magnitude into a single bin (no interpolation between neighbouring bins).
//!
//! Histograms live in one flat buffer, cell `(row, col)` at
//! `(row * cols + col) * binning`. Cells write disjoint chunks, so the
//! parallel build needs no synchronization.
use crate::gradient::GradientField;
use crate::image::ImageView;
use crate::params::{AngularRange, HogParams};
use rayon::prelude::*;

/// Maps an orientation in degrees onto a histogram bin.
#[derive(Clone, Copy, Debug)]
pub struct OrientationBinner {
    range: AngularRange,
    bin_width: f32,
    binning: usize,
}

impl OrientationBinner {
    pub fn new(params: &HogParams) -> Self {
        Self {
            range: params.angular_range,
            bin_width: params.bin_width(),
            binning: params.binning,
        }
    }

    /// Bin index for `deg` in [0, 360), clamped to `[0, binning - 1]`.
    #[inline]
    pub fn bin(&self, deg: f32) -> usize {
        let folded = match self.range {
            AngularRange::Unsigned if deg > 180.0 => deg - 180.0,
            _ => deg,
        };
        let idx = (folded / self.bin_width).floor();
        if idx <= 0.0 {
            0
        } else {
            (idx as usize).min(self.binning - 1)
        }
    }
}

/// Grid of cell histograms built from one gradient field.
#[derive(Clone, Debug)]
pub struct CellGrid {
    rows: usize,
    cols: usize,
    binning: usize,
    cellsize: usize,
    data: Vec<f32>,
}

impl CellGrid {
    /// Accumulate the histogram of every full cell in `field`.
    pub fn build(field: &GradientField, params: &HogParams) -> Self {
        let cellsize = params.cellsize;
        let binning = params.binning;
        let rows = field.height() / cellsize;
        let cols = field.width() / cellsize;
        let binner = OrientationBinner::new(params);
        let mut data = vec![0.0f32; rows * cols * binning];

        let fill = |(idx, hist): (usize, &mut [f32])| {
            let (row, col) = (idx / cols, idx % cols);
            accumulate_cell(field, row, col, cellsize, &binner, hist);
        };
        if params.parallel {
            data.par_chunks_mut(binning).enumerate().for_each(fill);
        } else {
            data.chunks_mut(binning).enumerate().for_each(fill);
        }

        Self {
            rows,
            cols,
            binning,
            cellsize,
            data,
        }
    }

    /// Number of cell rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cell columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn binning(&self) -> usize {
        self.binning
    }

    #[inline]
    pub fn cellsize(&self) -> usize {
        self.cellsize
    }

    /// Histogram of cell `(row, col)`, `None` outside the grid.
    #[inline]
    pub fn histogram(&self, row: usize, col: usize) -> Option<&[f32]> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let start = (row * self.cols + col) * self.binning;
        self.data.get(start..start + self.binning)
    }

    /// All histograms, row-major by cell.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

fn accumulate_cell(
    field: &GradientField,
    row: usize,
    col: usize,
    cellsize: usize,
    binner: &OrientationBinner,
    hist: &mut [f32],
) {
    let x0 = col * cellsize;
    let y0 = row * cellsize;
    for y in y0..y0 + cellsize {
        let mag = &field.magnitude.row(y)[x0..x0 + cellsize];
        let ori = &field.orientation.row(y)[x0..x0 + cellsize];
        for (&m, &o) in mag.iter().zip(ori) {
            hist[binner.bin(o)] += m;
        }
    }
}
