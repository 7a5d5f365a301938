//! Sliding-block assembly of a descriptor over a query rectangle.
//!
//! The rectangle is mapped onto the cell grid by integer division. Blocks of
//! `span × span` cells start at the rectangle's top-left cell and advance by
//! `stride / cellsize` cells while the whole block still fits, which gives
//! `floor((cells - span) / step) + 1` blocks per axis. Each block is the
//! row-major concatenation of its cell histograms, normalized in place, and
//! blocks are appended in row-major order.
use crate::cells::CellGrid;
use crate::error::BoundsError;
use crate::normalize::BlockNorm;
use crate::params::HogParams;
use serde::{Deserialize, Serialize};

/// Axis-aligned query rectangle in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering a whole `width × height` image.
    pub fn full(width: usize, height: usize) -> Self {
        Self::new(0, 0, width, height)
    }
}

/// Validated block enumeration for one rectangle, in cell units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockLayout {
    /// Top-left cell column of the rectangle
    pub col: usize,
    /// Top-left cell row of the rectangle
    pub row: usize,
    /// Cells per block side
    pub span: usize,
    /// Cells between consecutive block origins
    pub step: usize,
    pub blocks_x: usize,
    pub blocks_y: usize,
}

impl BlockLayout {
    /// Check `rect` against the processed image and its cell grid.
    pub fn plan(
        rect: Rect,
        image_width: usize,
        image_height: usize,
        grid: &CellGrid,
        params: &HogParams,
    ) -> Result<Self, BoundsError> {
        let exceeds = |origin: usize, len: usize, limit: usize| {
            origin.checked_add(len).map_or(true, |end| end > limit)
        };
        if exceeds(rect.x, rect.width, image_width)
            || exceeds(rect.y, rect.height, image_height)
        {
            return Err(BoundsError::OutsideImage {
                x: rect.x,
                y: rect.y,
                width: rect.width,
                height: rect.height,
                image_width,
                image_height,
            });
        }

        let cellsize = params.cellsize;
        let (col, row) = (rect.x / cellsize, rect.y / cellsize);
        let (cols, rows) = (rect.width / cellsize, rect.height / cellsize);
        if col + cols > grid.cols() || row + rows > grid.rows() {
            return Err(BoundsError::OutsideGrid {
                col,
                row,
                cols,
                rows,
                grid_cols: grid.cols(),
                grid_rows: grid.rows(),
            });
        }

        let span = params.cells_per_block();
        if cols < span || rows < span {
            return Err(BoundsError::SmallerThanBlock { cols, rows, span });
        }

        let step = params.stride_cells();
        Ok(Self {
            col,
            row,
            span,
            step,
            blocks_x: (cols - span) / step + 1,
            blocks_y: (rows - span) / step + 1,
        })
    }

    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.blocks_x * self.blocks_y
    }

    /// Descriptor length for `binning` bins per cell.
    #[inline]
    pub fn descriptor_len(&self, binning: usize) -> usize {
        self.num_blocks() * self.span * self.span * binning
    }

    /// Top-left cell `(row, col)` of every block, row-major.
    pub fn origins(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.blocks_y).flat_map(move |by| {
            let row = self.row + by * self.step;
            (0..self.blocks_x).map(move |bx| (row, self.col + bx * self.step))
        })
    }
}

/// Concatenate and normalize every block of `layout`.
pub fn assemble(
    grid: &CellGrid,
    layout: &BlockLayout,
    norm: BlockNorm,
    eps: f32,
) -> Result<Vec<f32>, BoundsError> {
    let mut out = Vec::with_capacity(layout.descriptor_len(grid.binning()));
    for (r0, c0) in layout.origins() {
        let start = out.len();
        for r in r0..r0 + layout.span {
            for c in c0..c0 + layout.span {
                let hist = grid.histogram(r, c).ok_or(BoundsError::OutsideGrid {
                    col: c,
                    row: r,
                    cols: 1,
                    rows: 1,
                    grid_cols: grid.cols(),
                    grid_rows: grid.rows(),
                })?;
                out.extend_from_slice(hist);
            }
        }
        norm.apply(&mut out[start..], eps);
    }
    Ok(out)
}
