//! Error types for descriptor construction, processing and retrieval.

use std::path::PathBuf;
use thiserror::Error;

/// Raised while building or loading a [`HogParams`](crate::HogParams).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("unknown angular range {0}° (expected 180 or 360)")]
    UnknownAngularRange(u32),

    #[error("failed to read params {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse params {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub(crate) fn invalid(name: &'static str, value: impl ToString, reason: &'static str) -> Self {
        ConfigError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }
}

/// Raised by `process` when the image cannot hold a single block.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("image {width}x{height} is smaller than one {blocksize}px block")]
pub struct SizeError {
    pub width: usize,
    pub height: usize,
    pub blocksize: usize,
}

/// Raised by `retrieve` when the query rectangle cannot be served.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundsError {
    #[error("no image has been processed yet")]
    NotProcessed,

    #[error("rect ({x}, {y}, {width}x{height}) exceeds the {image_width}x{image_height} image")]
    OutsideImage {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        image_width: usize,
        image_height: usize,
    },

    #[error("cells ({col}, {row}, {cols}x{rows}) exceed the {grid_cols}x{grid_rows} cell grid")]
    OutsideGrid {
        col: usize,
        row: usize,
        cols: usize,
        rows: usize,
        grid_cols: usize,
        grid_rows: usize,
    },

    #[error("rect spans {cols}x{rows} cells, a block needs {span}x{span}")]
    SmallerThanBlock {
        cols: usize,
        rows: usize,
        span: usize,
    },
}

/// Umbrella error for callers that drive the whole engine.
#[derive(Error, Debug)]
pub enum HogError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Size(#[from] SizeError),

    #[error(transparent)]
    Bounds(#[from] BoundsError),
}

/// Result alias for engine-level operations.
pub type Result<T> = std::result::Result<T, HogError>;
