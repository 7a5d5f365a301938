#![doc = include_str!("../README.md")]

pub mod blocks;
pub mod cells;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod gradient;
pub mod image;
pub mod normalize;
pub mod params;

// --- High-level re-exports -------------------------------------------------

pub use crate::blocks::Rect;
pub use crate::engine::HogDescriptor;
pub use crate::error::{BoundsError, ConfigError, HogError, SizeError};
pub use crate::normalize::BlockNorm;
pub use crate::params::{load_params, AngularRange, HogParams};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use hog_descriptor::prelude::*;
///
/// # fn main() -> Result<(), HogError> {
/// let (w, h) = (64usize, 128usize);
/// let gray: Vec<u8> = (0..w * h).map(|i| (i % 251) as u8).collect();
///
/// let mut hog = HogDescriptor::new(HogParams::default())?;
/// hog.process(&ImageU8::packed(w, h, &gray))?;
/// let descriptor = hog.retrieve(Rect::new(0, 0, 64, 128))?;
/// assert_eq!(descriptor.len(), 7 * 15 * 36);
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageF32, ImageU8};
    pub use crate::{BlockNorm, HogDescriptor, HogError, HogParams, Rect};
}
