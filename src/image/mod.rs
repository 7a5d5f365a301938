//! Single-channel image containers consumed by the descriptor engine.
//!
//! Decoding lives outside this crate; callers hand over either a borrowed
//! 8-bit buffer ([`ImageU8`]) or an owned float buffer ([`ImageF32`]).
pub mod f32;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, ImageViewMut, Rows};
pub use self::u8::ImageU8;
