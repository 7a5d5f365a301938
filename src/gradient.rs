//! Per-pixel gradient magnitude and orientation.
//!
//! - Rescales intensities to [0, 255] (min-max over the whole image) so the
//!   magnitudes do not depend on the input's dynamic range. A constant image
//!   rescales to all zeros.
//! - Convolves with the centred difference `[-1, 0, 1]` along x and y
//!   independently. Borders replicate the edge pixel, so the outermost
//!   row/column sees a one-sided difference.
//! - Orientation is `atan2(dy, dx)` in degrees over [0, 360).
//!
//! Complexity: O(W·H); memory: two float buffers plus the rescaled image.
use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Upper end of the rescaled intensity range.
pub const INTENSITY_MAX: f32 = 255.0;

/// Gradient magnitude and orientation, co-sized with the source image.
#[derive(Clone, Debug)]
pub struct GradientField {
    /// `sqrt(dx² + dy²)` per pixel
    pub magnitude: ImageF32,
    /// Gradient direction per pixel in degrees, [0, 360)
    pub orientation: ImageF32,
}

impl GradientField {
    #[inline]
    pub fn width(&self) -> usize {
        self.magnitude.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.magnitude.h
    }
}

/// Copy `image` into an f32 buffer linearly mapped onto [0, 255].
pub fn normalize_min_max<I>(image: &I) -> ImageF32
where
    I: ImageView,
    I::Pixel: Into<f32>,
{
    let (w, h) = (image.width(), image.height());
    let mut out = ImageF32::new(w, h);
    for (y, src) in image.rows().enumerate() {
        for (dst, &px) in out.row_mut(y).iter_mut().zip(src) {
            *dst = px.into();
        }
    }
    let Some((lo, hi)) = out.min_max() else {
        return out;
    };
    let range = hi - lo;
    let scale = if range > f32::EPSILON {
        INTENSITY_MAX / range
    } else {
        0.0
    };
    for v in out.data.iter_mut() {
        *v = (*v - lo) * scale;
    }
    out
}

/// Orientation of `(dx, dy)` in degrees, folded into [0, 360).
#[inline]
pub fn orientation_deg(dx: f32, dy: f32) -> f32 {
    let mut deg = dy.atan2(dx).to_degrees();
    if deg < 0.0 {
        deg += 360.0;
    }
    // -tiny + 360 can round up to exactly 360
    if deg >= 360.0 {
        deg = 0.0;
    }
    deg
}

/// Centred-difference gradients with replicated borders.
pub fn central_difference(l: &ImageF32) -> GradientField {
    let (w, h) = (l.w, l.h);
    let mut magnitude = ImageF32::new(w, h);
    let mut orientation = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return GradientField {
            magnitude,
            orientation,
        };
    }

    for y in 0..h {
        let up = l.row(y.saturating_sub(1));
        let mid = l.row(y);
        let down = l.row((y + 1).min(h - 1));
        let out_mag = magnitude.row_mut(y);
        let out_ori = orientation.row_mut(y);
        for x in 0..w {
            let dx = mid[(x + 1).min(w - 1)] - mid[x.saturating_sub(1)];
            let dy = down[x] - up[x];
            out_mag[x] = (dx * dx + dy * dy).sqrt();
            out_ori[x] = orientation_deg(dx, dy);
        }
    }

    GradientField {
        magnitude,
        orientation,
    }
}
