//! Block normalization schemes applied to concatenated cell histograms.
//!
//! All schemes work in place on a flat vector and ignore bin semantics.
//! `eps` keeps all-zero blocks finite; when the resulting denominator is
//! exactly zero (only with `eps == 0`) the vector is left untouched.
//!
//! See Dalal & Triggs, "Histograms of Oriented Gradients for Human
//! Detection" (CVPR 2005), section 6.4.
use serde::{Deserialize, Serialize};

/// Upper clip applied between the two L2 passes of [`l2_hys`].
pub const L2HYS_CLIP: f32 = 0.2;

/// Default stabilizer added to every denominator.
pub const DEFAULT_EPSILON: f32 = 1e-6;

/// Normalization scheme selected at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockNorm {
    None,
    L1,
    L1Sqrt,
    L2,
    #[default]
    L2Hys,
}

impl BlockNorm {
    /// Normalize `v` in place.
    #[inline]
    pub fn apply(self, v: &mut [f32], eps: f32) {
        match self {
            BlockNorm::None => {}
            BlockNorm::L1 => l1(v, eps),
            BlockNorm::L1Sqrt => l1_sqrt(v, eps),
            BlockNorm::L2 => l2(v, eps),
            BlockNorm::L2Hys => l2_hys(v, eps),
        }
    }
}

#[inline]
fn scale_by(v: &mut [f32], den: f32) {
    if den == 0.0 {
        return;
    }
    let inv = 1.0 / den;
    for x in v.iter_mut() {
        *x *= inv;
    }
}

/// `v[i] / (Σv + eps)`
pub fn l1(v: &mut [f32], eps: f32) {
    let den = v.iter().sum::<f32>() + eps;
    scale_by(v, den);
}

/// L1 followed by an element-wise square root.
pub fn l1_sqrt(v: &mut [f32], eps: f32) {
    l1(v, eps);
    for x in v.iter_mut() {
        // histograms are non-negative; max() keeps a stray -0.0 out of sqrt
        *x = x.max(0.0).sqrt();
    }
}

/// `v[i] / sqrt(Σv² + eps)`
pub fn l2(v: &mut [f32], eps: f32) {
    let sq = v.iter().map(|x| x * x).sum::<f32>();
    scale_by(v, (sq + eps).sqrt());
}

/// L2, clip into `[0, L2HYS_CLIP]`, then L2 again.
pub fn l2_hys(v: &mut [f32], eps: f32) {
    l2(v, eps);
    for x in v.iter_mut() {
        *x = x.clamp(0.0, L2HYS_CLIP);
    }
    l2(v, eps);
}
