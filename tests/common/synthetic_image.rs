#![allow(dead_code)]

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_u8(width: usize, height: usize, cell: usize) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut img = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            img[y * width + x] = if sum & 1 == 0 { 32u8 } else { 220u8 };
        }
    }
    img
}

/// Constant image filled with `value`.
pub fn constant_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}

/// Two horizontal bands split at row `edge_row`.
pub fn horizontal_step_u8(
    width: usize,
    height: usize,
    edge_row: usize,
    top: u8,
    bottom: u8,
) -> Vec<u8> {
    (0..width * height)
        .map(|i| if i / width < edge_row { top } else { bottom })
        .collect()
}

/// Deterministic pseudo-random texture.
pub fn texture_u8(width: usize, height: usize, seed: u32) -> Vec<u8> {
    let mut state = seed.wrapping_mul(2_654_435_761).wrapping_add(1);
    (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

/// Copy the `w × h` window at (`x0`, `y0`) out of a packed buffer.
pub fn crop_u8(
    src: &[u8],
    src_width: usize,
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(w * h);
    for y in y0..y0 + h {
        let start = y * src_width + x0;
        out.extend_from_slice(&src[start..start + w]);
    }
    out
}
