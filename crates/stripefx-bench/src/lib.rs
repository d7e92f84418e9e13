//! Fixtures shared by the stripefx benchmarks.

use stripefx_core::Raster;

/// Deterministic pseudo-random opaque raster.
pub fn noise_raster(width: u32, height: u32) -> Raster {
    let mut raster = Raster::new(width, height);
    let mut state = 0x9e37_79b9u32;
    for x in 0..width {
        for y in 0..height {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            raster.set_pixel(x, y, [u16::from(r) * 257, u16::from(g) * 257, u16::from(b) * 257, 65535]);
        }
    }
    raster
}
