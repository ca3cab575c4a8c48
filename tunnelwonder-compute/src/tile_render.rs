//! Tile rendering shared by the parallel frame renderer and its tests.

use crate::kernel::{to_rgba8, TunnelKernel};
use tunnelwonder_core::PixelRect;

/// Shade every pixel of `rect`, row-major, as opaque RGBA8.
pub fn render_tile(kernel: &TunnelKernel<'_>, rect: &PixelRect) -> Vec<[u8; 4]> {
    let mut data = Vec::with_capacity(rect.area() as usize);
    for (px, py) in rect.pixels() {
        data.push(to_rgba8(kernel.shade_pixel(px, py)));
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use tunnelwonder_core::{FramePhases, ParameterSnapshot};

    #[test]
    fn tile_has_one_opaque_pixel_per_position() {
        let snapshot = ParameterSnapshot::default();
        let kernel = TunnelKernel::new(&snapshot, &FramePhases::default(), (40, 30));
        let rect = PixelRect::new(8, 4, 12, 9);

        let data = render_tile(&kernel, &rect);
        assert_eq!(data.len(), 12 * 9);
        assert!(data.iter().all(|px| px[3] == 255));
    }

    #[test]
    fn tile_matches_per_pixel_shading() {
        let snapshot = ParameterSnapshot::default();
        let phases = FramePhases::at_depth(3.0);
        let kernel = TunnelKernel::new(&snapshot, &phases, (32, 32));
        let rect = PixelRect::new(10, 20, 5, 3);

        let data = render_tile(&kernel, &rect);
        // Second row, fourth column
        let expected = to_rgba8(kernel.shade_pixel(13, 21));
        assert_eq!(data[5 + 3], expected);
    }
}
