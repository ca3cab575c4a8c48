use tunnelwonder_core::PixelRect;

/// Pick a tile edge length for a canvas.
///
/// Small canvases get small tiles so there is still enough work to spread
/// over every thread.
pub fn calculate_tile_size(width: u32, height: u32) -> u32 {
    const SMALL_CANVAS_PIXELS: u64 = 512 * 512;
    const LARGE_CANVAS_PIXELS: u64 = 1920 * 1080;

    let pixels = width as u64 * height as u64;
    if pixels < SMALL_CANVAS_PIXELS {
        32
    } else if pixels < LARGE_CANVAS_PIXELS {
        64
    } else {
        128
    }
}

/// Generate tiles covering the canvas, sorted by distance from center.
///
/// A zero `tile_size` is treated as 1.
pub fn generate_tiles(width: u32, height: u32, tile_size: u32) -> Vec<PixelRect> {
    let tile_size = tile_size.max(1);
    let mut tiles = Vec::new();

    for y_start in (0..height).step_by(tile_size as usize) {
        for x_start in (0..width).step_by(tile_size as usize) {
            let w = tile_size.min(width - x_start);
            let h = tile_size.min(height - y_start);
            tiles.push(PixelRect::new(x_start, y_start, w, h));
        }
    }

    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let dist_sq = |tile: &PixelRect| {
        let (cx, cy) = tile.center();
        (cx - center.0).powi(2) + (cy - center.1).powi(2)
    };
    tiles.sort_by(|a, b| dist_sq(a).total_cmp(&dist_sq(b)));

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_size_grows_with_canvas() {
        assert_eq!(calculate_tile_size(320, 240), 32);
        assert_eq!(calculate_tile_size(1280, 720), 64);
        assert_eq!(calculate_tile_size(1920, 1080), 128);
        assert_eq!(calculate_tile_size(3840, 2160), 128);
    }

    #[test]
    fn generate_tiles_covers_canvas_exactly() {
        let tiles = generate_tiles(256, 256, 64);
        assert_eq!(tiles.len(), 16);

        let total_area: u32 = tiles.iter().map(|t| t.area()).sum();
        assert_eq!(total_area, 256 * 256);
    }

    #[test]
    fn every_pixel_is_in_exactly_one_tile() {
        let (width, height) = (70, 45);
        let tiles = generate_tiles(width, height, 16);
        for py in 0..height {
            for px in 0..width {
                let owners = tiles.iter().filter(|t| t.contains(px, py)).count();
                assert_eq!(owners, 1, "pixel ({px}, {py}) covered {owners} times");
            }
        }
    }

    #[test]
    fn generate_tiles_handles_non_divisible_sizes() {
        let tiles = generate_tiles(100, 100, 64);
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().any(|t| t.width == 36));
        assert!(tiles.iter().any(|t| t.height == 36));
    }

    #[test]
    fn generate_tiles_center_out_ordering() {
        let tiles = generate_tiles(256, 256, 64);
        let dist = |t: &PixelRect| {
            let (cx, cy) = t.center();
            ((cx - 128.0).powi(2) + (cy - 128.0).powi(2)).sqrt()
        };

        assert!(dist(&tiles[0]) < 64.0, "first tile should be near center");
        for pair in tiles.windows(2) {
            assert!(dist(&pair[0]) <= dist(&pair[1]));
        }
    }

    #[test]
    fn empty_canvas_has_no_tiles() {
        assert!(generate_tiles(0, 100, 32).is_empty());
        assert!(generate_tiles(100, 0, 32).is_empty());
    }

    #[test]
    fn zero_tile_size_does_not_hang() {
        let tiles = generate_tiles(3, 2, 0);
        assert_eq!(tiles.len(), 6);
    }
}
