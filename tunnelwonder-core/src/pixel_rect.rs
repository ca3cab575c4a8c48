use serde::{Deserialize, Serialize};

/// Rectangle in pixel space (always u32 coordinates)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect covering a whole canvas.
    pub fn canvas(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// Absolute pixel coordinates inside the rect, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |py| (self.x..self.x + self.width).map(move |px| (px, py)))
    }

    /// Center of the rect in continuous pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_rect_area() {
        let rect = PixelRect::canvas(1920, 1080);
        assert_eq!(rect.area(), 1920 * 1080);
    }

    #[test]
    fn test_pixel_rect_contains_point() {
        let rect = PixelRect::new(10, 20, 100, 50);

        assert!(rect.contains(50, 40));
        assert!(rect.contains(10, 20)); // Top-left corner
        assert!(rect.contains(109, 69)); // Bottom-right corner
        assert!(!rect.contains(110, 70)); // Just outside
        assert!(!rect.contains(9, 20)); // Just left
        assert!(!rect.contains(50, 19)); // Just above
    }

    #[test]
    fn test_pixels_are_row_major() {
        let rect = PixelRect::new(3, 7, 2, 2);
        let pixels: Vec<_> = rect.pixels().collect();
        assert_eq!(pixels, vec![(3, 7), (4, 7), (3, 8), (4, 8)]);
    }

    #[test]
    fn test_pixels_count_matches_area() {
        let rect = PixelRect::new(0, 0, 17, 5);
        assert_eq!(rect.pixels().count() as u32, rect.area());
    }

    #[test]
    fn test_empty_rect_has_no_pixels() {
        let rect = PixelRect::new(4, 4, 0, 10);
        assert_eq!(rect.pixels().count(), 0);
    }

    #[test]
    fn test_center() {
        let rect = PixelRect::new(10, 20, 30, 40);
        assert_eq!(rect.center(), (25.0, 40.0));
    }

    #[test]
    fn test_pixel_rect_serialization_roundtrip() {
        let original = PixelRect::new(100, 200, 640, 480);

        let json = serde_json::to_string(&original).unwrap();
        let restored: PixelRect = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, original);
    }
}
