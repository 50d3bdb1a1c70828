use image::RgbaImage;

/// Map a grid index onto a pixel coordinate along one image axis.
///
/// The result is always in `[0, extent)` and never decreases as `index`
/// increases. An empty grid or axis maps everything to pixel 0.
pub fn grid_to_pixel(index: u32, count: u32, extent: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    let scaled = index as u64 * extent as u64 / count as u64;
    (scaled as u32).min(extent.saturating_sub(1))
}

/// Nearest-neighbor color lookup for a grid laid over an image.
///
/// Each image gets its own sampler, so two images with different dimensions
/// both stretch over the entire grid.
pub struct ImageSampler<'image> {
    image: &'image RgbaImage,
    rows: u32,
    cols: u32,
}

impl<'image> ImageSampler<'image> {
    /// Create a sampler which maps a rows x cols grid onto the image.
    ///
    /// The image must contain at least one pixel.
    pub fn new(image: &'image RgbaImage, rows: u32, cols: u32) -> Self {
        Self { image, rows, cols }
    }

    /// The pixel which provides the color for a grid cell.
    ///
    /// Grid rows grow upward while image rows are stored top-down, so the
    /// vertical axis is flipped.
    pub fn pixel_for(&self, row: u32, col: u32) -> (u32, u32) {
        let (width, height) = self.image.dimensions();
        let x = grid_to_pixel(col, self.cols, width);
        let y = grid_to_pixel(row, self.rows, height);
        (x, height - 1 - y)
    }

    /// The normalized RGBA color for a grid cell.
    pub fn sample(&self, row: u32, col: u32) -> [f32; 4] {
        let (x, y) = self.pixel_for(row, col);
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use image::Rgba;

    #[test]
    fn grid_to_pixel_is_monotonic() {
        for &(count, extent) in &[(10, 3), (3, 10), (7, 7), (1000, 640)] {
            let mut last = 0;
            for index in 0..count {
                let pixel = grid_to_pixel(index, count, extent);
                assert!(pixel >= last, "{} < {}", pixel, last);
                assert!(pixel < extent);
                last = pixel;
            }
        }
    }

    #[test]
    fn grid_to_pixel_covers_larger_images() {
        assert_eq!(grid_to_pixel(0, 4, 8), 0);
        assert_eq!(grid_to_pixel(1, 4, 8), 2);
        assert_eq!(grid_to_pixel(3, 4, 8), 6);
    }

    #[test]
    fn grid_to_pixel_tolerates_empty_axes() {
        assert_eq!(grid_to_pixel(3, 4, 0), 0);
        assert_eq!(grid_to_pixel(3, 0, 8), 0);
    }

    #[test]
    fn sampler_flips_the_vertical_axis() {
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 1, Rgba([255, 0, 0, 255])); // bottom left
        image.put_pixel(0, 0, Rgba([0, 0, 255, 255])); // top left

        let sampler = ImageSampler::new(&image, 2, 2);
        assert_eq!(sampler.pixel_for(0, 0), (0, 1));
        assert_eq!(sampler.sample(0, 0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(sampler.sample(1, 0), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn sampler_stretches_small_images() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([0, 255, 0, 0]));
        let sampler = ImageSampler::new(&image, 5, 5);
        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(sampler.sample(row, col), [0.0, 1.0, 0.0, 0.0]);
            }
        }
    }
}
