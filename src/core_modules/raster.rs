// THEORY:
// The `Raster` is the read-only image the detector works on. Like `Pixel`, it is a
// "dumb" data container: it owns a flattened, row-major `Vec<Pixel>` and knows how
// to hand out a pixel by coordinate. It does not know what a marker is.
//
// It is built by the caller (from a decoded `image` buffer or a raw RGBA frame) and
// then only ever borrowed by the scanners, so a single raster can be shared across
// threads behind an `Arc` without locking.

pub mod raster {
    use crate::core_modules::pixel::pixel::{CHANNELS, ColorClass, Pixel};
    use crate::error::{VisionError, VisionResult};
    use image::{DynamicImage, RgbaImage};

    /// An immutable W x H grid of pixels stored row-major.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Raster {
        width: u32,
        height: u32,
        pixels: Vec<Pixel>,
    }

    impl Raster {
        /// Creates a raster filled with a single color.
        pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
            Self {
                width,
                height,
                pixels: vec![pixel; width as usize * height as usize],
            }
        }

        /// Builds a raster from a tightly packed RGBA byte buffer.
        pub fn from_rgba_bytes(width: u32, height: u32, frame_buffer: &[u8]) -> VisionResult<Self> {
            let expected = width as usize * height as usize * CHANNELS;
            if frame_buffer.len() != expected {
                return Err(VisionError::BufferSizeMismatch {
                    expected,
                    actual: frame_buffer.len(),
                });
            }

            let pixels = frame_buffer
                .chunks_exact(CHANNELS)
                .map(Pixel::try_from)
                .collect::<VisionResult<Vec<Pixel>>>()?;
            Ok(Self {
                width,
                height,
                pixels,
            })
        }

        pub fn width(&self) -> u32 {
            self.width
        }

        pub fn height(&self) -> u32 {
            self.height
        }

        /// True when the raster has no pixels to scan.
        pub fn is_empty(&self) -> bool {
            self.width == 0 || self.height == 0
        }

        pub fn contains(&self, x: u32, y: u32) -> bool {
            x < self.width && y < self.height
        }

        /// Panics when `(x, y)` is out of bounds.
        #[inline]
        pub fn pixel(&self, x: u32, y: u32) -> Pixel {
            debug_assert!(self.contains(x, y), "({x}, {y}) outside {}x{}", self.width, self.height);
            self.pixels[y as usize * self.width as usize + x as usize]
        }

        #[inline]
        pub fn classify(&self, x: u32, y: u32) -> ColorClass {
            self.pixel(x, y).classify()
        }

        /// Overwrites one pixel. Used while composing synthetic rasters.
        pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Pixel) {
            let index = y as usize * self.width as usize + x as usize;
            self.pixels[index] = pixel;
        }

        /// Paints the half-open rectangle `[x, x + width) x [y, y + height)`, clipped to the raster.
        pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, pixel: Pixel) {
            let x_end = x.saturating_add(width).min(self.width);
            let y_end = y.saturating_add(height).min(self.height);
            for py in y..y_end {
                for px in x..x_end {
                    self.set_pixel(px, py, pixel);
                }
            }
        }

        pub fn to_rgba_image(&self) -> RgbaImage {
            RgbaImage::from_fn(self.width, self.height, |x, y| self.pixel(x, y).into())
        }
    }

    impl From<&RgbaImage> for Raster {
        fn from(image: &RgbaImage) -> Self {
            Self {
                width: image.width(),
                height: image.height(),
                pixels: image.pixels().map(|rgba| Pixel::from(*rgba)).collect(),
            }
        }
    }

    impl From<RgbaImage> for Raster {
        fn from(image: RgbaImage) -> Self {
            Raster::from(&image)
        }
    }

    impl From<&DynamicImage> for Raster {
        fn from(image: &DynamicImage) -> Self {
            Raster::from(image.to_rgba8())
        }
    }
}
