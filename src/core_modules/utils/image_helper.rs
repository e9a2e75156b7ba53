pub mod image_helper {
    use crate::core_modules::raster::raster::Raster;
    use crate::error::{VisionError, VisionResult};
    use image::{ImageEncoder, RgbaImage};
    use std::path::Path;

    /// File extensions the loader accepts, compared case-insensitively.
    pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
    }

    /// Decodes a JPEG, PNG or BMP file into a raster.
    pub fn load_raster(path: impl AsRef<Path>) -> VisionResult<Raster> {
        let path = path.as_ref();
        if !is_supported(path) {
            return Err(VisionError::UnsupportedFormat {
                path: path.to_path_buf(),
            });
        }

        let image = image::open(path)?;
        log::info!(
            "loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Raster::from(&image))
    }

    /// Writes `image` as a PNG.
    pub fn save(path: impl AsRef<Path>, image: &RgbaImage) -> VisionResult<()> {
        let output = std::io::BufWriter::new(std::fs::File::create(path.as_ref())?);
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(())
    }
}
