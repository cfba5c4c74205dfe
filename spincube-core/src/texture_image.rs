//! CPU-side texture preparation.
//!
//! Decodes an image file into tightly packed 8-bit pixels in one of the three
//! layouts the GPU side uploads, flipped so that the first row is the bottom one.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};

#[derive(Debug, thiserror::Error)]
pub enum TextureImageError {
    #[error("failed to load texture {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Pixel layout of a prepared texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Red,
    Rgb,
    Rgba,
}

impl PixelFormat {
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Red => 1,
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// Decoded pixel data ready for upload.
#[derive(Debug, Clone)]
pub struct TextureImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<u8>,
}

impl TextureImage {
    /// Loads and prepares the image at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureImageError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| TextureImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(image))
    }

    /// Prepares an already decoded image.
    ///
    /// One channel maps to [`PixelFormat::Red`], three to [`PixelFormat::Rgb`] and
    /// four to [`PixelFormat::Rgba`]. Luma+alpha is widened to RGBA and deeper
    /// sample types are narrowed to 8 bits.
    pub fn from_image(image: DynamicImage) -> Self {
        let image = image.flipv();
        let (width, height) = image.dimensions();
        let (format, pixels) = match image.color().channel_count() {
            1 => (PixelFormat::Red, image.into_luma8().into_raw()),
            3 => (PixelFormat::Rgb, image.into_rgb8().into_raw()),
            _ => (PixelFormat::Rgba, image.into_rgba8().into_raw()),
        };

        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Pixel rows, bottom row first.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Number of levels in a full mipmap chain, down to 1x1.
    pub fn mip_level_count(&self) -> u32 {
        u32::BITS - self.width.max(self.height).leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, ImageBuffer, Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_rgb_image_is_flipped() {
        let mut source = RgbImage::new(4, 2);
        for x in 0..4 {
            source.put_pixel(x, 0, Rgb([255, 0, 0]));
            source.put_pixel(x, 1, Rgb([0, 0, 255]));
        }

        let prepared = TextureImage::from_image(DynamicImage::ImageRgb8(source));
        assert_eq!(prepared.format(), PixelFormat::Rgb);
        assert_eq!((prepared.width(), prepared.height()), (4, 2));
        assert_eq!(prepared.pixels().len(), 4 * 2 * 3);
        // The top row of the file (red) becomes the last uploaded row.
        assert_eq!(&prepared.pixels()[..3], &[0, 0, 255]);
        assert_eq!(&prepared.pixels()[4 * 3..4 * 3 + 3], &[255, 0, 0]);
    }

    #[test]
    fn test_channel_mapping() {
        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(2, 2, Luma([7])));
        let prepared = TextureImage::from_image(gray);
        assert_eq!(prepared.format(), PixelFormat::Red);
        assert_eq!(prepared.pixels(), &[7, 7, 7, 7]);

        let rgba = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 4])));
        let prepared = TextureImage::from_image(rgba);
        assert_eq!(prepared.format(), PixelFormat::Rgba);
        assert_eq!(prepared.pixels(), &[1, 2, 3, 4]);

        let luma_alpha: ImageBuffer<LumaA<u8>, Vec<u8>> =
            ImageBuffer::from_pixel(1, 1, LumaA([9, 128]));
        let prepared = TextureImage::from_image(DynamicImage::ImageLumaA8(luma_alpha));
        assert_eq!(prepared.format(), PixelFormat::Rgba);
        assert_eq!(prepared.pixels(), &[9, 9, 9, 128]);
    }

    #[test]
    fn test_pixel_count_matches_format() {
        let image = DynamicImage::ImageRgb16(ImageBuffer::new(5, 3));
        let prepared = TextureImage::from_image(image);
        assert_eq!(prepared.format(), PixelFormat::Rgb);
        assert_eq!(
            prepared.pixels().len(),
            5 * 3 * prepared.format().channels()
        );
    }

    #[test]
    fn test_mip_level_count() {
        let levels = |w, h| {
            TextureImage::from_image(DynamicImage::ImageRgb8(RgbImage::new(w, h)))
                .mip_level_count()
        };
        assert_eq!(levels(1, 1), 1);
        assert_eq!(levels(2, 2), 2);
        assert_eq!(levels(256, 256), 9);
        assert_eq!(levels(640, 480), 10);
        assert_eq!(levels(1, 1024), 11);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = TextureImage::load("does/not/exist.png").unwrap_err();
        let TextureImageError::Decode { path, .. } = &err;
        assert_eq!(path, Path::new("does/not/exist.png"));
        assert!(err.to_string().contains("does/not/exist.png"));
    }

    #[test]
    fn test_load_bundled_textures() {
        let assets = Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/textures");

        let diffuse = TextureImage::load(assets.join("cube_diffuse.png")).unwrap();
        assert_eq!(diffuse.format(), PixelFormat::Rgb);
        assert_eq!((diffuse.width(), diffuse.height()), (64, 64));
        assert_eq!(diffuse.mip_level_count(), 7);

        let specular = TextureImage::load(assets.join("cube_specular.png")).unwrap();
        assert_eq!(specular.format(), PixelFormat::Red);

        let specular = TextureImage::load(assets.join("tetrahedron_specular.png")).unwrap();
        assert_eq!(specular.format(), PixelFormat::Rgba);
    }
}
