//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture,
//! and [`load_texture`] which never fails on a bad image file.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use spincube_core::{PixelFormat, TextureImage};

/// Internal and client formats used to upload `format`.
fn gl_formats(format: PixelFormat) -> (i32, u32) {
    match format {
        PixelFormat::Red => (glow::R8 as i32, glow::RED),
        PixelFormat::Rgb => (glow::RGB8 as i32, glow::RGB),
        PixelFormat::Rgba => (glow::RGBA8 as i32, glow::RGBA),
    }
}

/// Channel swizzle applied when sampling `format`. Single-channel maps are
/// broadcast so a grey map samples as grey instead of red.
fn swizzle_mask(format: PixelFormat) -> [u32; 4] {
    match format {
        PixelFormat::Red => [glow::RED, glow::RED, glow::RED, glow::ONE],
        PixelFormat::Rgb | PixelFormat::Rgba => [glow::RED, glow::GREEN, glow::BLUE, glow::ALPHA],
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
    mip_levels: u32,
}

impl Texture {
    /// Uploads a prepared image with a full mipmap chain, repeat wrapping and
    /// trilinear filtering.
    pub fn new(gl: &Arc<glow::Context>, image: &TextureImage) -> Result<Self, String> {
        let (internal_format, format) = gl_formats(image.format());
        unsafe {
            let texture = gl.create_texture()?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format,
                image.width() as i32,
                image.height() as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            let swizzle_params = [
                glow::TEXTURE_SWIZZLE_R,
                glow::TEXTURE_SWIZZLE_G,
                glow::TEXTURE_SWIZZLE_B,
                glow::TEXTURE_SWIZZLE_A,
            ];
            for (param, source) in swizzle_params.into_iter().zip(swizzle_mask(image.format())) {
                gl.tex_parameter_i32(glow::TEXTURE_2D, param, source as i32);
            }
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width: image.width(),
                height: image.height(),
                mip_levels: image.mip_level_count(),
            })
        }
    }

    /// Creates a texture object without any image storage. Sampling it is
    /// harmless and yields black.
    pub fn empty(gl: &Arc<glow::Context>) -> Result<Self, String> {
        unsafe {
            let texture = gl.create_texture()?;
            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width: 0,
                height: 0,
                mip_levels: 0,
            })
        }
    }

    /// Returns `true` when no image was uploaded to this texture.
    pub fn is_empty(&self) -> bool {
        self.mip_levels == 0
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

/// Loads the image at `path` into a new texture.
///
/// A file that cannot be read or decoded is logged and replaced by an
/// [empty](Texture::empty) texture. The only error left is the GL failing to
/// allocate a texture object at all.
pub fn load_texture(gl: &Arc<glow::Context>, path: &Path) -> Result<Texture, String> {
    match TextureImage::load(path) {
        Ok(image) => {
            let texture = Texture::new(gl, &image)?;
            log::debug!(
                "loaded {} ({}x{}, {:?}, {} mip levels)",
                path.display(),
                texture.width(),
                texture.height(),
                image.format(),
                texture.mip_levels,
            );
            Ok(texture)
        }
        Err(e) => {
            log::error!("{e}");
            Texture::empty(gl)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gl_formats() {
        assert_eq!(gl_formats(PixelFormat::Red), (glow::R8 as i32, glow::RED));
        assert_eq!(gl_formats(PixelFormat::Rgb), (glow::RGB8 as i32, glow::RGB));
        assert_eq!(gl_formats(PixelFormat::Rgba), (glow::RGBA8 as i32, glow::RGBA));
    }

    #[test]
    fn test_single_channel_maps_sample_as_grey() {
        let [r, g, b, a] = swizzle_mask(PixelFormat::Red);
        assert_eq!((r, g, b), (glow::RED, glow::RED, glow::RED));
        assert_eq!(a, glow::ONE);

        let identity = [glow::RED, glow::GREEN, glow::BLUE, glow::ALPHA];
        assert_eq!(swizzle_mask(PixelFormat::Rgb), identity);
        assert_eq!(swizzle_mask(PixelFormat::Rgba), identity);
    }

    #[test]
    fn test_bundled_specular_map_is_broadcast() {
        let textures = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/textures");
        let image = TextureImage::load(textures.join("cube_specular.png")).unwrap();
        assert_eq!(image.format(), PixelFormat::Red);
        let [r, g, b, _] = swizzle_mask(image.format());
        assert!(r == g && g == b);
    }
}
