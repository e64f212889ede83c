// texture.rs - Decoded surface images
//
// A texture is the CPU copy of what the renderer samples: RGBA8 pixels plus
// which role the image plays.

use image::RgbaImage;

use crate::error::{Result, ViewerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureKind {
    /// Depth map returned by the inference service.
    DepthMap,
    /// The photo the user uploaded.
    Original,
}

#[derive(Debug, Clone)]
pub struct Texture {
    kind: TextureKind,
    pixels: RgbaImage,
}

impl Texture {
    /// Decode PNG/JPEG bytes into RGBA8.
    pub fn decode(kind: TextureKind, bytes: &[u8]) -> Result<Self> {
        let pixels = image::load_from_memory(bytes)?.to_rgba8();
        Self::from_rgba(kind, pixels)
    }

    pub fn from_rgba(kind: TextureKind, pixels: RgbaImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(ViewerError::EmptyImage { width, height });
        }
        Ok(Self { kind, pixels })
    }

    pub fn kind(&self) -> TextureKind { self.kind }
    pub fn width(&self) -> u32 { self.pixels.width() }
    pub fn height(&self) -> u32 { self.pixels.height() }
    pub fn pixels(&self) -> &RgbaImage { &self.pixels }
    pub fn as_bytes(&self) -> &[u8] { self.pixels.as_raw() }
}
