// sampler.rs - Red channel -> normalized depth
//
// No resampling: the grid always has the source image's exact resolution.

use std::borrow::Cow;

use image::{DynamicImage, RgbaImage};

use super::DepthGrid;
use crate::error::{Result, ViewerError};
use crate::texture::Texture;

/// A decoded image that can hand out tightly packed RGBA8 pixels.
pub trait RgbaRaster {
    fn dimensions(&self) -> (u32, u32);

    /// Row-major RGBA bytes, at least `w * h * 4` long.
    fn rgba(&self) -> Result<Cow<'_, [u8]>>;
}

impl RgbaRaster for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn rgba(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_raw()))
    }
}

impl RgbaRaster for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgba(&self) -> Result<Cow<'_, [u8]>> {
        match self.as_rgba8() {
            Some(img) => Ok(Cow::Borrowed(img.as_raw())),
            None => Ok(Cow::Owned(self.to_rgba8().into_raw())),
        }
    }
}

impl RgbaRaster for Texture {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgba(&self) -> Result<Cow<'_, [u8]>> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

/// Sample the red channel of every pixel as `r / 255`.
pub fn sample_depth<R: RgbaRaster + ?Sized>(raster: &R) -> Result<DepthGrid> {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return Err(ViewerError::EmptyImage { width, height });
    }

    let count = width as usize * height as usize;
    let bytes = raster.rgba()?;
    if bytes.len() < count * 4 {
        return Err(ViewerError::Decode(format!(
            "expected {} RGBA bytes for {}x{}, got {}",
            count * 4,
            width,
            height,
            bytes.len()
        )));
    }

    let values: Vec<f32> = bytes
        .chunks_exact(4)
        .take(count)
        .map(|px| px[0] as f32 / 255.0)
        .collect();

    log::debug!("sampled {}x{} depth grid", width, height);
    DepthGrid::from_vec(width, height, values)
}
