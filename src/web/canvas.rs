// canvas.rs - Rasterize a browser image through an off-screen canvas

use std::borrow::Cow;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlImageElement, OffscreenCanvas, OffscreenCanvasRenderingContext2d};

use crate::depth::{sample_depth, RgbaRaster};
use crate::error::{Result, ViewerError};

fn decode(e: JsValue) -> ViewerError {
    ViewerError::Decode(format!("{:?}", e))
}

/// An already-loaded <img>, read back at its natural size.
pub struct ImageElementRaster<'a>(pub &'a HtmlImageElement);

impl RgbaRaster for ImageElementRaster<'_> {
    fn dimensions(&self) -> (u32, u32) {
        (self.0.natural_width(), self.0.natural_height())
    }

    fn rgba(&self) -> Result<Cow<'_, [u8]>> {
        let (w, h) = self.dimensions();
        let canvas = OffscreenCanvas::new(w, h).map_err(decode)?;
        let ctx = canvas
            .get_context("2d")
            .map_err(decode)?
            .ok_or_else(|| ViewerError::Decode("2d context unavailable".into()))?
            .dyn_into::<OffscreenCanvasRenderingContext2d>()
            .map_err(|_| ViewerError::Decode("unexpected 2d context type".into()))?;

        ctx.draw_image_with_html_image_element(self.0, 0.0, 0.0)
            .map_err(decode)?;
        let data = ctx
            .get_image_data(0.0, 0.0, w as f64, h as f64)
            .map_err(decode)?;
        Ok(Cow::Owned(data.data().0))
    }
}

/// Depth grid of a loaded image element, row-major.
#[wasm_bindgen]
pub fn depth_grid_from_image(img: &HtmlImageElement) -> std::result::Result<js_sys::Float32Array, JsValue> {
    let grid = sample_depth(&ImageElementRaster(img)).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(js_sys::Float32Array::from(grid.to_vec().as_slice()))
}
