// web/ - wasm-bindgen surface for the browser viewer
//
// JS owns the page, the file input, and the renderer. It calls submit(),
// then sync() per mesh and reads the buffers straight out of wasm memory.

mod canvas;
mod fetch;

pub use canvas::depth_grid_from_image;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::OnceLock;

use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::File;

use crate::config::ViewerConfig;
use crate::render::MeshBuffers;
use crate::service::InferenceClient;
use crate::viewer::{submit, MeshKind, Viewer};
use fetch::{BrowserAlert, FetchTransport};

static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        std::panic::set_hook(Box::new(|info| {
            web_sys::console::error_1(&JsValue::from_str(&info.to_string()));
        }));
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_panic_hook();
    console_log::init_with_level(log::Level::Info)
        .map_err(|e| JsValue::from_str(&format!("Failed to init logger: {}", e)))?;
    Ok(())
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn mesh_kind(kind: &str) -> Result<MeshKind, JsValue> {
    MeshKind::from_str(kind)
        .ok_or_else(|| JsValue::from_str(&format!("unknown mesh kind {:?}", kind)))
}

#[wasm_bindgen]
pub struct DepthViewer {
    viewer: Rc<RefCell<Viewer>>,
    client: Rc<InferenceClient<FetchTransport>>,
    buffers: [MeshBuffers; 2],
}

#[wasm_bindgen]
impl DepthViewer {
    /// `config` is an optional JSON string; missing fields take defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<DepthViewer, JsValue> {
        let config = match config.as_deref() {
            Some(json) => ViewerConfig::from_json(json).map_err(js_err)?,
            None => ViewerConfig::default(),
        };
        let client = InferenceClient::new(FetchTransport, config.service.clone());
        Ok(Self {
            viewer: Rc::new(RefCell::new(Viewer::new(config))),
            client: Rc::new(client),
            buffers: [MeshBuffers::new(), MeshBuffers::new()],
        })
    }

    /// Resolves with the new scene generation; rejects with the error text.
    pub fn submit(&self, file: Option<File>) -> Promise {
        let viewer = Rc::clone(&self.viewer);
        let client = Rc::clone(&self.client);
        future_to_promise(async move {
            let generation = submit(&viewer, &*client, &BrowserAlert, file)
                .await
                .map_err(js_err)?;
            Ok(JsValue::from_f64(generation as f64))
        })
    }

    pub fn is_uploading(&self) -> bool {
        self.viewer.borrow().is_uploading()
    }

    pub fn has_scene(&self) -> bool {
        self.viewer.borrow().scene().is_some()
    }

    pub fn scene_generation(&self) -> f64 {
        self.viewer.borrow().scene().map_or(0.0, |s| s.generation() as f64)
    }

    pub fn depth_map_url(&self) -> Option<String> {
        self.viewer.borrow().urls().map(|u| u.depth_map.clone())
    }

    pub fn original_image_url(&self) -> Option<String> {
        self.viewer.borrow().urls().map(|u| u.original_image.clone())
    }

    /// Copy dirty mesh positions into the render buffers. Returns whether the
    /// renderer needs to re-upload. Throws on an unknown `kind`.
    pub fn sync(&mut self, kind: &str) -> Result<bool, JsValue> {
        let kind = mesh_kind(kind)?;
        let buffers = &mut self.buffers[kind.index()];
        let mut viewer = self.viewer.borrow_mut();
        Ok(match viewer.scene_mut() {
            Some(scene) => buffers.sync(&mut scene.view_mut(kind).mesh),
            None => {
                buffers.clear();
                false
            }
        })
    }

    fn buffers(&self, kind: &str) -> Result<&MeshBuffers, JsValue> {
        Ok(&self.buffers[mesh_kind(kind)?.index()])
    }

    // Buffer accessors for the renderer
    pub fn positions_ptr(&self, kind: &str) -> Result<*const f32, JsValue> { Ok(self.buffers(kind)?.positions_ptr()) }
    pub fn positions_len(&self, kind: &str) -> Result<usize, JsValue> { Ok(self.buffers(kind)?.positions_len()) }
    pub fn uvs_ptr(&self, kind: &str) -> Result<*const f32, JsValue> { Ok(self.buffers(kind)?.uvs_ptr()) }
    pub fn uvs_len(&self, kind: &str) -> Result<usize, JsValue> { Ok(self.buffers(kind)?.uvs_len()) }
    pub fn indices_ptr(&self, kind: &str) -> Result<*const u32, JsValue> { Ok(self.buffers(kind)?.indices_ptr()) }
    pub fn indices_len(&self, kind: &str) -> Result<usize, JsValue> { Ok(self.buffers(kind)?.indices_len()) }

    /// RGBA8 pixels of the texture drawn on `kind`; null without a scene.
    pub fn texture_ptr(&self, kind: &str) -> Result<*const u8, JsValue> {
        let kind = mesh_kind(kind)?;
        let viewer = self.viewer.borrow();
        Ok(viewer
            .scene()
            .map_or(std::ptr::null(), |s| s.view_of(kind).texture.as_bytes().as_ptr()))
    }

    pub fn texture_width(&self, kind: &str) -> Result<u32, JsValue> {
        let kind = mesh_kind(kind)?;
        let viewer = self.viewer.borrow();
        Ok(viewer.scene().map_or(0, |s| s.view_of(kind).texture.width()))
    }

    pub fn texture_height(&self, kind: &str) -> Result<u32, JsValue> {
        let kind = mesh_kind(kind)?;
        let viewer = self.viewer.borrow();
        Ok(viewer.scene().map_or(0, |s| s.view_of(kind).texture.height()))
    }
}
