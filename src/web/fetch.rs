// fetch.rs - Browser HTTP and file access
//
// gloo-net over window.fetch. Multipart bodies go through FormData so the
// browser writes the boundary.

use gloo_net::http::Request;
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, File, FormData};

use crate::error::{Result, ViewerError};
use crate::service::{HttpResponse, PickedFile, Transport, UploadFile};
use crate::viewer::Notifier;

fn network(e: impl std::fmt::Display) -> ViewerError {
    ViewerError::NetworkOrServer(e.to_string())
}

fn js_network(e: JsValue) -> ViewerError {
    ViewerError::NetworkOrServer(format!("{:?}", e))
}

pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post_file(&self, url: &str, field: &str, file: &UploadFile) -> Result<HttpResponse> {
        let form = FormData::new().map_err(js_network)?;
        let blob = to_blob(file).map_err(js_network)?;
        form.append_with_blob_and_filename(field, &blob, &file.name)
            .map_err(js_network)?;

        let resp = Request::post(url)
            .body(form)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        let status = resp.status();
        let body = resp.binary().await.map_err(network)?;
        Ok(HttpResponse { status, body })
    }

    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let resp = Request::get(url).send().await.map_err(network)?;
        let status = resp.status();
        let body = resp.binary().await.map_err(network)?;
        Ok(HttpResponse { status, body })
    }
}

fn to_blob(file: &UploadFile) -> std::result::Result<Blob, JsValue> {
    let parts = Array::new();
    parts.push(&Uint8Array::from(file.bytes.as_slice()));
    match &file.mime {
        Some(mime) => {
            let options = BlobPropertyBag::new();
            options.set_type(mime);
            Blob::new_with_u8_array_sequence_and_options(&parts, &options)
        }
        None => Blob::new_with_u8_array_sequence(&parts),
    }
}

// Copies the picked file out of the browser
impl PickedFile for File {
    async fn read(self) -> Result<UploadFile> {
        let buffer = JsFuture::from(self.array_buffer())
            .await
            .map_err(|e| ViewerError::FileRead(format!("{}: {:?}", self.name(), e)))?;
        let mime = self.type_();
        Ok(UploadFile {
            name: self.name(),
            bytes: Uint8Array::new(&buffer).to_vec(),
            mime: (!mime.is_empty()).then_some(mime),
        })
    }
}

/// window.alert
pub struct BrowserAlert;

impl Notifier for BrowserAlert {
    fn alert(&self, message: &str) {
        let shown = web_sys::window().map(|w| w.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            log::error!("alert failed: {}", message);
        }
    }
}
