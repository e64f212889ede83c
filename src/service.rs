// service.rs - Inference service client
//
// POST the photo as multipart form data, get back two relative URLs, then
// GET both images. Every non-2xx status or unreadable body is a
// NetworkOrServer error.

use serde::Deserialize;

use crate::config::ServiceConfig;
use crate::error::{Result, ViewerError};

/// A file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { name: name.into(), bytes, mime: None }
    }
}

/// Something the user picked whose bytes may still have to be read.
/// Read failures map to `FileRead`.
#[allow(async_fn_in_trait)]
pub trait PickedFile: Sized {
    async fn read(self) -> Result<UploadFile>;
}

impl PickedFile for UploadFile {
    async fn read(self) -> Result<UploadFile> {
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn into_success(self, what: &str) -> Result<Vec<u8>> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(ViewerError::NetworkOrServer(format!(
                "{} returned status {}",
                what, self.status
            )))
        }
    }
}

/// HTTP plumbing. Transport failures map to `NetworkOrServer`; status codes
/// are reported as-is and judged by the client.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_file(&self, url: &str, field: &str, file: &UploadFile) -> Result<HttpResponse>;
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// Body of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub depth_map_url: String,
    pub original_image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    pub depth_map: String,
    pub original_image: String,
}

/// Everything one upload produces, still encoded.
#[derive(Debug, Clone)]
pub struct FetchedAssets {
    pub urls: AssetUrls,
    pub depth_map: Vec<u8>,
    pub original_image: Vec<u8>,
}

/// Join a service path onto the base URL. Absolute URLs pass through.
pub fn resolve_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

pub struct InferenceClient<T> {
    transport: T,
    config: ServiceConfig,
}

impl<T: Transport> InferenceClient<T> {
    pub fn new(transport: T, config: ServiceConfig) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &T { &self.transport }

    /// Send the photo, return where the depth map and original now live.
    pub async fn upload(&self, file: &UploadFile) -> Result<AssetUrls> {
        let url = resolve_url(&self.config.base_url, &self.config.upload_path);
        log::info!("uploading {} ({} bytes) to {}", file.name, file.bytes.len(), url);

        let body = self
            .transport
            .post_file(&url, &self.config.file_field, file)
            .await?
            .into_success("upload")?;
        let resp: UploadResponse = serde_json::from_slice(&body)
            .map_err(|e| ViewerError::NetworkOrServer(format!("malformed upload response: {}", e)))?;

        Ok(AssetUrls {
            depth_map: resolve_url(&self.config.base_url, &resp.depth_map_url),
            original_image: resolve_url(&self.config.base_url, &resp.original_image_url),
        })
    }

    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("fetching {}", url);
        self.transport.get(url).await?.into_success(url)
    }

    /// Upload, then download both resulting images.
    pub async fn fetch_assets(&self, file: &UploadFile) -> Result<FetchedAssets> {
        let urls = self.upload(file).await?;
        let depth_map = self.fetch_image(&urls.depth_map).await?;
        let original_image = self.fetch_image(&urls.original_image).await?;
        Ok(FetchedAssets { urls, depth_map, original_image })
    }
}
