// viewer/ - Upload flow and displayed scene
//
// submit() is the only async path: claim the upload slot, talk to the
// service, then decode -> sample -> publish -> dispatch in one synchronous
// step. The scene is replaced only when every step succeeded, so a failed
// upload leaves whatever was on screen untouched.

mod events;
mod guard;
mod scene;

pub use events::{DepthGridReady, GridSignal};
pub use guard::{UploadGuard, UploadTicket};
pub use scene::{MeshKind, MeshView, ViewerScene};

use std::cell::RefCell;

use crate::config::ViewerConfig;
use crate::depth::sample_depth;
use crate::error::{Result, ViewerError};
use crate::service::{AssetUrls, FetchedAssets, InferenceClient, PickedFile, Transport};
use crate::texture::{Texture, TextureKind};

/// User-facing alerts.
pub trait Notifier {
    fn alert(&self, message: &str);
}

pub struct Viewer {
    config: ViewerConfig,
    guard: UploadGuard,
    signal: GridSignal,
    scene: Option<ViewerScene>,
    urls: Option<AssetUrls>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            guard: UploadGuard::new(),
            signal: GridSignal::new(),
            scene: None,
            urls: None,
        }
    }

    pub fn is_uploading(&self) -> bool { self.guard.is_busy() }
    pub fn scene(&self) -> Option<&ViewerScene> { self.scene.as_ref() }
    pub fn scene_mut(&mut self) -> Option<&mut ViewerScene> { self.scene.as_mut() }
    pub fn urls(&self) -> Option<&AssetUrls> { self.urls.as_ref() }

    /// Validate the submission and claim the upload slot.
    pub fn begin_upload<F>(&self, file: Option<F>) -> Result<(UploadTicket, F)> {
        let file = file.ok_or(ViewerError::NoFileSelected)?;
        let ticket = self.guard.try_acquire().ok_or(ViewerError::UploadInFlight)?;
        Ok((ticket, file))
    }

    /// Turn downloaded images into a new scene. Returns the scene generation.
    pub fn complete(&mut self, ticket: UploadTicket, assets: FetchedAssets) -> Result<u64> {
        let _ticket = ticket;

        let depth_texture = Texture::decode(TextureKind::DepthMap, &assets.depth_map)?;
        let original_texture = Texture::decode(TextureKind::Original, &assets.original_image)?;
        let grid = sample_depth(&depth_texture)?;

        let generation = self.signal.publish(grid, depth_texture, original_texture, assets.urls);
        self.dispatch()?;
        Ok(generation)
    }

    /// Consume the pending grid, if any, and swap in the scene built from it.
    pub fn dispatch(&mut self) -> Result<bool> {
        let Some(ready) = self.signal.take() else {
            return Ok(false);
        };

        let scene = ViewerScene::build(
            ready.generation,
            ready.grid,
            ready.depth_texture,
            ready.original_texture,
            &self.config.plane,
        )?;

        log::info!(
            "scene {} ready: {}x{} grid, {} vertices per mesh",
            scene.generation(),
            scene.grid().width(),
            scene.grid().height(),
            scene.view_of(MeshKind::Depth).mesh.vertex_count()
        );
        self.scene = Some(scene);
        self.urls = Some(ready.urls);
        Ok(true)
    }
}

/// Run one submission end to end.
///
/// The upload slot is claimed before the file is read. Missing or
/// unreadable files and network/server failures raise one alert and leave
/// the viewer as it was. Decode and displacement failures are logged and
/// returned without an alert.
pub async fn submit<T, N, F>(
    viewer: &RefCell<Viewer>,
    client: &InferenceClient<T>,
    notifier: &N,
    file: Option<F>,
) -> Result<u64>
where
    T: Transport,
    N: Notifier + ?Sized,
    F: PickedFile,
{
    let started = viewer.borrow().begin_upload(file);
    let (ticket, file) = match started {
        Ok(started) => started,
        Err(err) => {
            report(notifier, &err);
            return Err(err);
        }
    };

    let file = match file.read().await {
        Ok(file) => file,
        Err(err) => {
            drop(ticket);
            report(notifier, &err);
            return Err(err);
        }
    };

    let assets = match client.fetch_assets(&file).await {
        Ok(assets) => assets,
        Err(err) => {
            drop(ticket);
            report(notifier, &err);
            return Err(err);
        }
    };

    let result = viewer.borrow_mut().complete(ticket, assets);
    if let Err(err) = &result {
        log::error!("render pass failed: {}", err);
    }
    result
}

fn report<N: Notifier + ?Sized>(notifier: &N, err: &ViewerError) {
    match err {
        ViewerError::UploadInFlight => log::warn!("submission rejected: {}", err),
        _ => {
            log::warn!("submission failed: {}", err);
            notifier.alert(err.user_message());
        }
    }
}
