// events.rs - "New depth grid" notification
//
// Single slot, single consumer. Each published grid is delivered at most
// once; publishing again before delivery replaces the pending one.

use crate::depth::DepthGrid;
use crate::service::AssetUrls;
use crate::texture::Texture;

/// A freshly sampled grid together with the textures it came from.
#[derive(Debug, Clone)]
pub struct DepthGridReady {
    pub generation: u64,
    pub grid: DepthGrid,
    pub depth_texture: Texture,
    pub original_texture: Texture,
    pub urls: AssetUrls,
}

#[derive(Debug, Default)]
pub struct GridSignal {
    pending: Option<DepthGridReady>,
    published: u64,
}

impl GridSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(
        &mut self,
        grid: DepthGrid,
        depth_texture: Texture,
        original_texture: Texture,
        urls: AssetUrls,
    ) -> u64 {
        self.published += 1;
        if let Some(stale) = self.pending.take() {
            log::debug!("depth grid {} superseded before dispatch", stale.generation);
        }
        self.pending = Some(DepthGridReady {
            generation: self.published,
            grid,
            depth_texture,
            original_texture,
            urls,
        });
        self.published
    }

    pub fn take(&mut self) -> Option<DepthGridReady> {
        self.pending.take()
    }
}
