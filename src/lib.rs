// ============================================================================
// DEPTHFY - Depth map -> displaced plane meshes for the browser viewer
// ============================================================================
//
// Pipeline per upload:
//   1. Send the photo to the inference service, get depth map + original URLs
//   2. Decode both images
//   3. Sample the depth map's red channel into a DepthGrid
//   4. Displace two plane meshes (depth-shaded, photo-shaded) from that grid
//   5. Hand positions/uvs/indices to the JS renderer via MeshBuffers

pub mod config;
pub mod depth;
pub mod error;
pub mod mesh;
pub mod render;
pub mod service;
pub mod texture;
pub mod viewer;

#[cfg(target_arch = "wasm32")]
mod web;

pub use config::{PlaneConfig, ServiceConfig, ViewerConfig};
pub use depth::{sample_depth, DepthGrid, RgbaRaster};
pub use error::{Result, ViewerError};
pub use mesh::{displace, PlaneMesh};
pub use render::MeshBuffers;
pub use service::{
    AssetUrls, FetchedAssets, HttpResponse, InferenceClient, PickedFile, Transport, UploadFile,
};
pub use texture::{Texture, TextureKind};
pub use viewer::{submit, MeshKind, Notifier, Viewer, ViewerScene};

#[cfg(target_arch = "wasm32")]
pub use web::{DepthViewer, depth_grid_from_image};
