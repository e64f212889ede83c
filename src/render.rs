// render.rs - Renderer-side mesh buffers
//
// The JS renderer reads these straight out of wasm memory through the
// ptr/len accessors:
//   positions = xyz per vertex (f32)
//   uvs       = uv per vertex (f32)
//   indices   = three per triangle (u32)

use crate::mesh::PlaneMesh;

pub struct MeshBuffers {
    positions: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u32>,
    segments: Option<(u32, u32)>,
    version: u64,
}

impl MeshBuffers {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
            segments: None,
            version: 0,
        }
    }

    /// Re-upload a dirty mesh. Topology buffers are rebuilt only when the
    /// segment counts changed. Returns whether anything was copied.
    pub fn sync(&mut self, mesh: &mut PlaneMesh) -> bool {
        let topology_changed = self.segments != Some(mesh.segments());
        if !mesh.needs_update() && !topology_changed {
            return false;
        }

        if topology_changed {
            self.uvs.clear();
            self.uvs.extend_from_slice(mesh.uvs());
            self.indices.clear();
            self.indices.extend_from_slice(mesh.indices());
            self.segments = Some(mesh.segments());
        }

        self.positions.clear();
        self.positions.extend_from_slice(mesh.positions());
        self.version = mesh.version();
        mesh.mark_synced();
        true
    }

    /// Drop everything, e.g. when the scene goes away.
    pub fn clear(&mut self) {
        self.positions.clear();
        self.uvs.clear();
        self.indices.clear();
        self.segments = None;
        self.version = 0;
    }

    pub fn positions(&self) -> &[f32] { &self.positions }
    pub fn uvs(&self) -> &[f32] { &self.uvs }
    pub fn indices(&self) -> &[u32] { &self.indices }
    pub fn version(&self) -> u64 { self.version }

    // Accessors for WASM
    pub fn positions_ptr(&self) -> *const f32 { self.positions.as_ptr() }
    pub fn positions_len(&self) -> usize { self.positions.len() }
    pub fn uvs_ptr(&self) -> *const f32 { self.uvs.as_ptr() }
    pub fn uvs_len(&self) -> usize { self.uvs.len() }
    pub fn indices_ptr(&self) -> *const u32 { self.indices.as_ptr() }
    pub fn indices_len(&self) -> usize { self.indices.len() }
}

impl Default for MeshBuffers {
    fn default() -> Self {
        Self::new()
    }
}
