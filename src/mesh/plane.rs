// plane.rs - Subdivided plane
//
// Vertex (ix, iy) sits at linear index iy * (wseg + 1) + ix, rows running
// from the top edge (y = +h/2) down. Positions are interleaved xyz so they
// can be handed to the renderer as one flat buffer.

use crate::config::PlaneConfig;

#[derive(Debug, Clone)]
pub struct PlaneMesh {
    wseg: u32,
    hseg: u32,
    positions: Vec<f32>,
    uvs: Vec<f32>,
    indices: Vec<u32>,
    needs_update: bool,
    version: u64,
}

impl PlaneMesh {
    pub fn new(width: f32, height: f32, wseg: u32, hseg: u32) -> Self {
        let cols = wseg + 1;
        let rows = hseg + 1;
        let n = cols as usize * rows as usize;

        let mut positions = Vec::with_capacity(n * 3);
        let mut uvs = Vec::with_capacity(n * 2);

        // Zero segments on an axis collapses it to the center line
        let seg_w = if wseg > 0 { width / wseg as f32 } else { 0.0 };
        let seg_h = if hseg > 0 { height / hseg as f32 } else { 0.0 };
        let half_w = if wseg > 0 { width / 2.0 } else { 0.0 };
        let half_h = if hseg > 0 { height / 2.0 } else { 0.0 };

        for iy in 0..rows {
            let y = iy as f32 * seg_h - half_h;
            let v = if hseg > 0 { 1.0 - iy as f32 / hseg as f32 } else { 0.5 };
            for ix in 0..cols {
                let x = ix as f32 * seg_w - half_w;
                let u = if wseg > 0 { ix as f32 / wseg as f32 } else { 0.5 };
                positions.extend_from_slice(&[x, -y, 0.0]);
                uvs.extend_from_slice(&[u, v]);
            }
        }

        let mut indices = Vec::with_capacity(wseg as usize * hseg as usize * 6);
        for iy in 0..hseg {
            for ix in 0..wseg {
                let a = ix + cols * iy;
                let b = ix + cols * (iy + 1);
                let c = (ix + 1) + cols * (iy + 1);
                let d = (ix + 1) + cols * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Self {
            wseg,
            hseg,
            positions,
            uvs,
            indices,
            needs_update: true,
            version: 0,
        }
    }

    /// Plane with exactly `grid_w * grid_h` vertices.
    pub fn for_grid(grid_w: u32, grid_h: u32, plane: &PlaneConfig) -> Self {
        Self::new(
            plane.width,
            plane.height,
            grid_w.saturating_sub(1),
            grid_h.saturating_sub(1),
        )
    }

    pub fn vertex_count(&self) -> usize { self.positions.len() / 3 }
    pub fn triangle_count(&self) -> usize { self.indices.len() / 3 }
    pub fn segments(&self) -> (u32, u32) { (self.wseg, self.hseg) }

    pub fn positions(&self) -> &[f32] { &self.positions }
    pub fn uvs(&self) -> &[f32] { &self.uvs }
    pub fn indices(&self) -> &[u32] { &self.indices }

    pub fn position(&self, i: usize) -> Option<[f32; 3]> {
        let p = self.positions.get(i * 3..i * 3 + 3)?;
        Some([p[0], p[1], p[2]])
    }

    /// Mutable Z components, one per vertex.
    pub(crate) fn z_mut(&mut self) -> impl Iterator<Item = &mut f32> {
        self.positions.iter_mut().skip(2).step_by(3)
    }

    /// Flag a finished position write for the renderer.
    pub(crate) fn mark_dirty(&mut self) {
        self.needs_update = true;
        self.version += 1;
    }

    /// Positions changed since the renderer last synced.
    pub fn needs_update(&self) -> bool { self.needs_update }

    /// Bumped on every position mutation.
    pub fn version(&self) -> u64 { self.version }

    pub fn mark_synced(&mut self) {
        self.needs_update = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_matches_grid() {
        let mesh = PlaneMesh::for_grid(4, 3, &PlaneConfig::default());
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.segments(), (3, 2));
        assert_eq!(mesh.triangle_count(), 3 * 2 * 2);
    }

    #[test]
    fn layout_starts_top_left() {
        let mesh = PlaneMesh::new(2.0, 2.0, 1, 1);
        assert_eq!(mesh.position(0), Some([-1.0, 1.0, 0.0]));
        assert_eq!(mesh.position(1), Some([1.0, 1.0, 0.0]));
        assert_eq!(mesh.position(2), Some([-1.0, -1.0, 0.0]));
        assert_eq!(mesh.position(3), Some([1.0, -1.0, 0.0]));
        assert_eq!(mesh.position(4), None);
        assert_eq!(mesh.uvs(), &[0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(mesh.indices(), &[0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn indices_in_range() {
        let mesh = PlaneMesh::new(2.0, 1.0, 7, 5);
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices().iter().all(|&i| i < n));
        assert_eq!(mesh.uvs().len(), mesh.vertex_count() * 2);
    }

    #[test]
    fn single_column_collapses_to_center() {
        let mesh = PlaneMesh::for_grid(1, 3, &PlaneConfig::default());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 0);
        for i in 0..3 {
            let p = mesh.position(i).unwrap();
            assert_eq!(p[0], 0.0);
            assert!(p[0].is_finite() && p[1].is_finite());
        }
        assert_eq!(mesh.position(0).unwrap()[1], 1.0);
        assert_eq!(mesh.position(2).unwrap()[1], -1.0);
    }

    #[test]
    fn fresh_mesh_is_dirty_and_flat() {
        let mut mesh = PlaneMesh::new(2.0, 2.0, 2, 2);
        assert!(mesh.needs_update());
        assert!(mesh.positions().chunks(3).all(|p| p[2] == 0.0));
        mesh.mark_synced();
        assert!(!mesh.needs_update());
        assert_eq!(mesh.version(), 0);
    }

    #[test]
    fn z_access_alone_keeps_mesh_clean() {
        let mut mesh = PlaneMesh::new(2.0, 2.0, 1, 1);
        mesh.mark_synced();
        assert_eq!(mesh.z_mut().count(), 4);
        assert!(!mesh.needs_update());
        assert_eq!(mesh.version(), 0);

        mesh.mark_dirty();
        assert!(mesh.needs_update());
        assert_eq!(mesh.version(), 1);
    }
}
