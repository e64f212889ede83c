// scene.rs - The two displayed meshes
//
// Both variants get their own PlaneMesh, built from the same grid through
// the same displace call. Only the surface texture differs.

use crate::config::PlaneConfig;
use crate::depth::DepthGrid;
use crate::error::Result;
use crate::mesh::{displace, PlaneMesh};
use crate::texture::Texture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshKind {
    /// Shaded by the depth map itself.
    Depth,
    /// Shaded by the uploaded photo.
    Textured,
}

impl MeshKind {
    pub const ALL: [MeshKind; 2] = [MeshKind::Depth, MeshKind::Textured];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "depth" | "depth_map" => Some(MeshKind::Depth),
            "textured" | "texture" | "original" => Some(MeshKind::Textured),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone)]
pub struct MeshView {
    pub mesh: PlaneMesh,
    pub texture: Texture,
}

#[derive(Debug, Clone)]
pub struct ViewerScene {
    generation: u64,
    grid: DepthGrid,
    views: [MeshView; 2],
}

impl ViewerScene {
    pub fn build(
        generation: u64,
        grid: DepthGrid,
        depth_texture: Texture,
        original_texture: Texture,
        plane: &PlaneConfig,
    ) -> Result<Self> {
        let depth = Self::view(&grid, depth_texture, plane)?;
        let textured = Self::view(&grid, original_texture, plane)?;
        Ok(Self { generation, grid, views: [depth, textured] })
    }

    fn view(grid: &DepthGrid, texture: Texture, plane: &PlaneConfig) -> Result<MeshView> {
        let mut mesh = PlaneMesh::for_grid(grid.width(), grid.height(), plane);
        displace(&mut mesh, grid)?;
        Ok(MeshView { mesh, texture })
    }

    pub fn generation(&self) -> u64 { self.generation }
    pub fn grid(&self) -> &DepthGrid { &self.grid }

    pub fn view_of(&self, kind: MeshKind) -> &MeshView {
        &self.views[kind.index()]
    }

    pub fn view_mut(&mut self, kind: MeshKind) -> &mut MeshView {
        &mut self.views[kind.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::TextureKind;
    use image::{Rgba, RgbaImage};

    #[test]
    fn both_views_share_geometry() {
        let grid = DepthGrid::from_vec(3, 2, vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]).unwrap();
        let depth = Texture::from_rgba(TextureKind::DepthMap, RgbaImage::new(3, 2)).unwrap();
        let photo =
            Texture::from_rgba(TextureKind::Original, RgbaImage::from_pixel(6, 4, Rgba([1, 2, 3, 255])))
                .unwrap();

        let scene = ViewerScene::build(7, grid, depth, photo, &PlaneConfig::default()).unwrap();

        let a = scene.view_of(MeshKind::Depth);
        let b = scene.view_of(MeshKind::Textured);
        assert_eq!(a.mesh.positions(), b.mesh.positions());
        assert_eq!(a.texture.kind(), TextureKind::DepthMap);
        assert_eq!(b.texture.kind(), TextureKind::Original);
        assert_eq!(scene.generation(), 7);
        assert_eq!(a.mesh.position(5).unwrap()[2], 1.0);
    }

    #[test]
    fn kind_names() {
        assert_eq!(MeshKind::from_str("Depth"), Some(MeshKind::Depth));
        assert_eq!(MeshKind::from_str(" original "), Some(MeshKind::Textured));
        assert_eq!(MeshKind::from_str("normals"), None);
        assert_eq!(MeshKind::from_str("textrued"), None);
        assert_eq!(MeshKind::from_str(""), None);
    }
}
