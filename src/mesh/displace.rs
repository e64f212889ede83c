// displace.rs - Write depth into vertex Z
//
// Grid index i maps to vertex i, no coordinate transform. No smoothing or
// clamping beyond the sampler's own [0, 1] normalization.

use super::PlaneMesh;
use crate::depth::DepthGrid;
use crate::error::{Result, ViewerError};

/// Set each vertex's Z to the matching depth sample and mark the mesh dirty.
///
/// Fails with `DimensionMismatch`, leaving the mesh untouched, when the
/// vertex count differs from the grid's cell count.
pub fn displace(mesh: &mut PlaneMesh, grid: &DepthGrid) -> Result<()> {
    let expected = mesh.vertex_count();
    let actual = grid.len();
    if expected != actual {
        return Err(ViewerError::DimensionMismatch { expected, actual });
    }

    for (z, depth) in mesh.z_mut().zip(grid.iter()) {
        *z = depth;
    }
    mesh.mark_dirty();
    Ok(())
}
