// depth/ - Depth sampling
//
// Turns a decoded depth image into a grid of normalized scalars, one per
// pixel, in the image's native row-major order.

mod grid;
mod sampler;

pub use grid::DepthGrid;
pub use sampler::{sample_depth, RgbaRaster};
