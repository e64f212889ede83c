// depthfy - Displace a plane with a depth map, offline
//
// Pipeline:
//   1. Load depth map (and optionally the original photo)
//   2. Sample the depth map's red channel into a grid
//   3. Build the depth-shaded and photo-shaded meshes
//   4. Report grid statistics, optionally export the mesh as OBJ
//
// Usage: cargo run --bin depthfy -- <depth_map> [--original <photo>] [--obj out.obj]

#[cfg(not(target_arch = "wasm32"))]
mod export;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

// WASM builds need a main function; the library is the real entry there
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::{Path, PathBuf};

    use anyhow::Context;
    use clap::Parser;
    use depthfy::{MeshKind, PlaneConfig, Texture, TextureKind, ViewerScene, sample_depth};

    use crate::export;

    #[derive(Parser, Debug)]
    #[command(name = "depthfy", about = "Turn a depth map into a displaced plane mesh")]
    struct Args {
        /// Depth map image (grayscale, depth in the red channel)
        depth_map: PathBuf,

        /// Photo to texture the second mesh with; defaults to the depth map
        #[arg(long)]
        original: Option<PathBuf>,

        #[arg(long, default_value_t = 2.0)]
        plane_width: f32,

        #[arg(long, default_value_t = 2.0)]
        plane_height: f32,

        /// Write the displaced mesh as Wavefront OBJ
        #[arg(long)]
        obj: Option<PathBuf>,
    }

    fn load(kind: TextureKind, path: &Path) -> anyhow::Result<Texture> {
        let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Texture::decode(kind, &bytes).with_context(|| format!("failed to decode {}", path.display()))
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        let args = Args::parse();
        let plane = PlaneConfig { width: args.plane_width, height: args.plane_height };

        log::info!("Processing {}...", args.depth_map.display());
        let depth = load(TextureKind::DepthMap, &args.depth_map)?;
        let original = match &args.original {
            Some(path) => load(TextureKind::Original, path)?,
            None => Texture::from_rgba(TextureKind::Original, depth.pixels().clone())?,
        };

        log::info!("  Sampling depth...");
        let grid = sample_depth(&depth)?;
        let (min_d, max_d) = grid.min_max();
        log::info!(
            "    {}x{} grid, depth {:.3}..{:.3}, mean {:.3}",
            grid.width(),
            grid.height(),
            min_d,
            max_d,
            grid.mean()
        );

        log::info!("  Displacing meshes...");
        let scene = ViewerScene::build(1, grid, depth, original, &plane)?;
        let mesh = &scene.view_of(MeshKind::Depth).mesh;
        log::info!(
            "    {} vertices, {} triangles per mesh",
            mesh.vertex_count(),
            mesh.triangle_count()
        );

        if let Some(path) = &args.obj {
            export::write_obj(path, mesh)
                .with_context(|| format!("failed to write {}", path.display()))?;
            log::info!("  Wrote {}", path.display());
        }

        log::info!("Done!");
        Ok(())
    }
}
