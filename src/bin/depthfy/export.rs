// export.rs - Wavefront OBJ output
//
// One `v` and one `vt` per vertex, faces reference both (1-based).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use depthfy::PlaneMesh;

pub fn write_obj(path: &Path, mesh: &PlaneMesh) -> std::io::Result<()> {
    let mut f = BufWriter::new(File::create(path)?);
    write_mesh(&mut f, mesh)?;
    f.flush()
}

pub fn write_mesh<W: Write>(out: &mut W, mesh: &PlaneMesh) -> std::io::Result<()> {
    let (wseg, hseg) = mesh.segments();
    writeln!(out, "# depthfy plane {}x{} segments", wseg, hseg)?;

    for p in mesh.positions().chunks_exact(3) {
        writeln!(out, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for uv in mesh.uvs().chunks_exact(2) {
        writeln!(out, "vt {} {}", uv[0], uv[1])?;
    }
    for tri in mesh.indices().chunks_exact(3) {
        let (a, b, c) = (tri[0] + 1, tri[1] + 1, tri[2] + 1);
        writeln!(out, "f {a}/{a} {b}/{b} {c}/{c}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_cell() {
        let mesh = PlaneMesh::new(2.0, 2.0, 1, 1);
        let mut out = Vec::new();
        write_mesh(&mut out, &mesh).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 4);
        assert!(text.contains("f 1/1 3/3 2/2"));
        assert!(text.contains("v -1 1 0"));
    }
}
