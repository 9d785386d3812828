//! Wavefront OBJ export

use std::io::{self, Write};

use super::types::UnpackedMesh;

/// Append `mesh` as object `name` to an OBJ stream
///
/// `index_base` is the number of vertices already written to the stream;
/// OBJ indices are global and 1-based. Returns the new base.
pub fn write_obj_object<W: Write>(
    out: &mut W,
    mesh: &UnpackedMesh,
    name: &str,
    index_base: usize,
) -> io::Result<usize> {
    writeln!(out, "o {name}")?;

    for [x, y, z] in &mesh.positions {
        writeln!(out, "v {x:.6} {y:.6} {z:.6}")?;
    }
    for [x, y, z] in &mesh.normals {
        writeln!(out, "vn {x:.6} {y:.6} {z:.6}")?;
    }

    let has_normals = mesh.normals.len() == mesh.positions.len();
    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| index_base + i as usize + 1);
        if has_normals {
            writeln!(out, "f {a}//{a} {b}//{b} {c}//{c}")?;
        } else {
            writeln!(out, "f {a} {b} {c}")?;
        }
    }

    Ok(index_base + mesh.positions.len())
}
