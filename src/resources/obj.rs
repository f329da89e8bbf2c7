use std::io::{BufReader, Cursor};

use crate::{
    data_structures::model::{ModelVertex, RawMesh},
    resources::{AssetError, mesh},
};

/// Parses Wavefront OBJ text into one mesh. Every object in the file is
/// merged, materials are ignored since texturing happens per scene leaf.
pub fn parse_obj(text: &str) -> Result<RawMesh, AssetError> {
    let mut obj_reader = BufReader::new(Cursor::new(text));
    let (models, _) = tobj::load_obj_buf(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Ok(Default::default()),
    )?;

    let mut out = RawMesh::default();
    let mut missing_normals = false;
    for m in models {
        let base = out.vertices.len() as u32;
        missing_normals |= m.mesh.normals.is_empty();
        out.vertices
            .extend((0..m.mesh.positions.len() / 3).map(|i| ModelVertex {
                position: [
                    m.mesh.positions[i * 3],
                    m.mesh.positions[i * 3 + 1],
                    m.mesh.positions[i * 3 + 2],
                ],
                tex_coords: [
                    m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                    1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                ],
                normal: [
                    m.mesh.normals.get(i * 3).map_or(0.0, |f| *f),
                    m.mesh.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                    m.mesh.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
                ],
            }));
        out.indices.extend(m.mesh.indices.iter().map(|i| i + base));
    }
    out.validate()?;
    if missing_normals {
        mesh::compute_vertex_normals(&mut out);
    }
    Ok(out)
}
