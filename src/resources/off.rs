//! Object File Format (OFF) reader.
//!
//! Faces with more than three corners are fan triangulated around their first
//! corner. OFF carries neither normals nor texture coordinates, so both are
//! derived after parsing.

use crate::{
    data_structures::model::{ModelVertex, RawMesh},
    resources::{AssetError, mesh},
};

pub fn parse_off(text: &str) -> Result<RawMesh, AssetError> {
    // (1-based line number, tokens) for every line that carries data
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| {
            let data = line.split('#').next().unwrap_or("");
            (idx + 1, data.split_whitespace().collect::<Vec<_>>())
        })
        .filter(|(_, tokens)| !tokens.is_empty());

    let (_, header) = lines
        .next()
        .ok_or_else(|| AssetError::BadHeader(String::new()))?;
    if header[0] != "OFF" {
        return Err(AssetError::BadHeader(header.join(" ")));
    }
    // counts may follow the keyword on the same line
    let (count_line, counts) = if header.len() > 1 {
        (0, header[1..].to_vec())
    } else {
        lines
            .next()
            .ok_or_else(|| AssetError::BadCounts("missing element counts".to_string()))?
    };
    if counts.len() < 2 {
        return Err(AssetError::BadCounts(format!(
            "line {}: expected vertex and face counts, found `{}`",
            count_line,
            counts.join(" ")
        )));
    }
    let vertex_count = parse_count(counts[0], count_line)?;
    let face_count = parse_count(counts[1], count_line)?;

    // the header count is untrusted, every vertex needs at least one byte of text
    let mut vertices = Vec::with_capacity(vertex_count.min(text.len()));
    for _ in 0..vertex_count {
        let (line, tokens) = lines.next().ok_or_else(|| {
            AssetError::BadCounts(format!(
                "expected {} vertices, found {}",
                vertex_count,
                vertices.len()
            ))
        })?;
        if tokens.len() != 3 {
            return Err(AssetError::VertexArity {
                line,
                expected: 3,
                found: tokens.len(),
            });
        }
        let mut position = [0.0; 3];
        for (slot, token) in position.iter_mut().zip(&tokens) {
            *slot = token.parse::<f32>().map_err(|e| AssetError::Parse {
                line,
                message: format!("bad coordinate `{}`: {}", token, e),
            })?;
        }
        vertices.push(ModelVertex {
            position,
            ..Default::default()
        });
    }

    let mut indices = Vec::new();
    for parsed in 0..face_count {
        let (line, tokens) = lines.next().ok_or_else(|| {
            AssetError::BadCounts(format!("expected {} faces, found {}", face_count, parsed))
        })?;
        let corners = parse_count(tokens[0], line)?;
        if corners < 3 {
            return Err(AssetError::Parse {
                line,
                message: format!("a face needs at least 3 corners, found {}", corners),
            });
        }
        // trailing values after the corner list are per-face colours and are ignored
        if tokens.len() < corners + 1 {
            return Err(AssetError::VertexArity {
                line,
                expected: corners,
                found: tokens.len() - 1,
            });
        }
        let face = tokens[1..=corners]
            .iter()
            .map(|token| {
                let index = token.parse::<u32>().map_err(|e| AssetError::Parse {
                    line,
                    message: format!("bad vertex index `{}`: {}", token, e),
                })?;
                if index as usize >= vertex_count {
                    return Err(AssetError::IndexOutOfRange {
                        index,
                        count: vertex_count,
                    });
                }
                Ok(index)
            })
            .collect::<Result<Vec<_>, _>>()?;
        indices.extend(fan_triangulate(&face));
    }

    let mut mesh = RawMesh { vertices, indices };
    mesh::compute_vertex_normals(&mut mesh);
    mesh::planar_tex_coords(&mut mesh);
    Ok(mesh)
}

/// `[a, b, c, d, ...]` becomes `(a, b, c), (a, c, d), ...`.
pub fn fan_triangulate(face: &[u32]) -> Vec<u32> {
    face.windows(2)
        .skip(1)
        .flat_map(|pair| [face[0], pair[0], pair[1]])
        .collect()
}

fn parse_count(token: &str, line: usize) -> Result<usize, AssetError> {
    token.parse::<usize>().map_err(|e| {
        AssetError::BadCounts(format!("line {}: `{}` is not a count: {}", line, token, e))
    })
}
