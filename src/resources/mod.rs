/**
 * This module contains all logic for loading meshes and textures from the
 * asset directory, plus the meshes the scene builds without any file.
 */
pub mod mesh;
pub mod obj;
pub mod off;
pub mod shapes;
pub mod texture;

use std::path::Path;

use crate::data_structures::model::RawMesh;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("could not read asset `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("expected an `OFF` header, found `{0}`")]
    BadHeader(String),
    #[error("malformed element counts: {0}")]
    BadCounts(String),
    #[error("line {line}: expected {expected} values, found {found}")]
    VertexArity {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("vertex index {index} is out of range for {count} vertices")]
    IndexOutOfRange { index: u32, count: usize },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("unsupported mesh format for `{0}`")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Obj(#[from] tobj::LoadError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub fn load_string(asset_dir: &Path, file_name: &str) -> Result<String, AssetError> {
    let path = asset_dir.join(file_name);
    std::fs::read_to_string(&path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_binary(asset_dir: &Path, file_name: &str) -> Result<Vec<u8>, AssetError> {
    let path = asset_dir.join(file_name);
    std::fs::read(&path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Loads a polygon mesh, picking the parser from the file extension.
pub fn load_mesh(asset_dir: &Path, file_name: &str) -> Result<RawMesh, AssetError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let parse: fn(&str) -> Result<RawMesh, AssetError> = match extension.as_deref() {
        Some("off") => off::parse_off,
        Some("obj") => obj::parse_obj,
        _ => return Err(AssetError::UnsupportedFormat(file_name.to_string())),
    };
    let mesh = parse(&load_string(asset_dir, file_name)?)?;
    log::info!(
        "loaded {} with {} vertices and {} triangles",
        file_name,
        mesh.vertices.len(),
        mesh.triangle_count()
    );
    Ok(mesh)
}
