//! Vertex layout, CPU-side meshes and GPU geometry handles.

use std::rc::Rc;

use wgpu::util::DeviceExt;

use crate::{data_structures::texture::TextureId, resources::AssetError};

/// Floats per interleaved vertex: position (3), texture coordinate (2), normal (3).
pub const FLOATS_PER_VERTEX: usize = 8;

pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// The one vertex layout shared by the flat, Gouraud and Phong pipelines.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
    pub normal: [f32; 3],
}

impl Vertex for ModelVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ModelVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 5]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Triangle mesh as it exists before upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawMesh {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

impl RawMesh {
    /// Builds a mesh from a flat `[x, y, z, u, v, nx, ny, nz, ...]` list.
    pub fn from_interleaved(data: &[f32], indices: &[u32]) -> Result<Self, AssetError> {
        if data.len() % FLOATS_PER_VERTEX != 0 {
            return Err(AssetError::BadCounts(format!(
                "{} floats do not form whole vertices of {}",
                data.len(),
                FLOATS_PER_VERTEX
            )));
        }
        let vertices = data
            .chunks_exact(FLOATS_PER_VERTEX)
            .map(|v| ModelVertex {
                position: [v[0], v[1], v[2]],
                tex_coords: [v[3], v[4]],
                normal: [v[5], v[6], v[7]],
            })
            .collect();
        let mesh = Self {
            vertices,
            indices: indices.to_vec(),
        };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Checks that indices form whole triangles over existing vertices.
    pub fn validate(&self) -> Result<(), AssetError> {
        if self.indices.len() % 3 != 0 {
            return Err(AssetError::BadCounts(format!(
                "{} indices do not form whole triangles",
                self.indices.len()
            )));
        }
        let count = self.vertices.len();
        match self.indices.iter().find(|&&i| i as usize >= count) {
            Some(&index) => Err(AssetError::IndexOutOfRange { index, count }),
            None => Ok(()),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// GPU-resident geometry: vertex/index buffers plus a default texture.
///
/// Shared through `Rc` by every scene leaf that instances it.
#[derive(Debug)]
pub struct Mesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
    pub texture: Option<TextureId>,
}

impl Mesh {
    pub fn upload(
        device: &wgpu::Device,
        name: &str,
        mesh: &RawMesh,
        texture: Option<TextureId>,
    ) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", name)),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", name)),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: name.to_string(),
            vertex_buffer,
            index_buffer,
            num_elements: mesh.indices.len() as u32,
            texture,
        }
    }

    /// Frees the GPU buffers. Only call once nothing will draw this mesh again.
    pub fn release(self) {
        self.vertex_buffer.destroy();
        self.index_buffer.destroy();
    }
}

/// Turns raw meshes and asset names into shared geometry.
///
/// The GPU implementation uploads buffers; tests substitute a factory whose
/// geometry is plain data.
pub trait GeometryFactory {
    type Geometry;

    fn create_geometry(
        &mut self,
        label: &str,
        mesh: &RawMesh,
        texture: Option<TextureId>,
    ) -> Result<Rc<Self::Geometry>, AssetError>;

    fn load_mesh(&mut self, file_name: &str) -> Result<RawMesh, AssetError>;

    fn load_texture(&mut self, file_name: &str) -> Result<TextureId, AssetError>;

    /// Loads a mesh asset and uploads it in one go.
    fn load_geometry(
        &mut self,
        file_name: &str,
        texture: Option<TextureId>,
    ) -> Result<Rc<Self::Geometry>, AssetError> {
        let mesh = self.load_mesh(file_name)?;
        self.create_geometry(file_name, &mesh, texture)
    }
}
