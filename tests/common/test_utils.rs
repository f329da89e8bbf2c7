use std::{collections::HashMap, path::PathBuf, rc::Rc};

use cgmath::Matrix4;
use skyline::{
    data_structures::{
        model::{GeometryFactory, RawMesh},
        scene_graph::{Child, Leaf, NodeId, SceneGraph},
        texture::TextureId,
    },
    pipelines::{LightingModel, light::LightingParameters},
    render::LightingPipeline,
    resources::{self, AssetError},
};

/// Stand-in for uploaded geometry.
#[derive(Debug, PartialEq)]
pub(crate) struct FakeGeometry {
    pub label: String,
    pub triangles: usize,
    pub texture: Option<TextureId>,
}

pub(crate) fn fake_leaf(label: &str) -> Leaf<FakeGeometry> {
    Leaf::new(Rc::new(FakeGeometry {
        label: label.to_string(),
        triangles: 12,
        texture: None,
    }))
}

pub(crate) fn asset_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets")
}

/// Geometry factory without a GPU. Meshes come from the crate's asset
/// directory; textures are only named.
#[derive(Default)]
pub(crate) struct FakeFactory {
    pub textures: Vec<String>,
    pub created: Vec<String>,
    pub meshes_loaded: HashMap<String, usize>,
}

impl FakeFactory {
    pub fn texture_name(&self, id: TextureId) -> Option<&str> {
        // id 0 is reserved for the default texture
        self.textures.get(id.0.checked_sub(1)?).map(String::as_str)
    }
}

impl GeometryFactory for FakeFactory {
    type Geometry = FakeGeometry;

    fn create_geometry(
        &mut self,
        label: &str,
        mesh: &RawMesh,
        texture: Option<TextureId>,
    ) -> Result<Rc<FakeGeometry>, AssetError> {
        mesh.validate()?;
        self.created.push(label.to_string());
        Ok(Rc::new(FakeGeometry {
            label: label.to_string(),
            triangles: mesh.triangle_count(),
            texture,
        }))
    }

    fn load_mesh(&mut self, file_name: &str) -> Result<RawMesh, AssetError> {
        *self.meshes_loaded.entry(file_name.to_string()).or_default() += 1;
        resources::load_mesh(&asset_dir(), file_name)
    }

    fn load_texture(&mut self, file_name: &str) -> Result<TextureId, AssetError> {
        let idx = match self.textures.iter().position(|t| t == file_name) {
            Some(idx) => idx,
            None => {
                self.textures.push(file_name.to_string());
                self.textures.len() - 1
            }
        };
        Ok(TextureId(idx + 1))
    }
}

/// One recorded draw call.
pub(crate) struct Draw<G> {
    pub leaf: Leaf<G>,
    pub model: Matrix4<f32>,
}

/// Lighting pipeline that remembers what it was asked to do.
pub(crate) struct RecordingPipeline<G> {
    pub lighting_model: LightingModel,
    pub bound: Vec<LightingParameters>,
    pub draws: Vec<Draw<G>>,
}

impl<G> RecordingPipeline<G> {
    pub fn new(lighting_model: LightingModel) -> Self {
        Self {
            lighting_model,
            bound: Vec::new(),
            draws: Vec::new(),
        }
    }
}

impl<G> LightingPipeline<G> for RecordingPipeline<G> {
    fn lighting_model(&self) -> LightingModel {
        self.lighting_model
    }

    fn bind(
        &mut self,
        params: &LightingParameters,
        _view: &Matrix4<f32>,
        _projection: &Matrix4<f32>,
    ) {
        self.bound.push(*params);
    }

    fn draw(&mut self, leaf: &Leaf<G>, model: &Matrix4<f32>) {
        self.draws.push(Draw {
            leaf: leaf.clone(),
            model: *model,
        });
    }
}

/// World transform of the first node called `name` below `root`, found
/// depth first.
pub(crate) fn world_of<G>(graph: &SceneGraph<G>, root: NodeId, name: &str) -> Option<Matrix4<f32>> {
    let node = graph.node(root)?;
    let here = node.transform;
    if node.name == name {
        return Some(here);
    }
    node.children().iter().find_map(|child| match child {
        Child::Node(id) => world_of(graph, *id, name).map(|below| here * below),
        Child::Geometry(_) => None,
    })
}
