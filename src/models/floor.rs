use crate::{
    data_structures::{
        scene_graph::{Leaf, NodeId, SceneGraph, StructuralError},
        transform::{Step, compose},
    },
    models::GROUND_OFFSET,
};

pub const ROOT_NAME: &str = "floor";

/// Side length of the ground plane.
pub const EXTENT: f32 = 10.0;

/// A single quad spread under every building.
pub fn build<G>(graph: &mut SceneGraph<G>, quad: &Leaf<G>) -> Result<NodeId, StructuralError> {
    let root = graph.add_node(
        ROOT_NAME,
        compose(&[GROUND_OFFSET, Step::Scale(EXTENT, EXTENT, 1.0)]),
    );
    graph.add_geometry(root, quad.clone())?;
    Ok(root)
}
