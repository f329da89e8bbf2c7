//! Tower A, nine bundled square tubes that stop at four different heights.

use crate::{
    data_structures::{
        scene_graph::{Leaf, NodeId, SceneGraph, StructuralError},
        transform::{Step, compose},
    },
    models::{GROUND_OFFSET, Segment, attach_segments},
};

const T: f32 = 1.0 / 3.0;
const TUBE: f32 = 1.0 / 3.0;

pub const ROOT_NAME: &str = "willisTower";

#[rustfmt::skip]
pub const SEGMENTS: [Segment; 9] = [
    Segment { name: "floor_108_1", recipe: &[Step::Translate(0.0, 0.0, 5.4), Step::Scale(TUBE, TUBE, 10.8)] },
    Segment { name: "floor_108_2", recipe: &[Step::Translate(-T, 0.0, 5.4), Step::Scale(TUBE, TUBE, 10.8)] },
    Segment { name: "floor_90_1", recipe: &[Step::Translate(0.0, T, 4.5), Step::Scale(TUBE, TUBE, 9.0)] },
    Segment { name: "floor_90_2", recipe: &[Step::Translate(T, 0.0, 4.5), Step::Scale(TUBE, TUBE, 9.0)] },
    Segment { name: "floor_90_3", recipe: &[Step::Translate(0.0, -T, 4.5), Step::Scale(TUBE, TUBE, 9.0)] },
    Segment { name: "floor_66_1", recipe: &[Step::Translate(T, T, 3.3), Step::Scale(TUBE, TUBE, 6.6)] },
    Segment { name: "floor_66_2", recipe: &[Step::Translate(-T, -T, 3.3), Step::Scale(TUBE, TUBE, 6.6)] },
    Segment { name: "floor_50_1", recipe: &[Step::Translate(-T, T, 2.5), Step::Scale(TUBE, TUBE, 5.0)] },
    Segment { name: "floor_50_2", recipe: &[Step::Translate(T, -T, 2.5), Step::Scale(TUBE, TUBE, 5.0)] },
];

/// `cube` is instanced once per tube; retexture it through the leaf.
pub fn build<G>(graph: &mut SceneGraph<G>, cube: &Leaf<G>) -> Result<NodeId, StructuralError> {
    let root = graph.add_node(ROOT_NAME, compose(&[GROUND_OFFSET]));
    attach_segments(graph, root, &SEGMENTS, cube)?;
    Ok(root)
}
