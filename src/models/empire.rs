//! Tower B, five stacked blocks with setbacks, a pillar and a lightning rod.
//!
//! Each block is its own node raised to its elevation; the boxes inside a
//! block are placed relative to the block's floor.

use crate::{
    data_structures::{
        scene_graph::{Leaf, NodeId, SceneGraph, StructuralError},
        transform::{Step, compose},
    },
    models::{GROUND_OFFSET, Segment, attach_segments},
};

pub const ROOT_NAME: &str = "empireState";

/// A group of boxes sharing one elevation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    pub name: &'static str,
    pub elevation: f32,
    pub boxes: &'static [Segment],
}

#[rustfmt::skip]
pub const BLOCKS: [Block; 5] = [
    Block { name: "base", elevation: 0.0, boxes: &[
        Segment { name: "base_core", recipe: &[Step::Translate(0.0, 0.0, 0.6), Step::Scale(1.2, 1.2, 1.2)] },
        Segment { name: "base_east", recipe: &[Step::Translate(0.7, 0.0, 0.45), Step::Scale(0.2, 1.0, 0.9)] },
        Segment { name: "base_west", recipe: &[Step::Translate(-0.7, 0.0, 0.45), Step::Scale(0.2, 1.0, 0.9)] },
        Segment { name: "base_north", recipe: &[Step::Translate(0.0, 0.7, 0.45), Step::Scale(1.0, 0.2, 0.9)] },
        Segment { name: "base_south", recipe: &[Step::Translate(0.0, -0.7, 0.45), Step::Scale(1.0, 0.2, 0.9)] },
    ]},
    Block { name: "setback_1", elevation: 1.2, boxes: &[
        Segment { name: "setback_1_core", recipe: &[Step::Translate(0.0, 0.0, 0.6), Step::Scale(1.0, 1.0, 1.2)] },
        Segment { name: "setback_1_east", recipe: &[Step::Translate(0.55, 0.0, 0.5), Step::Scale(0.1, 0.8, 1.0)] },
        Segment { name: "setback_1_west", recipe: &[Step::Translate(-0.55, 0.0, 0.5), Step::Scale(0.1, 0.8, 1.0)] },
    ]},
    Block { name: "shaft", elevation: 2.4, boxes: &[
        Segment { name: "shaft_core", recipe: &[Step::Translate(0.0, 0.0, 1.8), Step::Scale(0.8, 0.8, 3.6)] },
        Segment { name: "shaft_north", recipe: &[Step::Translate(0.0, 0.45, 1.6), Step::Scale(0.5, 0.1, 3.2)] },
        Segment { name: "shaft_south", recipe: &[Step::Translate(0.0, -0.45, 1.6), Step::Scale(0.5, 0.1, 3.2)] },
        Segment { name: "shaft_east", recipe: &[Step::Translate(0.45, 0.0, 1.6), Step::Scale(0.1, 0.5, 3.2)] },
        Segment { name: "shaft_west", recipe: &[Step::Translate(-0.45, 0.0, 1.6), Step::Scale(0.1, 0.5, 3.2)] },
    ]},
    Block { name: "setback_2", elevation: 6.0, boxes: &[
        Segment { name: "setback_2_core", recipe: &[Step::Translate(0.0, 0.0, 0.3), Step::Scale(0.6, 0.6, 0.6)] },
        Segment { name: "setback_2_skirt", recipe: &[Step::Translate(0.0, 0.0, 0.15), Step::Scale(0.7, 0.5, 0.3)] },
    ]},
    Block { name: "crown", elevation: 6.6, boxes: &[
        Segment { name: "crown_core", recipe: &[Step::Translate(0.0, 0.0, 0.2), Step::Scale(0.4, 0.4, 0.4)] },
    ]},
];

#[rustfmt::skip]
pub const SPIRE: [Segment; 2] = [
    Segment { name: "pillar", recipe: &[Step::Translate(0.0, 0.0, 7.3), Step::Scale(0.15, 0.15, 0.6)] },
    Segment { name: "lightning_rod", recipe: &[Step::Translate(0.0, 0.0, 8.0), Step::Scale(0.03, 0.03, 0.8)] },
];

pub fn build<G>(graph: &mut SceneGraph<G>, cube: &Leaf<G>) -> Result<NodeId, StructuralError> {
    let root = graph.add_node(ROOT_NAME, compose(&[GROUND_OFFSET]));
    for block in &BLOCKS {
        let node = graph.add_node(
            block.name,
            compose(&[Step::Translate(0.0, 0.0, block.elevation)]),
        );
        attach_segments(graph, node, block.boxes, cube)?;
        graph.add_child(root, node)?;
    }
    attach_segments(graph, root, &SPIRE, cube)?;
    Ok(root)
}
