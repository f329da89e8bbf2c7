//! Tower C: three leaning pillars braced against a central mast.
//!
//! The base plate and the pylons at each pillar foot are an auxiliary mesh
//! loaded from the asset directory. It is uploaded once and shown with two
//! different textures. Everything else reuses the shared cube.

use crate::{
    data_structures::{
        model::GeometryFactory,
        scene_graph::{Leaf, NodeId, SceneGraph},
        transform::{Step, compose},
    },
    models::{BuildError, GROUND_OFFSET, Segment, attach_segments},
};

pub const ROOT_NAME: &str = "burjAlArab";

/// File names of the auxiliary mesh and its two textures.
#[derive(Clone, Debug, PartialEq)]
pub struct BurjAssets {
    pub mesh: String,
    pub base_texture: String,
    pub pylon_texture: String,
}

pub const BASE: Segment = Segment {
    name: "base",
    recipe: &[Step::Translate(0.0, 0.0, 0.1), Step::Scale(2.0, 2.0, 0.2)],
};

pub const MAST: Segment = Segment {
    name: "mast",
    recipe: &[Step::Translate(0.0, 0.0, 3.75), Step::Scale(0.06, 0.06, 7.5)],
};

/// The three wings are copies of one another rotated around the mast.
pub const WINGS: [(&str, f32); 3] = [("wing_0", 0.0), ("wing_120", 120.0), ("wing_240", 240.0)];

pub const PYLON: Segment = Segment {
    name: "pylon",
    recipe: &[Step::Translate(0.0, -0.8, 0.35), Step::Scale(0.25, 0.25, 0.5)],
};

#[rustfmt::skip]
pub const WING_FRAME: [Segment; 3] = [
    // foot at (0, -0.8, 0), top at (0, -0.19, 4.96)
    Segment { name: "pillar", recipe: &[
        Step::Translate(0.0, -0.495, 2.481), Step::RotateX(-7.0), Step::Scale(0.12, 0.12, 5.0),
    ]},
    Segment { name: "cable_top", recipe: &[
        Step::Span { from: [0.0, -0.19, 4.96], to: [0.0, 0.0, 6.4], thickness: 0.02 },
    ]},
    Segment { name: "cable_mid", recipe: &[
        Step::Span { from: [0.0, -0.373, 3.475], to: [0.0, 0.0, 4.5], thickness: 0.02 },
    ]},
];

/// Builds the tower. The auxiliary mesh and textures go through `factory`.
pub fn build<F>(
    graph: &mut SceneGraph<F::Geometry>,
    factory: &mut F,
    cube: &Leaf<F::Geometry>,
    assets: &BurjAssets,
) -> Result<NodeId, BuildError>
where
    F: GeometryFactory,
{
    let hull = factory.load_geometry(&assets.mesh, None)?;
    let base_texture = factory.load_texture(&assets.base_texture)?;
    let pylon_texture = factory.load_texture(&assets.pylon_texture)?;
    let base = Leaf::with_texture(hull.clone(), base_texture);
    let pylon = Leaf::with_texture(hull, pylon_texture);

    let root = graph.add_node(ROOT_NAME, compose(&[GROUND_OFFSET]));
    attach_segments(graph, root, &[BASE], &base)?;
    attach_segments(graph, root, &[MAST], cube)?;
    for (name, angle) in WINGS {
        let wing = graph.add_node(name, compose(&[Step::RotateZ(angle)]));
        attach_segments(graph, wing, &[PYLON], &pylon)?;
        attach_segments(graph, wing, &WING_FRAME, cube)?;
        graph.add_child(root, wing)?;
    }
    Ok(root)
}
