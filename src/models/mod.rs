//! Model builders: the buildings and the ground they stand on.
//!
//! Every building is a constant table of segments. A segment is a named
//! transform recipe applied to one shared primitive, so a whole silhouette is
//! one cube instanced many times.

pub mod burj;
pub mod empire;
pub mod floor;
pub mod willis;

use serde::Deserialize;

use crate::{
    data_structures::{
        scene_graph::{Leaf, NodeId, SceneGraph, StructuralError},
        transform::{Step, compose},
    },
    resources::AssetError,
};

/// Building archetypes the scene can show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum Building {
    /// Tower A: bundled tubes of decreasing height.
    WillisTower,
    /// Tower B: stacked setbacks topped by a spire.
    EmpireState,
    /// Tower C: sail-like pillars tied to a central mast.
    #[default]
    BurjAlArab,
}

impl Building {
    pub const ALL: [Building; 3] = [Self::WillisTower, Self::EmpireState, Self::BurjAlArab];

    pub fn label(&self) -> &'static str {
        match self {
            Self::WillisTower => "Willis Tower",
            Self::EmpireState => "Empire State",
            Self::BurjAlArab => "Burj Al Arab",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Structural(#[from] StructuralError),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// A named transform recipe for one instance of a primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub name: &'static str,
    pub recipe: &'static [Step],
}

/// Every building sits on the floor plane at z = -3.
pub const GROUND_OFFSET: Step = Step::Translate(0.0, 0.0, -3.0);

/// Creates one child node per segment under `parent`, each holding `leaf`.
pub fn attach_segments<G>(
    graph: &mut SceneGraph<G>,
    parent: NodeId,
    segments: &[Segment],
    leaf: &Leaf<G>,
) -> Result<Vec<NodeId>, StructuralError> {
    segments
        .iter()
        .map(|segment| {
            graph.add_segment(parent, segment.name, compose(segment.recipe), leaf.clone())
        })
        .collect()
}
