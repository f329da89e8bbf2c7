//! Engine data structures: scene graphs, meshes, textures and instances.
//!
//! - `scene_graph` holds the node arena and the transform composer
//! - `transform` contains the recipe steps model builders are written in
//! - `model` contains the vertex layout, CPU meshes and GPU geometry handles
//! - `texture` contains the GPU texture wrapper and the texture registry
//! - `instance` holds the per-draw matrices uploaded to the GPU

pub mod instance;
pub mod model;
pub mod scene_graph;
pub mod texture;
pub mod transform;
