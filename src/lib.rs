//! skyline
//!
//! Renders one of three textured buildings on a ground plane under flat,
//! Gouraud or Phong lighting, with a smooth day/night transition. The
//! buildings are scene graphs that instance one shared cube many times; the
//! traversal accumulates transforms from the root down and hands every leaf
//! to the active lighting pipeline.
//!
//! High-level modules
//! - `camera`: view presets, projections and the orbit camera
//! - `config`: TOML configuration with defaults for every field
//! - `context`: GPU device, surface, uniforms, textures and pipelines
//! - `controls`: key bindings and the per-frame selection
//! - `data_structures`: scene graph, transform recipes, meshes, instances, textures
//! - `daynight`: day/night interpolation and the per-building presets
//! - `flow`: the winit event loop
//! - `models`: the building and floor builders
//! - `pipelines`: the three lighting pipelines and their shared parameters
//! - `render`: scene traversal into a lighting pipeline, draw batching
//! - `resources`: OFF/OBJ mesh loading, textures, built-in shapes
//! - `scene`: all buildings and the floor in one graph
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod controls;
pub mod data_structures;
pub mod daynight;
pub mod flow;
pub mod models;
pub mod pipelines;
pub mod render;
pub mod resources;
pub mod scene;
