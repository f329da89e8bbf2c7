//! The complete scene: all three buildings and the floor in one graph.
//!
//! Only one building is drawn at a time, always together with the floor.
//! The shared cube is uploaded once; each building shows it with its own
//! texture through the leaf override.

use std::rc::Rc;

use cgmath::Matrix4;

use crate::{
    config::Config,
    data_structures::{
        model::{GeometryFactory, Mesh},
        scene_graph::{Leaf, NodeId, SceneGraph, StructuralError},
    },
    models::{self, BuildError, Building},
    resources::{AssetError, shapes},
};

/// Texture repeats across the floor quad.
pub const FLOOR_TEXTURE_REPEAT: f32 = 5.0;

pub struct Scene<G> {
    pub graph: SceneGraph<G>,
    towers: [NodeId; 3],
    floor: NodeId,
}

impl<G> Scene<G> {
    pub fn build<F>(factory: &mut F, config: &Config) -> Result<Self, BuildError>
    where
        F: GeometryFactory<Geometry = G>,
    {
        let mut graph = SceneGraph::new();
        let cube = factory.create_geometry("cube", &shapes::cube()?, None)?;
        let mut textured = |building: Building| -> Result<Leaf<G>, AssetError> {
            let texture = factory.load_texture(config.textures.for_building(building))?;
            Ok(Leaf::with_texture(Rc::clone(&cube), texture))
        };
        let willis = textured(Building::WillisTower)?;
        let empire = textured(Building::EmpireState)?;
        let burj = textured(Building::BurjAlArab)?;

        let towers = [
            models::willis::build(&mut graph, &willis)?,
            models::empire::build(&mut graph, &empire)?,
            models::burj::build(&mut graph, factory, &burj, &config.burj_assets())?,
        ];

        let floor_texture = factory.load_texture(&config.textures.floor)?;
        let quad = factory.create_geometry(
            "floor",
            &shapes::quad(FLOOR_TEXTURE_REPEAT)?,
            Some(floor_texture),
        )?;
        let floor = models::floor::build(&mut graph, &Leaf::new(quad))?;

        log::info!("scene built with {} nodes", graph.len());
        Ok(Self {
            graph,
            towers,
            floor,
        })
    }

    pub fn tower(&self, building: Building) -> NodeId {
        match building {
            Building::WillisTower => self.towers[0],
            Building::EmpireState => self.towers[1],
            Building::BurjAlArab => self.towers[2],
        }
    }

    pub fn floor(&self) -> NodeId {
        self.floor
    }

    /// Roots drawn for `building`: the tower first, then the floor.
    pub fn roots(&self, building: Building) -> [NodeId; 2] {
        [self.tower(building), self.floor]
    }

    /// Moves a whole building, e.g. to animate its placement.
    pub fn place(
        &mut self,
        building: Building,
        transform: Matrix4<f32>,
    ) -> Result<(), StructuralError> {
        self.graph.set_local_transform(self.tower(building), transform)
    }
}

impl Scene<Mesh> {
    /// Frees every GPU mesh. Call only after the last frame has been drawn.
    pub fn release(self) {
        for geometry in self.graph.into_geometries() {
            match Rc::try_unwrap(geometry) {
                Ok(mesh) => mesh.release(),
                Err(shared) => log::warn!("{} is still referenced, not releasing it", shared.name),
            }
        }
    }
}
