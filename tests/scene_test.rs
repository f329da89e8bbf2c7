mod common;

use approx::assert_relative_eq;
use cgmath::{Matrix4, Vector3};
use common::test_utils::FakeFactory;
use skyline::{config::Config, models::Building, scene::Scene};

fn build() -> (Scene<common::test_utils::FakeGeometry>, FakeFactory) {
    let mut factory = FakeFactory::default();
    let scene = Scene::build(&mut factory, &Config::default()).unwrap();
    (scene, factory)
}

#[test]
fn cube_and_hull_are_created_once() {
    let (_, factory) = build();
    assert_eq!(factory.created, ["cube", "burj_base.off", "floor"]);
    assert_eq!(factory.meshes_loaded.get("burj_base.off"), Some(&1));
}

#[test]
fn each_building_gets_its_own_texture() {
    let (scene, factory) = build();
    let config = Config::default();

    for building in Building::ALL {
        let out = scene.graph.world_transforms(scene.tower(building)).unwrap();
        let cube_textures: Vec<_> = out
            .iter()
            .filter(|(leaf, _)| leaf.geometry.label == "cube")
            .map(|(leaf, _)| factory.texture_name(leaf.texture.unwrap()).unwrap())
            .collect();
        assert!(!cube_textures.is_empty());
        assert!(
            cube_textures
                .iter()
                .all(|name| *name == config.textures.for_building(building))
        );
    }
}

#[test]
fn floor_carries_its_texture_in_the_geometry() {
    let (scene, factory) = build();
    let out = scene.graph.world_transforms(scene.floor()).unwrap();
    assert_eq!(out.len(), 1);
    let (leaf, _) = &out[0];
    assert_eq!(leaf.texture, None);
    assert_eq!(factory.texture_name(leaf.geometry.texture.unwrap()), Some("grass.png"));
    // two triangles
    assert_eq!(leaf.geometry.triangles, 2);
}

#[test]
fn roots_pair_the_tower_with_the_floor() {
    let (scene, _) = build();
    for building in Building::ALL {
        assert_eq!(scene.roots(building), [scene.tower(building), scene.floor()]);
    }
    assert_ne!(scene.tower(Building::WillisTower), scene.tower(Building::EmpireState));
}

#[test]
fn placing_a_building_moves_only_that_building() {
    let (mut scene, _) = build();
    let before = scene.graph.world_transforms(scene.tower(Building::EmpireState)).unwrap();
    let willis_before = scene.graph.world_transforms(scene.tower(Building::WillisTower)).unwrap();

    let offset = Matrix4::from_translation(Vector3::new(4.0, 0.0, 0.0));
    let local = scene.graph.local_transform(scene.tower(Building::EmpireState)).unwrap();
    scene.place(Building::EmpireState, offset * local).unwrap();

    let after = scene.graph.world_transforms(scene.tower(Building::EmpireState)).unwrap();
    for ((_, a), (_, b)) in after.iter().zip(&before) {
        assert_relative_eq!(a.w.x, b.w.x + 4.0, epsilon = 1e-5);
    }
    let willis_after = scene.graph.world_transforms(scene.tower(Building::WillisTower)).unwrap();
    for ((_, a), (_, b)) in willis_after.iter().zip(&willis_before) {
        assert_relative_eq!(*a, *b);
    }
}
