mod common;

use common::test_utils::asset_dir;
use skyline::{
    config::TextureConfig,
    data_structures::model::{FLOATS_PER_VERTEX, RawMesh},
    resources::{AssetError, shapes, texture::load_image},
};

#[rustfmt::skip]
const TRIANGLE: [f32; 24] = [
    0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0,
    1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0,
    0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0,
];

#[test]
fn interleaved_lists_split_into_vertices() {
    let mesh = RawMesh::from_interleaved(&TRIANGLE, &[0, 1, 2]).unwrap();
    assert_eq!(mesh.vertices.len(), TRIANGLE.len() / FLOATS_PER_VERTEX);
    assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
    assert_eq!(mesh.vertices[1].tex_coords, [1.0, 1.0]);
    assert_eq!(mesh.vertices[2].normal, [0.0, 0.0, 1.0]);
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn partial_vertices_are_rejected() {
    let err = RawMesh::from_interleaved(&TRIANGLE[..20], &[0, 1, 2]).unwrap_err();
    assert!(matches!(err, AssetError::BadCounts(_)));
}

#[test]
fn indices_must_stay_in_range_and_form_triangles() {
    assert!(matches!(
        RawMesh::from_interleaved(&TRIANGLE, &[0, 1, 3]),
        Err(AssetError::IndexOutOfRange { index: 3, count: 3 })
    ));
    assert!(matches!(
        RawMesh::from_interleaved(&TRIANGLE, &[0, 1]),
        Err(AssetError::BadCounts(_))
    ));
}

#[test]
fn cube_has_sharp_faces() {
    let cube = shapes::cube().unwrap();
    assert_eq!(cube.vertices.len(), 24);
    assert_eq!(cube.triangle_count(), 12);
    // every corner sits on the unit cube and its face normal points outwards
    for vertex in &cube.vertices {
        assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
        let along: f32 = (0..3).map(|i| vertex.position[i] * vertex.normal[i]).sum();
        assert_eq!(along, 0.5);
    }
}

#[test]
fn quad_tiles_its_texture() {
    let quad = shapes::quad(5.0).unwrap();
    assert_eq!(quad.vertices.len(), 4);
    assert_eq!(quad.triangle_count(), 2);
    assert!(quad.vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
    assert!(quad.vertices.iter().any(|v| v.tex_coords == [5.0, 5.0]));
}

#[test]
fn default_textures_ship_with_the_crate() {
    let textures = TextureConfig::default();
    for name in [
        &textures.willis,
        &textures.empire,
        &textures.burj,
        &textures.floor,
        &textures.burj_base,
        &textures.burj_pylon,
    ] {
        assert!(load_image(&asset_dir(), name).is_ok(), "{} does not decode", name);
    }
    // two columns by three rows of dice faces
    let atlas = load_image(&asset_dir(), &textures.willis).unwrap();
    assert_eq!(atlas.width() * 3, atlas.height() * 2);
}
