mod common;

use approx::assert_relative_eq;
use cgmath::{InnerSpace, Vector3};
use common::test_utils::asset_dir;
use skyline::resources::{
    self, AssetError,
    obj::parse_obj,
    off::{fan_triangulate, parse_off},
};

const TETRAHEDRON: &str = "OFF
# four corners
4 4 6
0 0 0
1 0 0
0 1 0
0 0 1
3 0 2 1
3 0 1 3
3 0 3 2
3 1 2 3
";

#[test]
fn parses_vertices_and_faces() {
    let mesh = parse_off(TETRAHEDRON).unwrap();
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.triangle_count(), 4);
    assert_eq!(mesh.vertices[1].position, [1.0, 0.0, 0.0]);
    assert_eq!(&mesh.indices[..3], &[0, 2, 1]);
}

#[test]
fn counts_may_share_the_header_line() {
    let mesh = parse_off("OFF 3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();
    assert_eq!(mesh.triangle_count(), 1);
}

#[test]
fn derived_normals_are_unit_length() {
    let mesh = parse_off(TETRAHEDRON).unwrap();
    for vertex in &mesh.vertices {
        assert_relative_eq!(Vector3::from(vertex.normal).magnitude(), 1.0, epsilon = 1e-5);
    }
    // the corner at the origin sees three faces pointing away from the centre
    let origin = Vector3::from(mesh.vertices[0].normal);
    assert!(origin.x < 0.0 && origin.y < 0.0 && origin.z < 0.0);
}

#[test]
fn polygons_are_fan_triangulated() {
    assert_eq!(fan_triangulate(&[0, 1, 2]), [0, 1, 2]);
    assert_eq!(fan_triangulate(&[4, 5, 6, 7, 8]), [4, 5, 6, 4, 6, 7, 4, 7, 8]);

    let mesh = parse_off("OFF\n4 1 0\n0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n").unwrap();
    assert_eq!(mesh.indices, [0, 1, 2, 0, 2, 3]);
}

#[test]
fn texture_coordinates_span_the_footprint() {
    let mesh = parse_off("OFF\n4 1 0\n0 0 0\n2 0 0\n2 4 0\n0 4 0\n4 0 1 2 3\n").unwrap();
    assert_eq!(mesh.vertices[0].tex_coords, [0.0, 1.0]);
    assert_eq!(mesh.vertices[2].tex_coords, [1.0, 0.0]);
}

#[test]
fn rejects_missing_header() {
    let err = parse_off("4 4 6\n0 0 0\n").unwrap_err();
    assert!(matches!(err, AssetError::BadHeader(found) if found == "4 4 6"));
    assert!(matches!(parse_off(""), Err(AssetError::BadHeader(_))));
}

#[test]
fn rejects_out_of_range_indices() {
    let err = parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 3\n").unwrap_err();
    assert!(matches!(err, AssetError::IndexOutOfRange { index: 3, count: 3 }));
}

#[test]
fn rejects_vertices_of_the_wrong_arity() {
    let err = parse_off("OFF\n3 1 0\n0 0 0\n1 0\n0 1 0\n3 0 1 2\n").unwrap_err();
    assert!(matches!(
        err,
        AssetError::VertexArity {
            line: 4,
            expected: 3,
            found: 2
        }
    ));
}

#[test]
fn rejects_truncated_files() {
    assert!(matches!(
        parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n"),
        Err(AssetError::BadCounts(_))
    ));
    assert!(matches!(
        parse_off("OFF\n3 2 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n"),
        Err(AssetError::BadCounts(_))
    ));
    assert!(matches!(
        parse_off("OFF\n3 1 0\n0 0 0\n1 0 0\n0 1 0\n3 0 1\n"),
        Err(AssetError::VertexArity { .. })
    ));
}

#[test]
fn oversized_counts_fail_without_allocating() {
    for header in ["OFF\n1000000000000000000 0 0\n", "OFF\n1000000000 1 0\n0 0 0\n"] {
        assert!(
            matches!(parse_off(header), Err(AssetError::BadCounts(_))),
            "{:?} was accepted",
            header
        );
    }
    assert!(matches!(
        parse_off("OFF\n99999999999999999999999 0 0\n"),
        Err(AssetError::BadCounts(_))
    ));
}

#[test]
fn loads_the_bundled_hull() {
    let mesh = resources::load_mesh(&asset_dir(), "burj_base.off").unwrap();
    assert_eq!(mesh.vertices.len(), 12);
    // two hexagons and six side quads
    assert_eq!(mesh.triangle_count(), 2 * 4 + 6 * 2);
    assert!(mesh.validate().is_ok());
}

#[test]
fn unknown_extensions_and_missing_files_fail() {
    assert!(matches!(
        resources::load_mesh(&asset_dir(), "burj_base.stl"),
        Err(AssetError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        resources::load_mesh(&asset_dir(), "missing.off"),
        Err(AssetError::Io { .. })
    ));
}

#[test]
fn obj_faces_are_triangulated_and_get_normals() {
    let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
                vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
                f 1/1 2/2 3/3 4/4\n";
    let mesh = parse_obj(text).unwrap();
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    for vertex in &mesh.vertices {
        assert_relative_eq!(Vector3::from(vertex.normal), Vector3::unit_z(), epsilon = 1e-5);
    }
    // OBJ v runs up, ours runs down
    let origin = mesh
        .vertices
        .iter()
        .find(|v| v.position == [0.0, 0.0, 0.0])
        .unwrap();
    assert_relative_eq!(origin.tex_coords[1], 1.0);
}
