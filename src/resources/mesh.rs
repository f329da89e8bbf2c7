use cgmath::{InnerSpace, Vector3, Zero};

use crate::data_structures::model::RawMesh;

/**
 * Mesh formats without normals get smooth per-vertex normals: every vertex
 * receives the normalised sum of the face normals around it. Face normals are
 * left unnormalised before summing so larger faces weigh more.
 */
pub fn compute_vertex_normals(mesh: &mut RawMesh) {
    let mut sums = vec![Vector3::<f32>::zero(); mesh.vertices.len()];
    for c in mesh.indices.chunks_exact(3) {
        let pos0: Vector3<f32> = mesh.vertices[c[0] as usize].position.into();
        let pos1: Vector3<f32> = mesh.vertices[c[1] as usize].position.into();
        let pos2: Vector3<f32> = mesh.vertices[c[2] as usize].position.into();
        let face_normal = (pos1 - pos0).cross(pos2 - pos0);
        for &i in c {
            sums[i as usize] += face_normal;
        }
    }
    for (vertex, sum) in mesh.vertices.iter_mut().zip(sums) {
        vertex.normal = if sum.magnitude2() > f32::EPSILON {
            sum.normalize().into()
        } else {
            // unreferenced or degenerate vertices point up
            [0.0, 0.0, 1.0]
        };
    }
}

/// Projects positions onto the XY plane and normalises them to the bounding box.
pub fn planar_tex_coords(mesh: &mut RawMesh) {
    let (min, max) = mesh.vertices.iter().fold(
        ([f32::MAX; 2], [f32::MIN; 2]),
        |(min, max), v| {
            (
                [min[0].min(v.position[0]), min[1].min(v.position[1])],
                [max[0].max(v.position[0]), max[1].max(v.position[1])],
            )
        },
    );
    let extent = [(max[0] - min[0]).max(f32::EPSILON), (max[1] - min[1]).max(f32::EPSILON)];
    for v in mesh.vertices.iter_mut() {
        v.tex_coords = [
            (v.position[0] - min[0]) / extent[0],
            1.0 - (v.position[1] - min[1]) / extent[1],
        ];
    }
}
