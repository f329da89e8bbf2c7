//! Meshes that are built in code rather than loaded from assets.

use crate::{data_structures::model::RawMesh, resources::AssetError};

/// Unit cube centred on the origin, textured with a 2x3 dice atlas.
///
/// Every face has its own four vertices so normals stay sharp. This is the
/// primitive every tower segment instances.
pub fn cube() -> Result<RawMesh, AssetError> {
    const T: f32 = 1.0 / 3.0;
    const TT: f32 = 2.0 / 3.0;
    #[rustfmt::skip]
    let faces: [([f32; 3], [[f32; 5]; 4]); 6] = [
        // Z+: number 1
        ([0.0, 0.0, 1.0], [
            [-0.5, -0.5, 0.5, 0.0, T], [0.5, -0.5, 0.5, 0.5, T],
            [0.5, 0.5, 0.5, 0.5, 0.0], [-0.5, 0.5, 0.5, 0.0, 0.0],
        ]),
        // Z-: number 6
        ([0.0, 0.0, -1.0], [
            [-0.5, -0.5, -0.5, 0.5, 1.0], [0.5, -0.5, -0.5, 1.0, 1.0],
            [0.5, 0.5, -0.5, 1.0, TT], [-0.5, 0.5, -0.5, 0.5, TT],
        ]),
        // X+: number 5
        ([1.0, 0.0, 0.0], [
            [0.5, -0.5, -0.5, 0.0, 1.0], [0.5, 0.5, -0.5, 0.5, 1.0],
            [0.5, 0.5, 0.5, 0.5, TT], [0.5, -0.5, 0.5, 0.0, TT],
        ]),
        // X-: number 2
        ([-1.0, 0.0, 0.0], [
            [-0.5, -0.5, -0.5, 0.5, T], [-0.5, 0.5, -0.5, 1.0, T],
            [-0.5, 0.5, 0.5, 1.0, 0.0], [-0.5, -0.5, 0.5, 0.5, 0.0],
        ]),
        // Y+: number 4
        ([0.0, 1.0, 0.0], [
            [-0.5, 0.5, -0.5, 0.5, TT], [0.5, 0.5, -0.5, 1.0, TT],
            [0.5, 0.5, 0.5, 1.0, T], [-0.5, 0.5, 0.5, 0.5, T],
        ]),
        // Y-: number 3
        ([0.0, -1.0, 0.0], [
            [-0.5, -0.5, -0.5, 0.0, TT], [0.5, -0.5, -0.5, 0.5, TT],
            [0.5, -0.5, 0.5, 0.5, T], [-0.5, -0.5, 0.5, 0.0, T],
        ]),
    ];
    #[rustfmt::skip]
    let indices = [
        0, 1, 2, 2, 3, 0,       // Z+
        7, 6, 5, 5, 4, 7,       // Z-
        8, 9, 10, 10, 11, 8,    // X+
        15, 14, 13, 13, 12, 15, // X-
        19, 18, 17, 17, 16, 19, // Y+
        20, 21, 22, 22, 23, 20, // Y-
    ];

    let data: Vec<f32> = faces
        .iter()
        .flat_map(|(normal, corners)| {
            let [nx, ny, nz] = *normal;
            corners
                .iter()
                .flat_map(move |c| [c[0], c[1], c[2], c[3], c[4], nx, ny, nz])
        })
        .collect();
    RawMesh::from_interleaved(&data, &indices)
}

/// Unit square on the XY plane facing +Z, with the texture tiled `repeat` times.
pub fn quad(repeat: f32) -> Result<RawMesh, AssetError> {
    let corners = [
        ([-0.5, -0.5], [0.0, repeat]),
        ([0.5, -0.5], [repeat, repeat]),
        ([0.5, 0.5], [repeat, 0.0]),
        ([-0.5, 0.5], [0.0, 0.0]),
    ];
    let data: Vec<f32> = corners
        .iter()
        .flat_map(|([x, y], [u, v])| [*x, *y, 0.0, *u, *v, 0.0, 0.0, 1.0])
        .collect();
    RawMesh::from_interleaved(&data, &[0, 1, 2, 2, 3, 0])
}
