//! Transform-composition recipes.
//!
//! Model builders describe every segment of a building as a short list of
//! [`Step`]s. A recipe is folded left to right into one matrix, so the first
//! step is applied outermost, the same way `translate * rotate * scale` reads.

use cgmath::{Deg, InnerSpace, Matrix4, Rad, SquareMatrix, Vector3};

/// One elementary transform of a recipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Translate(f32, f32, f32),
    Scale(f32, f32, f32),
    /// Rotation around the X axis in degrees.
    RotateX(f32),
    /// Rotation around the Y axis in degrees.
    RotateY(f32),
    /// Rotation around the Z axis in degrees.
    RotateZ(f32),
    /// Maps the unit cube's Z extent (-0.5..0.5) onto the segment `from..to`
    /// with a square cross-section of side `thickness`.
    Span {
        from: [f32; 3],
        to: [f32; 3],
        thickness: f32,
    },
}

impl Step {
    pub fn to_matrix(&self) -> Matrix4<f32> {
        match *self {
            Step::Translate(x, y, z) => Matrix4::from_translation(Vector3::new(x, y, z)),
            Step::Scale(x, y, z) => Matrix4::from_nonuniform_scale(x, y, z),
            Step::RotateX(deg) => Matrix4::from_angle_x(Deg(deg)),
            Step::RotateY(deg) => Matrix4::from_angle_y(Deg(deg)),
            Step::RotateZ(deg) => Matrix4::from_angle_z(Deg(deg)),
            Step::Span {
                from,
                to,
                thickness,
            } => span(from.into(), to.into(), thickness),
        }
    }
}

/// Folds a recipe into a single matrix. An empty recipe is the identity.
pub fn compose(steps: &[Step]) -> Matrix4<f32> {
    steps
        .iter()
        .fold(Matrix4::identity(), |acc, step| acc * step.to_matrix())
}

fn span(from: Vector3<f32>, to: Vector3<f32>, thickness: f32) -> Matrix4<f32> {
    let delta = to - from;
    let length = delta.magnitude();
    if length <= f32::EPSILON {
        log::warn!("degenerate span at {:?}, collapsing to a point", from);
        return Matrix4::from_translation(from) * Matrix4::from_scale(0.0);
    }
    let dir = delta / length;
    // pitch away from +Z, then yaw around Z towards the target
    let pitch = Rad(dir.z.clamp(-1.0, 1.0).acos());
    let yaw = Rad(dir.y.atan2(dir.x));
    let midpoint = from + delta * 0.5;
    Matrix4::from_translation(midpoint)
        * Matrix4::from_angle_z(yaw)
        * Matrix4::from_angle_y(pitch)
        * Matrix4::from_nonuniform_scale(thickness, thickness, length)
}
