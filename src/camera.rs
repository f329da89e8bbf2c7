//! Camera presets, projections and the orbit state driven by the arrow keys.
//!
//! The world is Z-up. Two of the five presets orbit the scene on a circle of
//! radius [`ORBIT_RADIUS`]; the orbit angle and eye height are integrated
//! from held keys every frame.

use std::f32::consts::FRAC_PI_4;

use cgmath::{Deg, Matrix4, Point3, Vector3};
use serde::Deserialize;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

pub const ORBIT_RADIUS: f32 = 3.0;
/// Radians per second while Left or Right is held.
pub const TURN_SPEED: f32 = 2.0;
/// Units per second while Up or Down is held.
pub const CLIMB_SPEED: f32 = 1.0;

pub const FOVY: Deg<f32> = Deg(45.0);
pub const ZNEAR: f32 = 0.1;
pub const ZFAR: f32 = 100.0;
/// Half height of the orthographic view volume.
pub const ORTHO_HALF_HEIGHT: f32 = 2.0;

/// The five fixed ways of looking at the scene, numbered like their keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum ViewPreset {
    /// From (0, 3, 1) straight at the building.
    Front,
    /// Orbiting, looking down at the origin.
    Orbit,
    /// From (1, 0, 3) down at the origin.
    Oblique,
    /// From above.
    Top,
    /// Orbiting, looking level at the eye height.
    #[default]
    OrbitLevel,
}

impl TryFrom<u8> for ViewPreset {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Front),
            2 => Ok(Self::Orbit),
            3 => Ok(Self::Oblique),
            4 => Ok(Self::Top),
            5 => Ok(Self::OrbitLevel),
            other => Err(format!("view preset must be 1 to 5, got {}", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum ProjectionKind {
    #[default]
    Perspective,
    Orthographic,
}

/// Orbit angle around the Z axis and eye height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitCamera {
    pub theta: f32,
    pub height: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            theta: FRAC_PI_4,
            height: 1.0,
        }
    }
}

impl OrbitCamera {
    /// `turn` and `climb` are -1, 0 or 1 depending on which keys are held.
    pub fn update(&mut self, turn: f32, climb: f32, dt: f32) {
        self.theta += TURN_SPEED * turn * dt;
        self.height += CLIMB_SPEED * climb * dt;
    }

    fn on_orbit(&self) -> Point3<f32> {
        Point3::new(
            ORBIT_RADIUS * self.theta.sin(),
            ORBIT_RADIUS * self.theta.cos(),
            self.height,
        )
    }

    pub fn eye(&self, preset: ViewPreset) -> Point3<f32> {
        match preset {
            ViewPreset::Front => Point3::new(0.0, 3.0, 1.0),
            ViewPreset::Orbit | ViewPreset::OrbitLevel => self.on_orbit(),
            ViewPreset::Oblique => Point3::new(1.0, 0.0, 3.0),
            // slightly off axis so the view direction never equals the up vector
            ViewPreset::Top => Point3::new(1e-8, 1e-8, 3.0),
        }
    }

    pub fn target(&self, preset: ViewPreset) -> Point3<f32> {
        match preset {
            ViewPreset::Front => Point3::new(0.0, 0.0, 1.0),
            ViewPreset::OrbitLevel => Point3::new(0.0, 0.0, self.height),
            ViewPreset::Orbit | ViewPreset::Oblique | ViewPreset::Top => Point3::new(0.0, 0.0, 0.0),
        }
    }

    pub fn view_matrix(&self, preset: ViewPreset) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.eye(preset), self.target(preset), Vector3::unit_z())
    }
}

/// Projection for a surface of `width` x `height` pixels, in wgpu clip space.
pub fn projection_matrix(kind: ProjectionKind, width: u32, height: u32) -> Matrix4<f32> {
    let aspect = width.max(1) as f32 / height.max(1) as f32;
    let projection = match kind {
        ProjectionKind::Perspective => cgmath::perspective(FOVY, aspect, ZNEAR, ZFAR),
        ProjectionKind::Orthographic => cgmath::ortho(
            -ORTHO_HALF_HEIGHT * aspect,
            ORTHO_HALF_HEIGHT * aspect,
            -ORTHO_HALF_HEIGHT,
            ORTHO_HALF_HEIGHT,
            ZNEAR,
            ZFAR,
        ),
    };
    OPENGL_TO_WGPU_MATRIX * projection
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view: &Matrix4<f32>, projection: &Matrix4<f32>) -> Self {
        Self {
            view: (*view).into(),
            projection: (*projection).into(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        use cgmath::SquareMatrix;
        Self::new(&Matrix4::identity(), &Matrix4::identity())
    }
}
