//! Lighting parameter set and its GPU uniform.
//!
//! The same [`LightingParameters`] drive the flat, Gouraud and Phong
//! pipelines. Only the stage at which the shaders evaluate them differs.

use cgmath::{Point3, Vector3};
use wgpu::util::DeviceExt;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParameterError {
    #[error("{field} component {value} is outside [0, 1]")]
    OutOfUnitRange { field: &'static str, value: f32 },
    #[error("{term} attenuation {value} is negative")]
    NegativeAttenuation { term: &'static str, value: f32 },
    #[error("shininess must be a positive exponent")]
    ZeroShininess,
}

/// Distance falloff `1 / (constant + linear * d + quadratic * d^2)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

/// Surface reflectance per lighting term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reflectance {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingParameters {
    pub ambient: Vector3<f32>,
    pub diffuse: Vector3<f32>,
    pub specular: Vector3<f32>,
    pub reflectance: Reflectance,
    pub light_position: Point3<f32>,
    pub view_position: Point3<f32>,
    pub shininess: u32,
    pub attenuation: Attenuation,
}

/// Greyish surface: barely visible under ambient light alone, bright under
/// diffuse and specular.
pub const SCENE_REFLECTANCE: Reflectance = Reflectance {
    ambient: Vector3::new(0.2, 0.2, 0.2),
    diffuse: Vector3::new(0.9, 0.9, 0.9),
    specular: Vector3::new(1.0, 1.0, 1.0),
};
pub const SCENE_LIGHT_POSITION: Point3<f32> = Point3::new(2.0, 2.0, 4.0);
pub const SCENE_SHININESS: u32 = 100;
pub const SCENE_ATTENUATION: Attenuation = Attenuation {
    constant: 0.0001,
    linear: 0.03,
    quadratic: 0.01,
};

impl LightingParameters {
    /// Scene constants with the given light intensities.
    pub fn new(
        ambient: Vector3<f32>,
        diffuse: Vector3<f32>,
        specular: Vector3<f32>,
        view_position: Point3<f32>,
    ) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            reflectance: SCENE_REFLECTANCE,
            light_position: SCENE_LIGHT_POSITION,
            view_position,
            shininess: SCENE_SHININESS,
            attenuation: SCENE_ATTENUATION,
        }
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        let colours = [
            ("ambient", self.ambient),
            ("diffuse", self.diffuse),
            ("specular", self.specular),
            ("ambient reflectance", self.reflectance.ambient),
            ("diffuse reflectance", self.reflectance.diffuse),
            ("specular reflectance", self.reflectance.specular),
        ];
        for (field, colour) in colours {
            for value in [colour.x, colour.y, colour.z] {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ParameterError::OutOfUnitRange { field, value });
                }
            }
        }
        let terms = [
            ("constant", self.attenuation.constant),
            ("linear", self.attenuation.linear),
            ("quadratic", self.attenuation.quadratic),
        ];
        for (term, value) in terms {
            if !(value >= 0.0) {
                return Err(ParameterError::NegativeAttenuation { term, value });
            }
        }
        if self.shininess == 0 {
            return Err(ParameterError::ZeroShininess);
        }
        Ok(())
    }

    /// Clamps every field into its domain, logging what was wrong.
    pub fn sanitized(self) -> Self {
        if let Err(e) = self.validate() {
            log::warn!("clamping lighting parameters: {}", e);
        } else {
            return self;
        }
        let unit =
            |v: Vector3<f32>| Vector3::new(unit_clamp(v.x), unit_clamp(v.y), unit_clamp(v.z));
        let positive = |v: f32| if v >= 0.0 { v } else { 0.0 };
        Self {
            ambient: unit(self.ambient),
            diffuse: unit(self.diffuse),
            specular: unit(self.specular),
            reflectance: Reflectance {
                ambient: unit(self.reflectance.ambient),
                diffuse: unit(self.reflectance.diffuse),
                specular: unit(self.reflectance.specular),
            },
            shininess: self.shininess.max(1),
            attenuation: Attenuation {
                constant: positive(self.attenuation.constant),
                linear: positive(self.attenuation.linear),
                quadratic: positive(self.attenuation.quadratic),
            },
            ..self
        }
    }
}

fn unit_clamp(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// GPU layout of [`LightingParameters`]: every vec3 is packed with one scalar
/// to keep the 16 byte alignment WGSL expects.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    la: [f32; 3],
    shininess: f32,
    ld: [f32; 3],
    constant_attenuation: f32,
    ls: [f32; 3],
    linear_attenuation: f32,
    ka: [f32; 3],
    quadratic_attenuation: f32,
    kd: [f32; 3],
    _padding: u32,
    ks: [f32; 3],
    _padding2: u32,
    light_position: [f32; 3],
    _padding3: u32,
    view_position: [f32; 3],
    _padding4: u32,
}

impl From<&LightingParameters> for LightingUniform {
    fn from(p: &LightingParameters) -> Self {
        Self {
            la: p.ambient.into(),
            shininess: p.shininess as f32,
            ld: p.diffuse.into(),
            constant_attenuation: p.attenuation.constant,
            ls: p.specular.into(),
            linear_attenuation: p.attenuation.linear,
            ka: p.reflectance.ambient.into(),
            quadratic_attenuation: p.attenuation.quadratic,
            kd: p.reflectance.diffuse.into(),
            _padding: 0,
            ks: p.reflectance.specular.into(),
            _padding2: 0,
            light_position: p.light_position.into(),
            _padding3: 0,
            view_position: p.view_position.into(),
            _padding4: 0,
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightingUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Lighting Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

/// Layout for a single uniform buffer visible to both stages. Used for the
/// camera and the lighting groups alike.
pub fn mk_bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some(label),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
        label: Some(label),
    })
}
