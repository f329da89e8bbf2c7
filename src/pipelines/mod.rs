//! The three lighting pipelines and the choice between them.
//!
//! Flat, Gouraud and Phong share one vertex layout, one bind group layout
//! per group and one [`light::LightingParameters`] contract. They differ only
//! in the shader stage that evaluates the lighting equation, so switching
//! between them swaps a pipeline handle and nothing else.

pub mod light;
pub mod lit;

use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub enum LightingModel {
    /// One colour per triangle.
    Flat,
    /// Lighting per vertex, interpolated across the triangle.
    Gouraud,
    /// Lighting per fragment from an interpolated normal.
    #[default]
    Phong,
}

impl LightingModel {
    pub const ALL: [LightingModel; 3] = [Self::Flat, Self::Gouraud, Self::Phong];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Gouraud => "gouraud",
            Self::Phong => "phong",
        }
    }

    /// Stage-specific entry points, appended to the shared lighting prelude.
    pub(crate) fn shader_body(&self) -> &'static str {
        match self {
            Self::Flat => include_str!("flat.wgsl"),
            Self::Gouraud => include_str!("gouraud.wgsl"),
            Self::Phong => include_str!("phong.wgsl"),
        }
    }
}

/// One compiled pipeline per lighting model, created once at startup.
#[derive(Debug)]
pub struct PipelineSet {
    flat: wgpu::RenderPipeline,
    gouraud: wgpu::RenderPipeline,
    phong: wgpu::RenderPipeline,
}

impl PipelineSet {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        texture_layout: &wgpu::BindGroupLayout,
        camera_layout: &wgpu::BindGroupLayout,
        light_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let mk = |model| {
            lit::mk_lit_pipeline(
                device,
                config,
                model,
                texture_layout,
                camera_layout,
                light_layout,
            )
        };
        Self {
            flat: mk(LightingModel::Flat),
            gouraud: mk(LightingModel::Gouraud),
            phong: mk(LightingModel::Phong),
        }
    }

    pub fn select(&self, model: LightingModel) -> &wgpu::RenderPipeline {
        match model {
            LightingModel::Flat => &self.flat,
            LightingModel::Gouraud => &self.gouraud,
            LightingModel::Phong => &self.phong,
        }
    }
}
