//! Drawing a scene through one of the lighting pipelines.
//!
//! [`render_scene`] is the only place that walks the scene graph per frame.
//! It hands every reached leaf to a [`LightingPipeline`], which is all the
//! traversal knows about rendering. The GPU implementation is
//! [`FrameRecorder`]: it gathers the world transforms of a frame into one
//! instance buffer and groups consecutive leaves that share geometry and
//! texture into a single instanced draw.
//!
//! # Key types
//!
//! - [`LightingPipeline`] is the `bind`/`draw` capability every pipeline offers
//! - [`FrameRecorder`] collects a frame for the GPU
//! - [`RecordedFrame`] is the uploaded frame, ready to encode into a render pass
//!

use std::{ops::Range, rc::Rc};

use cgmath::{Matrix4, SquareMatrix};
use wgpu::util::DeviceExt;

use crate::{
    camera::CameraUniform,
    data_structures::{
        instance::InstanceRaw,
        model::Mesh,
        scene_graph::{Leaf, NodeId, SceneGraph, StructuralError},
        texture::{TextureId, TextureRegistry},
    },
    pipelines::{
        LightingModel,
        light::{LightingParameters, LightingUniform},
    },
};

/// A shading strategy as seen from the traversal.
///
/// `bind` is called once per frame before any `draw`. Implementations must
/// not care which traversal produced the draws.
pub trait LightingPipeline<G> {
    fn lighting_model(&self) -> LightingModel;

    fn bind(&mut self, params: &LightingParameters, view: &Matrix4<f32>, projection: &Matrix4<f32>);

    fn draw(&mut self, leaf: &Leaf<G>, model: &Matrix4<f32>);
}

/// Binds the frame's parameters, then draws every leaf under `roots` in order.
///
/// Returns the number of leaves drawn. A structural error aborts the frame at
/// the offending root.
pub fn render_scene<G, P>(
    graph: &SceneGraph<G>,
    roots: &[NodeId],
    params: &LightingParameters,
    view: &Matrix4<f32>,
    projection: &Matrix4<f32>,
    pipeline: &mut P,
) -> Result<usize, StructuralError>
where
    P: LightingPipeline<G> + ?Sized,
{
    pipeline.bind(params, view, projection);
    let mut drawn = 0;
    for &root in roots {
        drawn += graph.compose(root, Matrix4::identity(), |leaf, world| {
            pipeline.draw(leaf, world)
        })?;
    }
    Ok(drawn)
}

/// Consecutive instances of the same geometry and texture.
#[derive(Debug)]
struct Batch {
    geometry: Rc<Mesh>,
    texture: TextureId,
    instances: Range<u32>,
}

/// Collects one frame's draws for the GPU.
///
/// `bind` writes the camera and lighting uniforms right away; draws are only
/// recorded and reach the GPU through [`FrameRecorder::upload`].
pub struct FrameRecorder<'a> {
    queue: &'a wgpu::Queue,
    camera_buffer: &'a wgpu::Buffer,
    light_buffer: &'a wgpu::Buffer,
    lighting_model: LightingModel,
    instances: Vec<InstanceRaw>,
    batches: Vec<Batch>,
}

impl<'a> FrameRecorder<'a> {
    pub fn new(
        queue: &'a wgpu::Queue,
        camera_buffer: &'a wgpu::Buffer,
        light_buffer: &'a wgpu::Buffer,
        lighting_model: LightingModel,
    ) -> Self {
        Self {
            queue,
            camera_buffer,
            light_buffer,
            lighting_model,
            instances: Vec::new(),
            batches: Vec::new(),
        }
    }

    pub fn draw_calls(&self) -> usize {
        self.batches.len()
    }

    /// Moves the recorded instances into a vertex buffer.
    pub fn upload(self, device: &wgpu::Device) -> RecordedFrame {
        let instance_buffer = (!self.instances.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Instance Buffer"),
                contents: bytemuck::cast_slice(&self.instances),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });
        RecordedFrame {
            lighting_model: self.lighting_model,
            instance_buffer,
            batches: self.batches,
        }
    }
}

impl LightingPipeline<Mesh> for FrameRecorder<'_> {
    fn lighting_model(&self) -> LightingModel {
        self.lighting_model
    }

    fn bind(
        &mut self,
        params: &LightingParameters,
        view: &Matrix4<f32>,
        projection: &Matrix4<f32>,
    ) {
        let camera = CameraUniform::new(view, projection);
        self.queue
            .write_buffer(self.camera_buffer, 0, bytemuck::cast_slice(&[camera]));
        let lighting = LightingUniform::from(params);
        self.queue
            .write_buffer(self.light_buffer, 0, bytemuck::cast_slice(&[lighting]));
    }

    fn draw(&mut self, leaf: &Leaf<Mesh>, model: &Matrix4<f32>) {
        let texture = leaf
            .texture
            .or(leaf.geometry.texture)
            .unwrap_or(TextureRegistry::WHITE);
        let index = self.instances.len() as u32;
        self.instances.push(InstanceRaw::from_world(model));

        match self.batches.last_mut() {
            Some(batch)
                if Rc::ptr_eq(&batch.geometry, &leaf.geometry) && batch.texture == texture =>
            {
                batch.instances.end = index + 1;
            }
            _ => self.batches.push(Batch {
                geometry: Rc::clone(&leaf.geometry),
                texture,
                instances: index..index + 1,
            }),
        }
    }
}

/// A frame whose instances live on the GPU.
#[derive(Debug)]
pub struct RecordedFrame {
    lighting_model: LightingModel,
    instance_buffer: Option<wgpu::Buffer>,
    batches: Vec<Batch>,
}

impl RecordedFrame {
    pub fn lighting_model(&self) -> LightingModel {
        self.lighting_model
    }

    /// Issues one indexed, instanced draw per batch.
    pub fn encode(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        pipeline: &wgpu::RenderPipeline,
        textures: &TextureRegistry,
        camera_bind_group: &wgpu::BindGroup,
        light_bind_group: &wgpu::BindGroup,
    ) {
        let Some(instance_buffer) = &self.instance_buffer else {
            log::warn!("frame has nothing to draw");
            return;
        };
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(1, camera_bind_group, &[]);
        render_pass.set_bind_group(2, light_bind_group, &[]);
        render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
        for batch in &self.batches {
            if batch.geometry.num_elements == 0 {
                log::warn!("skipping {} with zero indices", batch.geometry.name);
                continue;
            }
            render_pass.set_bind_group(0, &textures.get(batch.texture).bind_group, &[]);
            render_pass.set_vertex_buffer(0, batch.geometry.vertex_buffer.slice(..));
            render_pass.set_index_buffer(
                batch.geometry.index_buffer.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            render_pass.draw_indexed(0..batch.geometry.num_elements, 0, batch.instances.clone());
        }
    }
}
