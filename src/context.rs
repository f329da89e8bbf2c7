//! GPU state shared by every frame, and the geometry factory that uploads
//! scene meshes and textures through it.

use std::{path::Path, rc::Rc, sync::Arc};

use anyhow::Context as _;
use bytemuck::Zeroable;
use winit::window::Window;

use crate::{
    camera::CameraUniform,
    data_structures::{
        model::{GeometryFactory, Mesh, RawMesh},
        texture::{self, TextureId, TextureRegistry},
    },
    pipelines::{
        PipelineSet,
        light::{self, LightingUniform},
    },
    resources::{self, AssetError},
};

/// Colour of the placeholder used for textures that fail to load.
pub const MISSING_TEXTURE_RGBA: [u8; 4] = [200, 200, 200, 255];

#[derive(Debug)]
pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera_buffer: wgpu::Buffer,
    pub camera_bind_group: wgpu::BindGroup,
    pub light_buffer: wgpu::Buffer,
    pub light_bind_group: wgpu::BindGroup,
    pub textures: TextureRegistry,
    pub pipelines: PipelineSet,
}

impl Context {
    pub async fn new(window: Arc<Window>) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..wgpu::InstanceDescriptor::new_without_display_handle()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("cannot create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter can present to this window")?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("cannot open the graphics device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        // The textures are sRGB; a linear surface would render everything too dark.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("the surface supports no texture format")?;
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera_bind_group_layout =
            light::mk_bind_group_layout(&device, "camera_bind_group_layout");
        let camera_buffer = {
            use wgpu::util::DeviceExt;
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[CameraUniform::default()]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
        };
        let camera_bind_group = light::mk_bind_group(
            &device,
            &camera_bind_group_layout,
            &camera_buffer,
            "camera_bind_group",
        );

        let light_bind_group_layout =
            light::mk_bind_group_layout(&device, "light_bind_group_layout");
        let light_buffer = light::mk_buffer(&device, LightingUniform::zeroed());
        let light_bind_group = light::mk_bind_group(
            &device,
            &light_bind_group_layout,
            &light_buffer,
            "light_bind_group",
        );

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let textures = TextureRegistry::new(&device, &queue);
        let pipelines = PipelineSet::new(
            &device,
            &config,
            &textures.layout,
            &camera_bind_group_layout,
            &light_bind_group_layout,
        );

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera_buffer,
            camera_bind_group,
            light_buffer,
            light_bind_group,
            textures,
            pipelines,
        })
    }

    pub fn factory<'a>(&'a mut self, asset_dir: &'a Path) -> GpuFactory<'a> {
        GpuFactory {
            device: &self.device,
            queue: &self.queue,
            textures: &mut self.textures,
            asset_dir,
        }
    }

    pub(crate) fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            texture::Texture::create_depth_texture(&self.device, [width, height], "depth_texture");
    }
}

/// Uploads scene geometry and textures, reading assets from `asset_dir`.
pub struct GpuFactory<'a> {
    device: &'a wgpu::Device,
    queue: &'a wgpu::Queue,
    textures: &'a mut TextureRegistry,
    asset_dir: &'a Path,
}

impl GeometryFactory for GpuFactory<'_> {
    type Geometry = Mesh;

    fn create_geometry(
        &mut self,
        label: &str,
        mesh: &RawMesh,
        texture: Option<TextureId>,
    ) -> Result<Rc<Mesh>, AssetError> {
        mesh.validate()?;
        Ok(Rc::new(Mesh::upload(self.device, label, mesh, texture)))
    }

    fn load_mesh(&mut self, file_name: &str) -> Result<RawMesh, AssetError> {
        resources::load_mesh(self.asset_dir, file_name)
    }

    /// A texture that cannot be read is replaced by a solid placeholder so the
    /// scene still renders.
    fn load_texture(&mut self, file_name: &str) -> Result<TextureId, AssetError> {
        if let Some(id) = self.textures.lookup(file_name) {
            return Ok(id);
        }
        let texture = match resources::texture::load_image(self.asset_dir, file_name) {
            Ok(img) => texture::Texture::from_image(self.device, self.queue, &img, Some(file_name)),
            Err(e) => {
                log::warn!("{}, using a plain texture instead", e);
                texture::Texture::create_solid(
                    self.device,
                    self.queue,
                    MISSING_TEXTURE_RGBA,
                    file_name,
                )
            }
        };
        Ok(self.textures.insert(self.device, file_name, texture))
    }
}
