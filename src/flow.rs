//! Application event loop.
//!
//! Every redraw runs one frame in a fixed order:
//! 1. Integrate held keys into the orbit camera and advance the day/night fade
//! 2. Read the frame's selections as a [`crate::controls::FrameConfig`]
//! 3. Walk the selected building and the floor, recording draws
//! 4. Encode the recorded draws with the selected lighting pipeline
//! 5. Present
//!
//! GPU meshes are released in [`ApplicationHandler::exiting`], after the last
//! frame.

use std::{iter, sync::Arc};

use anyhow::Context as _;
use instant::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::Window,
};

use crate::{
    camera::{self, OrbitCamera},
    config::Config,
    context::Context,
    controls::{Command, Controller},
    daynight::{self, DayNightCycle},
    data_structures::model::Mesh,
    render::{FrameRecorder, render_scene},
    scene::Scene,
};

/// Everything that exists once a window is open.
pub struct AppState {
    ctx: Context,
    scene: Option<Scene<Mesh>>,
    camera: OrbitCamera,
    cycle: DayNightCycle,
    controller: Controller,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        let mut ctx = Context::new(window).await?;
        let scene = {
            let mut factory = ctx.factory(&config.asset_dir);
            Scene::build(&mut factory, config).context("cannot build the scene")?
        };
        Ok(Self {
            ctx,
            scene: Some(scene),
            camera: OrbitCamera::default(),
            cycle: DayNightCycle::new(config.start.day),
            controller: Controller::new(config.start.frame_config()),
            is_surface_configured: false,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.resize(width, height);
            self.is_surface_configured = true;
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let pressed = event.state.is_pressed();
        if event.repeat && pressed {
            // held keys are already tracked, repeats must not re-toggle
            return;
        }
        match self.controller.handle_key(code, pressed) {
            Some(Command::ToggleDayNight) => self.cycle.toggle(),
            Some(Command::Exit) => event_loop.exit(),
            _ => {}
        }
    }

    fn update(&mut self, dt: f32) {
        self.camera
            .update(self.controller.turn(), self.controller.climb(), dt);
        self.cycle.advance(dt);
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceStatus> {
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }
        let Some(scene) = &self.scene else {
            return Ok(());
        };

        let frame = self.controller.frame_config();
        let view = self.camera.view_matrix(frame.view);
        let projection = camera::projection_matrix(
            frame.projection,
            self.ctx.config.width,
            self.ctx.config.height,
        );
        let (params, phase) = self
            .cycle
            .parameters(&daynight::preset(frame.building), self.camera.eye(frame.view));

        let mut recorder = FrameRecorder::new(
            &self.ctx.queue,
            &self.ctx.camera_buffer,
            &self.ctx.light_buffer,
            frame.lighting,
        );
        let drawn = match render_scene(
            &scene.graph,
            &scene.roots(frame.building),
            &params,
            &view,
            &projection,
            &mut recorder,
        ) {
            Ok(drawn) => drawn,
            Err(e) => {
                log::error!("cannot draw {}: {}", frame.building.label(), e);
                return Ok(());
            }
        };
        log::debug!(
            "{} pipeline: {} leaves in {} draw calls",
            frame.lighting.label(),
            drawn,
            recorder.draw_calls()
        );
        let recorded = recorder.upload(&self.ctx.device);

        let output = match self.ctx.surface.get_current_texture() {
            wgpu::CurrentSurfaceTexture::Success(t) | wgpu::CurrentSurfaceTexture::Suboptimal(t) => t,
            wgpu::CurrentSurfaceTexture::Timeout => return Err(wgpu::SurfaceStatus::Timeout),
            wgpu::CurrentSurfaceTexture::Occluded => return Err(wgpu::SurfaceStatus::Occluded),
            wgpu::CurrentSurfaceTexture::Outdated => return Err(wgpu::SurfaceStatus::Outdated),
            wgpu::CurrentSurfaceTexture::Lost => return Err(wgpu::SurfaceStatus::Lost),
            wgpu::CurrentSurfaceTexture::Validation => return Err(wgpu::SurfaceStatus::Validation),
        };
        let target = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(phase.clear_colour()),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.ctx.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
                multiview_mask: None,
            });

            recorded.encode(
                &mut render_pass,
                self.ctx.pipelines.select(recorded.lighting_model()),
                &self.ctx.textures,
                &self.ctx.camera_bind_group,
                &self.ctx.light_bind_group,
            );
        }

        self.ctx.queue.submit(iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    async_runtime: tokio::runtime::Runtime,
    config: Config,
    state: Option<AppState>,
    last_time: Instant,
    /// Set when startup fails inside the event loop, returned from [`run`].
    failure: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let async_runtime =
            tokio::runtime::Runtime::new().context("cannot start the async runtime")?;
        Ok(Self {
            async_runtime,
            config,
            state: None,
            last_time: Instant::now(),
            failure: None,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.failure = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        let window_attributes = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };

        match self
            .async_runtime
            .block_on(AppState::new(window, &self.config))
        {
            Ok(mut state) => {
                let size = state.ctx.window.inner_size();
                state.resize(size.width, size.height);
                self.last_time = Instant::now();
                self.state = Some(state);
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => state.handle_key(event_loop, &event),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();
                state.update(dt.as_secs_f32());

                match state.render() {
                    Ok(()) => {}
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceStatus::Lost | wgpu::SurfaceStatus::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {:?}", e);
                    }
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(scene) = self.state.as_mut().and_then(|state| state.scene.take()) {
            log::info!("releasing GPU meshes");
            scene.release();
        }
    }
}

/// Opens the window and runs until it is closed.
pub fn run(config: Config) -> anyhow::Result<()> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;
    event_loop.run_app(&mut app)?;
    match app.failure.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
