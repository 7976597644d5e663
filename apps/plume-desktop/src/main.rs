use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use plume_render_wgpu::{
    GpuContext, GpuMesh, MeshUploader, OrbitCamera, PlumeRenderer, ShaderParams,
};
use plume_scene::{Controls, FrameStats, Scene};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "plume-desktop", about = "Plume shader demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file with initial control values
    #[arg(long)]
    controls: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "720")]
    height: u32,
}

/// Application state.
struct AppState {
    controls: Controls,
    scene: Option<Scene<GpuMesh>>,
    camera: OrbitCamera,
    stats: FrameStats,
    start: Instant,
    reload_requested: bool,
    // Input state
    orbiting: bool,
    panning: bool,
}

impl AppState {
    fn new(controls: Controls) -> Self {
        Self {
            controls,
            scene: None,
            camera: OrbitCamera::default(),
            stats: FrameStats::new(),
            start: Instant::now(),
            reload_requested: false,
            orbiting: false,
            panning: false,
        }
    }

    fn load_scene(&mut self, device: &wgpu::Device) {
        let mut uploader = MeshUploader::new(device);
        self.scene = Some(Scene::load(&mut uploader, &self.controls));
    }

    fn shader_params(&self) -> ShaderParams {
        ShaderParams {
            time: self.start.elapsed().as_secs_f32(),
            time_scale: self.controls.time_scale,
            plume_height: self.controls.plume_height,
            color_gain: self.controls.color_gain,
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        egui::Area::new(egui::Id::new("frame_stats"))
            .fixed_pos(egui::pos2(4.0, 4.0))
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(self.stats.to_string())
                        .monospace()
                        .color(egui::Color32::LIGHT_GREEN),
                );
            });

        let controls = &mut self.controls;
        egui::Window::new("Controls")
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.add(
                    egui::Slider::new(&mut controls.tesselations, Controls::TESSELATIONS)
                        .step_by(1.0)
                        .text("tesselations"),
                );
                if ui.button("Load Scene").clicked() {
                    self.reload_requested = true;
                }
                ui.add(
                    egui::Slider::new(&mut controls.time_scale, Controls::TIME_SCALE)
                        .text("timeScale"),
                );
                ui.add(
                    egui::Slider::new(&mut controls.plume_height, Controls::PLUME_HEIGHT)
                        .text("plumeHeight"),
                );
                ui.add(
                    egui::Slider::new(&mut controls.color_gain, Controls::COLOR_GAIN)
                        .text("colorGain"),
                );
                if ui.button("reset").clicked() {
                    controls.reset();
                }

                ui.separator();
                ui.checkbox(&mut controls.show_cube, "cube");
                ui.checkbox(&mut controls.show_square, "square");

                ui.separator();
                ui.small("RMB: Orbit | MMB: Pan | Wheel: Zoom");
            });
    }
}

struct GpuApp {
    state: AppState,
    initial_size: PhysicalSize<u32>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<PlumeRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    init_error: Option<anyhow::Error>,
}

impl GpuApp {
    fn new(controls: Controls, width: u32, height: u32) -> Self {
        Self {
            state: AppState::new(controls),
            initial_size: PhysicalSize::new(width.max(1), height.max(1)),
            window: None,
            gpu: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            init_error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.init_error = Some(error);
        event_loop.exit();
    }

    fn redraw(&mut self) {
        let Self {
            state,
            window,
            gpu,
            renderer,
            egui_ctx,
            egui_winit,
            egui_renderer,
            ..
        } = self;
        let (Some(window), Some(gpu), Some(renderer), Some(egui_winit), Some(egui_renderer)) = (
            window.as_ref(),
            gpu.as_ref(),
            renderer.as_ref(),
            egui_winit.as_mut(),
            egui_renderer.as_mut(),
        ) else {
            return;
        };

        let _span = tracing::info_span!("frame").entered();
        state.stats.begin(Instant::now());

        if std::mem::take(&mut state.reload_requested) {
            state.load_scene(&gpu.device);
        }
        if let Some(scene) = &mut state.scene {
            scene.sync(&mut MeshUploader::new(&gpu.device), &state.controls);
        }

        let output = match gpu.current_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if let Some(scene) = &state.scene {
            renderer.render(
                &gpu.device,
                &gpu.queue,
                &view,
                &state.camera,
                state.shader_params(),
                &scene.drawables(&state.controls),
            );
        }

        let raw_input = egui_winit.take_egui_input(window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let (width, height) = gpu.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        state.stats.end(Instant::now());
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Plume")
            .with_inner_size(self.initial_size);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, anyhow::anyhow!("creating window: {e}"));
                return;
            }
        };

        let gpu = match GpuContext::new(window.clone()) {
            Ok(gpu) => gpu,
            Err(e) => {
                self.fail(event_loop, anyhow::Error::new(e).context("initializing graphics"));
                return;
            }
        };

        let (width, height) = gpu.size();
        self.state.camera.set_aspect_ratio(gpu.aspect_ratio());
        let renderer = PlumeRenderer::new(&gpu.device, gpu.surface_format(), width, height);
        self.state.load_scene(&gpu.device);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format(), None, 1, false);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    let (width, height) = gpu.size();
                    self.state.camera.set_aspect_ratio(gpu.aspect_ratio());
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(&gpu.device, width, height);
                    }
                }
            }
            WindowEvent::MouseInput {
                button,
                state: btn_state,
                ..
            } => {
                let pressed = btn_state == ElementState::Pressed;
                match button {
                    MouseButton::Right => self.state.orbiting = pressed,
                    MouseButton::Middle => self.state.panning = pressed,
                    _ => {}
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
                };
                self.state.camera.zoom(amount);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            let (dx, dy) = (delta.0 as f32, delta.1 as f32);
            if self.state.orbiting {
                self.state.camera.orbit(dx, dy);
            } else if self.state.panning {
                self.state.camera.pan(dx, dy);
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let controls = match &cli.controls {
        Some(path) => Controls::load(path)
            .with_context(|| format!("loading controls from {}", path.display()))?,
        None => Controls::default(),
    };
    tracing::info!(?controls, "plume-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(controls, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.init_error.take() {
        return Err(e);
    }
    Ok(())
}
