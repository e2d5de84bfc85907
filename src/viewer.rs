use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Instant;

use log::{error, info};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::animation::Spinners;
use crate::camera::PerspectiveCamera;
use crate::composer::{compose, handle_load_event, issue_load_requests};
use crate::config::ViewerConfig;
use crate::controls::OrbitControls;
use crate::loaders::LoadEvent;
use crate::renderer::Renderer;
use crate::scene::Scene;

const FPS_UPDATE_INTERVAL: f32 = 1.0;
const INITIAL_WINDOW_WIDTH: u32 = 800;
const INITIAL_WINDOW_HEIGHT: u32 = 600;

/// Decide whether this tick needs a surface resize: the client size wins
/// whenever it differs from the backing buffer, except that transient
/// zero-dimension samples (mid-layout) are skipped entirely.
pub fn resize_request(surface: (u32, u32), client: (u32, u32)) -> Option<(u32, u32)> {
    if client.0 == 0 || client.1 == 0 {
        return None;
    }
    if client != surface {
        Some(client)
    } else {
        None
    }
}

/// The application: owns the scene, camera, controls and renderer, drains
/// load completions, and reschedules itself once per display refresh.
pub struct Viewer {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    scene: Scene,
    spinners: Spinners,
    camera: PerspectiveCamera,
    controls: OrbitControls,
    load_receiver: Receiver<LoadEvent>,
    load_sender: Option<Sender<LoadEvent>>,
    start_time: Instant,
    last_frame_time: Instant,
    frame_count: u32,
    fps_timer: f32,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        let composition = compose(&config);

        let mut camera = PerspectiveCamera::new(
            config.camera.fov_y_degrees,
            INITIAL_WINDOW_WIDTH as f32 / INITIAL_WINDOW_HEIGHT as f32,
            config.camera.near,
            config.camera.far,
        );
        camera.position = config.camera.position.into();
        camera.look_at(config.camera.target.into());

        let controls = OrbitControls::new(config.camera.target.into(), f32::INFINITY, &camera);

        let (load_sender, load_receiver) = mpsc::channel();

        Self {
            config,
            window: None,
            renderer: None,
            scene: composition.scene,
            spinners: composition.spinners,
            camera,
            controls,
            load_receiver,
            load_sender: Some(load_sender),
            start_time: Instant::now(),
            last_frame_time: Instant::now(),
            frame_count: 0,
            fps_timer: 0.0,
        }
    }

    fn update_fps(&mut self, delta: f32) {
        self.frame_count += 1;
        self.fps_timer += delta;

        if self.fps_timer >= FPS_UPDATE_INTERVAL {
            info!("FPS: {:.1}", self.frame_count as f32 / self.fps_timer);
            self.frame_count = 0;
            self.fps_timer = 0.0;
        }
    }

    /// One tick of the render loop
    fn redraw(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;
        self.update_fps(delta);

        // Apply any load completions before rendering, so an attach is
        // always observed by the very next frame.
        while let Ok(event) = self.load_receiver.try_recv() {
            let _ = handle_load_event(
                &mut self.scene,
                &mut self.camera,
                &mut self.controls,
                &self.config,
                event,
            );
        }

        if let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) {
            let client = window.inner_size();
            if let Some((width, height)) =
                resize_request(renderer.surface_size(), (client.width, client.height))
            {
                renderer.resize_surface(width, height);
                self.camera.set_aspect(width as f32 / height as f32);
            }
        }

        self.spinners
            .apply(&mut self.scene, self.start_time.elapsed().as_secs_f32());
        self.controls.update(&mut self.camera);

        if let Some(renderer) = &mut self.renderer {
            match renderer.render_frame(&self.scene, &self.camera) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (width, height) = renderer.surface_size();
                    renderer.resize_surface(width, height);
                }
                Err(e) => error!("Render error: {}", e),
            }
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window = match event_loop.create_window(
                Window::default_attributes()
                    .with_title("Model Viewer")
                    .with_inner_size(winit::dpi::LogicalSize::new(
                        INITIAL_WINDOW_WIDTH,
                        INITIAL_WINDOW_HEIGHT,
                    )),
            ) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    error!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let renderer = match pollster::block_on(Renderer::new(window.clone())) {
                Ok(r) => r,
                Err(e) => {
                    error!("Failed to initialize renderer: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.renderer = Some(renderer);

            // Fire all load requests; dropping our sender clone lets the
            // channel close once the last worker finishes.
            if let Some(sender) = self.load_sender.take() {
                issue_load_requests(&self.config, &sender);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.controls.process_keyboard(&event),
            WindowEvent::MouseInput { state, button, .. } => {
                self.controls.process_mouse_button(button, state);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.controls.process_cursor(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => self.controls.process_scroll(delta),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
