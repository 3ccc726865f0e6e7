//! Interactive window for a [`FieldScene`].
//!
//! [`Viewer`] is the entry point: configure it, then call [`Viewer::run`],
//! which blocks until the window closes. The field is computed once before
//! the window opens; after that the only state that changes is the camera and
//! the field visibility.
//!
//! # Controls
//!
//! | Input | Action |
//! |-------|--------|
//! | Left drag | Orbit around the charge |
//! | Right drag | Pan |
//! | Wheel | Zoom |
//! | Space / V / toggle button | Show or hide the field |
//! | Escape | Quit |

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::FieldConfig;
use crate::error::ViewerError;
use crate::gpu::camera::{Camera, OrbitControls};
use crate::gpu::GpuState;
use crate::input::{Input, KeyCode, MouseButton};
use crate::scene::FieldScene;

#[cfg(feature = "egui")]
use crate::gpu::egui_integration::{toggle_button, EguiIntegration};

const DEFAULT_TITLE: &str = "Electric Field of a Point Charge";

/// Builder and runner for the field window.
///
/// # Example
///
/// ```ignore
/// use efield::prelude::*;
///
/// Viewer::new(FieldConfig::simulation())
///     .with_title("Point charge")
///     .run()?;
/// ```
pub struct Viewer {
    config: FieldConfig,
    title: String,
    size: (u32, u32),
}

impl Viewer {
    pub fn new(config: FieldConfig) -> Self {
        Self {
            config,
            title: DEFAULT_TITLE.to_string(),
            size: (1280, 720),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Initial window size in logical pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(1), height.max(1));
        self
    }

    /// Build the scene, open the window and block until it closes.
    ///
    /// Configuration problems are reported before any window is created.
    pub fn run(self) -> Result<(), ViewerError> {
        let scene = FieldScene::new(self.config)?;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = App::new(scene, self.title, self.size);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

struct App {
    title: String,
    size: (u32, u32),
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    scene: FieldScene,
    camera: Camera,
    controls: OrbitControls,
    input: Input,
    #[cfg(feature = "egui")]
    egui: Option<EguiIntegration>,
    error: Option<ViewerError>,
}

impl App {
    fn new(scene: FieldScene, title: String, size: (u32, u32)) -> Self {
        Self {
            title,
            size,
            window: None,
            gpu_state: None,
            scene,
            camera: Camera::default(),
            controls: OrbitControls::new(),
            input: Input::new(),
            #[cfg(feature = "egui")]
            egui: None,
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), ViewerError> {
        let window_attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let size = window.inner_size();
        self.camera.set_viewport(size.width, size.height);

        let gpu_state = pollster::block_on(GpuState::new(window.clone(), &self.scene))?;

        #[cfg(feature = "egui")]
        {
            self.egui = Some(EguiIntegration::new(
                gpu_state.device(),
                gpu_state.surface_format(),
                &window,
            ));
        }

        self.gpu_state = Some(gpu_state);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    /// Turn this frame's input into camera motion and visibility changes.
    fn apply_input(&mut self, event_loop: &ActiveEventLoop) {
        if self.input.key_pressed(KeyCode::Escape) {
            event_loop.exit();
            return;
        }
        if self.input.key_pressed(KeyCode::Space) || self.input.key_pressed(KeyCode::V) {
            self.scene.on_toggle_field();
        }

        #[cfg(feature = "egui")]
        let pointer_free = !self.egui.as_ref().is_some_and(|e| e.wants_pointer());
        #[cfg(not(feature = "egui"))]
        let pointer_free = true;

        if pointer_free {
            let delta = self.input.mouse_delta();
            if self.input.mouse_held(MouseButton::Left) {
                self.controls.rotate(delta.x, delta.y);
            } else if self.input.mouse_held(MouseButton::Right) {
                self.controls.pan(&self.camera, delta.x, delta.y);
            }

            let scroll = self.input.scroll_delta();
            if scroll != 0.0 {
                self.controls.zoom(scroll);
            }
        }

        self.controls.update(&mut self.camera);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.apply_input(event_loop);

        let (Some(gpu_state), Some(window)) = (&mut self.gpu_state, &self.window) else {
            return;
        };

        #[cfg(feature = "egui")]
        let result = match &mut self.egui {
            Some(egui) => {
                let label = self.scene.label();
                let mut clicked = false;
                let frame = egui.run(window, |ctx| clicked = toggle_button(ctx, label));
                if clicked {
                    self.scene.on_toggle_field();
                }
                gpu_state.render(&self.camera, &self.scene, Some((egui, &frame)))
            }
            None => gpu_state.render(&self.camera, &self.scene, None),
        };
        #[cfg(not(feature = "egui"))]
        let result = gpu_state.render(&self.camera, &self.scene);

        match result {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                gpu_state.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("Skipping frame: {:?}", e),
        }

        self.input.begin_frame();
        window.request_redraw();
    }
}

/// Presses swallowed by the UI never reach the controls. Releases always do,
/// so nothing stays held.
#[cfg_attr(not(feature = "egui"), allow(dead_code))]
fn is_press(event: &WindowEvent) -> bool {
    match event {
        WindowEvent::KeyboardInput { event, .. } => event.state == ElementState::Pressed,
        WindowEvent::MouseInput { state, .. } => *state == ElementState::Pressed,
        WindowEvent::MouseWheel { .. } => true,
        _ => false,
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        #[cfg(feature = "egui")]
        let consumed = match (&mut self.egui, &self.window) {
            (Some(egui), Some(window)) => egui.on_window_event(window, &event),
            _ => false,
        };
        #[cfg(not(feature = "egui"))]
        let consumed = false;

        if !(consumed && is_press(&event)) {
            self.input.handle_event(&event);
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                self.camera
                    .set_viewport(physical_size.width, physical_size.height);
                if let Some(gpu_state) = &mut self.gpu_state {
                    gpu_state.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}
