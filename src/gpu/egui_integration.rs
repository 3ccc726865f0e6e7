//! Egui overlay carrying the field toggle button.
//!
//! Only compiled with the `egui` feature. The overlay is drawn in its own
//! render pass on top of the scene, without depth.

use std::sync::Arc;
use winit::window::Window;

use crate::scene::ToggleLabel;

const TOGGLE_ANCHOR: [f32; 2] = [12.0, 12.0];
const TOGGLE_SIZE: [f32; 2] = [180.0, 32.0];

/// Egui context, winit state and wgpu renderer for the overlay.
pub struct EguiIntegration {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

/// Tessellated overlay for one frame.
pub struct EguiFrameOutput {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    textures_delta: egui::TexturesDelta,
    pixels_per_point: f32,
}

impl EguiIntegration {
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Arc<Window>,
    ) -> Self {
        let ctx = egui::Context::default();
        ctx.set_visuals(egui::Visuals {
            window_shadow: egui::Shadow::NONE,
            popup_shadow: egui::Shadow::NONE,
            ..egui::Visuals::dark()
        });

        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window.as_ref(),
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        // No depth, single sample, no dithering
        let renderer = egui_wgpu::Renderer::new(device, output_format, None, 1, false);

        Self { ctx, state, renderer }
    }

    /// Feed a winit event to egui. Returns true if egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &winit::event::WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Whether the pointer is over the overlay.
    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input()
    }

    /// Run the overlay UI for one frame and tessellate the result.
    pub fn run(&mut self, window: &Window, ui: impl FnMut(&egui::Context)) -> EguiFrameOutput {
        let raw_input = self.state.take_egui_input(window);
        let full_output = self.ctx.run(raw_input, ui);
        self.state
            .handle_platform_output(window, full_output.platform_output);

        EguiFrameOutput {
            paint_jobs: self
                .ctx
                .tessellate(full_output.shapes, full_output.pixels_per_point),
            textures_delta: full_output.textures_delta,
            pixels_per_point: full_output.pixels_per_point,
        }
    }

    /// Upload the frame's textures and buffers and draw it over `view`.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        size_in_pixels: [u32; 2],
        frame: &EguiFrameOutput,
    ) {
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels,
            pixels_per_point: frame.pixels_per_point,
        };

        for (id, image_delta) in &frame.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }
        self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &frame.paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.renderer.render(
                &mut render_pass.forget_lifetime(),
                &frame.paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &frame.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }
}

/// Draw the field toggle button. Returns true when it was clicked.
pub fn toggle_button(ctx: &egui::Context, label: ToggleLabel) -> bool {
    let [r, g, b] = label.color;
    let mut clicked = false;

    egui::Area::new(egui::Id::new("field_toggle"))
        .anchor(egui::Align2::LEFT_TOP, TOGGLE_ANCHOR)
        .show(ctx, |ui| {
            let text = egui::RichText::new(label.text)
                .color(egui::Color32::WHITE)
                .size(15.0);
            let button = egui::Button::new(text)
                .fill(egui::Color32::from_rgb(r, g, b))
                .min_size(egui::Vec2::from(TOGGLE_SIZE));
            clicked = ui.add(button).clicked();
        });

    clicked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(ctx: &egui::Context, events: Vec<egui::Event>, label: ToggleLabel) -> bool {
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        };
        let mut clicked = false;
        let _ = ctx.run(input, |ctx| clicked = toggle_button(ctx, label));
        clicked
    }

    fn press(pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos: egui::pos2(40.0, 25.0),
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn test_toggle_button_idle_frames_do_not_click() {
        let ctx = egui::Context::default();
        let label = ToggleLabel::for_visibility(true);
        assert!(!frame(&ctx, vec![], label));
        assert!(!frame(&ctx, vec![], label));
    }

    #[test]
    fn test_toggle_button_reports_click() {
        let ctx = egui::Context::default();
        let label = ToggleLabel::for_visibility(true);

        frame(&ctx, vec![], label);
        frame(&ctx, vec![egui::Event::PointerMoved(egui::pos2(40.0, 25.0))], label);
        frame(&ctx, vec![press(true)], label);
        assert!(frame(&ctx, vec![press(false)], label));
    }

    #[test]
    fn test_click_outside_button_is_ignored() {
        let ctx = egui::Context::default();
        let label = ToggleLabel::for_visibility(false);
        let far = egui::pos2(600.0, 500.0);
        let at_far = |pressed| egui::Event::PointerButton {
            pos: far,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::NONE,
        };

        frame(&ctx, vec![], label);
        frame(&ctx, vec![egui::Event::PointerMoved(far)], label);
        frame(&ctx, vec![at_far(true)], label);
        assert!(!frame(&ctx, vec![at_far(false)], label));
    }
}
