mod hud;
mod settings_menu;

use egui_wgpu::ScreenDescriptor;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::game::block::BlockKind;
use crate::settings::Settings;

pub use hud::Hud;
pub use settings_menu::SettingsMenu;

/// Per-frame data handed to the overlay by the game loop.
pub struct UiFrame<'a> {
    pub menu_open: bool,
    pub fps: f32,
    pub selected_kind: BlockKind,
    pub settings: &'a mut Settings,
}

#[derive(Copy, Clone, Default)]
pub struct UiActions {
    pub resume: bool,
    pub quit: bool,
}

/// Owns the egui context plus its winit and wgpu glue. The overlay draws
/// the hud every frame and the settings window while the menu is open.
pub struct UiOverlay {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

impl UiOverlay {
    pub fn new(
        window: &Window,
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let ctx = egui::Context::default();
        let state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            egui_wgpu::RendererOptions {
                msaa_samples: 1,
                depth_stencil_format: None,
                dithering: false,
                predictable_texture_filtering: false,
            },
        );

        Self {
            ctx,
            state,
            renderer,
        }
    }

    /// Feeds a window event to egui. Returns true when egui consumed it.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    pub fn wants_pointer(&self) -> bool {
        self.ctx.wants_pointer_input()
    }

    pub fn draw(
        &mut self,
        window: &Window,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        screen_size: [u32; 2],
        frame: UiFrame<'_>,
    ) -> UiActions {
        let mut actions = UiActions::default();

        let raw_input = self.state.take_egui_input(window);
        let output = self.ctx.run(raw_input, |ctx| {
            Hud::show(ctx, frame.fps, frame.selected_kind);
            if frame.menu_open {
                actions = SettingsMenu::show(ctx, frame.settings);
            }
        });

        self.state
            .handle_platform_output(window, output.platform_output);

        for (id, delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, delta);
        }

        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);
        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: screen_size,
            pixels_per_point: output.pixels_per_point,
        };

        let command_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &paint_jobs, &screen_descriptor);
        if !command_buffers.is_empty() {
            queue.submit(command_buffers);
        }

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Ui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a pass without a borrowed lifetime.
            let mut render_pass = render_pass.forget_lifetime();
            self.renderer
                .render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }

        actions
    }
}
