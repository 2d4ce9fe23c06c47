pub mod app;
pub mod audio;
pub mod config;
pub mod game;
pub mod input;
pub mod rendering;
pub mod settings;
pub mod ui;

use std::sync::Arc;
use std::time::Instant;

use wgpu::util::DeviceExt;
use winit::event::{DeviceEvent, MouseButton, WindowEvent};
use winit::keyboard::KeyCode;
use winit::window::{CursorGrabMode, Window};

use audio::{SoundBank, SoundEffect};
use config::Config;
use game::actions;
use game::camera::{Camera, EYE_OFFSET};
use game::player::Player;
use game::world::BlockWorld;
use input::controller::InputController;
use rendering::atlas::BlockAtlas;
use rendering::block_renderer::BlockRenderer;
use rendering::gpu::GpuContext;
use rendering::projection::Projection;
use rendering::sky::SkyRenderer;
use rendering::texture::Texture;
use settings::Settings;
use ui::{UiFrame, UiOverlay};

pub struct State {
    // GPU Resources
    window: Arc<Window>,
    gpu: GpuContext,
    depth_texture: Texture,

    // Game State
    world: BlockWorld,
    player: Player,
    camera: Camera,

    // Input state
    controller: InputController,
    cursor_grabbed: bool,
    menu_open: bool,
    quit_requested: bool,

    // Rendering state
    settings: Settings,
    projection: Projection,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    sky_renderer: SkyRenderer,
    block_renderer: BlockRenderer,
    ui: UiOverlay,
    sounds: SoundBank,

    // Timing
    last_frame: Instant,
    last_present: Instant,
    fps_smoothed: f32,
}

impl State {
    pub async fn new(window: Arc<Window>, config: &Config) -> anyhow::Result<Self> {
        /*
            GPU Setup
        */
        let gpu = GpuContext::new(window.clone()).await?;

        /*
            Setup Game State
        */
        let mut world = BlockWorld::new();
        world.generate_terrain();
        log::info!("generated terrain with {} blocks", world.len());

        let player = Player::new();
        let camera = Camera::new(player.position + EYE_OFFSET, 0.0, 0.0);

        let settings = config.initial_settings();
        let controller = InputController::new(settings.mouse_sensitivity);

        /*
            Setup Camera Uniform
        */
        let projection = Projection::new(gpu.config.width, gpu.config.height, settings.fov_degrees);

        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::bytes_of(&projection.get_camera_uniform(&camera)),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let camera_bind_group_layout =
            gpu.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        // The sky fragment shader unprojects with the same
                        // uniform, so both stages see it.
                        visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                    label: Some("camera_bind_group_layout"),
                });

        let camera_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        /*
            Load Resources
        */
        let atlas = BlockAtlas::new();
        let atlas_texture = Texture::from_image(&gpu.device, &gpu.queue, atlas.image(), "block_atlas")?;
        let depth_texture = Texture::create_depth_texture(&gpu.device, &gpu.config, "depth_texture");

        /*
            Create Renderers
        */
        let sky_renderer = SkyRenderer::new(&gpu.device, &gpu.config, &camera_bind_group_layout);
        let block_renderer = BlockRenderer::new(
            &gpu.device,
            &gpu.config,
            &camera_bind_group_layout,
            &atlas_texture,
            &world,
        );
        let ui = UiOverlay::new(&window, &gpu.device, gpu.config.format);

        let sounds = SoundBank::new(config.audio.music_volume, config.audio.music);

        Self::set_cursor_grabbed(&window, true);

        Ok(Self {
            window,
            gpu,
            depth_texture,
            world,
            player,
            camera,
            controller,
            cursor_grabbed: true,
            menu_open: false,
            quit_requested: false,
            settings,
            projection,
            camera_buffer,
            camera_bind_group,
            sky_renderer,
            block_renderer,
            ui,
            sounds,
            last_frame: Instant::now(),
            last_present: Instant::now(),
            fps_smoothed: 0.0,
        })
    }

    fn set_cursor_grabbed(window: &Window, grabbed: bool) {
        if grabbed {
            window.set_cursor_visible(false);
            window
                .set_cursor_grab(CursorGrabMode::Confined)
                .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked))
                .unwrap_or_else(|e| log::warn!("Failed to grab cursor: {}", e));
        } else {
            window.set_cursor_visible(true);
            window
                .set_cursor_grab(CursorGrabMode::None)
                .unwrap_or_else(|e| log::warn!("Failed to release cursor: {}", e));
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /*
        Window Events
    */
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
        self.projection.resize(width, height);
        self.depth_texture =
            Texture::create_depth_texture(&self.gpu.device, &self.gpu.config, "depth_texture");
    }

    /// Routes window events into egui first. Returns true when egui
    /// consumed the event.
    pub fn handle_ui_event(&mut self, event: &WindowEvent) -> bool {
        self.ui.on_window_event(&self.window, event)
    }

    pub fn handle_key(&mut self, code: KeyCode, is_pressed: bool) {
        if code == KeyCode::Escape && is_pressed {
            self.toggle_menu();
        } else {
            self.controller.handle_key(code, is_pressed);
        }
    }

    pub fn handle_mouse_button(&mut self, button: MouseButton, is_pressed: bool) {
        if !is_pressed || self.menu_open || self.ui.wants_pointer() {
            return;
        }

        match button {
            MouseButton::Left => {
                if actions::remove_block(&mut self.world, &self.camera) {
                    self.sounds.play(SoundEffect::BlockRemoved);
                }
            }
            MouseButton::Right => {
                let kind = self.controller.selected_kind();
                if actions::place_block(&mut self.world, &self.camera, &self.player, kind) {
                    self.sounds.play(SoundEffect::BlockPlaced);
                }
            }
            _ => {}
        }
    }

    pub fn device_input(&mut self, event: &DeviceEvent) {
        match event {
            DeviceEvent::MouseMotion { delta } => {
                if self.cursor_grabbed {
                    self.controller
                        .handle_mouse(delta.0, delta.1, &mut self.camera);
                }
            }
            _ => {}
        }
    }

    fn toggle_menu(&mut self) {
        if self.menu_open {
            self.close_menu();
        } else {
            self.menu_open = true;
            self.cursor_grabbed = false;
            Self::set_cursor_grabbed(&self.window, false);
        }
    }

    fn close_menu(&mut self) {
        self.menu_open = false;
        self.cursor_grabbed = true;
        Self::set_cursor_grabbed(&self.window, true);
    }

    /*
        Game Loop
    */
    pub fn update(&mut self) {
        let now = Instant::now();
        let mut dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        if dt > 0.0 {
            let fps = 1.0 / dt;
            self.fps_smoothed = if self.fps_smoothed == 0.0 {
                fps
            } else {
                self.fps_smoothed * 0.9 + fps * 0.1
            };
        }

        // A long stall integrates as one short step instead of launching
        // the player through the floor.
        dt = dt.min(0.1);

        // Slider edits apply live.
        self.settings = self.settings.clamped();
        self.projection.set_fov(self.settings.fov_degrees);
        self.controller.set_sensitivity(self.settings.mouse_sensitivity);

        // The menu releases the cursor but never pauses the world.
        self.player
            .update(&self.world, &self.camera, self.controller.move_intent(), dt);
        self.camera.follow(self.player.position);

        self.gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.projection.get_camera_uniform(&self.camera)),
        );

        self.block_renderer.update(
            &self.gpu.device,
            &self.gpu.queue,
            &self.world,
            &self.camera,
            self.settings.fov_degrees,
            self.controller.selected_kind(),
        );
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.window.request_redraw();

        if !self.gpu.is_surface_configured {
            return Ok(());
        }

        let output = self.gpu.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.1,
                            g: 0.2,
                            b: 0.3,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            self.sky_renderer.draw(&mut render_pass, &self.camera_bind_group);
            self.block_renderer.draw(&mut render_pass, &self.camera_bind_group);
        }

        let actions = self.ui.draw(
            &self.window,
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &view,
            [self.gpu.config.width, self.gpu.config.height],
            UiFrame {
                menu_open: self.menu_open,
                fps: self.fps_smoothed,
                selected_kind: self.controller.selected_kind(),
                settings: &mut self.settings,
            },
        );

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        if actions.resume {
            self.close_menu();
        }
        if actions.quit {
            self.quit_requested = true;
        }

        self.limit_frame_rate();

        Ok(())
    }

    /// Sleeps off whatever remains of the frame budget after present.
    fn limit_frame_rate(&mut self) {
        let budget = self.settings.frame_budget();
        let elapsed = self.last_present.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
        self.last_present = Instant::now();
    }
}
