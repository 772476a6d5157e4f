use std::time::{Duration, Instant};

use winit::{dpi::PhysicalSize, event::WindowEvent, event_loop::EventLoop, keyboard::KeyCode};

use crate::display::Display;
use crate::game::World;
use crate::gui::{Font, FrameInput, GuiRenderer};
use crate::input;
use crate::render::WorldRenderer;
use crate::settings::Settings;

/// Frames counted over the last whole second.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0,
        }
    }

    pub fn frame(&mut self, now: Instant) -> u32 {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed >= Duration::from_secs(1) {
            self.fps = (self.frames as f32 / elapsed.as_secs_f32()).round() as u32;
            self.frames = 0;
            self.window_start = now;
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}

pub struct State {
    gui: GuiRenderer,
    world_renderer: WorldRenderer,
    world: World,
    tick: Duration,
    last_updated: Instant,
    fps: FpsCounter,
    // Dropped last: the renderers' GPU resources belong to its device.
    display: Display,
}

impl State {
    pub async fn new(event_loop: &EventLoop<()>, settings: &Settings) -> anyhow::Result<Self> {
        let display = Display::new(event_loop, settings).await?;
        let font = Font::from_settings(settings.font_path.as_deref())?;
        let world_renderer =
            WorldRenderer::new(display.device(), display.config(), settings.fov);
        let gui = GuiRenderer::new(&display, font, settings.show_fps);
        let now = Instant::now();

        Ok(Self {
            gui,
            world_renderer,
            world: World::new(settings.food_count),
            tick: Duration::from_millis(settings.tick_millis.max(1)),
            last_updated: now,
            fps: FpsCounter::new(now),
            display,
        })
    }

    pub fn window(&self) -> &winit::window::Window {
        self.display.window()
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.display.size()
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if self.display.resize(new_size) {
            self.world_renderer
                .resize(self.display.device(), self.display.config());
        }
    }

    pub fn input(&mut self, event: &WindowEvent) -> bool {
        self.display.handle_event(event)
    }

    /// Advances the world by as many fixed ticks as have elapsed.
    pub fn update(&mut self) {
        let steering = input::steering(|key| self.display.is_key_pressed(key));
        let mut ticks = 0;
        while self.last_updated.elapsed() >= self.tick && ticks < 8 {
            self.world.update(steering);
            self.last_updated += self.tick;
            ticks += 1;
        }
        if self.last_updated.elapsed() >= self.tick {
            // Long stall; drop the backlog.
            self.last_updated = Instant::now();
        }
        self.world_renderer
            .update(self.display.device(), self.display.queue(), &self.world);
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.display.acquire_frame()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder =
            self.display
                .device()
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });

        self.world_renderer.render(&mut encoder, &view);

        let frame_input = FrameInput {
            width: self.display.width() as f32,
            height: self.display.height() as f32,
            mouse: self.display.take_mouse_event(),
            pause_key_down: self.display.is_key_pressed(KeyCode::Escape),
            confirm_key_down: self.display.is_key_pressed(KeyCode::Enter),
            fps: self.fps.frame(Instant::now()),
        };
        self.gui.render(
            &self.display,
            &mut encoder,
            &view,
            &frame_input,
            &mut self.world,
        );
        if self.gui.is_close_requested() {
            self.display.close();
        }

        self.display.queue().submit(std::iter::once(encoder.finish()));
        self.display.update(output);
        Ok(())
    }

    pub fn is_close_requested(&self) -> bool {
        self.display.is_close_requested()
    }

    pub fn request_close(&mut self) {
        self.display.close();
    }

    pub fn destroy(&mut self) {
        self.gui.destroy();
        log::info!("final score {}", self.world.score());
    }
}
