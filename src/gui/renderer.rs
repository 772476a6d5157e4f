use std::rc::Rc;

use super::font::Font;
use super::layer::{FrameInput, GuiLayer};
use super::shader::GuiShader;
use crate::display::Display;
use crate::game::World;

/// The GUI as drawn each frame: the screen state machine and component tree
/// plus the GPU pass that puts them on screen.
pub struct GuiRenderer {
    layer: GuiLayer,
    shader: GuiShader,
}

impl GuiRenderer {
    pub fn new(display: &Display, font: Font, show_fps: bool) -> Self {
        let shader = GuiShader::new(
            display.device(),
            display.queue(),
            display.format(),
            &font,
        );
        Self {
            layer: GuiLayer::new(Rc::new(font), show_fps),
            shader,
        }
    }

    pub fn render(
        &mut self,
        display: &Display,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        input: &FrameInput,
        world: &mut World,
    ) {
        let batch = self.layer.frame(input, world);
        self.shader
            .draw(display.device(), display.queue(), encoder, view, &batch);
    }

    pub fn is_close_requested(&self) -> bool {
        self.layer.is_close_requested()
    }

    pub fn destroy(&mut self) {
        self.layer.destroy();
        log::debug!("gui destroyed");
    }
}
