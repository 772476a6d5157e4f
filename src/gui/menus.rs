//! The three screens layered by the GUI: start menu, pause menu and the
//! in-game HUD. Each one composes a `Container<Widget>`.

use std::rc::Rc;

use super::batch::Color;
use super::component::{delegate_component, Changes, Component, PositionMode};
use super::container::{Container, SizeMode};
use super::font::Font;
use super::widgets::{Button, Label, Panel, Widget};
use crate::input::MouseEvent;

const MENU_COLOR: Color = [0.05, 0.11, 0.15, 0.9];
const CROSSHAIR_COLOR: Color = [1.0, 1.0, 1.0, 0.6];
const GAME_OVER_COLOR: Color = [1.0, 0.35, 0.3, 1.0];

const MENU_PADDING: f32 = 24.0;
const BUTTON_WIDTH: f32 = 280.0;
const BUTTON_HEIGHT: f32 = 48.0;
const BUTTON_SPACING: f32 = 12.0;
const TITLE_SCALE: f32 = 5.0;
const HUD_SCALE: f32 = 2.0;
const HUD_MARGIN: f32 = 10.0;

/// Centred, auto-sized panel with a title and a column of buttons.
fn menu(font: &Rc<Font>, title: &str, buttons: &[&str]) -> Container<Widget> {
    let mut inner = Container::new(0.0, 0.0);
    inner.set_background(MENU_COLOR, font.white_uv());
    inner.set_inner_offset(MENU_PADDING, MENU_PADDING);
    inner.add(
        Label::new(font, title, TITLE_SCALE)
            .positioned(PositionMode::Flow, 0.0, MENU_PADDING)
            .into(),
    );
    for caption in buttons {
        inner.add(
            Button::new(font, caption, BUTTON_WIDTH, BUTTON_HEIGHT)
                .positioned(PositionMode::Flow, 0.0, BUTTON_SPACING)
                .into(),
        );
    }
    inner.set_width_mode(SizeMode::Auto);
    inner.set_height_mode(SizeMode::Auto);
    inner.base_mut().set_position(PositionMode::Center);
    inner
}

/// Index of the `n`th button in a container built by [`menu`].
fn button_index(n: usize) -> usize {
    n + 1
}

fn clicked(inner: &mut Container<Widget>, n: usize) -> bool {
    inner
        .child_mut(button_index(n))
        .and_then(Widget::as_button_mut)
        .map(Button::take_clicked)
        .unwrap_or(false)
}

pub struct StartMenu {
    inner: Container<Widget>,
    start_requested: bool,
    close_requested: bool,
}

impl StartMenu {
    const START: usize = 0;
    const QUIT: usize = 1;

    pub fn new(font: &Rc<Font>) -> Self {
        Self {
            inner: menu(font, "SNAKE 3D", &["START", "QUIT"]),
            start_requested: false,
            close_requested: false,
        }
    }

    pub fn is_start_requested(&self) -> bool {
        self.start_requested
    }

    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }
}

impl Component for StartMenu {
    delegate_component!(inner);

    fn update(&mut self) -> Changes {
        self.start_requested |= clicked(&mut self.inner, Self::START);
        self.close_requested |= clicked(&mut self.inner, Self::QUIT);
        self.inner.update()
    }

    fn receive_mouse_event(&mut self, event: &MouseEvent) {
        self.inner.receive_mouse_event(event);
    }
}

pub struct PauseMenu {
    inner: Container<Widget>,
    show_fps: bool,
    resume_requested: bool,
    quit_requested: bool,
}

impl PauseMenu {
    const RESUME: usize = 0;
    const FPS: usize = 1;
    const QUIT: usize = 2;

    pub fn new(font: &Rc<Font>, show_fps: bool) -> Self {
        let mut menu = Self {
            inner: menu(font, "PAUSED", &["RESUME", "", "QUIT"]),
            show_fps,
            resume_requested: false,
            quit_requested: false,
        };
        menu.refresh_fps_caption();
        menu
    }

    pub fn show_fps(&self) -> bool {
        self.show_fps
    }

    pub fn is_resume_requested(&self) -> bool {
        self.resume_requested
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn refresh_fps_caption(&mut self) {
        let caption = if self.show_fps { "FPS: ON" } else { "FPS: OFF" };
        if let Some(button) = self
            .inner
            .child_mut(button_index(Self::FPS))
            .and_then(Widget::as_button_mut)
        {
            button.set_text(caption);
        }
    }
}

impl Component for PauseMenu {
    delegate_component!(inner);

    fn update(&mut self) -> Changes {
        self.resume_requested |= clicked(&mut self.inner, Self::RESUME);
        self.quit_requested |= clicked(&mut self.inner, Self::QUIT);
        if clicked(&mut self.inner, Self::FPS) {
            self.show_fps = !self.show_fps;
            self.refresh_fps_caption();
        }
        self.inner.update()
    }

    fn receive_mouse_event(&mut self, event: &MouseEvent) {
        self.inner.receive_mouse_event(event);
    }
}

/// The in-game HUD: FPS counter, score, crosshair and game-over banner.
pub struct GameGui {
    inner: Container<Widget>,
    show_fps: bool,
}

impl GameGui {
    const FPS: usize = 0;
    const SCORE: usize = 1;
    const BANNER: usize = 4;

    pub fn new(font: &Rc<Font>, show_fps: bool) -> Self {
        let mut inner = Container::new(0.0, 0.0);
        inner.add(
            Label::new(font, "", HUD_SCALE)
                .positioned(PositionMode::TopLeft, HUD_MARGIN, HUD_MARGIN)
                .into(),
        );
        inner.add(
            Label::new(font, "SCORE: 0", HUD_SCALE)
                .positioned(PositionMode::TopRight, HUD_MARGIN, HUD_MARGIN)
                .into(),
        );
        inner.add(
            Panel::new(font, 16.0, 2.0, CROSSHAIR_COLOR)
                .positioned(PositionMode::Center, 0.0, 0.0)
                .into(),
        );
        inner.add(
            Panel::new(font, 2.0, 16.0, CROSSHAIR_COLOR)
                .positioned(PositionMode::Center, 0.0, 0.0)
                .into(),
        );
        inner.add(
            Label::new(font, "", 4.0)
                .with_color(GAME_OVER_COLOR)
                .positioned(PositionMode::Center, 0.0, 0.0)
                .into(),
        );
        inner.add(
            Label::new(font, "ESC: PAUSE", HUD_SCALE)
                .positioned(PositionMode::BottomLeft, HUD_MARGIN, HUD_MARGIN)
                .into(),
        );
        Self { inner, show_fps }
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.inner.set_size(width, height);
    }

    pub fn set_show_fps(&mut self, show_fps: bool) {
        self.show_fps = show_fps;
        if !show_fps {
            self.set_label(Self::FPS, String::new());
        }
    }

    pub fn display_fps(&mut self, fps: u32) {
        if self.show_fps {
            self.set_label(Self::FPS, format!("FPS: {}", fps));
        }
    }

    pub fn display_score(&mut self, score: u32) {
        self.set_label(Self::SCORE, format!("SCORE: {}", score));
    }

    pub fn display_game_over(&mut self, over: bool) {
        let text = if over { "GAME OVER - ENTER TO RETRY" } else { "" };
        self.set_label(Self::BANNER, text.to_string());
    }

    fn label(&self, index: usize) -> Option<&Label> {
        match self.inner.child(index) {
            Some(Widget::Label(label)) => Some(label),
            _ => None,
        }
    }

    pub fn score_text(&self) -> &str {
        self.label(Self::SCORE).map(Label::text).unwrap_or_default()
    }

    pub fn fps_text(&self) -> &str {
        self.label(Self::FPS).map(Label::text).unwrap_or_default()
    }

    fn set_label(&mut self, index: usize, text: String) {
        if let Some(label) = self.inner.child_mut(index).and_then(Widget::as_label_mut) {
            label.set_text(text);
        }
    }
}

impl Component for GameGui {
    delegate_component!(inner);

    fn update(&mut self) -> Changes {
        self.inner.update()
    }
}
