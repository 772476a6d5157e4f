use std::rc::Rc;

use super::batch::{Color, GuiBatch, UvRect};
use super::component::{delegate_component, Changes, Component, ComponentBase, PositionMode};
use super::container::Container;
use super::font::Font;
use crate::input::MouseEvent;
use crate::math::Matrix3f;

pub const TEXT_COLOR: Color = [1.0, 1.0, 1.0, 1.0];
pub const BUTTON_COLOR: Color = [0.12, 0.22, 0.27, 0.92];
pub const BUTTON_HOVER_COLOR: Color = [0.2, 0.44, 0.5, 1.0];

/// A solid rectangle.
pub struct Panel {
    base: ComponentBase,
    color: Color,
    uv: UvRect,
}

impl Panel {
    pub fn new(font: &Font, width: f32, height: f32, color: Color) -> Self {
        Self {
            base: ComponentBase::new(width, height),
            color,
            uv: font.white_uv(),
        }
    }
}

impl Component for Panel {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn render(&self, batch: &mut GuiBatch) {
        batch.push_quad(
            self.base.transform(),
            0.0,
            0.0,
            self.base.width(),
            self.base.height(),
            self.uv,
            self.color,
        );
    }
}

/// A single line of text. Its size always matches the text, so changing the
/// text is reported to the parent as a resize.
pub struct Label {
    base: ComponentBase,
    font: Rc<Font>,
    text: String,
    scale: f32,
    color: Color,
    glyphs: Vec<UvRect>,
}

impl Label {
    pub fn new(font: &Rc<Font>, text: impl Into<String>, scale: f32) -> Self {
        let mut label = Self {
            base: ComponentBase::new(0.0, 0.0),
            font: Rc::clone(font),
            text: String::new(),
            scale,
            color: TEXT_COLOR,
            glyphs: Vec::new(),
        };
        label.set_text(text);
        label.base.take_changes();
        label
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text && !self.glyphs.is_empty() {
            return;
        }
        self.glyphs = text.chars().map(|c| self.font.glyph_uv(c)).collect();
        self.base.set_size(
            self.font.text_width(&text, self.scale),
            self.font.line_height() * self.scale,
        );
        self.text = text;
    }
}

impl Component for Label {
    fn base(&self) -> &ComponentBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        &mut self.base
    }

    fn render(&self, batch: &mut GuiBatch) {
        let advance = self.font.advance() * self.scale;
        let height = self.font.line_height() * self.scale;
        for (i, uv) in self.glyphs.iter().enumerate() {
            batch.push_quad(
                self.base.transform(),
                i as f32 * advance,
                0.0,
                advance,
                height,
                *uv,
                self.color,
            );
        }
    }

    fn destroy(&mut self) {
        self.glyphs.clear();
    }
}

/// A clickable box with a centred caption.
pub struct Button {
    inner: Container<Label>,
    white: UvRect,
    hovered: bool,
    clicked: bool,
}

impl Button {
    pub fn new(font: &Rc<Font>, text: &str, width: f32, height: f32) -> Self {
        let mut inner = Container::new(width, height);
        inner.add(Label::new(font, text, 3.0).positioned(PositionMode::Center, 0.0, 0.0));
        let white = font.white_uv();
        inner.set_background(BUTTON_COLOR, white);
        Self {
            inner,
            white,
            hovered: false,
            clicked: false,
        }
    }

    pub fn text(&self) -> &str {
        self.inner.child(0).map(Label::text).unwrap_or_default()
    }

    pub fn set_text(&mut self, text: &str) {
        if let Some(label) = self.inner.child_mut(0) {
            label.set_text(text);
        }
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// True once after each click.
    pub fn take_clicked(&mut self) -> bool {
        std::mem::take(&mut self.clicked)
    }
}

impl Component for Button {
    delegate_component!(inner);

    fn update(&mut self) -> Changes {
        self.inner.update()
    }

    fn receive_mouse_event(&mut self, event: &MouseEvent) {
        self.hovered = self.inner.base().contains(event.x, event.y);
        if self.hovered && event.clicked {
            self.clicked = true;
        }
        let color = if self.hovered { BUTTON_HOVER_COLOR } else { BUTTON_COLOR };
        self.inner.set_background(color, self.white);
    }
}

/// The widgets a menu or HUD is built from.
pub enum Widget {
    Panel(Panel),
    Label(Label),
    Button(Button),
}

macro_rules! each_widget {
    ($widget:expr, $inner:ident => $body:expr) => {
        match $widget {
            Widget::Panel($inner) => $body,
            Widget::Label($inner) => $body,
            Widget::Button($inner) => $body,
        }
    };
}

impl Widget {
    pub fn as_label_mut(&mut self) -> Option<&mut Label> {
        match self {
            Widget::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Widget::Button(button) => Some(button),
            _ => None,
        }
    }
}

impl Component for Widget {
    fn base(&self) -> &ComponentBase {
        each_widget!(self, w => w.base())
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        each_widget!(self, w => w.base_mut())
    }

    fn update(&mut self) -> Changes {
        each_widget!(self, w => w.update())
    }

    fn render(&self, batch: &mut GuiBatch) {
        each_widget!(self, w => w.render(batch))
    }

    fn destroy(&mut self) {
        each_widget!(self, w => w.destroy())
    }

    fn set_transform(&mut self, transform: Matrix3f) {
        each_widget!(self, w => w.set_transform(transform))
    }

    fn receive_mouse_event(&mut self, event: &MouseEvent) {
        each_widget!(self, w => w.receive_mouse_event(event))
    }
}

impl From<Panel> for Widget {
    fn from(panel: Panel) -> Self {
        Widget::Panel(panel)
    }
}

impl From<Label> for Widget {
    fn from(label: Label) -> Self {
        Widget::Label(label)
    }
}

impl From<Button> for Widget {
    fn from(button: Button) -> Self {
        Widget::Button(button)
    }
}

#[cfg(test)]
mod tests {
    use cgmath::SquareMatrix;

    use super::*;
    use crate::math::{translation, with_translation};

    fn font() -> Rc<Font> {
        Rc::new(Font::builtin())
    }

    #[test]
    fn label_size_follows_its_text() {
        let font = font();
        let mut label = Label::new(&font, "SCORE", 2.0);
        assert_eq!((label.base().width(), label.base().height()), (60.0, 16.0));
        assert!(!label.update().resized);

        label.set_text("SCORE: 10");
        assert_eq!(label.base().width(), 108.0);
        assert!(label.update().resized);

        label.set_text("SCORE: 10");
        assert!(!label.update().resized);
    }

    #[test]
    fn label_renders_one_quad_per_character() {
        let font = font();
        let label = Label::new(&font, "AB", 1.0);
        let mut batch = GuiBatch::new(100.0, 100.0);
        label.render(&mut batch);
        assert_eq!(batch.vertices().len(), 8);
        assert_eq!(batch.vertices()[4].position, [6.0, 0.0]);
    }

    #[test]
    fn button_centres_its_caption() {
        let font = font();
        let mut button = Button::new(&font, "GO", 100.0, 40.0);
        button.set_transform(with_translation(&Matrix3f::identity(), 10.0, 10.0));
        let label = button.inner.child(0).unwrap();
        // "GO" at scale 3 is 36 x 24.
        assert_eq!(translation(label.base().transform()), (42.0, 18.0));
    }

    #[test]
    fn button_registers_clicks_inside_only() {
        let font = font();
        let mut button = Button::new(&font, "QUIT", 100.0, 40.0);
        button.set_transform(with_translation(&Matrix3f::identity(), 10.0, 10.0));

        let outside = MouseEvent {
            x: 5.0,
            y: 5.0,
            pressed: true,
            clicked: true,
        };
        button.receive_mouse_event(&outside);
        assert!(!button.take_clicked());

        let hover = MouseEvent {
            x: 50.0,
            y: 30.0,
            pressed: false,
            clicked: false,
        };
        button.receive_mouse_event(&hover);
        assert!(button.is_hovered());
        assert!(!button.take_clicked());

        let inside = MouseEvent {
            clicked: true,
            pressed: true,
            ..hover
        };
        button.receive_mouse_event(&inside);
        assert!(button.take_clicked());
        assert!(!button.take_clicked());
    }

    #[test]
    fn widget_delegates_to_the_wrapped_component() {
        let font = font();
        let mut widget: Widget = Label::new(&font, "HI", 1.0).into();
        assert_eq!(widget.base().width(), 12.0);
        widget.as_label_mut().unwrap().set_text("HELLO");
        assert!(widget.update().resized);
        assert!(widget.as_button_mut().is_none());
    }
}
