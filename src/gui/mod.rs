//! Screen-space user interface.
//!
//! Components are laid out in pixels from the top-left corner of the window.
//! A [`Container`] places its children by [`PositionMode`] and can size itself
//! to fit them; widgets and menus are built by composing containers. Each
//! frame the tree is rendered into a [`GuiBatch`] that [`GuiShader`] draws over
//! the 3D scene.

pub mod batch;
pub mod component;
pub mod container;
pub mod font;
pub mod layer;
pub mod menus;
pub mod renderer;
pub mod shader;
pub mod widgets;

pub use batch::GuiBatch;
pub use component::{Changes, Component, ComponentBase, PositionMode};
pub use container::{Container, SizeMode};
pub use font::Font;
pub use layer::{FrameInput, GuiLayer};
pub use renderer::GuiRenderer;
pub use shader::GuiShader;
