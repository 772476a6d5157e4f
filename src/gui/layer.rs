use std::rc::Rc;

use super::batch::GuiBatch;
use super::component::{Changes, Component, ComponentBase, PositionMode};
use super::container::Container;
use super::font::Font;
use super::menus::{GameGui, PauseMenu, StartMenu};
use crate::game::World;
use crate::input::{KeyInput, MouseEvent};
use crate::math::Matrix3f;

/// Top-level children of the GUI root.
pub enum Screen {
    Game(GameGui),
    Start(StartMenu),
    Pause(PauseMenu),
}

macro_rules! each_screen {
    ($screen:expr, $inner:ident => $body:expr) => {
        match $screen {
            Screen::Game($inner) => $body,
            Screen::Start($inner) => $body,
            Screen::Pause($inner) => $body,
        }
    };
}

impl Component for Screen {
    fn base(&self) -> &ComponentBase {
        each_screen!(self, s => s.base())
    }

    fn base_mut(&mut self) -> &mut ComponentBase {
        each_screen!(self, s => s.base_mut())
    }

    fn update(&mut self) -> Changes {
        each_screen!(self, s => s.update())
    }

    fn render(&self, batch: &mut GuiBatch) {
        each_screen!(self, s => s.render(batch))
    }

    fn destroy(&mut self) {
        each_screen!(self, s => s.destroy())
    }

    fn set_transform(&mut self, transform: Matrix3f) {
        each_screen!(self, s => s.set_transform(transform))
    }

    fn receive_mouse_event(&mut self, event: &MouseEvent) {
        each_screen!(self, s => s.receive_mouse_event(event))
    }
}

/// Per-frame input the GUI reacts to.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub width: f32,
    pub height: f32,
    pub mouse: MouseEvent,
    /// Escape held.
    pub pause_key_down: bool,
    /// Enter held.
    pub confirm_key_down: bool,
    pub fps: u32,
}

/// Screen state and component tree of the GUI, independent of the GPU.
///
/// Switches between the start menu, the running game and the pause menu,
/// pausing and resuming the world to match.
pub struct GuiLayer {
    font: Rc<Font>,
    root: Container<Screen>,
    pause_key: KeyInput,
    confirm_key: KeyInput,
    show_fps: bool,
    started: bool,
    close_requested: bool,
}

impl GuiLayer {
    pub fn new(font: Rc<Font>, show_fps: bool) -> Self {
        let mut root = Container::new(640.0, 480.0);
        root.add(Screen::Game(
            GameGui::new(&font, show_fps).positioned(PositionMode::TopLeft, 0.0, 0.0),
        ));
        root.add(Screen::Start(StartMenu::new(&font)));
        Self {
            font,
            root,
            pause_key: KeyInput::default(),
            confirm_key: KeyInput::default(),
            show_fps,
            started: false,
            close_requested: false,
        }
    }

    pub fn has_game_started(&self) -> bool {
        self.started
    }

    pub fn is_pause_menu_open(&self) -> bool {
        self.pause_menu().is_some()
    }

    pub fn is_close_requested(&self) -> bool {
        self.close_requested
    }

    /// Applies screen transitions, lays the tree out for the current frame
    /// size and collects its geometry.
    pub fn frame(&mut self, input: &FrameInput, world: &mut World) -> GuiBatch {
        let pause_pressed = self.pause_key.poll(input.pause_key_down);
        let confirm_pressed = self.confirm_key.poll(input.confirm_key_down);

        if !self.started {
            self.handle_start_menu(confirm_pressed, world);
        } else {
            self.handle_pause_menu(pause_pressed, world);
            if confirm_pressed && world.is_over() && !self.is_pause_menu_open() {
                world.reset();
            }
        }

        let (width, height) = (input.width, input.height);
        let show_fps = self.show_fps;
        if let Some(hud) = self.game_gui_mut() {
            hud.set_show_fps(show_fps);
            hud.display_fps(input.fps);
            hud.display_score(world.score());
            hud.display_game_over(world.is_over());
            hud.set_size(width, height);
        }

        self.root.set_size(width, height);
        self.root.receive_mouse_event(&input.mouse);
        self.root.update();

        let mut batch = GuiBatch::new(width, height);
        self.root.render(&mut batch);
        batch
    }

    /// Releases the whole component tree.
    pub fn destroy(&mut self) {
        self.root.destroy();
    }

    fn handle_start_menu(&mut self, confirm_pressed: bool, world: &mut World) {
        let (start, close) = match self.start_menu() {
            Some(menu) => (menu.is_start_requested(), menu.is_close_requested()),
            None => (true, false),
        };
        if close {
            log::info!("quit from start menu");
            self.close_requested = true;
        } else if start || confirm_pressed {
            log::info!("game started");
            if let Some(mut menu) = self.root.remove_first(|s| matches!(s, Screen::Start(_))) {
                menu.destroy();
            }
            self.started = true;
            world.unpause();
        }
    }

    fn handle_pause_menu(&mut self, pause_pressed: bool, world: &mut World) {
        let state = self
            .pause_menu()
            .map(|m| (m.is_resume_requested(), m.is_quit_requested(), m.show_fps()));
        match state {
            None if pause_pressed => {
                log::info!("pause menu opened");
                self.root.add(Screen::Pause(PauseMenu::new(&self.font, self.show_fps)));
                world.pause();
            }
            None => {}
            Some((resume, quit, show_fps)) => {
                self.show_fps = show_fps;
                if quit {
                    log::info!("quit from pause menu");
                    self.close_requested = true;
                } else if resume || pause_pressed {
                    log::info!("pause menu closed");
                    if let Some(mut menu) =
                        self.root.remove_first(|s| matches!(s, Screen::Pause(_)))
                    {
                        menu.destroy();
                    }
                    world.unpause();
                }
            }
        }
    }

    fn start_menu(&self) -> Option<&StartMenu> {
        self.root.children().iter().find_map(|s| match s {
            Screen::Start(menu) => Some(menu),
            _ => None,
        })
    }

    fn pause_menu(&self) -> Option<&PauseMenu> {
        self.root.children().iter().find_map(|s| match s {
            Screen::Pause(menu) => Some(menu),
            _ => None,
        })
    }

    fn game_gui_mut(&mut self) -> Option<&mut GameGui> {
        self.root.children_mut().iter_mut().find_map(|s| match s {
            Screen::Game(hud) => Some(hud),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> FrameInput {
        FrameInput {
            width: 800.0,
            height: 600.0,
            fps: 60,
            ..Default::default()
        }
    }

    fn click(x: f32, y: f32) -> FrameInput {
        FrameInput {
            mouse: MouseEvent {
                x,
                y,
                pressed: true,
                clicked: true,
            },
            ..input()
        }
    }

    fn layer() -> GuiLayer {
        GuiLayer::new(Rc::new(Font::builtin()), true)
    }

    // The start menu is 328 x 220 centred on 800 x 600, so its buttons
    // (280 x 48) are centred horizontally at x = 400 and vertically at
    // y = 302 (START) and y = 362 (QUIT).

    #[test]
    fn clicking_start_removes_the_menu_and_unpauses() {
        let mut gui = layer();
        let mut world = World::new(1);
        gui.frame(&input(), &mut world);
        assert!(!gui.has_game_started());

        gui.frame(&click(400.0, 302.0), &mut world);
        gui.frame(&input(), &mut world);
        assert!(gui.has_game_started());
        assert!(!world.is_paused());
        assert_eq!(gui.root.len(), 1);
    }

    #[test]
    fn clicking_quit_requests_close() {
        let mut gui = layer();
        let mut world = World::new(1);
        gui.frame(&click(400.0, 362.0), &mut world);
        gui.frame(&input(), &mut world);
        assert!(gui.is_close_requested());
        assert!(!gui.has_game_started());
    }

    #[test]
    fn enter_starts_the_game() {
        let mut gui = layer();
        let mut world = World::new(1);
        gui.frame(&FrameInput { confirm_key_down: true, ..input() }, &mut world);
        assert!(gui.has_game_started());
    }

    #[test]
    fn escape_toggles_the_pause_menu() {
        let mut gui = layer();
        let mut world = World::new(1);
        gui.frame(&FrameInput { confirm_key_down: true, ..input() }, &mut world);

        let escape = FrameInput { pause_key_down: true, ..input() };
        gui.frame(&escape, &mut world);
        assert!(gui.is_pause_menu_open());
        assert!(world.is_paused());

        // Holding the key does not close it again.
        gui.frame(&escape, &mut world);
        assert!(gui.is_pause_menu_open());

        gui.frame(&input(), &mut world);
        gui.frame(&escape, &mut world);
        assert!(!gui.is_pause_menu_open());
        assert!(!world.is_paused());
    }

    #[test]
    fn hud_shows_the_world_score() {
        let mut gui = layer();
        let mut world = World::new(1);
        gui.frame(&input(), &mut world);
        let hud = gui
            .root
            .children()
            .iter()
            .find_map(|s| match s {
                Screen::Game(hud) => Some(hud),
                _ => None,
            })
            .unwrap();
        assert_eq!(hud.score_text(), "SCORE: 0");
        assert_eq!(hud.fps_text(), "FPS: 60");
        assert_eq!(hud.base().width(), 800.0);
    }

    #[test]
    fn frame_produces_geometry() {
        let mut gui = layer();
        let mut world = World::new(1);
        let batch = gui.frame(&input(), &mut world);
        assert!(!batch.is_empty());
        assert_eq!(batch.screen_size(), (800.0, 600.0));
    }
}
