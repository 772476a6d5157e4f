//! Game logic for the wrapping play cube: the snake, its food and the world
//! that ticks them.

pub mod food;
pub mod snake;
pub mod world;

pub use food::Food;
pub use snake::{Snake, Steering};
pub use world::World;
