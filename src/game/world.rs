use rand::Rng;

use super::food::Food;
use super::snake::{Snake, Steering, SEGMENT_RADIUS};

/// Everything that lives in the wrapping play cube.
pub struct World {
    snake: Snake,
    foods: Vec<Food>,
    food_count: usize,
    score: u32,
    paused: bool,
    over: bool,
}

impl World {
    /// New world, paused until the player starts the game.
    pub fn new(food_count: usize) -> Self {
        Self {
            snake: Snake::new(),
            foods: (0..food_count).map(|_| Food::new()).collect(),
            food_count,
            score: 0,
            paused: true,
            over: false,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn foods_mut(&mut self) -> &mut Vec<Food> {
        &mut self.foods
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("game paused");
        }
        self.paused = true;
    }

    pub fn unpause(&mut self) {
        if self.paused {
            log::info!("game resumed");
        }
        self.paused = false;
    }

    /// Starts a fresh round, keeping the pause state.
    pub fn reset(&mut self) {
        log::info!("new round, previous score {}", self.score);
        self.snake = Snake::new();
        self.foods = (0..self.food_count).map(|_| Food::new()).collect();
        self.score = 0;
        self.over = false;
    }

    pub fn update(&mut self, steering: Steering) {
        self.update_with(steering, &mut rand::thread_rng());
    }

    /// One simulation tick, drawing replacement food from `rng`.
    pub fn update_with<R: Rng + ?Sized>(&mut self, steering: Steering, rng: &mut R) {
        if self.paused || self.over {
            return;
        }
        self.snake.steer(steering);
        self.snake.advance();

        let head = self.snake.head();
        for food in self.foods.iter_mut() {
            food.update();
            if food.distance_to(head) < food.radius + SEGMENT_RADIUS {
                *food = Food::spawn(rng);
                self.snake.grow();
                self.score += 1;
                log::info!("food eaten, score {}", self.score);
            }
        }

        if self.snake.bites_itself() {
            self.over = true;
            log::info!("game over with score {}", self.score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::food::BASE_RADIUS;
    use crate::game::snake::{GROWTH, INITIAL_SEGMENTS, SPEED};
    use cgmath::Vector3;
    use rand::{rngs::StdRng, SeedableRng};

    fn running_world() -> World {
        let mut world = World::new(0);
        world.unpause();
        world
    }

    #[test]
    fn starts_paused_and_does_not_move() {
        let mut world = World::new(3);
        assert!(world.is_paused());
        let head = world.snake().head();
        world.update(Steering::default());
        assert_eq!(world.snake().head(), head);
        assert_eq!(world.foods().len(), 3);
    }

    #[test]
    fn eating_food_scores_and_grows() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut world = running_world();
        let mut food = Food::at(Vector3::new(0.0, 0.0, SPEED));
        food.radius = BASE_RADIUS;
        world.foods_mut().push(food);

        world.update_with(Steering::default(), &mut rng);

        assert_eq!(world.score(), 1);
        assert_eq!(world.snake().len(), INITIAL_SEGMENTS + GROWTH);
        assert_eq!(world.foods().len(), 1);
        assert_eq!(world.foods()[0].radius, 0.0);
    }

    #[test]
    fn food_across_the_wrap_is_eaten() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut world = running_world();
        // Head moves towards +z; food sits just past the opposite face.
        for _ in 0..((0.5 / SPEED) as usize - 2) {
            world.update_with(Steering::default(), &mut rng);
        }
        let mut food = Food::at(Vector3::new(0.0, 0.0, -0.499));
        food.radius = BASE_RADIUS;
        world.foods_mut().push(food);
        world.update_with(Steering::default(), &mut rng);
        assert_eq!(world.score(), 1);
    }

    #[test]
    fn pause_freezes_the_simulation() {
        let mut world = running_world();
        world.update(Steering::default());
        world.pause();
        let head = world.snake().head();
        world.update(Steering::default());
        assert_eq!(world.snake().head(), head);
        world.unpause();
        world.update(Steering::default());
        assert_ne!(world.snake().head(), head);
    }

    #[test]
    fn reset_clears_score_and_game_over() {
        let mut world = World::new(2);
        world.score = 7;
        world.over = true;
        world.reset();
        assert_eq!(world.score(), 0);
        assert!(!world.is_over());
        assert_eq!(world.foods().len(), 2);
    }
}
