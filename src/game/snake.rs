use std::collections::VecDeque;

use cgmath::{SquareMatrix, Vector3};

use crate::math::{self, Matrix3f, Vector3f};

/// Distance travelled by the head per tick.
pub const SPEED: f32 = 0.004;
/// Degrees turned per tick while a steering key is held.
pub const TURN_DEGREES: f32 = 2.5;
/// Ticks of trail between two consecutive body segments.
pub const SEGMENT_SPACING: usize = 4;
pub const SEGMENT_RADIUS: f32 = 0.008;
pub const INITIAL_SEGMENTS: usize = 5;
/// Segments added per food eaten.
pub const GROWTH: usize = 3;
/// Segments right behind the head that can never be bitten.
const NECK: usize = 4;

/// Pitch and yaw input for one tick, each in -1..=1.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Steering {
    pub pitch: f32,
    pub yaw: f32,
}

#[derive(Debug, Clone)]
pub struct Snake {
    head: Vector3f,
    /// Column `z` is forward, column `y` is up.
    heading: Matrix3f,
    /// Past head positions, newest first.
    trail: VecDeque<Vector3f>,
    segments: usize,
}

impl Snake {
    pub fn new() -> Self {
        let mut trail = VecDeque::new();
        let head = Vector3::new(0.0, 0.0, 0.0);
        // Lay the initial body out straight behind the head.
        for i in 0..INITIAL_SEGMENTS * SEGMENT_SPACING {
            trail.push_back(math::wrap_position(Vector3::new(0.0, 0.0, -(i as f32) * SPEED)));
        }
        Self {
            head,
            heading: Matrix3f::identity(),
            trail,
            segments: INITIAL_SEGMENTS,
        }
    }

    pub fn head(&self) -> Vector3f {
        self.head
    }

    pub fn heading(&self) -> &Matrix3f {
        &self.heading
    }

    pub fn forward(&self) -> Vector3f {
        self.heading.z
    }

    pub fn up(&self) -> Vector3f {
        self.heading.y
    }

    pub fn len(&self) -> usize {
        self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments == 0
    }

    pub fn steer(&mut self, steering: Steering) {
        if steering == Steering::default() {
            return;
        }
        math::rotate(
            &mut self.heading,
            steering.pitch * TURN_DEGREES,
            steering.yaw * TURN_DEGREES,
            0.0,
        );
        math::orthonormalize(&mut self.heading);
    }

    pub fn advance(&mut self) {
        self.head = math::wrap_position(self.head + self.forward() * SPEED);
        self.trail.push_front(self.head);
        self.trail.truncate(self.segments * SEGMENT_SPACING);
    }

    pub fn grow(&mut self) {
        self.segments += GROWTH;
    }

    /// Body segment positions, head first.
    pub fn segments(&self) -> impl Iterator<Item = Vector3f> + '_ {
        self.trail.iter().step_by(SEGMENT_SPACING).copied()
    }

    pub fn bites_itself(&self) -> bool {
        self.segments()
            .skip(NECK)
            .any(|s| math::toroidal_distance(self.head, s) < 2.0 * SEGMENT_RADIUS)
    }
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_a_straight_body() {
        let snake = Snake::new();
        assert_eq!(snake.segments().count(), INITIAL_SEGMENTS);
        assert!(!snake.bites_itself());
    }

    #[test]
    fn advance_wraps_across_the_far_face() {
        let mut snake = Snake::new();
        let ticks = (0.6 / SPEED) as usize;
        for _ in 0..ticks {
            snake.advance();
        }
        let z = snake.head().z;
        assert!((-0.5..0.5).contains(&z));
        assert!(z < 0.0, "head should have wrapped, z = {}", z);
    }

    #[test]
    fn growing_lengthens_the_body_as_it_moves() {
        let mut snake = Snake::new();
        snake.grow();
        for _ in 0..GROWTH * SEGMENT_SPACING {
            snake.advance();
        }
        assert_eq!(snake.len(), INITIAL_SEGMENTS + GROWTH);
        assert_eq!(snake.segments().count(), INITIAL_SEGMENTS + GROWTH);
    }

    #[test]
    fn steering_turns_the_heading() {
        let mut snake = Snake::new();
        snake.steer(Steering { pitch: 0.0, yaw: 1.0 });
        assert!(snake.forward().x.abs() > 0.01);
    }

    #[test]
    fn a_tight_circle_bites_the_body() {
        let mut snake = Snake::new();
        // Long enough to reach all the way around one turning circle.
        for _ in 0..11 {
            snake.grow();
        }
        let mut bitten = false;
        for _ in 0..2000 {
            snake.steer(Steering { pitch: 0.0, yaw: 1.0 });
            snake.advance();
            if snake.bites_itself() {
                bitten = true;
                break;
            }
        }
        assert!(bitten);
    }
}
