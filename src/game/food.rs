use cgmath::{InnerSpace, SquareMatrix, Vector3};
use rand::{distributions::Uniform, prelude::Distribution, Rng};

use crate::math::{self, Matrix3f, Vector3f};

/// Radius a food item grows towards after spawning.
pub const BASE_RADIUS: f32 = 0.025;

/// Fraction of the remaining radius gap closed per tick.
const GROWTH_RATE: f32 = 0.1;
/// Spin per tick, in degrees around the local z axis.
const SPIN_DEGREES: f32 = 3.0;

/// A piece of food floating somewhere in the wrapping play cube.
#[derive(Debug, Clone)]
pub struct Food {
    pub position: Vector3f,
    pub radius: f32,
    pub rotation: Matrix3f,
}

impl Food {
    pub fn new() -> Self {
        Self::spawn(&mut rand::thread_rng())
    }

    /// Drops a new food item at a uniformly random point of the cube.
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let axis = Uniform::new(-0.5f32, 0.5);
        let position = Vector3::new(axis.sample(rng), axis.sample(rng), axis.sample(rng));
        Self::at(position)
    }

    pub fn at(position: Vector3f) -> Self {
        let mut rotation = Matrix3f::identity();
        math::rotate(&mut rotation, 45.0, 45.0, 0.0);
        Self {
            position: math::wrap_position(position),
            radius: 0.0,
            rotation,
        }
    }

    /// Distance from `point` to this food, measured across the wrapping
    /// faces of the cube when that is shorter.
    pub fn distance_to(&self, point: Vector3f) -> f32 {
        math::wrap_delta(self.position - point).magnitude()
    }

    pub fn update(&mut self) {
        self.radius += (BASE_RADIUS - self.radius) * GROWTH_RATE;
        math::rotate(&mut self.rotation, 0.0, 0.0, SPIN_DEGREES);
    }
}

impl Default for Food {
    fn default() -> Self {
        Self::new()
    }
}
