use cgmath::{EuclideanSpace, Point3};

use crate::game::Snake;
use crate::math::OPENGL_TO_WGPU_MATRIX;

/// How far behind the head the camera trails.
const FOLLOW_DISTANCE: f32 = 0.12;
/// How far above the head the camera floats.
const FOLLOW_HEIGHT: f32 = 0.03;
const LOOK_AHEAD: f32 = 0.2;

/// Chase camera. The world is drawn relative to the snake head, which
/// therefore always sits at the origin.
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: cgmath::Vector3<f32>,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32, fovy: f32) -> Self {
        Self {
            eye: (0.0, FOLLOW_HEIGHT, -FOLLOW_DISTANCE).into(),
            target: (0.0, 0.0, LOOK_AHEAD).into(),
            up: cgmath::Vector3::unit_y(),
            aspect,
            fovy,
            znear: 0.005,
            zfar: 10.0,
        }
    }

    pub fn build_view_projection_matrix(&self) -> cgmath::Matrix4<f32> {
        let view = cgmath::Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj = cgmath::perspective(
            cgmath::Deg(self.fovy),
            self.aspect,
            self.znear,
            self.zfar,
        );

        OPENGL_TO_WGPU_MATRIX * proj * view
    }

    /// Places the camera behind and above the head, looking along the
    /// snake's heading.
    pub fn follow(&mut self, snake: &Snake) {
        let forward = snake.forward();
        let up = snake.up();
        self.eye = Point3::from_vec(up * FOLLOW_HEIGHT - forward * FOLLOW_DISTANCE);
        self.target = Point3::from_vec(forward * LOOK_AHEAD);
        self.up = up;
    }
}

#[repr(C)]
// This is so we can store this in a buffer
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    // We can't use cgmath with bytemuck directly, so we'll have
    // to convert the Matrix4 into a 4x4 f32 array
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_proj: cgmath::Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_view_projection_matrix().into();
    }
}
