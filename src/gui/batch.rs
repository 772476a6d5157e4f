use cgmath::Vector3;

use crate::math::Matrix3f;

pub type Color = [f32; 4];

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GuiVertex {
    /// Pixels from the top-left corner of the screen.
    pub position: [f32; 2],
    pub tex_coords: [f32; 2],
    pub color: [f32; 4],
}

impl GuiVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GuiVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: (std::mem::size_of::<[f32; 2]>() * 2) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Texture rectangle as `[u0, v0, u1, v1]`.
pub type UvRect = [f32; 4];

/// Geometry collected by the GUI components for one screen-space pass.
#[derive(Debug, Default)]
pub struct GuiBatch {
    width: f32,
    height: f32,
    vertices: Vec<GuiVertex>,
    indices: Vec<u32>,
}

impl GuiBatch {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn screen_size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Adds the rectangle `(x, y, w, h)` given in the local space of
    /// `transform`.
    #[allow(clippy::too_many_arguments)]
    pub fn push_quad(
        &mut self,
        transform: &Matrix3f,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        uv: UvRect,
        color: Color,
    ) {
        let base = self.vertices.len() as u32;
        let corners = [
            (x, y, uv[0], uv[1]),
            (x, y + h, uv[0], uv[3]),
            (x + w, y + h, uv[2], uv[3]),
            (x + w, y, uv[2], uv[1]),
        ];
        for (cx, cy, u, v) in corners {
            let p = *transform * Vector3::new(cx, cy, 1.0);
            self.vertices.push(GuiVertex {
                position: [p.x, p.y],
                tex_coords: [u, v],
                color,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn vertices(&self) -> &[GuiVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
