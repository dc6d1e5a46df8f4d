//! Triangle rasterization.
//!
//! The renderer projects each triangle to pixel space and hands it to the
//! [`EdgeFunctionRasterizer`], which culls back faces, walks the bounding box,
//! and shades every covered pixel.

mod edgefunction;

pub use edgefunction::{barycentric, edge_function, signed_area, EdgeFunctionRasterizer};

use crate::math::vec2::IVec2;
use crate::math::vec3::Vec3;

/// A vertex after projection to pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenVertex {
    pub pixel: IVec2,
    /// Clip-space `w`, i.e. distance in front of the camera along the view axis.
    pub depth: f32,
    /// World-space normal carried through for shading.
    pub normal: Vec3,
}

impl ScreenVertex {
    pub fn new(pixel: IVec2, depth: f32, normal: Vec3) -> Self {
        Self {
            pixel,
            depth,
            normal,
        }
    }
}

/// A triangle ready for rasterization in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [ScreenVertex; 3],
}

impl Triangle {
    pub fn new(vertices: [ScreenVertex; 3]) -> Self {
        Self { vertices }
    }

    pub fn pixels(&self) -> [IVec2; 3] {
        self.vertices.map(|v| v.pixel)
    }

    /// Signed area in pixels. Positive means front facing.
    pub fn area(&self) -> f32 {
        let [a, b, c] = self.pixels();
        signed_area(a, b, c)
    }
}

/// Outcome of filling one triangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Coverage {
    /// Zero or negative signed area; nothing was drawn.
    Culled,
    /// Front facing; `pixels` fragments were shaded (including off-screen ones
    /// that the frame buffer then discarded).
    Drawn { pixels: usize },
}
