//! Perspective parameters the renderer builds its projection matrix from.

use crate::math::mat4::Mat4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    /// `fov_y` is in radians; `aspect_ratio` is width over height.
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Projection for a `width x height` cell grid.
    ///
    /// The aspect ratio is the raw cell ratio. Cells are printed as two glyphs
    /// each, which squares them up on screen, so the matrix does not correct
    /// for glyph shape.
    pub fn for_grid(fov_y: f32, width: u32, height: u32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y, width as f32 / height as f32, z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}
