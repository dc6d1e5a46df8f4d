//! Homogeneous coordinates for the projection path.

use super::vec3::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A position (w = 1).
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    /// The xyz part, w dropped without dividing.
    pub const fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Homogeneous divide. Returns `None` when `w` is exactly zero.
    pub fn perspective_divide(self) -> Option<Vec3> {
        if self.w == 0.0 {
            return None;
        }
        Some(self.xyz() / self.w)
    }
}

impl From<Vec3> for Vec4 {
    fn from(v: Vec3) -> Self {
        Self::point(v.x, v.y, v.z)
    }
}
