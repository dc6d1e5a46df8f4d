//! 4x4 transformation matrix using column-vector convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! # Example
//! ```ignore
//! let clip = projection * view * Vec4::from(world_position);
//! ```

use std::ops::Mul;

use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    ///
    /// Translation is stored in the last column.
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a right-handed perspective matrix mapping view space (camera
    /// looking down -Z) to clip space.
    ///
    /// `fov` is the vertical field of view in radians and `aspect_ratio` is
    /// width / height. The resulting clip `w` equals `-z_view`.
    pub fn perspective(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let scale = 1.0 / (fov * 0.5).tan();
        let mut m = Mat4::identity();
        m.set(0, 0, scale / aspect_ratio);
        m.set(1, 1, scale);
        m.set(2, 2, (far + near) / (near - far));
        m.set(2, 3, (2.0 * far * near) / (near - far));
        m.set(3, 2, -1.0);
        m.set(3, 3, 0.0);
        m
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }

    /// Row-major copy of the elements.
    pub fn to_rows(&self) -> [[f32; 4]; 4] {
        self.data
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for row in 0..4 {
            for col in 0..4 {
                result[row][col] = self.data[row][0] * rhs.data[0][col]
                    + self.data[row][1] * rhs.data[1][col]
                    + self.data[row][2] * rhs.data[2][col]
                    + self.data[row][3] * rhs.data[3][col];
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        Vec4::new(
            self.data[0][0] * v.x
                + self.data[0][1] * v.y
                + self.data[0][2] * v.z
                + self.data[0][3] * v.w,
            self.data[1][0] * v.x
                + self.data[1][1] * v.y
                + self.data[1][2] * v.z
                + self.data[1][3] * v.w,
            self.data[2][0] * v.x
                + self.data[2][1] * v.y
                + self.data[2][2] * v.z
                + self.data[2][3] * v.w,
            self.data[3][0] * v.x
                + self.data[3][1] * v.y
                + self.data[3][2] * v.z
                + self.data[3][3] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn translation_moves_points_not_directions() {
        let t = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(t * Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(
            t * Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(1.0, 0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn multiplication_applies_right_first() {
        let a = Mat4::translation(1.0, 0.0, 0.0);
        let b = Mat4::translation(0.0, 5.0, 0.0);
        let p = (a * b) * Vec4::point(0.0, 0.0, 0.0);
        assert_eq!(p, Vec4::point(1.0, 5.0, 0.0));
        assert_eq!(Mat4::identity() * a, a);
    }

    #[test]
    fn perspective_entries() {
        let m = Mat4::perspective(FRAC_PI_2, 2.0, 1.0, 3.0);
        // tan(45deg) = 1
        assert_relative_eq!(m.get(0, 0), 0.5, epsilon = 1e-6);
        assert_relative_eq!(m.get(1, 1), 1.0, epsilon = 1e-6);
        assert_relative_eq!(m.get(2, 2), -2.0);
        assert_relative_eq!(m.get(2, 3), -3.0);
        assert_eq!(m.get(3, 2), -1.0);
        assert_eq!(m.get(3, 3), 0.0);
        assert_eq!(m.get(0, 1), 0.0);
    }

    #[test]
    fn perspective_w_is_negated_view_depth() {
        let m = Mat4::perspective(1.0, 1.0, 0.1, 100.0);
        let clip = m * Vec4::point(0.0, 0.0, -7.0);
        assert_relative_eq!(clip.w, 7.0);
    }
}
