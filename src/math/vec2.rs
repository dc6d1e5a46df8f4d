//! 2D vectors: [`Vec2`] for continuous coordinates and [`IVec2`] for pixels.

use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };
    pub const RIGHT: Self = Self { x: 1.0, y: 0.0 };
    pub const LEFT: Self = Self { x: -1.0, y: 0.0 };
    pub const UP: Self = Self { x: 0.0, y: 1.0 };
    pub const DOWN: Self = Self { x: 0.0, y: -1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction. A zero vector yields NaN components.
    pub fn normalize(&self) -> Self {
        *self / self.magnitude()
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product of the two vectors lifted to z = 0.
    pub fn perp_dot(&self, other: Self) -> f32 {
        self.x * other.y - self.y * other.x
    }

    /// Component-wise product.
    pub fn mul_elem(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise quotient. Zero components in `other` give inf or NaN.
    pub fn div_elem(&self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f32> for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: f32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

/// Integer 2D vector, used for pixel coordinates.
///
/// `(0, 0)` is the top-left cell; y grows downward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IVec2 {
    pub x: i32,
    pub y: i32,
}

impl IVec2 {
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn dot(&self, other: Self) -> i32 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude(&self) -> f32 {
        self.as_vec2().magnitude()
    }

    /// Float unit vector. A zero vector yields NaN components.
    pub fn normalize(&self) -> Vec2 {
        self.as_vec2().normalize()
    }

    pub fn mul_elem(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    /// Component-wise integer quotient, truncating toward zero. Panics when a
    /// component of `other` is zero.
    pub fn div_elem(&self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y)
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl Add for IVec2 {
    type Output = IVec2;

    fn add(self, rhs: IVec2) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for IVec2 {
    type Output = IVec2;

    fn sub(self, rhs: IVec2) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<i32> for IVec2 {
    type Output = IVec2;

    fn mul(self, rhs: i32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Integer division, truncating toward zero. Panics on a zero divisor.
impl Div<i32> for IVec2 {
    type Output = IVec2;

    fn div(self, rhs: i32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for IVec2 {
    type Output = IVec2;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for IVec2 {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn ivec_arithmetic() {
        let a = IVec2::new(3, -2);
        let b = IVec2::new(1, 5);
        assert_eq!(a + b, IVec2::new(4, 3));
        assert_eq!(a - b, IVec2::new(2, -7));
        assert_eq!(a * 2, IVec2::new(6, -4));
        assert_eq!(IVec2::new(7, -7) / 2, IVec2::new(3, -3));
        assert_eq!(a.mul_elem(b), IVec2::new(3, -10));
        assert_eq!(IVec2::new(9, -7).div_elem(IVec2::new(2, 3)), IVec2::new(4, -2));
        assert_eq!(a.dot(b), -7);
    }

    #[test]
    fn ivec_length_is_float() {
        assert_relative_eq!(IVec2::new(3, 4).magnitude(), 5.0);
        let n = IVec2::new(0, 9).normalize();
        assert_relative_eq!(n.y, 1.0);
    }

    #[test]
    #[should_panic]
    fn ivec_div_elem_by_zero_panics() {
        let _ = IVec2::new(1, 1).div_elem(IVec2::new(1, 0));
    }

    #[test]
    fn float_div_elem() {
        let q = Vec2::new(3.0, -4.0).div_elem(Vec2::new(2.0, 8.0));
        assert_eq!(q, Vec2::new(1.5, -0.5));
        assert!(Vec2::ONE.div_elem(Vec2::new(0.0, 1.0)).x.is_infinite());
    }

    #[test]
    fn perp_dot_sign_follows_turn_direction() {
        assert!(Vec2::RIGHT.perp_dot(Vec2::UP) > 0.0);
        assert!(Vec2::UP.perp_dot(Vec2::RIGHT) < 0.0);
    }
}
