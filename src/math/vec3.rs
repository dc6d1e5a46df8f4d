use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const RIGHT: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UP: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// Points from the scene toward a camera sitting on the +Z axis.
    pub const FORWARD: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };
    pub const BACK: Self = Self {
        x: 0.0,
        y: 0.0,
        z: -1.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn rotate_x(&self, angle: f32) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        Self {
            x: self.x,
            y: self.y * cos - self.z * sin,
            z: self.y * sin + self.z * cos,
        }
    }

    pub fn rotate_y(&self, angle: f32) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        Self {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }

    pub fn rotate_z(&self, angle: f32) -> Self {
        let sin = angle.sin();
        let cos = angle.cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }

    /// Rotates by Euler angles given in degrees.
    ///
    /// The axes are applied one after another: X first, then Y on the
    /// X-rotated result, then Z on that. This is not the same as building a
    /// single combined rotation matrix from the three angles.
    pub fn rotate_euler_degrees(&self, degrees: Vec3) -> Self {
        self.rotate_x(degrees.x.to_radians())
            .rotate_y(degrees.y.to_radians())
            .rotate_z(degrees.z.to_radians())
    }

    /// Rotates this point around `origin` by Euler angles in degrees.
    ///
    /// See [`Vec3::rotate_euler_degrees`] for the axis order.
    pub fn rotate_about(&self, origin: Vec3, degrees: Vec3) -> Self {
        (*self - origin).rotate_euler_degrees(degrees) + origin
    }

    pub fn magnitude(&self) -> f32 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Callers must guard against zero-length input: the division by zero
    /// produces NaN components rather than an error.
    pub fn normalize(&self) -> Self {
        *self / self.magnitude()
    }

    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the cross product of two vectors.
    /// The resulting vector is perpendicular to both input vectors.
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Component-wise product.
    pub fn mul_elem(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Component-wise quotient. Zero components in `other` give inf or NaN.
    pub fn div_elem(&self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }
}

/// Component-wise addition of two vectors.
impl Add<Vec3> for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl AddAssign<Vec3> for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

/// Component-wise subtraction of two vectors.
impl Sub<Vec3> for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

/// Scalar multiplication of a vector.
impl Mul<f32> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

/// Scalar division of a vector.
impl Div<f32> for Vec3 {
    type Output = Vec3;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
        }
    }
}

/// Negation of a vector.
impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// Integer 3D vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IVec3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl IVec3 {
    pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: Self) -> i32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn magnitude(&self) -> f32 {
        self.as_vec3().magnitude()
    }

    /// Float unit vector. A zero vector yields NaN components.
    pub fn normalize(&self) -> Vec3 {
        self.as_vec3().normalize()
    }

    pub fn mul_elem(&self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Component-wise integer quotient, truncating toward zero. Panics when a
    /// component of `other` is zero.
    pub fn div_elem(&self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }

    pub fn as_vec3(&self) -> Vec3 {
        Vec3::new(self.x as f32, self.y as f32, self.z as f32)
    }
}

impl Add for IVec3 {
    type Output = IVec3;

    fn add(self, rhs: IVec3) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for IVec3 {
    type Output = IVec3;

    fn sub(self, rhs: IVec3) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<i32> for IVec3 {
    type Output = IVec3;

    fn mul(self, rhs: i32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Integer division, truncating toward zero. Panics on a zero divisor.
impl Div<i32> for IVec3 {
    type Output = IVec3;

    fn div(self, rhs: i32) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl Neg for IVec3 {
    type Output = IVec3;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_gives_unit_length() {
        let v = Vec3::new(3.0, 4.0, 12.0).normalize();
        assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.x, 3.0 / 13.0, epsilon = 1e-6);
    }

    #[test]
    fn normalize_zero_is_nan() {
        let v = Vec3::ZERO.normalize();
        assert!(v.x.is_nan() && v.y.is_nan() && v.z.is_nan());
    }

    #[test]
    fn quarter_turn_about_y_maps_x_to_minus_z() {
        let v = Vec3::RIGHT.rotate_euler_degrees(Vec3::new(0.0, 90.0, 0.0));
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn euler_axes_are_applied_in_sequence() {
        // X by 90 sends +Y to +Z, then Y by 90 sends +Z to +X.
        let v = Vec3::UP.rotate_euler_degrees(Vec3::new(90.0, 90.0, 0.0));
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.z, 0.0, epsilon = 1e-6);

        // Y first would leave +Y untouched, then X by 90 gives +Z.
        let reversed = Vec3::UP
            .rotate_y(90f32.to_radians())
            .rotate_x(90f32.to_radians());
        assert_relative_eq!(reversed.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotate_about_keeps_origin_fixed() {
        let origin = Vec3::new(2.0, 0.0, 0.0);
        let p = Vec3::new(3.0, 0.0, 0.0).rotate_about(origin, Vec3::new(0.0, 0.0, 90.0));
        assert_relative_eq!(p.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-6);
        assert_eq!(origin.rotate_about(origin, Vec3::new(10.0, 20.0, 30.0)), origin);
    }

    #[test]
    fn rotation_preserves_length() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        let r = v.rotate_about(Vec3::ZERO, Vec3::new(0.15, 0.25, 0.35));
        assert_relative_eq!(r.magnitude(), v.magnitude(), epsilon = 1e-5);
    }

    #[test]
    fn component_and_scalar_ops() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-1.0, 0.5, 2.0);
        assert_eq!(a.mul_elem(b), Vec3::new(-1.0, 1.0, 6.0));
        assert_eq!(a.div_elem(b), Vec3::new(-1.0, 4.0, 1.5));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, Vec3::new(0.5, 1.0, 1.5));
        assert_relative_eq!(a.dot(b), 6.0);
        assert_eq!(Vec3::RIGHT.cross(Vec3::UP), Vec3::FORWARD);
    }

    #[test]
    fn integer_vectors() {
        let a = IVec3::new(1, 2, 2);
        assert_relative_eq!(a.magnitude(), 3.0);
        assert_eq!(a + a, a * 2);
        assert_eq!(a.dot(IVec3::new(1, 1, 1)), 5);
        assert_eq!(-a - a, IVec3::new(-2, -4, -4));
        assert_eq!(IVec3::new(7, -9, 4).div_elem(IVec3::new(2, 4, -4)), IVec3::new(3, -2, -1));
    }
}
