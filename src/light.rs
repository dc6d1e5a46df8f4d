//! Shading model: surface normal + light direction -> intensity -> glyph.

use crate::math::vec3::Vec3;

/// `░` Light shade, intensity in `[0, 0.25)`.
pub const LIGHT_SHADE: char = '\u{2591}';
/// `▒` Medium shade, intensity in `[0.25, 0.5)`.
pub const MEDIUM_SHADE: char = '\u{2592}';
/// `▓` Dark shade, intensity in `[0.5, 0.75)`.
pub const DARK_SHADE: char = '\u{2593}';
/// `█` Full block, intensity in `[0.75, 1]`.
pub const FULL_BLOCK: char = '\u{2588}';

/// A directional light that illuminates the scene uniformly from a direction.
///
/// The direction points from the surface toward the light, so a normal facing
/// the light gets a positive dot product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    /// Light shining straight back at a camera on the +Z axis.
    fn default() -> Self {
        Self {
            direction: Vec3::FORWARD,
        }
    }
}

impl DirectionalLight {
    /// Create a new directional light. The direction is normalized.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
        }
    }

    /// Lambert intensity in `[0, 1]` for the given surface normal.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        intensity(normal, self.direction)
    }

    /// Glyph for the given surface normal.
    pub fn shade_normal(&self, normal: Vec3) -> char {
        shade(self.intensity(normal))
    }
}

/// `max(0, dot(normalize(normal), light_dir))` clamped to `[0, 1]`.
///
/// A zero normal normalizes to NaN; that case reads as unlit (0).
pub fn intensity(normal: Vec3, light_dir: Vec3) -> f32 {
    let value = normal.normalize().dot(light_dir);
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Maps an intensity to one of four block glyphs. Bucket lower bounds are
/// inclusive; anything at or above 0.75 is a full block.
pub fn shade(intensity: f32) -> char {
    if intensity < 0.25 {
        LIGHT_SHADE
    } else if intensity < 0.5 {
        MEDIUM_SHADE
    } else if intensity < 0.75 {
        DARK_SHADE
    } else {
        FULL_BLOCK
    }
}
