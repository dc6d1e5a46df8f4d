//! Edge function-based triangle rasterization.
//!
//! # Algorithm Overview
//!
//! 1. Compute the signed area of the projected triangle and cull it when the
//!    area is zero or negative (back facing or degenerate)
//! 2. Walk every integer pixel in the triangle's bounding box
//! 3. A pixel is inside when all three edge functions are non-negative
//! 4. Inside pixels get barycentric weights, an interpolated depth and normal,
//!    and a shade glyph
//!
//! # Edge Function
//!
//! For an edge from A to B, the edge function at P is the 2D cross product
//! `(B - A) x (P - A)`:
//!
//! ```text
//! E(P) = (B.x - A.x) * (P.y - A.y) - (B.y - A.y) * (P.x - A.x)
//! ```
//!
//! It is twice the signed area of triangle (A, B, P). Points on the edge give
//! zero and count as inside.
//!
//! # Barycentric Coordinates
//!
//! ```text
//! lambda_0 = E(v1, v2, P) / E(v0, v1, v2)
//! lambda_1 = E(v2, v0, P) / E(v0, v1, v2)
//! lambda_2 = E(v0, v1, P) / E(v0, v1, v2)
//! ```
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use super::{Coverage, Triangle};
use crate::light::DirectionalLight;
use crate::math::vec2::IVec2;
use crate::math::vec3::Vec3;
use crate::render::framebuffer::FrameBuffer;

/// Edge function value for point `p` against the directed edge `a -> b`.
///
/// - Positive: `p` is on the positive-area side of the edge
/// - Negative: `p` is on the other side
/// - Zero: `p` lies exactly on the line through `a` and `b`
///
/// Evaluated in `f64` so projected coordinates anywhere in the `i32` range
/// (including saturated ones) neither overflow nor lose their sign.
#[inline]
pub fn edge_function(a: IVec2, b: IVec2, p: IVec2) -> f32 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    ((b.x as f64 - ax) * (p.y as f64 - ay) - (b.y as f64 - ay) * (p.x as f64 - ax)) as f32
}

/// Signed area of triangle (a, b, c) by the shoelace formula.
#[inline]
pub fn signed_area(a: IVec2, b: IVec2, c: IVec2) -> f32 {
    0.5 * edge_function(a, b, c)
}

/// Barycentric weights of `p` in triangle (v0, v1, v2).
///
/// Returns `None` for back-facing or degenerate triangles and for points
/// outside the triangle. Points on an edge are inside.
pub fn barycentric(v0: IVec2, v1: IVec2, v2: IVec2, p: IVec2) -> Option<[f32; 3]> {
    let area = edge_function(v0, v1, v2);
    if area <= 0.0 {
        return None;
    }
    let w0 = edge_function(v1, v2, p);
    let w1 = edge_function(v2, v0, p);
    let w2 = edge_function(v0, v1, p);
    if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
        return None;
    }
    Some([w0 / area, w1 / area, w2 / area])
}

/// Triangle rasterizer using the edge function algorithm.
///
/// Shades each covered pixel with Lambert intensity against a single
/// directional light and writes the resulting glyph through
/// [`FrameBuffer::set_with_depth`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeFunctionRasterizer {
    light: DirectionalLight,
}

impl EdgeFunctionRasterizer {
    pub fn new(light: DirectionalLight) -> Self {
        Self { light }
    }

    pub fn light(&self) -> DirectionalLight {
        self.light
    }

    /// Fills a triangle into the frame buffer.
    ///
    /// Triangles with signed area `<= 0` are culled. The bounding box is
    /// clamped to the buffer; pixels outside it would be dropped by the frame
    /// buffer anyway.
    pub fn fill_triangle(&self, triangle: &Triangle, buffer: &mut FrameBuffer) -> Coverage {
        let [v0, v1, v2] = triangle.pixels();

        let area = edge_function(v0, v1, v2);
        if area <= 0.0 {
            return Coverage::Culled;
        }
        let inv_area = 1.0 / area;

        let min_x = v0.x.min(v1.x).min(v2.x).max(0);
        let max_x = v0.x.max(v1.x).max(v2.x).min(buffer.width() as i32 - 1);
        let min_y = v0.y.min(v1.y).min(v2.y).max(0);
        let max_y = v0.y.max(v1.y).max(v2.y).min(buffer.height() as i32 - 1);

        let mut pixels = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = IVec2::new(x, y);

                let w0 = edge_function(v1, v2, p);
                let w1 = edge_function(v2, v0, p);
                let w2 = edge_function(v0, v1, p);
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];
                let (depth, normal) = interpolate(triangle, lambda);

                buffer.set_fill(self.light.shade_normal(normal));
                buffer.set_with_depth(p, depth);
                pixels += 1;
            }
        }

        Coverage::Drawn { pixels }
    }
}

/// Perspective-correct depth and normal at the given barycentric weights.
///
/// Attributes are weighted by `lambda_i / w_i` and renormalized, so they vary
/// linearly in view space rather than in screen space. Falls back to plain
/// screen-space weights when the vertex depths do not allow the division.
#[inline]
fn interpolate(triangle: &Triangle, lambda: [f32; 3]) -> (f32, Vec3) {
    let [a, b, c] = triangle.vertices;

    let persp = [lambda[0] / a.depth, lambda[1] / b.depth, lambda[2] / c.depth];
    let sum = persp[0] + persp[1] + persp[2];
    let weights = if sum > 0.0 && sum.is_finite() {
        persp.map(|w| w / sum)
    } else {
        lambda
    };

    let depth = weights[0] * a.depth + weights[1] * b.depth + weights[2] * c.depth;
    let normal = a.normal * weights[0] + b.normal * weights[1] + c.normal * weights[2];
    (depth, normal)
}
