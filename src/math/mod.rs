//! Linear algebra kernel: vectors, the fixed [`Mat4`](mat4::Mat4) used by the
//! pipeline, and a variable-size [`Matrix`](matrix::Matrix).

pub mod mat4;
pub mod matrix;
pub mod vec2;
pub mod vec3;
pub mod vec4;
