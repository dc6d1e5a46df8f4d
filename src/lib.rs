//! A CPU triangle rasterizer that renders meshes to a character-cell terminal.
//!
//! Triangles are projected with a perspective camera, culled, filled with the
//! edge-function algorithm and shaded into one of four block glyphs. Each frame
//! is flattened into a character buffer and handed to a [`DisplaySink`].
//!
//! # Quick Start
//!
//! ```ignore
//! use glyphraster::prelude::*;
//!
//! let mut renderer = Renderer::new(50, 50, TerminalDisplay::stdout())?;
//! renderer.create_projection_matrix(45f32.to_radians(), 0.01, 1000.0);
//! renderer.create_view_matrix(0.0, 0.0, 5.0);
//!
//! let mut cube = Mesh::cube();
//! renderer.begin()?;
//! cube.rotate(Vec3::new(0.15, 0.25, 0.35));
//! renderer.draw_mesh(&cube);
//! renderer.render()?;
//! ```

pub mod config;
pub mod display;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod timing;

// Re-export commonly needed types at crate root for convenience
pub use config::{ConfigError, MeshSource, RenderConfig};
pub use display::{DisplaySink, RecordingDisplay, TerminalDisplay};
pub use mesh::{LoadError, Mesh, Vertex};
pub use projection::Projection;
pub use render::{DepthMode, FrameStats, Renderer};

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use glyphraster::prelude::*;
/// ```
pub mod prelude {
    // Rendering
    pub use crate::render::{DepthMode, FrameBuffer, Renderer};

    // Display
    pub use crate::display::{DisplaySink, RecordingDisplay, TerminalDisplay};

    // Meshes
    pub use crate::mesh::{Mesh, Vertex};

    // Lighting
    pub use crate::light::{shade, DirectionalLight};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::matrix::{FMat, IMat, Matrix, MatrixError};
    pub use crate::math::vec2::{IVec2, Vec2};
    pub use crate::math::vec3::{IVec3, Vec3};
    pub use crate::math::vec4::Vec4;

    // Config & timing
    pub use crate::config::RenderConfig;
    pub use crate::timing::{FpsCounter, FrameLimiter};
}

/// Module exposing internals for benchmarking. Not part of the stable API.
pub mod bench {
    pub use crate::render::{EdgeFunctionRasterizer, FrameBuffer, ScreenVertex, Triangle};
}
