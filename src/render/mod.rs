//! Frame buffer, rasterization and the renderer that ties them together.

pub mod framebuffer;
pub mod rasterizer;
mod renderer;

pub use framebuffer::{DepthMode, FrameBuffer};
pub use rasterizer::{Coverage, EdgeFunctionRasterizer, ScreenVertex, Triangle};
pub use renderer::{FrameStats, Renderer};
