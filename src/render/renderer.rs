//! The rendering pipeline front end.
//!
//! [`Renderer`] owns the glyph frame buffer, the projection and view matrices,
//! and the display sink. A frame is built in two phases: accumulation
//! (`begin` followed by any number of `draw`/`line` calls) and presentation
//! (`render`).

use std::io;

use super::framebuffer::{DepthMode, FrameBuffer};
use super::rasterizer::{Coverage, EdgeFunctionRasterizer, ScreenVertex, Triangle};
use crate::display::DisplaySink;
use crate::math::mat4::Mat4;
use crate::math::vec2::IVec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;
use crate::mesh::{Mesh, Vertex};
use crate::projection::Projection;

/// Clip `w` assigned to vertices that fall back to the screen origin.
const FALLBACK_DEPTH: f32 = 1.0;

/// Per-frame counters, reset by [`Renderer::begin`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub culled: usize,
    /// Triangles dropped for referencing a vertex that does not exist.
    pub skipped: usize,
    pub fragments: usize,
    pub lines: usize,
}

pub struct Renderer<D: DisplaySink> {
    frame_buffer: FrameBuffer,
    rasterizer: EdgeFunctionRasterizer,
    projection: Mat4,
    view: Mat4,
    // projection * view, rebuilt whenever either changes
    view_projection: Mat4,
    display: D,
    stats: FrameStats,
    width: u32,
    height: u32,
}

impl<D: DisplaySink> Renderer<D> {
    /// Creates a renderer that draws in painter's order.
    ///
    /// Prepares the display: buffering off, cursor hidden, screen cleared.
    /// Both matrices start as identity.
    pub fn new(width: u32, height: u32, display: D) -> io::Result<Self> {
        Self::with_depth_mode(width, height, DepthMode::DrawOrder, display)
    }

    pub fn with_depth_mode(
        width: u32,
        height: u32,
        depth_mode: DepthMode,
        mut display: D,
    ) -> io::Result<Self> {
        display.disable_buffering()?;
        display.hide_cursor()?;
        display.clear_screen()?;

        log::debug!("renderer {}x{} cells, depth mode {}", width, height, depth_mode);
        Ok(Self {
            frame_buffer: FrameBuffer::new(width, height, depth_mode),
            rasterizer: EdgeFunctionRasterizer::default(),
            projection: Mat4::identity(),
            view: Mat4::identity(),
            view_projection: Mat4::identity(),
            display,
            stats: FrameStats::default(),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Builds the perspective projection for this grid. `fov` is the vertical
    /// field of view in radians.
    pub fn create_projection_matrix(&mut self, fov: f32, near: f32, far: f32) {
        self.set_projection(Projection::for_grid(fov, self.width, self.height, near, far));
    }

    pub fn set_projection(&mut self, projection: Projection) {
        log::debug!(
            "projection: fov {:.3} rad, aspect {:.3}, near {}, far {}",
            projection.fov_y(),
            projection.aspect_ratio(),
            projection.z_near(),
            projection.z_far()
        );
        self.projection = projection.matrix();
        self.view_projection = self.projection * self.view;
    }

    /// Places the camera at the given world position looking down -Z.
    pub fn create_view_matrix(&mut self, cam_x: f32, cam_y: f32, cam_z: f32) {
        log::debug!("view: camera at ({}, {}, {})", cam_x, cam_y, cam_z);
        self.view = Mat4::translation(-cam_x, -cam_y, -cam_z);
        self.view_projection = self.projection * self.view;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    /// Projects a world position to a pixel and its clip `w`.
    ///
    /// Returns `None` when `w` is zero or the depth after the perspective
    /// divide lies outside `[0, 1]`.
    pub fn project(&self, world_pos: Vec3) -> Option<(IVec2, f32)> {
        let clip = self.view_projection * Vec4::from(world_pos);
        let ndc = clip.perspective_divide()?;
        if !(0.0..=1.0).contains(&ndc.z) {
            return None;
        }

        let x = (ndc.x + 1.0) * 0.5 * self.width as f32;
        let y = (1.0 - ndc.y) * 0.5 * self.height as f32;
        Some((IVec2::new(x as i32, y as i32), clip.w))
    }

    /// Projects a world position to a pixel, falling back to `(0, 0)` when the
    /// point cannot be projected.
    pub fn world_to_screen(&self, world_pos: Vec3) -> IVec2 {
        self.project(world_pos)
            .map(|(pixel, _)| pixel)
            .unwrap_or(IVec2::ZERO)
    }

    /// Clears the frame buffer and the physical display for a new frame.
    pub fn begin(&mut self) -> io::Result<()> {
        self.frame_buffer.clear();
        self.stats = FrameStats::default();
        self.display.clear_screen()
    }

    /// Draws `count / 3` indexed triangles. Trailing indices that do not form a
    /// whole triangle are ignored.
    pub fn draw(&mut self, vertices: &[Vertex], indices: &[u32], count: usize) {
        let count = count.min(indices.len());
        for face in indices[..count].chunks_exact(3) {
            self.tri(vertices, [face[0], face[1], face[2]]);
        }
    }

    pub fn draw_mesh(&mut self, mesh: &Mesh) {
        self.draw(mesh.vertices(), mesh.indices(), mesh.indices_count());
    }

    fn tri(&mut self, vertices: &[Vertex], face: [u32; 3]) {
        let [Some(a), Some(b), Some(c)] = face.map(|i| vertices.get(i as usize)) else {
            log::trace!("skipping triangle {:?}: index out of range", face);
            self.stats.skipped += 1;
            return;
        };

        let triangle = Triangle::new([a, b, c].map(|v| self.screen_vertex(v)));
        self.stats.triangles += 1;
        match self.rasterizer.fill_triangle(&triangle, &mut self.frame_buffer) {
            Coverage::Culled => self.stats.culled += 1,
            Coverage::Drawn { pixels } => self.stats.fragments += pixels,
        }
    }

    fn screen_vertex(&self, vertex: &Vertex) -> ScreenVertex {
        let (pixel, depth) = self
            .project(vertex.position)
            .unwrap_or((IVec2::ZERO, FALLBACK_DEPTH));
        ScreenVertex::new(pixel, depth, vertex.normal)
    }

    /// Glyph used by subsequent `set` and `line` calls. Triangle fills override
    /// it per pixel with their shade.
    pub fn set_fill(&mut self, glyph: char) {
        self.frame_buffer.set_fill(glyph);
    }

    pub fn set(&mut self, pixel: IVec2) {
        self.frame_buffer.set(pixel);
    }

    /// Draws a line with Bresenham's algorithm. Both endpoints are included.
    ///
    /// Endpoints far outside the grid (projection saturates at the `i32`
    /// limits) are first clipped to a guard band around it, so the walk stays
    /// short. Lines entirely outside the band draw nothing.
    pub fn line(&mut self, from: IVec2, to: IVec2) {
        let Some((from, to)) = clip_to_guard_band(from, to, self.width, self.height) else {
            log::trace!("line outside guard band skipped");
            return;
        };

        let dx = (to.0 - from.0).abs();
        let dy = -(to.1 - from.1).abs();
        let sx = if from.0 < to.0 { 1 } else { -1 };
        let sy = if from.1 < to.1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut current = from;

        loop {
            // Inside the guard band, so both coordinates fit in i32.
            self.frame_buffer
                .set(IVec2::new(current.0 as i32, current.1 as i32));
            if current == to {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                current.0 += sx;
            }
            if e2 <= dx {
                err += dx;
                current.1 += sy;
            }
        }
        self.stats.lines += 1;
    }

    /// Projects both ends with [`Renderer::world_to_screen`] and draws the line
    /// between them.
    pub fn line_world(&mut self, from: Vec3, to: Vec3) {
        let (a, b) = (self.world_to_screen(from), self.world_to_screen(to));
        self.line(a, b);
    }

    /// Flattens the frame and hands it to the display.
    pub fn render(&mut self) -> io::Result<()> {
        log::trace!(
            "frame: {} triangles, {} culled, {} skipped, {} fragments, {} lines",
            self.stats.triangles,
            self.stats.culled,
            self.stats.skipped,
            self.stats.fragments,
            self.stats.lines
        );
        let screen = self.frame_buffer.flatten();
        self.display.present(screen)
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    /// The flat output buffer as of the last [`Renderer::render`].
    pub fn screen(&self) -> &[char] {
        self.frame_buffer.screen()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }
}

/// Cells a line may extend past each grid edge before it gets clipped.
const LINE_GUARD_BAND: i64 = 1 << 12;

type Point = (i64, i64);

/// Clips the segment to the grid grown by [`LINE_GUARD_BAND`] on every side
/// (Liang-Barsky). Segments already inside the band come back unchanged, so
/// ordinary lines keep their exact Bresenham cells.
fn clip_to_guard_band(from: IVec2, to: IVec2, width: u32, height: u32) -> Option<(Point, Point)> {
    let min = (-LINE_GUARD_BAND, -LINE_GUARD_BAND);
    let max = (
        width as i64 - 1 + LINE_GUARD_BAND,
        height as i64 - 1 + LINE_GUARD_BAND,
    );
    let a = (from.x as i64, from.y as i64);
    let b = (to.x as i64, to.y as i64);
    let inside = |p: Point| p.0 >= min.0 && p.0 <= max.0 && p.1 >= min.1 && p.1 <= max.1;
    if inside(a) && inside(b) {
        return Some((a, b));
    }

    let (x0, y0) = (a.0 as f64, a.1 as f64);
    let (dx, dy) = (b.0 as f64 - x0, b.1 as f64 - y0);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [
        (-dx, x0 - min.0 as f64),
        (dx, max.0 as f64 - x0),
        (-dy, y0 - min.1 as f64),
        (dy, max.1 as f64 - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| -> Point {
        (
            ((x0 + t * dx).round() as i64).clamp(min.0, max.0),
            ((y0 + t * dy).round() as i64).clamp(min.1, max.1),
        )
    };
    Some((at(t0), at(t1)))
}
