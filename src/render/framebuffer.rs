//! Glyph frame buffer with double-buffered output.
//!
//! The back buffer is a contiguous `width * height` grid of glyphs indexed
//! `row * width + col`. [`FrameBuffer::flatten`] copies it into a flat output
//! buffer laid out for a terminal: every glyph is emitted twice horizontally
//! (character cells are roughly twice as tall as they are wide), each row ends
//! with `'\n'`, and the whole buffer ends with a single `'\0'` terminator.
//!
//! Both buffers are allocated once in [`FrameBuffer::new`] and never resized.

use crate::light::FULL_BLOCK;
use crate::math::vec2::IVec2;

pub const DEFAULT_BACKGROUND: char = ' ';
pub const TERMINATOR: char = '\0';

/// Visible-surface strategy for overlapping triangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthMode {
    /// Later writes always win; draw order decides what is visible.
    #[default]
    DrawOrder,
    /// Keep the nearest depth per cell and only overwrite with nearer fragments.
    Nearest,
}

impl std::fmt::Display for DepthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepthMode::DrawOrder => write!(f, "DrawOrder"),
            DepthMode::Nearest => write!(f, "Nearest"),
        }
    }
}

pub struct FrameBuffer {
    cells: Vec<char>,
    /// View-space distance per cell (smaller = nearer); only in `Nearest` mode.
    depth: Option<Vec<f32>>,
    screen: Vec<char>,
    width: u32,
    height: u32,
    background: char,
    fill: char,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, depth_mode: DepthMode) -> Self {
        let size = width as usize * height as usize;
        let depth = match depth_mode {
            DepthMode::DrawOrder => None,
            DepthMode::Nearest => Some(vec![f32::INFINITY; size]),
        };
        Self {
            cells: vec![DEFAULT_BACKGROUND; size],
            depth,
            screen: vec![TERMINATOR; Self::screen_len(width, height)],
            width,
            height,
            background: DEFAULT_BACKGROUND,
            fill: FULL_BLOCK,
        }
    }

    /// Length of the flat output buffer: `2*w*h` glyphs, `h` newlines, one terminator.
    pub fn screen_len(width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        2 * w * h + h + 1
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth_mode(&self) -> DepthMode {
        if self.depth.is_some() {
            DepthMode::Nearest
        } else {
            DepthMode::DrawOrder
        }
    }

    pub fn background(&self) -> char {
        self.background
    }

    pub fn fill(&self) -> char {
        self.fill
    }

    /// Glyph written by subsequent [`FrameBuffer::set`] calls.
    pub fn set_fill(&mut self, glyph: char) {
        self.fill = glyph;
    }

    /// Resets every non-background cell to the background glyph and forgets
    /// stored depths.
    pub fn clear(&mut self) {
        let background = self.background;
        for cell in self.cells.iter_mut().filter(|c| **c != background) {
            *cell = background;
        }
        if let Some(depth) = self.depth.as_mut() {
            depth.fill(f32::INFINITY);
        }
    }

    #[inline]
    fn index(&self, pixel: IVec2) -> Option<usize> {
        if pixel.x >= 0 && pixel.x < self.width as i32 && pixel.y >= 0 && pixel.y < self.height as i32
        {
            Some(pixel.y as usize * self.width as usize + pixel.x as usize)
        } else {
            None
        }
    }

    /// Writes the fill glyph at `pixel`. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, pixel: IVec2) {
        if let Some(idx) = self.index(pixel) {
            if self.cells[idx] != self.fill {
                self.cells[idx] = self.fill;
            }
        }
    }

    /// Writes the fill glyph at `pixel` subject to the depth mode.
    ///
    /// In `DrawOrder` mode this is [`FrameBuffer::set`]. In `Nearest` mode the
    /// write only happens when `depth` is strictly nearer than the stored value.
    #[inline]
    pub fn set_with_depth(&mut self, pixel: IVec2, depth: f32) {
        let Some(idx) = self.index(pixel) else {
            return;
        };
        if let Some(stored) = self.depth.as_mut() {
            if depth.is_nan() || depth >= stored[idx] {
                return;
            }
            stored[idx] = depth;
        }
        if self.cells[idx] != self.fill {
            self.cells[idx] = self.fill;
        }
    }

    /// Get the glyph at `pixel`, or None if out of bounds.
    pub fn get(&self, pixel: IVec2) -> Option<char> {
        self.index(pixel).map(|idx| self.cells[idx])
    }

    /// Stored depth at `pixel` (`Nearest` mode only).
    pub fn depth_at(&self, pixel: IVec2) -> Option<f32> {
        let idx = self.index(pixel)?;
        self.depth.as_ref().map(|d| d[idx])
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    /// Copies the back buffer into the flat output buffer and returns it.
    pub fn flatten(&mut self) -> &[char] {
        let width = self.width as usize;
        let mut out = 0;
        for row in 0..self.height as usize {
            for &glyph in &self.cells[row * width..(row + 1) * width] {
                self.screen[out] = glyph;
                self.screen[out + 1] = glyph;
                out += 2;
            }
            self.screen[out] = '\n';
            out += 1;
        }
        self.screen[out] = TERMINATOR;
        &self.screen
    }

    /// The flat output buffer as of the last [`FrameBuffer::flatten`].
    pub fn screen(&self) -> &[char] {
        &self.screen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_length_matches_layout() {
        let fb = FrameBuffer::new(4, 3, DepthMode::DrawOrder);
        assert_eq!(fb.screen().len(), 2 * 4 * 3 + 3 + 1);
        assert_eq!(FrameBuffer::screen_len(50, 50), 5051);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn screen_length_does_not_wrap_for_huge_grids() {
        assert_eq!(FrameBuffer::screen_len(65536, 65536), 8_590_000_129);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut fb = FrameBuffer::new(3, 2, DepthMode::DrawOrder);
        for p in [(-1, 0), (0, -1), (3, 0), (0, 2), (i32::MAX, i32::MIN)] {
            fb.set(IVec2::from(p));
        }
        assert!(fb.cells().iter().all(|&c| c == DEFAULT_BACKGROUND));
    }

    #[test]
    fn set_uses_current_fill_and_row_major_layout() {
        let mut fb = FrameBuffer::new(3, 2, DepthMode::DrawOrder);
        assert_eq!(fb.fill(), FULL_BLOCK);
        assert_eq!(fb.background(), DEFAULT_BACKGROUND);
        fb.set_fill('x');
        assert_eq!(fb.fill(), 'x');
        fb.set(IVec2::new(2, 1));
        assert_eq!(fb.get(IVec2::new(2, 1)), Some('x'));
        assert_eq!(fb.cells()[5], 'x');
        assert_eq!(fb.get(IVec2::new(1, 2)), None);
    }

    #[test]
    fn clear_restores_background() {
        let mut fb = FrameBuffer::new(2, 2, DepthMode::DrawOrder);
        fb.set(IVec2::new(0, 0));
        fb.set(IVec2::new(1, 1));
        fb.clear();
        assert!(fb.cells().iter().all(|&c| c == DEFAULT_BACKGROUND));
    }

    #[test]
    fn flatten_doubles_glyphs_and_terminates_rows() {
        let mut fb = FrameBuffer::new(2, 2, DepthMode::DrawOrder);
        fb.set_fill('#');
        fb.set(IVec2::new(1, 0));
        let text: String = fb.flatten().iter().collect();
        assert_eq!(text, "  ##\n    \n\0");
    }

    #[test]
    fn draw_order_mode_lets_later_writes_win() {
        let mut fb = FrameBuffer::new(1, 1, DepthMode::DrawOrder);
        fb.set_fill('a');
        fb.set_with_depth(IVec2::ZERO, 1.0);
        fb.set_fill('b');
        fb.set_with_depth(IVec2::ZERO, 5.0);
        assert_eq!(fb.get(IVec2::ZERO), Some('b'));
        assert_eq!(fb.depth_at(IVec2::ZERO), None);
    }

    #[test]
    fn nearest_mode_keeps_nearer_fragment() {
        let mut fb = FrameBuffer::new(1, 1, DepthMode::Nearest);
        fb.set_fill('a');
        fb.set_with_depth(IVec2::ZERO, 1.0);
        fb.set_fill('b');
        fb.set_with_depth(IVec2::ZERO, 5.0);
        assert_eq!(fb.get(IVec2::ZERO), Some('a'));
        fb.set_with_depth(IVec2::ZERO, 0.5);
        assert_eq!(fb.get(IVec2::ZERO), Some('b'));
        assert_eq!(fb.depth_at(IVec2::ZERO), Some(0.5));

        fb.clear();
        assert_eq!(fb.depth_at(IVec2::ZERO), Some(f32::INFINITY));
    }
}
