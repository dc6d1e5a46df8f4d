//! Frame pacing and FPS measurement for the render loop.

use std::time::{Duration, Instant};

pub const DEFAULT_FPS: u32 = 30;

pub struct FrameLimiter {
    target: Duration,
    previous_frame: Instant,
}

impl FrameLimiter {
    /// A limiter targeting `fps` frames per second. Zero disables waiting.
    pub fn new(fps: u32) -> Self {
        let target = if fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs_f64(1.0 / fps as f64)
        };
        Self {
            target,
            previous_frame: Instant::now(),
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Waits if necessary to maintain frame rate and returns the delta time.
    /// Delta time is the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self) -> Duration {
        let mut delta = self.previous_frame.elapsed();
        if delta < self.target {
            std::thread::sleep(self.target - delta);
            delta = self.previous_frame.elapsed();
        }
        self.previous_frame = Instant::now();
        delta
    }
}

/// Counts frames over one-second windows.
#[derive(Debug)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    fn starting_at(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0,
        }
    }

    /// Records one frame. Returns the new reading whenever a full second has
    /// elapsed since the last one.
    pub fn tick(&mut self) -> Option<u32> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        if now.duration_since(self.window_start) < Duration::from_secs(1) {
            return None;
        }
        self.fps = self.frames;
        self.frames = 0;
        self.window_start = now;
        Some(self.fps)
    }

    /// Frames counted in the last complete second.
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn label(&self) -> String {
        format!("FPS: {}", self.fps)
    }
}
