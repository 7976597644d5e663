use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Frame-rate counter. FPS is recomputed once per one-second window.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    window_start: Option<Instant>,
    frame_start: Option<Instant>,
    frames: u32,
    fps: f32,
    min_fps: Option<f32>,
    max_fps: f32,
    frame_ms: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, now: Instant) {
        self.frame_start = Some(now);
        self.window_start.get_or_insert(now);
    }

    pub fn end(&mut self, now: Instant) {
        if let Some(start) = self.frame_start.take() {
            self.frame_ms = now.saturating_duration_since(start).as_secs_f32() * 1000.0;
        }
        self.frames += 1;

        let window_start = *self.window_start.get_or_insert(now);
        let elapsed = now.saturating_duration_since(window_start);
        if elapsed >= WINDOW {
            self.fps = self.frames as f32 / elapsed.as_secs_f32();
            self.min_fps = Some(self.min_fps.map_or(self.fps, |m| m.min(self.fps)));
            self.max_fps = self.max_fps.max(self.fps);
            self.frames = 0;
            self.window_start = Some(now);
            tracing::trace!(fps = self.fps, "frame window complete");
        }
    }

    /// Frames per second over the last completed window (0 until one completes).
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn min_fps(&self) -> f32 {
        self.min_fps.unwrap_or(0.0)
    }

    pub fn max_fps(&self) -> f32 {
        self.max_fps
    }

    /// Duration of the last begin/end pair in milliseconds.
    pub fn frame_ms(&self) -> f32 {
        self.frame_ms
    }
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0} FPS ({:.0}-{:.0}) {:.1} ms",
            self.fps,
            self.min_fps(),
            self.max_fps,
            self.frame_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(stats: &mut FrameStats, start: Instant, count: u32, step: Duration) -> Instant {
        let mut now = start;
        for _ in 0..count {
            stats.begin(now);
            stats.end(now + Duration::from_millis(2));
            now += step;
        }
        now
    }

    #[test]
    fn no_fps_before_first_window() {
        let mut stats = FrameStats::new();
        run_frames(&mut stats, Instant::now(), 10, Duration::from_millis(10));
        assert_eq!(stats.fps(), 0.0);
        assert!((stats.frame_ms() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn fps_after_one_second() {
        let mut stats = FrameStats::new();
        let start = Instant::now();
        // Frame ends land at 2ms, 22ms, ... 1002ms; the 51st end closes the window.
        run_frames(&mut stats, start, 51, Duration::from_millis(20));
        assert!(stats.fps() > 49.0 && stats.fps() < 52.0, "fps = {}", stats.fps());
        assert_eq!(stats.min_fps(), stats.fps());
        assert_eq!(stats.max_fps(), stats.fps());
    }

    #[test]
    fn min_max_track_windows() {
        let mut stats = FrameStats::new();
        let start = Instant::now();
        let next = run_frames(&mut stats, start, 51, Duration::from_millis(20));
        let fast = stats.fps();
        run_frames(&mut stats, next, 11, Duration::from_millis(100));
        let slow = stats.fps();
        assert!(slow < fast);
        assert_eq!(stats.min_fps(), slow);
        assert_eq!(stats.max_fps(), fast);
    }

    #[test]
    fn display_format() {
        let stats = FrameStats::new();
        assert!(stats.to_string().contains("FPS"));
    }
}
