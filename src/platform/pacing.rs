use std::thread;
use std::time::{Duration, Instant};

/// Sleeps away whatever is left of the frame budget.
pub struct FramePacer {
    target: Duration,
    overruns: u64,
}

impl FramePacer {
    pub fn from_fps(fps: u32) -> Self {
        let fps = fps.max(1);
        Self { target: Duration::from_secs(1) / fps, overruns: 0 }
    }

    pub fn target(&self) -> Duration { self.target }
    pub fn overruns(&self) -> u64 { self.overruns }

    /// `max(0, target - elapsed)`.
    #[inline]
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.target.saturating_sub(elapsed)
    }

    /// Blocks until `target` has passed since `tick_start`.
    pub fn wait(&mut self, tick_start: Instant) {
        let elapsed = tick_start.elapsed();
        let left = self.remaining(elapsed);
        if left.is_zero() {
            if elapsed > self.target * 2 {
                if self.overruns == 0 {
                    log::warn!("frame took {:?}, budget is {:?}", elapsed, self.target);
                }
                self.overruns += 1;
            }
            return;
        }
        thread::sleep(left);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remaining_never_goes_negative() {
        let p = FramePacer::from_fps(50);
        assert_eq!(p.target(), Duration::from_millis(20));
        assert_eq!(p.remaining(Duration::from_millis(5)), Duration::from_millis(15));
        assert_eq!(p.remaining(Duration::from_millis(20)), Duration::ZERO);
        assert_eq!(p.remaining(Duration::from_secs(3)), Duration::ZERO);
    }

    #[test]
    fn wait_fills_the_budget() {
        let mut p = FramePacer::from_fps(100);
        let start = Instant::now();
        p.wait(start);
        assert!(start.elapsed() >= Duration::from_millis(10));
    }

    #[test]
    fn late_frames_are_counted_not_slept() {
        let mut p = FramePacer::from_fps(1000);
        let start = Instant::now() - Duration::from_millis(50);
        let before = Instant::now();
        p.wait(start);
        assert!(before.elapsed() < Duration::from_millis(50));
        assert_eq!(p.overruns(), 1);
    }
}
