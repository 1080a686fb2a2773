use std::time::Duration;

/// Timed reveal of a route, one waypoint index at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonReveal {
    started: Duration,
    duration: Duration,
    included: usize,
}

impl RibbonReveal {
    pub fn new(started: Duration, duration: Duration) -> Self {
        Self {
            started,
            duration,
            included: 0,
        }
    }

    /// Index of the last waypoint currently drawn.
    pub fn included(&self) -> usize {
        self.included
    }

    pub fn progress(&self, now: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Returns the new last index when it grows; the index never shrinks.
    pub fn update(&mut self, now: Duration, total_points: usize) -> Option<usize> {
        if total_points < 2 {
            return None;
        }
        let target = (self.progress(now) * (total_points - 1) as f32).floor() as usize;
        let target = target.min(total_points - 1);
        if target > self.included {
            self.included = target;
            Some(target)
        } else {
            None
        }
    }
}
