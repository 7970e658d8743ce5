/// Staggered card entrance
///
/// Card `i` starts fading in `i * step` after the grid was (re)built.
/// Purely cosmetic: cards are clickable and load images regardless.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    started: Instant,
    step: Duration,
    fade: Duration,
}

impl Reveal {
    pub fn new(started: Instant, step: Duration, fade: Duration) -> Self {
        Self { started, step, fade }
    }

    /// Restart the entrance from `now`
    pub fn restart(&mut self, now: Instant) {
        self.started = now;
    }

    /// Delay before card `index` begins to appear
    pub fn delay(&self, index: usize) -> Duration {
        self.step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
    }

    /// Card opacity in 0.0..=1.0 at `now`
    pub fn opacity(&self, index: usize, now: Instant) -> f32 {
        let begins = self.started + self.delay(index);
        let Some(elapsed) = now.checked_duration_since(begins) else {
            return 0.0;
        };
        if self.fade.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.fade.as_secs_f32()).min(1.0)
    }

    /// Whether any of `count` cards is still fading in at `now`
    pub fn is_running(&self, count: usize, now: Instant) -> bool {
        if count == 0 {
            return false;
        }
        let ends = self.started + self.delay(count - 1) + self.fade;
        now < ends
    }
}
