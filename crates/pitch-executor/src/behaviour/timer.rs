/// A countdown measured on snapshot time.
#[derive(Clone, Copy, Debug)]
pub struct Timer {
    duration: f64,
    started_at: f64,
}

impl Timer {
    /// Start a timer of `duration` seconds at `now`.
    pub fn new(duration: f64, now: f64) -> Self {
        Self {
            duration,
            started_at: now,
        }
    }

    pub fn restart(&mut self, now: f64) {
        self.started_at = now;
    }

    pub fn elapsed(&self, now: f64) -> f64 {
        now - self.started_at
    }

    pub fn finished(&self, now: f64) -> bool {
        self.elapsed(now) >= self.duration
    }
}
