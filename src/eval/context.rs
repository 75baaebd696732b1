use crate::animation::timeline::Timed;
use crate::foundation::error::{WindowsillError, WindowsillResult};

/// Clock value every actor is evaluated at.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct AnimationContext {
    /// Seconds since the short started.
    pub time: f64,
}

impl AnimationContext {
    pub fn new(time: f64) -> Self {
        Self { time }
    }
}

impl Timed for AnimationContext {
    fn time(&self) -> f64 {
        self.time
    }
}

/// The short's single clock.
///
/// Offline renders never drive it frame by frame (frame `i` is simply `i * step`); it backs the
/// scrubbing commands and interactive-style stepping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    time: f64,
    step: f64,
}

impl Clock {
    /// Seconds a skip moves the clock.
    pub const SKIP_SECS: f64 = 1.0;

    /// A clock at 0 advancing `step` seconds per frame.
    pub fn new(step: f64) -> WindowsillResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(WindowsillError::validation(
                "clock step must be finite and > 0",
            ));
        }
        Ok(Self { time: 0.0, step })
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Move to `time`, floored at 0. Non-finite values reset the clock.
    pub fn seek(&mut self, time: f64) {
        self.time = if time.is_finite() { time.max(0.0) } else { 0.0 };
    }

    /// Advance by one frame.
    pub fn advance(&mut self) {
        self.time += self.step;
    }

    /// Back to the start of the credits.
    pub fn reset(&mut self) {
        self.time = 0.0;
    }

    pub fn skip_forward(&mut self) {
        self.seek(self.time + Self::SKIP_SECS);
    }

    /// Rewind one second; never goes below 0.
    pub fn skip_back(&mut self) {
        self.seek(self.time - Self::SKIP_SECS);
    }

    pub fn context(&self) -> AnimationContext {
        AnimationContext::new(self.time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/context.rs"]
mod tests;
