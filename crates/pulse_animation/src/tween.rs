//! Single-shot timed transitions
//!
//! A `Tween` moves a value from one endpoint to another over a fixed duration.
//! Retargeting an in-flight tween starts the new transition from the value
//! currently displayed, so interrupted animations never jump.

use crate::easing::Easing;
use pulse_core::Color;

/// Values that can be linearly interpolated
pub trait Lerp: Copy {
    fn lerp(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Color {
    fn lerp(self, other: Self, t: f32) -> Self {
        Color::lerp(self, other, t)
    }
}

/// A timed, interruptible transition between two values
#[derive(Clone, Debug, PartialEq)]
pub struct Tween<T: Lerp> {
    from: T,
    to: T,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    /// Start a transition from `from` to `to`
    pub fn new(from: T, to: T, duration_ms: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// A finished tween resting at `value`
    pub fn settled(value: T) -> Self {
        Self {
            from: value,
            to: value,
            duration_ms: 0.0,
            elapsed_ms: 0.0,
            easing: Easing::Linear,
        }
    }

    /// Progress through the transition (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Current interpolated value
    pub fn value(&self) -> T {
        let progress = self.progress();
        if progress >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(progress))
    }

    /// Value the tween is heading to
    pub fn target(&self) -> T {
        self.to
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Begin a new transition toward `to` from the current value
    pub fn retarget(&mut self, to: T, duration_ms: f32) {
        self.from = self.value();
        self.to = to;
        self.duration_ms = duration_ms.max(0.0);
        self.elapsed_ms = 0.0;
    }

    /// Jump to `value` and cancel any running transition
    pub fn snap(&mut self, value: T) {
        self.from = value;
        self.to = value;
        self.duration_ms = 0.0;
        self.elapsed_ms = 0.0;
    }

    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Advance by `dt_ms`. Returns true on the tick that completes the transition.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if self.is_finished() {
            return false;
        }
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms);
        self.is_finished()
    }
}
