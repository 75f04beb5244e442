//! Pulse Animation System
//!
//! Frame-stepped animation primitives. Nothing here owns a clock: the host
//! calls `tick(dt_ms)` once per frame on the UI thread.
//!
//! # Features
//!
//! - **Easing**: standard curves plus CSS-style cubic beziers
//! - **Tweens**: single-shot transitions that retarget from their current value
//! - **Keyframe Animations**: multi-property timelines with looping

pub mod easing;
pub mod keyframe;
pub mod tween;

pub use easing::Easing;
pub use keyframe::{KeyframeProperties, MultiKeyframe, MultiKeyframeAnimation};
pub use tween::{Lerp, Tween};
