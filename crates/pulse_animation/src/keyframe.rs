//! Keyframe animations
//!
//! Multi-property keyframe timelines. Keyframe times are normalized to the
//! animation duration (0.0 to 1.0); the value between two keyframes is eased
//! with the easing of the later keyframe.

use crate::easing::Easing;

/// Properties that can be animated in a multi-property keyframe
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KeyframeProperties {
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
}

impl KeyframeProperties {
    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with uniform scale
    pub fn scale(value: f32) -> Self {
        Self {
            scale: Some(value),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    /// Interpolate between two property sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            opacity: lerp_opt(self.opacity, other.opacity, t),
            scale: lerp_opt(self.scale, other.scale, t),
        }
    }

    /// Get the resolved opacity (defaults to 1.0 if not set)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Get the resolved scale (defaults to 1.0 if not set)
    pub fn resolved_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }
}

fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}

/// A keyframe with multiple animated properties
#[derive(Clone, Debug, PartialEq)]
pub struct MultiKeyframe {
    /// Time position (0.0 to 1.0)
    pub time: f32,
    /// Properties at this keyframe
    pub properties: KeyframeProperties,
    /// Easing function to use when transitioning TO this keyframe
    pub easing: Easing,
}

impl MultiKeyframe {
    pub fn new(time: f32, properties: KeyframeProperties, easing: Easing) -> Self {
        Self {
            time,
            properties,
            easing,
        }
    }
}

/// Multi-property keyframe animation
#[derive(Clone, Debug)]
pub struct MultiKeyframeAnimation {
    /// Duration of one iteration in milliseconds
    duration_ms: f32,
    /// Keyframes sorted by time
    keyframes: Vec<MultiKeyframe>,
    /// Time into the current iteration in milliseconds
    current_time: f32,
    playing: bool,
    /// Number of iterations (-1 for infinite)
    iterations: i32,
    completed_iterations: u32,
}

impl MultiKeyframeAnimation {
    /// Create a new multi-property animation with given duration
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            keyframes: Vec::new(),
            current_time: 0.0,
            playing: false,
            iterations: 1,
            completed_iterations: 0,
        }
    }

    /// Add a keyframe to the animation (builder pattern)
    pub fn keyframe(mut self, time: f32, properties: KeyframeProperties, easing: Easing) -> Self {
        self.keyframes
            .push(MultiKeyframe::new(time.clamp(0.0, 1.0), properties, easing));
        // Stable sort keeps insertion order for keyframes sharing a time
        self.keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
        self
    }

    /// Set number of iterations (-1 for infinite)
    pub fn iterations(mut self, count: i32) -> Self {
        self.iterations = count;
        self
    }

    /// Repeat until stopped
    pub fn loop_infinite(self) -> Self {
        self.iterations(-1)
    }

    /// Start the animation from the beginning
    pub fn start(&mut self) {
        self.current_time = 0.0;
        self.completed_iterations = 0;
        self.playing = true;
    }

    /// Stop the animation, holding the current frame
    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_infinite(&self) -> bool {
        self.iterations < 0
    }

    /// Iterations completed since `start`
    pub fn completed_iterations(&self) -> u32 {
        self.completed_iterations
    }

    /// Get the duration of one iteration in milliseconds
    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Time into the current iteration in milliseconds
    pub fn elapsed_ms(&self) -> f32 {
        self.current_time
    }

    /// Get the current progress through this iteration (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.current_time / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Get the current interpolated properties
    pub fn current_properties(&self) -> KeyframeProperties {
        self.sample_at(self.progress())
    }

    /// Advance the animation by delta time (in milliseconds)
    pub fn tick(&mut self, dt_ms: f32) {
        if !self.playing {
            return;
        }

        if self.duration_ms <= 0.0 {
            self.current_time = 0.0;
            self.finish_iteration();
            return;
        }

        self.current_time += dt_ms.max(0.0);

        // A long frame may cross several iteration boundaries
        while self.playing && self.current_time >= self.duration_ms {
            self.current_time -= self.duration_ms;
            self.finish_iteration();
        }
    }

    fn finish_iteration(&mut self) {
        self.completed_iterations = self.completed_iterations.saturating_add(1);

        let more = self.iterations < 0 || (self.completed_iterations as i64) < self.iterations as i64;
        if !more {
            self.current_time = self.duration_ms;
            self.playing = false;
            tracing::trace!(
                iterations = self.completed_iterations,
                "keyframe animation complete"
            );
        }
    }

    /// Get all keyframes
    pub fn keyframes(&self) -> &[MultiKeyframe] {
        &self.keyframes
    }

    /// Sample the animation at a specific progress (0.0 to 1.0)
    ///
    /// Useful for externally-timed animations and for tests that want to
    /// inspect a pose without ticking.
    pub fn sample_at(&self, progress: f32) -> KeyframeProperties {
        let Some(first) = self.keyframes.first() else {
            return KeyframeProperties::default();
        };

        let progress = progress.clamp(0.0, 1.0);

        let mut prev_kf = first;
        let mut next_kf = first;

        for kf in &self.keyframes {
            if kf.time <= progress {
                prev_kf = kf;
            }
            if kf.time >= progress {
                next_kf = kf;
                break;
            }
        }

        if (next_kf.time - prev_kf.time).abs() < f32::EPSILON {
            return prev_kf.properties;
        }

        let local_progress = (progress - prev_kf.time) / (next_kf.time - prev_kf.time);
        let eased = next_kf.easing.apply(local_progress);

        prev_kf.properties.lerp(&next_kf.properties, eased)
    }
}

impl Default for MultiKeyframeAnimation {
    fn default() -> Self {
        Self::new(300.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse() -> MultiKeyframeAnimation {
        MultiKeyframeAnimation::new(1000.0)
            .keyframe(0.0, KeyframeProperties::scale(1.0), Easing::Linear)
            .keyframe(0.5, KeyframeProperties::scale(2.0), Easing::Linear)
            .keyframe(1.0, KeyframeProperties::scale(1.0), Easing::Linear)
    }

    #[test]
    fn test_sample_hits_keyframes() {
        let anim = pulse();
        assert_eq!(anim.sample_at(0.0).resolved_scale(), 1.0);
        assert_eq!(anim.sample_at(0.5).resolved_scale(), 2.0);
        assert!((anim.sample_at(0.25).resolved_scale() - 1.5).abs() < 1e-5);
        assert_eq!(anim.sample_at(1.0).resolved_scale(), 1.0);
    }

    #[test]
    fn test_keyframes_sorted() {
        let anim = MultiKeyframeAnimation::new(100.0)
            .keyframe(1.0, KeyframeProperties::opacity(0.0), Easing::Linear)
            .keyframe(0.0, KeyframeProperties::opacity(1.0), Easing::Linear);
        assert_eq!(anim.keyframes()[0].time, 0.0);
        assert_eq!(anim.keyframes()[1].time, 1.0);
    }

    #[test]
    fn test_single_iteration_stops() {
        let mut anim = pulse();
        anim.start();
        anim.tick(600.0);
        assert!(anim.is_playing());
        anim.tick(600.0);
        assert!(!anim.is_playing());
        assert_eq!(anim.completed_iterations(), 1);
        assert_eq!(anim.progress(), 1.0);
    }

    #[test]
    fn test_infinite_loop_keeps_phase() {
        let mut anim = pulse().loop_infinite();
        anim.start();

        // 2.25 cycles in three uneven frames
        anim.tick(900.0);
        anim.tick(900.0);
        anim.tick(450.0);

        assert!(anim.is_playing());
        assert_eq!(anim.completed_iterations(), 2);
        assert!((anim.elapsed_ms() - 250.0).abs() < 1e-3);
        assert!((anim.current_properties().resolved_scale() - 1.5).abs() < 1e-3);
    }

    #[test]
    fn test_stop_holds_frame() {
        let mut anim = pulse().loop_infinite();
        anim.start();
        anim.tick(500.0);
        anim.stop();
        anim.tick(250.0);
        assert_eq!(anim.current_properties().resolved_scale(), 2.0);
    }

    #[test]
    fn test_unset_properties_resolve_to_identity() {
        let anim = MultiKeyframeAnimation::new(100.0);
        let props = anim.sample_at(0.3);
        assert_eq!(props.resolved_opacity(), 1.0);
        assert_eq!(props.resolved_scale(), 1.0);
    }
}
