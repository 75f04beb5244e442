//! Three-dot loading indicator
//!
//! Three circles laid out horizontally around the indicator center. Each dot
//! runs its own looping keyframe animation; the animations share a duration
//! and are started together, so the dots pulse left to right and then settle
//! before the cycle repeats.

use pulse_animation::{Easing, KeyframeProperties, MultiKeyframeAnimation};
use pulse_core::{Color, DrawCommand, DrawList, Point, Rect, Size};
use smallvec::SmallVec;

/// Horizontal gap between neighbouring dots
pub const DOT_GAP: f32 = 5.0;

const REST_SCALE: f32 = 1.0;
const REST_ALPHA: f32 = 0.6;
const PEAK_SCALE: f32 = 1.1;
const PEAK_ALPHA: f32 = 1.0;

/// Position of a dot in the row
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DotPosition {
    Left,
    Center,
    Right,
}

impl DotPosition {
    pub const ALL: [DotPosition; 3] = [DotPosition::Left, DotPosition::Center, DotPosition::Right];

    pub fn index(self) -> usize {
        match self {
            DotPosition::Left => 0,
            DotPosition::Center => 1,
            DotPosition::Right => 2,
        }
    }
}

/// Scale and alpha of a single dot
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DotPose {
    pub scale: f32,
    pub alpha: f32,
}

impl DotPose {
    pub const REST: DotPose = DotPose {
        scale: REST_SCALE,
        alpha: REST_ALPHA,
    };
    pub const PEAK: DotPose = DotPose {
        scale: PEAK_SCALE,
        alpha: PEAK_ALPHA,
    };

    /// True when the pose is (within float noise) the peak pose
    pub fn is_peak(&self) -> bool {
        (self.scale - PEAK_SCALE).abs() < 1e-4 && (self.alpha - PEAK_ALPHA).abs() < 1e-4
    }

    pub fn is_rest(&self) -> bool {
        (self.scale - REST_SCALE).abs() < 1e-4 && (self.alpha - REST_ALPHA).abs() < 1e-4
    }

    fn properties(self) -> KeyframeProperties {
        KeyframeProperties::scale(self.scale).with_opacity(self.alpha)
    }

    fn from_properties(props: KeyframeProperties) -> Self {
        Self {
            scale: props.scale.unwrap_or(REST_SCALE),
            alpha: props.opacity.unwrap_or(REST_ALPHA),
        }
    }
}

/// Quarter of the indicator cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    LeftPeak,
    CenterPeak,
    RightPeak,
    Settle,
}

impl Phase {
    pub const ALL: [Phase; 4] = [
        Phase::LeftPeak,
        Phase::CenterPeak,
        Phase::RightPeak,
        Phase::Settle,
    ];

    pub fn index(self) -> usize {
        match self {
            Phase::LeftPeak => 0,
            Phase::CenterPeak => 1,
            Phase::RightPeak => 2,
            Phase::Settle => 3,
        }
    }

    /// Quarter containing `progress` (fraction of one cycle, wrapped)
    pub fn from_progress(progress: f32) -> Phase {
        let wrapped = progress.rem_euclid(1.0);
        let quarter = ((wrapped * 4.0).floor() as usize).min(3);
        Phase::ALL[quarter]
    }

    /// Dot that peaks during this quarter, if any
    pub fn peaked_dot(self) -> Option<DotPosition> {
        match self {
            Phase::LeftPeak => Some(DotPosition::Left),
            Phase::CenterPeak => Some(DotPosition::Center),
            Phase::RightPeak => Some(DotPosition::Right),
            Phase::Settle => None,
        }
    }

    /// Pose `dot` reaches at the end of this quarter
    pub fn target_pose(self, dot: DotPosition) -> DotPose {
        if self.peaked_dot() == Some(dot) {
            DotPose::PEAK
        } else {
            DotPose::REST
        }
    }

    /// Normalized time at which this quarter's poses are reached
    fn end_time(self) -> f32 {
        (self.index() + 1) as f32 / 4.0
    }
}

/// Looping animation for one dot
fn dot_animation(position: DotPosition, cycle_ms: f32) -> MultiKeyframeAnimation {
    let start = Phase::Settle.target_pose(position);
    Phase::ALL.iter().fold(
        MultiKeyframeAnimation::new(cycle_ms)
            .loop_infinite()
            .keyframe(0.0, start.properties(), Easing::Linear),
        |anim, phase| {
            anim.keyframe(
                phase.end_time(),
                phase.target_pose(position).properties(),
                Easing::EaseInOut,
            )
        },
    )
}

#[derive(Clone, Debug)]
struct Dot {
    position: DotPosition,
    /// Frame in indicator-local space
    frame: Rect,
    animation: MultiKeyframeAnimation,
}

impl Dot {
    fn pose(&self) -> DotPose {
        DotPose::from_properties(self.animation.current_properties())
    }
}

/// Animated three-dot indicator
#[derive(Clone, Debug)]
pub struct LoadingIndicator {
    /// Size of the area the dots are centered in
    size: Size,
    color: Color,
    dot_size: Size,
    cycle_ms: f32,
    dots: SmallVec<[Dot; 3]>,
}

impl LoadingIndicator {
    /// Create an indicator filling `size`; the dots are laid out but idle
    pub fn new(size: Size, color: Color, dot_size: Size, cycle_ms: f32) -> Self {
        let dots = DotPosition::ALL
            .iter()
            .map(|&position| Dot {
                position,
                frame: Rect::ZERO,
                animation: dot_animation(position, cycle_ms),
            })
            .collect();

        let mut indicator = Self {
            size,
            color,
            dot_size,
            cycle_ms,
            dots,
        };
        indicator.layout();
        indicator
    }

    fn layout(&mut self) {
        let center = self.size.to_rect().center();
        let step = self.dot_size.width + DOT_GAP;
        for dot in &mut self.dots {
            let dx = match dot.position {
                DotPosition::Left => -step,
                DotPosition::Center => 0.0,
                DotPosition::Right => step,
            };
            dot.frame = Rect::centered_at(center.offset(dx, 0.0), self.dot_size);
        }
    }

    /// Begin the looping pulse
    pub fn start_animation(&mut self) {
        for dot in &mut self.dots {
            dot.animation.start();
        }
    }

    /// Remove the dots; nothing is drawn afterwards
    pub fn stop_animation(&mut self) {
        self.dots.clear();
    }

    pub fn is_animating(&self) -> bool {
        self.dots.iter().any(|dot| dot.animation.is_playing())
    }

    pub fn tick(&mut self, dt_ms: f32) {
        for dot in &mut self.dots {
            dot.animation.tick(dt_ms);
        }
    }

    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn dot_size(&self) -> Size {
        self.dot_size
    }

    pub fn cycle_ms(&self) -> f32 {
        self.cycle_ms
    }

    /// Recolor the dots in place
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Resize the dots in place, keeping the animation phase
    pub fn set_dot_size(&mut self, size: Size) {
        self.dot_size = size;
        self.layout();
    }

    /// Change the area the dots are centered in
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
        self.layout();
    }

    /// Frame of a dot in indicator-local space
    pub fn dot_frame(&self, position: DotPosition) -> Option<Rect> {
        self.dot(position).map(|dot| dot.frame)
    }

    /// Current pose of a dot, `None` after `stop_animation`
    pub fn pose(&self, position: DotPosition) -> Option<DotPose> {
        self.dot(position).map(Dot::pose)
    }

    /// Pose of a dot at a fraction of the cycle, independent of the clock
    pub fn sample(&self, position: DotPosition, progress: f32) -> Option<DotPose> {
        self.dot(position)
            .map(|dot| DotPose::from_properties(dot.animation.sample_at(progress)))
    }

    /// Quarter of the cycle at `elapsed_ms` since `start_animation`
    pub fn phase_at(&self, elapsed_ms: f32) -> Phase {
        if self.cycle_ms <= 0.0 {
            return Phase::Settle;
        }
        Phase::from_progress(elapsed_ms / self.cycle_ms)
    }

    /// Quarter the running animation is in
    pub fn phase(&self) -> Option<Phase> {
        self.dots
            .first()
            .map(|dot| self.phase_at(dot.animation.elapsed_ms()))
    }

    fn dot(&self, position: DotPosition) -> Option<&Dot> {
        self.dots.iter().find(|dot| dot.position == position)
    }

    /// Paint the dots with `origin` as the indicator's top-left corner
    pub fn paint(&self, list: &mut DrawList, origin: Point, opacity: f32) {
        let radius = self.dot_size.width.min(self.dot_size.height) / 2.0;
        for dot in &self.dots {
            let pose = dot.pose();
            let center = dot.frame.center();
            list.push(DrawCommand::FillCircle {
                center: Point::new(origin.x + center.x, origin.y + center.y),
                radius: radius * pose.scale,
                color: self.color.fade(pose.alpha * opacity),
            });
        }
    }
}
