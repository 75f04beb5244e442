//! Integration tests for FSM + animation
//!
//! These tests verify that:
//! - FSM state transitions can retarget interruptible tweens
//! - A looping keyframe timeline keeps its phase across uneven frames

use pulse_animation::{Easing, KeyframeProperties, MultiKeyframeAnimation, Tween};
use pulse_core::fsm::StateMachine;
use pulse_core::Color;
use std::sync::{Arc, Mutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Light {
    Dim,
    Bright,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Input {
    Press,
    Release,
}

fn color_for(state: Light) -> Color {
    match state {
        Light::Dim => Color::DARK_GRAY,
        Light::Bright => Color::WHITE,
    }
}

/// Test that each transition retargets the tween from the displayed value
#[test]
fn test_fsm_transition_retargets_tween() {
    let mut fsm = StateMachine::builder(Light::Dim)
        .on(Light::Dim, Input::Press, Light::Bright)
        .on(Light::Bright, Input::Release, Light::Dim)
        .build();
    let mut tween = Tween::settled(color_for(fsm.current_state()));

    let next = fsm.send(Input::Press);
    tween.retarget(color_for(next), 150.0);
    tween.tick(75.0);
    let halfway = tween.value();
    assert!(halfway.r > Color::DARK_GRAY.r && halfway.r < 1.0);

    // Interrupt: release before the fade completes
    let next = fsm.send(Input::Release);
    tween.retarget(color_for(next), 150.0);
    assert_eq!(tween.value(), halfway);

    tween.tick(150.0);
    assert_eq!(tween.value(), Color::DARK_GRAY);
    assert_eq!(fsm.history().count(), 2);
}

/// Test that ignored inputs never touch the animation
#[test]
fn test_ignored_input_leaves_animation_untouched() {
    let mut fsm = StateMachine::builder(Light::Dim)
        .on(Light::Dim, Input::Press, Light::Bright)
        .build();
    let retargets = Arc::new(Mutex::new(0));

    let mut drive = |input: Input| {
        let before = fsm.current_state();
        let after = fsm.send(input);
        if before != after {
            *retargets.lock().unwrap() += 1;
        }
    };

    drive(Input::Release);
    drive(Input::Press);
    drive(Input::Press);

    assert_eq!(*retargets.lock().unwrap(), 1);
}

/// Test a pulse timeline driven by a 60 fps frame clock
#[test]
fn test_looping_timeline_with_frame_clock() {
    let mut pulse = MultiKeyframeAnimation::new(400.0)
        .keyframe(0.0, KeyframeProperties::opacity(0.6), Easing::Linear)
        .keyframe(0.5, KeyframeProperties::opacity(1.0), Easing::EaseInOut)
        .keyframe(1.0, KeyframeProperties::opacity(0.6), Easing::EaseInOut)
        .loop_infinite();
    pulse.start();

    let frame = 1000.0 / 60.0;
    let mut peak: f32 = 0.0;
    for _ in 0..60 {
        pulse.tick(frame);
        let opacity = pulse.current_properties().resolved_opacity();
        assert!((0.6 - 1e-4..=1.0 + 1e-4).contains(&opacity));
        peak = peak.max(opacity);
    }

    assert!(pulse.is_playing());
    assert_eq!(pulse.completed_iterations(), 2);
    assert!(peak > 0.99);
}
