//! Integration tests for the loading button
//!
//! These tests drive the button the way a host does: pointer events in the
//! parent's coordinate space, a frame clock through `tick`, and a draw list
//! inspected after `paint`.

use pulse_core::{Color, DrawCommand, DrawList, Event, Font, FontWeight, Rect, Size};
use pulse_widgets::{
    loading_button, ButtonState, DotPosition, LoadingButton, Phase, PresentationKind, Widget,
};
use std::sync::{Arc, Mutex};

const FRAME_MS: f32 = 1000.0 / 60.0;

fn frame() -> Rect {
    Rect::new(40.0, 200.0, 240.0, 48.0)
}

fn tracked_button() -> (LoadingButton, Arc<Mutex<u32>>) {
    let taps = Arc::new(Mutex::new(0));
    let taps_clone = taps.clone();
    let button = loading_button(frame())
        .title("Submit")
        .on_tap(move || {
            *taps_clone.lock().unwrap() += 1;
        })
        .build();
    (button, taps)
}

fn run_frames(button: &mut LoadingButton, ms: f32) {
    let mut remaining = ms;
    while remaining > 0.0 {
        let dt = remaining.min(FRAME_MS);
        button.tick(dt);
        remaining -= dt;
    }
}

fn painted(button: &LoadingButton) -> DrawList {
    let mut list = DrawList::new();
    button.paint(&mut list);
    list
}

/// Test the full tap cycle: press, release, load, stop
#[test]
fn test_tap_cycle() {
    let (mut button, taps) = tracked_button();

    button.handle_event(&Event::pointer_down(100.0, 220.0));
    assert_eq!(button.state(), ButtonState::Pressed);
    run_frames(&mut button, 150.0);
    assert_eq!(button.background_color(), Color::DARK_GRAY);

    button.handle_event(&Event::pointer_up(100.0, 220.0));
    assert_eq!(button.state(), ButtonState::Loading);
    assert_eq!(*taps.lock().unwrap(), 1);

    run_frames(&mut button, 200.0);
    assert_eq!(button.background_color(), Color::LIGHT_GRAY);
    assert_eq!(button.attached_presentations(), 1);
    let list = painted(&button);
    assert_eq!(list.texts().count(), 0);
    assert_eq!(list.circle_count(), 3);

    button.stop();
    run_frames(&mut button, 200.0);
    assert_eq!(button.state(), ButtonState::Idle);
    let list = painted(&button);
    assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Submit"]);
    assert_eq!(list.circle_count(), 0);
    assert_eq!(*taps.lock().unwrap(), 1);
}

/// Test that a press is only registered inside the bounds while idle
#[test]
fn test_pressed_only_from_inside_press_while_idle() {
    let (mut button, _) = tracked_button();

    button.handle_event(&Event::pointer_down(5.0, 5.0));
    assert_eq!(button.state(), ButtonState::Idle);

    button.start();
    button.handle_event(&Event::pointer_down(100.0, 220.0));
    assert_eq!(button.state(), ButtonState::Loading);

    let entered_pressed: Vec<_> = button
        .history()
        .filter(|(_, _, to)| *to == ButtonState::Pressed)
        .collect();
    assert!(entered_pressed.is_empty());
}

/// Test that dragging out cancels the tap
#[test]
fn test_drag_out_and_release_outside() {
    let (mut button, taps) = tracked_button();

    button.handle_event(&Event::pointer_down(100.0, 220.0));
    button.handle_event(&Event::pointer_move(100.0, 400.0));
    button.handle_event(&Event::pointer_up(100.0, 400.0));

    assert_eq!(button.state(), ButtonState::Idle);
    assert_eq!(*taps.lock().unwrap(), 0);
    run_frames(&mut button, 150.0);
    assert_eq!(button.background_color(), Color::LIGHT_GRAY);
}

/// Test that start and stop land in their states from anywhere
#[test]
fn test_start_and_stop_from_every_state() {
    for setup in 0..3 {
        let (mut button, taps) = tracked_button();
        match setup {
            1 => button.handle_event(&Event::pointer_down(100.0, 220.0)),
            2 => button.start(),
            _ => {}
        }

        button.start();
        assert_eq!(button.state(), ButtonState::Loading);
        assert_eq!(button.presentation_kind(), PresentationKind::Loading);

        button.stop();
        assert_eq!(button.state(), ButtonState::Idle);
        assert_eq!(button.presentation_kind(), PresentationKind::Title);
        assert_eq!(*taps.lock().unwrap(), 0);
    }
}

/// Test that stop while idle runs no transition
#[test]
fn test_double_stop_equals_single_stop() {
    let (mut button, _) = tracked_button();
    button.start();
    run_frames(&mut button, 200.0);

    button.stop();
    run_frames(&mut button, 200.0);
    let first = painted(&button);

    button.stop();
    assert!(!button.is_transitioning());
    assert_eq!(button.state(), ButtonState::Idle);
    assert_eq!(painted(&button).commands(), first.commands());
}

/// Test that rapid start/stop cuts over instead of queueing
#[test]
fn test_interrupted_crossfade_settles_to_one_presentation() {
    let (mut button, _) = tracked_button();

    button.start();
    run_frames(&mut button, 50.0);
    button.stop();
    run_frames(&mut button, 50.0);
    button.start();
    assert_eq!(button.attached_presentations(), 2);

    run_frames(&mut button, 150.0);
    assert_eq!(button.attached_presentations(), 1);
    assert_eq!(button.presentation_kind(), PresentationKind::Loading);
}

/// Test that the indicator pulses one dot per quarter, then settles
#[test]
fn test_indicator_cycle_through_button() {
    let (mut button, _) = tracked_button();
    button.set_animation_duration(1.0);
    button.start();

    let quarter = 250.0;
    let expected = [
        Some(DotPosition::Left),
        Some(DotPosition::Center),
        Some(DotPosition::Right),
        None,
    ];
    for peak in expected {
        button.tick(quarter);
        let indicator = button.presentation().as_loading().cloned();
        let Some(indicator) = indicator else {
            panic!("indicator not visible");
        };
        let peaked: Vec<_> = DotPosition::ALL
            .into_iter()
            .filter(|&p| indicator.pose(p).is_some_and(|pose| pose.is_peak()))
            .collect();
        assert_eq!(peaked, peak.into_iter().collect::<Vec<_>>());
    }

    let indicator = button.presentation().as_loading().cloned();
    let phases: Vec<_> = [0.0, 250.0, 500.0, 750.0]
        .into_iter()
        .filter_map(|t| indicator.as_ref().map(|ind| ind.phase_at(t)))
        .collect();
    assert_eq!(phases, Phase::ALL.to_vec());
}

/// Test that title setters apply now when visible and later when not
#[test]
fn test_title_setters() {
    let (mut button, _) = tracked_button();
    let bold = Font::system(14.0).weight(FontWeight::Bold);

    button.set_title("Pay");
    button.set_title_font(bold.clone());
    assert_eq!(painted(&button).texts().collect::<Vec<_>>(), vec!["Pay"]);

    button.start();
    run_frames(&mut button, 200.0);
    let before = painted(&button);
    button.set_title("Paid");
    button.set_title_color(Color::BLACK);
    assert_eq!(painted(&button).texts().count(), before.texts().count());

    button.stop();
    run_frames(&mut button, 200.0);
    let list = painted(&button);
    let text = list.commands().iter().find_map(|cmd| match cmd {
        DrawCommand::Text {
            text, color, font, ..
        } => Some((text.clone(), *color, font.clone())),
        _ => None,
    });
    assert_eq!(text, Some(("Paid".to_string(), Color::BLACK, bold)));
}

/// Test that dot setters update the visible indicator in place
#[test]
fn test_indicator_setters_update_live_dots() {
    let (mut button, _) = tracked_button();
    button.start();
    run_frames(&mut button, 200.0);

    button.set_indicator_color(Color::from_hex(0xFF0000));
    button.set_dot_size(Size::square(8.0));

    let list = painted(&button);
    let circles: Vec<_> = list
        .commands()
        .iter()
        .filter_map(|cmd| match cmd {
            DrawCommand::FillCircle { color, radius, .. } => Some((*color, *radius)),
            _ => None,
        })
        .collect();
    assert_eq!(circles.len(), 3);
    for (color, radius) in circles {
        assert_eq!((color.r, color.g, color.b), (1.0, 0.0, 0.0));
        assert!((4.0..=4.4 + 1e-4).contains(&radius));
    }
}

/// Test that moving the button keeps hit testing and drawing in sync
#[test]
fn test_set_frame_moves_hit_area() {
    let (mut button, taps) = tracked_button();
    button.set_frame(Rect::new(0.0, 0.0, 100.0, 40.0));
    assert_eq!(button.bounds(), Rect::new(0.0, 0.0, 100.0, 40.0));

    button.handle_event(&Event::pointer_down(100.0, 220.0));
    assert_eq!(button.state(), ButtonState::Idle);

    button.handle_event(&Event::pointer_down(50.0, 20.0));
    button.handle_event(&Event::pointer_up(50.0, 20.0));
    assert_eq!(*taps.lock().unwrap(), 1);
}
