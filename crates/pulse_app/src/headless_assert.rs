//! Assertion helpers for headless scenario steps.

use pulse_widgets::{ButtonState, PresentationKind};

use crate::screen::ExampleScreen;

/// Snapshot of observable button state used for headless assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonSnapshot {
    pub state: ButtonState,
    pub presentation: PresentationKind,
    pub transitioning: bool,
    pub taps: u64,
    pub pending_actions: usize,
}

impl ButtonSnapshot {
    pub fn capture(screen: &ExampleScreen) -> Self {
        let button = screen.button();
        Self {
            state: button.state(),
            presentation: button.presentation_kind(),
            transitioning: button.is_transitioning(),
            taps: button.tap_count(),
            pending_actions: screen.pending_actions(),
        }
    }
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

pub fn evaluate_assert_state(expected: ButtonState, snapshot: &ButtonSnapshot) -> AssertionResult {
    if snapshot.state == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "state_mismatch".to_string(),
            message: format!("expected state {expected:?}, got {:?}", snapshot.state),
        }
    }
}

pub fn evaluate_assert_presentation(
    expected: PresentationKind,
    snapshot: &ButtonSnapshot,
) -> AssertionResult {
    if snapshot.presentation == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "presentation_mismatch".to_string(),
            message: format!(
                "expected presentation {expected:?}, got {:?}",
                snapshot.presentation
            ),
        }
    }
}

pub fn evaluate_assert_taps(expected: u64, snapshot: &ButtonSnapshot) -> AssertionResult {
    if snapshot.taps == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::Failed {
            code: "tap_count_mismatch".to_string(),
            message: format!("expected {expected} taps, got {}", snapshot.taps),
        }
    }
}
