//! Button state machine
//!
//! The transition table lives in a [`StateMachine`]; [`reduce`] looks up a
//! transition without mutating anything and reports the side effects the
//! button must run on entering the new state. No effects are produced when
//! the state does not change, which makes `start`/`stop` idempotent and
//! keeps in-flight animations untouched.

use pulse_core::{event_types, Event, Rect, StateMachine};
use smallvec::SmallVec;

use crate::presentation::PresentationKind;

/// Interaction state of a loading button
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ButtonState {
    /// Showing the title, not touched
    #[default]
    Idle,
    /// A pointer went down inside and has not been released or left
    Pressed,
    /// Showing the animated indicator
    Loading,
}

/// Inputs that drive the button state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonInput {
    PressInside,
    PressOutside,
    MoveInside,
    MoveOutside,
    ReleaseInside,
    ReleaseOutside,
    /// Programmatic start of loading
    Start,
    /// Programmatic stop of loading
    Stop,
}

impl ButtonInput {
    /// Classify a pointer event by whether it lands inside `bounds`.
    ///
    /// Returns `None` for events without a location or of an unknown type.
    pub fn from_event(event: &Event, bounds: Rect) -> Option<Self> {
        let inside = bounds.contains(event.location()?);
        match (event.event_type, inside) {
            (event_types::POINTER_DOWN, true) => Some(Self::PressInside),
            (event_types::POINTER_DOWN, false) => Some(Self::PressOutside),
            (event_types::POINTER_MOVE, true) => Some(Self::MoveInside),
            (event_types::POINTER_MOVE, false) => Some(Self::MoveOutside),
            (event_types::POINTER_UP, true) => Some(Self::ReleaseInside),
            (event_types::POINTER_UP, false) => Some(Self::ReleaseOutside),
            _ => None,
        }
    }
}

/// Which style color the background should fade to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackgroundRole {
    Idle,
    Pressed,
}

impl BackgroundRole {
    /// Background role shown in `state`
    pub fn for_state(state: ButtonState) -> Self {
        match state {
            ButtonState::Pressed => Self::Pressed,
            ButtonState::Idle | ButtonState::Loading => Self::Idle,
        }
    }
}

/// Side effect requested by a state change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Fade the background to the given style color
    AnimateBackground(BackgroundRole),
    /// Crossfade to the given presentation unless it is already current
    Present(PresentationKind),
    /// Invoke the tap handler
    NotifyTap,
}

/// Result of looking up an input against the transition table
#[derive(Clone, Debug, PartialEq)]
pub struct Reduction {
    pub from: ButtonState,
    pub state: ButtonState,
    pub effects: SmallVec<[Effect; 3]>,
}

impl Reduction {
    fn unchanged(state: ButtonState) -> Self {
        Self {
            from: state,
            state,
            effects: SmallVec::new(),
        }
    }

    pub fn changed(&self) -> bool {
        self.from != self.state
    }
}

/// Build the button transition table starting in `Idle`
pub fn button_machine() -> StateMachine<ButtonState, ButtonInput> {
    use ButtonInput::*;
    use ButtonState::*;

    StateMachine::builder(Idle)
        .on(Idle, PressInside, Pressed)
        .on(Pressed, MoveInside, Pressed)
        .on(Pressed, MoveOutside, Idle)
        .on(Pressed, ReleaseInside, Loading)
        .on_any(Start, Loading)
        .on_any(Stop, Idle)
        .build()
}

/// Effects run on entering `state`
pub fn entry_effects(state: ButtonState) -> SmallVec<[Effect; 3]> {
    let mut effects = SmallVec::new();
    effects.push(Effect::AnimateBackground(BackgroundRole::for_state(state)));
    match state {
        ButtonState::Idle => effects.push(Effect::Present(PresentationKind::Title)),
        ButtonState::Pressed => {}
        ButtonState::Loading => effects.push(Effect::Present(PresentationKind::Loading)),
    }
    effects
}

/// Compute the next state and its effects for `input` received in `state`
pub fn reduce(
    machine: &StateMachine<ButtonState, ButtonInput>,
    state: ButtonState,
    input: ButtonInput,
) -> Reduction {
    let Some(next) = machine.resolve(state, input) else {
        return Reduction::unchanged(state);
    };
    if next == state {
        return Reduction::unchanged(state);
    }

    let mut effects = entry_effects(next);
    if input == ButtonInput::ReleaseInside {
        effects.push(Effect::NotifyTap);
    }

    Reduction {
        from: state,
        state: next,
        effects,
    }
}
