//! Pulse Widget Library
//!
//! A tappable button that shows its title while idle or pressed and swaps to
//! an animated three-dot indicator while loading.
//!
//! # Example
//!
//! ```rust
//! use pulse_core::{Color, Event, Rect};
//! use pulse_widgets::prelude::*;
//!
//! let mut button = loading_button(Rect::new(0.0, 0.0, 200.0, 44.0))
//!     .title("Sign in")
//!     .idle_background(Color::from_hex(0x2F80ED))
//!     .on_tap(|| println!("tapped"))
//!     .build();
//!
//! button.handle_event(&Event::pointer_down(20.0, 20.0));
//! button.handle_event(&Event::pointer_up(20.0, 20.0));
//! assert_eq!(button.state(), ButtonState::Loading);
//!
//! // Later, when the work finishes
//! button.stop();
//! assert_eq!(button.state(), ButtonState::Idle);
//! ```

pub mod button;
pub mod loading_indicator;
pub mod presentation;
pub mod state;
pub mod style;
pub mod widget;

pub use button::{loading_button, LoadingButton, LoadingButtonBuilder, TapHandler};
pub use loading_indicator::{DotPose, DotPosition, LoadingIndicator, Phase};
pub use presentation::{Presentation, PresentationKind, PresentationSlot, TitlePresentation};
pub use state::{BackgroundRole, ButtonInput, ButtonState, Effect, Reduction};
pub use style::ButtonStyle;
pub use widget::Widget;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::button::{loading_button, LoadingButton, LoadingButtonBuilder};
    pub use crate::presentation::PresentationKind;
    pub use crate::state::ButtonState;
    pub use crate::style::ButtonStyle;
    pub use crate::widget::Widget;
}
