//! Pulse Core
//!
//! Foundational types shared by the Pulse widget crates:
//!
//! - **Geometry**: points, sizes and rectangles in logical units
//! - **Color**: RGBA colors with interpolation and hex parsing
//! - **Events**: a single pointer stream delivered by the host
//! - **State Machines**: table-driven transitions over typed states and inputs
//! - **Draw Lists**: the display list a widget paints into
//!
//! # Example
//!
//! ```rust
//! use pulse_core::fsm::StateMachine;
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Light { Off, On }
//!
//! #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
//! enum Input { Toggle }
//!
//! let mut fsm = StateMachine::builder(Light::Off)
//!     .on(Light::Off, Input::Toggle, Light::On)
//!     .on(Light::On, Input::Toggle, Light::Off)
//!     .build();
//!
//! fsm.send(Input::Toggle);
//! assert_eq!(fsm.current_state(), Light::On);
//! ```

pub mod color;
pub mod draw;
pub mod events;
pub mod fsm;
pub mod geometry;

pub use color::{Color, ParseColorError};
pub use draw::{DrawCommand, DrawList, Font, FontWeight};
pub use events::{event_types, Event, EventData, EventType};
pub use fsm::{StateMachine, StateMachineBuilder};
pub use geometry::{Point, Rect, Size};
