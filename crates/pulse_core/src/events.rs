//! Pointer event model
//!
//! Hosts translate their touch or mouse stream into these events and deliver
//! them to widgets in the widget's parent coordinate space.

use crate::geometry::Point;

/// Event type identifier
pub type EventType = u32;

/// Pointer event types
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    pub const POINTER_MOVE: EventType = 3;
}

/// A UI event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    pub data: EventData,
    /// Host timestamp in milliseconds
    pub timestamp: u64,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    Pointer { x: f32, y: f32 },
    /// Some hosts deliver contact changes without a location
    None,
}

impl Event {
    pub fn new(event_type: EventType, data: EventData) -> Self {
        Self {
            event_type,
            data,
            timestamp: 0,
        }
    }

    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_DOWN, EventData::Pointer { x, y })
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_MOVE, EventData::Pointer { x, y })
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::new(event_types::POINTER_UP, EventData::Pointer { x, y })
    }

    /// Attach a timestamp (milliseconds)
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Pointer location, if the event carries one
    pub fn location(&self) -> Option<Point> {
        match self.data {
            EventData::Pointer { x, y } => Some(Point::new(x, y)),
            EventData::None => None,
        }
    }
}
