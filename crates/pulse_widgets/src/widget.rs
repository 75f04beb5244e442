//! Base widget trait

use pulse_core::{DrawList, Event, Rect};

/// Base trait for all widgets
///
/// Every method is called from the host UI loop; widgets are not shared
/// across threads.
pub trait Widget {
    /// Frame in the parent's coordinate space
    fn bounds(&self) -> Rect;

    /// Handle a pointer event (coordinates in the parent's space)
    fn handle_event(&mut self, event: &Event);

    /// Advance animations (call each frame)
    fn tick(&mut self, dt_ms: f32);

    /// Record draw commands for the current frame
    fn paint(&self, list: &mut DrawList);
}
