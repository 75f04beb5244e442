//! Loading button with FSM-driven interactions
//!
//! The button provides:
//! - Interaction states: idle, pressed, loading
//! - A tap callback fired when a press is released inside the bounds
//! - Animated background color per state
//! - A crossfade between the title and a three-dot loading indicator
//!
//! Pointer events and `start`/`stop` calls are turned into [`ButtonInput`]s
//! and run through the transition table built by [`button_machine`].

use pulse_animation::{Easing, Tween};
use pulse_core::{Color, DrawCommand, DrawList, Event, Font, Rect, Size, StateMachine};

use crate::loading_indicator::LoadingIndicator;
use crate::presentation::{Presentation, PresentationKind, PresentationSlot, TitlePresentation};
use crate::state::{button_machine, reduce, BackgroundRole, ButtonInput, ButtonState, Effect};
use crate::style::{ButtonStyle, FADE_DURATION_MS};
use crate::widget::Widget;

/// Callback invoked on tap
pub type TapHandler = Box<dyn FnMut() + Send>;

/// Button that shows a title and swaps to a loading indicator when tapped
pub struct LoadingButton {
    frame: Rect,
    style: ButtonStyle,
    fsm: StateMachine<ButtonState, ButtonInput>,
    background: Tween<Color>,
    presentations: PresentationSlot,
    on_tap: Option<TapHandler>,
    tap_count: u64,
}

impl LoadingButton {
    /// Create a button with the default style
    pub fn new(frame: Rect) -> Self {
        Self::with_style(frame, ButtonStyle::default())
    }

    /// Create a button with a custom style
    pub fn with_style(frame: Rect, style: ButtonStyle) -> Self {
        let title = Presentation::Title(title_for(&style));
        let mut background = Tween::settled(style.idle_background);
        background.set_easing(Easing::STANDARD);

        Self {
            frame,
            fsm: button_machine(),
            background,
            presentations: PresentationSlot::new(title),
            on_tap: None,
            tap_count: 0,
            style,
        }
    }

    /// Register the tap callback, replacing any previous one
    pub fn on_tap<F: FnMut() + Send + 'static>(&mut self, callback: F) {
        self.on_tap = Some(Box::new(callback));
    }

    /// Remove the tap callback
    pub fn clear_on_tap(&mut self) {
        self.on_tap = None;
    }

    pub fn state(&self) -> ButtonState {
        self.fsm.current_state()
    }

    /// Transition history of the underlying state machine, oldest first
    pub fn history(&self) -> impl Iterator<Item = &(ButtonState, ButtonInput, ButtonState)> {
        self.fsm.history()
    }

    pub fn style(&self) -> &ButtonStyle {
        &self.style
    }

    /// Current presentation (the incoming one while a crossfade runs)
    pub fn presentation(&self) -> &Presentation {
        self.presentations.current()
    }

    pub fn presentation_kind(&self) -> PresentationKind {
        self.presentations.kind()
    }

    /// Number of presentations currently drawn (2 while crossfading)
    pub fn attached_presentations(&self) -> usize {
        self.presentations.attached_count()
    }

    pub fn is_transitioning(&self) -> bool {
        self.presentations.is_transitioning()
    }

    /// Background color as currently displayed
    pub fn background_color(&self) -> Color {
        self.background.value()
    }

    /// Number of taps delivered since creation
    pub fn tap_count(&self) -> u64 {
        self.tap_count
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    /// Move or resize the button; presentations are relaid out to fill it
    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        if let Some(indicator) = self.presentations.current_mut().as_loading_mut() {
            indicator.set_size(frame.size);
        }
    }

    /// Show the loading indicator regardless of the current state
    pub fn start(&mut self) {
        self.apply(ButtonInput::Start);
    }

    /// Return to the idle title regardless of the current state
    pub fn stop(&mut self) {
        self.apply(ButtonInput::Stop);
    }

    fn apply(&mut self, input: ButtonInput) {
        let from = self.fsm.current_state();
        let reduction = reduce(&self.fsm, from, input);
        self.fsm.send(input);

        if !reduction.changed() {
            tracing::trace!(state = ?from, ?input, "button input ignored");
            return;
        }

        tracing::debug!(?from, to = ?reduction.state, ?input, "button state changed");
        for effect in reduction.effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::AnimateBackground(role) => {
                let color = self.background_for(role);
                self.background.retarget(color, FADE_DURATION_MS);
            }
            Effect::Present(kind) => self.present(kind),
            Effect::NotifyTap => {
                self.tap_count += 1;
                tracing::debug!(taps = self.tap_count, "button tapped");
                if let Some(callback) = self.on_tap.as_mut() {
                    callback();
                }
            }
        }
    }

    fn background_for(&self, role: BackgroundRole) -> Color {
        match role {
            BackgroundRole::Idle => self.style.idle_background,
            BackgroundRole::Pressed => self.style.pressed_background,
        }
    }

    fn present(&mut self, kind: PresentationKind) {
        if self.presentations.kind() == kind {
            return;
        }

        let incoming = match kind {
            PresentationKind::Title => Presentation::Title(title_for(&self.style)),
            PresentationKind::Loading => {
                let mut indicator = LoadingIndicator::new(
                    self.frame.size,
                    self.style.indicator_color,
                    self.style.dot_size,
                    self.style.cycle_ms(),
                );
                indicator.start_animation();
                Presentation::Loading(indicator)
            }
        };

        self.presentations.transition_to(incoming, FADE_DURATION_MS);
    }

    /// Snap the background to the current state's color after a style change
    fn refresh_background(&mut self) {
        let role = BackgroundRole::for_state(self.state());
        let color = self.background_for(role);
        self.background.snap(color);
    }

    /// Set the title text; visible immediately if the title is showing
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.style.title = title.into();
        if let Some(current) = self.presentations.current_mut().as_title_mut() {
            current.text.clone_from(&self.style.title);
        }
    }

    pub fn set_title_color(&mut self, color: Color) {
        self.style.title_color = color;
        if let Some(current) = self.presentations.current_mut().as_title_mut() {
            current.color = color;
        }
    }

    pub fn set_title_font(&mut self, font: Font) {
        if let Some(current) = self.presentations.current_mut().as_title_mut() {
            current.font = font.clone();
        }
        self.style.title_font = font;
    }

    /// Set the dot color; a visible indicator is recolored in place
    pub fn set_indicator_color(&mut self, color: Color) {
        self.style.indicator_color = color;
        if let Some(indicator) = self.presentations.current_mut().as_loading_mut() {
            indicator.set_color(color);
        }
    }

    pub fn set_border_width(&mut self, width: f32) {
        self.style.border_width = width;
        self.refresh_background();
    }

    pub fn set_border_color(&mut self, color: Color) {
        self.style.border_color = color;
        self.refresh_background();
    }

    pub fn set_corner_radius(&mut self, radius: f32) {
        self.style.corner_radius = radius;
        self.refresh_background();
    }

    pub fn set_idle_background(&mut self, color: Color) {
        self.style.idle_background = color;
        self.refresh_background();
    }

    pub fn set_pressed_background(&mut self, color: Color) {
        self.style.pressed_background = color;
        self.refresh_background();
    }

    /// Set the indicator cycle length in seconds; applies to the next indicator
    pub fn set_animation_duration(&mut self, seconds: f32) {
        self.style.animation_duration = seconds;
    }

    /// Set the dot size; a visible indicator is resized in place
    pub fn set_dot_size(&mut self, size: Size) {
        self.style.dot_size = size;
        if let Some(indicator) = self.presentations.current_mut().as_loading_mut() {
            indicator.set_dot_size(size);
        }
    }
}

fn title_for(style: &ButtonStyle) -> TitlePresentation {
    TitlePresentation::new(
        style.title.clone(),
        style.title_color,
        style.title_font.clone(),
    )
}

impl Widget for LoadingButton {
    fn bounds(&self) -> Rect {
        self.frame
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(input) = ButtonInput::from_event(event, self.frame) {
            self.apply(input);
        }
    }

    fn tick(&mut self, dt_ms: f32) {
        self.background.tick(dt_ms);
        if self.presentations.tick(dt_ms) {
            tracing::trace!(kind = ?self.presentations.kind(), "crossfade finished");
        }
    }

    fn paint(&self, list: &mut DrawList) {
        let radius = self.style.corner_radius.max(0.0);
        let clip = radius > 0.0;

        if clip {
            list.push(DrawCommand::PushClip {
                rect: self.frame,
                corner_radius: radius,
            });
        }
        list.push(DrawCommand::FillRect {
            rect: self.frame,
            color: self.background.value(),
            corner_radius: radius,
        });
        self.presentations.paint(list, self.frame);
        if clip {
            list.push(DrawCommand::PopClip);
        }

        if self.style.border_width > 0.0 {
            list.push(DrawCommand::StrokeRect {
                rect: self.frame,
                color: self.style.border_color,
                width: self.style.border_width,
                corner_radius: radius,
            });
        }
    }
}

/// Create a loading button builder for a frame
pub fn loading_button(frame: Rect) -> LoadingButtonBuilder {
    LoadingButtonBuilder {
        frame,
        style: ButtonStyle::default(),
        on_tap: None,
    }
}

/// Builder for creating loading buttons
pub struct LoadingButtonBuilder {
    frame: Rect,
    style: ButtonStyle,
    on_tap: Option<TapHandler>,
}

impl LoadingButtonBuilder {
    /// Replace the whole style
    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.style.title = title.into();
        self
    }

    pub fn title_color(mut self, color: impl Into<Color>) -> Self {
        self.style.title_color = color.into();
        self
    }

    pub fn title_font(mut self, font: Font) -> Self {
        self.style.title_font = font;
        self
    }

    pub fn indicator_color(mut self, color: impl Into<Color>) -> Self {
        self.style.indicator_color = color.into();
        self
    }

    pub fn border(mut self, width: f32, color: impl Into<Color>) -> Self {
        self.style.border_width = width;
        self.style.border_color = color.into();
        self
    }

    pub fn rounded(mut self, radius: f32) -> Self {
        self.style.corner_radius = radius;
        self
    }

    pub fn idle_background(mut self, color: impl Into<Color>) -> Self {
        self.style.idle_background = color.into();
        self
    }

    pub fn pressed_background(mut self, color: impl Into<Color>) -> Self {
        self.style.pressed_background = color.into();
        self
    }

    /// Indicator cycle length in seconds
    pub fn animation_duration(mut self, seconds: f32) -> Self {
        self.style.animation_duration = seconds;
        self
    }

    pub fn dot_size(mut self, size: Size) -> Self {
        self.style.dot_size = size;
        self
    }

    /// Set the tap callback
    pub fn on_tap<F: FnMut() + Send + 'static>(mut self, callback: F) -> Self {
        self.on_tap = Some(Box::new(callback));
        self
    }

    /// Build the button widget
    pub fn build(self) -> LoadingButton {
        let mut button = LoadingButton::with_style(self.frame, self.style);
        button.on_tap = self.on_tap;
        button
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn frame() -> Rect {
        Rect::new(20.0, 100.0, 200.0, 44.0)
    }

    fn counting_button() -> (LoadingButton, Arc<AtomicUsize>) {
        let taps = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&taps);
        let button = loading_button(frame())
            .title("Sign in")
            .on_tap(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .build();
        (button, taps)
    }

    #[test]
    fn test_button_creation() {
        let button = LoadingButton::new(frame());
        assert_eq!(button.state(), ButtonState::Idle);
        assert_eq!(button.presentation_kind(), PresentationKind::Title);
        assert_eq!(button.background_color(), Color::LIGHT_GRAY);
        assert_eq!(
            button.presentation().as_title().map(|t| t.text.as_str()),
            Some("Button")
        );
    }

    #[test]
    fn test_tap_starts_loading() {
        let (mut button, taps) = counting_button();

        button.handle_event(&Event::pointer_down(30.0, 110.0));
        assert_eq!(button.state(), ButtonState::Pressed);
        assert_eq!(button.background.target(), Color::DARK_GRAY);

        button.handle_event(&Event::pointer_up(30.0, 110.0));
        assert_eq!(button.state(), ButtonState::Loading);
        assert_eq!(taps.load(Ordering::SeqCst), 1);
        assert_eq!(button.tap_count(), 1);
        assert_eq!(button.presentation_kind(), PresentationKind::Loading);
        assert_eq!(button.background.target(), Color::LIGHT_GRAY);
    }

    #[test]
    fn test_drag_out_cancels() {
        let (mut button, taps) = counting_button();

        button.handle_event(&Event::pointer_down(30.0, 110.0));
        button.handle_event(&Event::pointer_move(500.0, 110.0));
        assert_eq!(button.state(), ButtonState::Idle);

        // Moving back in does not re-press
        button.handle_event(&Event::pointer_move(30.0, 110.0));
        button.handle_event(&Event::pointer_up(30.0, 110.0));
        assert_eq!(button.state(), ButtonState::Idle);
        assert_eq!(taps.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut button = LoadingButton::new(frame());
        button.start();
        button.tick(200.0);
        assert!(!button.is_transitioning());

        button.stop();
        assert!(button.is_transitioning());
        button.tick(200.0);

        let history_len = button.history().count();
        button.stop();
        assert_eq!(button.state(), ButtonState::Idle);
        assert!(!button.is_transitioning());
        assert_eq!(button.attached_presentations(), 1);
        // The self-loop is recorded but runs no effects
        assert_eq!(button.history().count(), history_len + 1);
    }

    #[test]
    fn test_title_setters_while_loading() {
        let mut button = LoadingButton::new(frame());
        button.set_title("Before");
        assert_eq!(
            button.presentation().as_title().map(|t| t.text.as_str()),
            Some("Before")
        );

        button.start();
        button.set_title("After");
        button.set_title_color(Color::BLACK);
        assert_eq!(button.presentation_kind(), PresentationKind::Loading);

        button.stop();
        let title = button.presentation().as_title().cloned();
        assert_eq!(title.as_ref().map(|t| t.text.as_str()), Some("After"));
        assert_eq!(title.map(|t| t.color), Some(Color::BLACK));
    }

    #[test]
    fn test_style_setter_refreshes_background_for_state() {
        let mut button = LoadingButton::new(frame());
        button.handle_event(&Event::pointer_down(30.0, 110.0));

        button.set_pressed_background(Color::BLACK);
        assert_eq!(button.background_color(), Color::BLACK);

        button.set_idle_background(Color::WHITE);
        assert_eq!(button.background_color(), Color::BLACK);
        button.stop();
        button.tick(150.0);
        assert_eq!(button.background_color(), Color::WHITE);
    }

    #[test]
    fn test_indicator_updates_live() {
        let mut button = LoadingButton::new(frame());
        button.start();
        button.set_indicator_color(Color::BLACK);
        button.set_dot_size(Size::square(6.0));
        button.set_animation_duration(1.0);

        let indicator = button.presentation().as_loading().cloned();
        let indicator = indicator.as_ref();
        assert_eq!(indicator.map(LoadingIndicator::color), Some(Color::BLACK));
        assert_eq!(indicator.map(LoadingIndicator::dot_size), Some(Size::square(6.0)));
        assert_eq!(indicator.map(LoadingIndicator::cycle_ms), Some(2000.0));
    }

    #[test]
    fn test_paint_clips_and_strokes() {
        let mut button = loading_button(frame()).rounded(8.0).border(2.0, Color::BLACK).build();
        button.tick(16.0);

        let mut list = DrawList::new();
        button.paint(&mut list);
        let commands = list.commands();
        assert!(matches!(commands[0], DrawCommand::PushClip { corner_radius, .. } if corner_radius == 8.0));
        assert!(matches!(commands[1], DrawCommand::FillRect { .. }));
        assert!(matches!(commands[2], DrawCommand::Text { .. }));
        assert!(matches!(commands[3], DrawCommand::PopClip));
        assert!(matches!(commands[4], DrawCommand::StrokeRect { width, .. } if width == 2.0));
    }
}
