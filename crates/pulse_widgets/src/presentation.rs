//! What the button shows inside its background
//!
//! Exactly one [`Presentation`] is current. Switching presentations starts a
//! crossfade: the incoming one fades in while the outgoing one fades out and
//! is dropped when the fade completes.

use pulse_animation::{Easing, Tween};
use pulse_core::{Color, DrawCommand, DrawList, Font, Rect};

use crate::loading_indicator::LoadingIndicator;

/// Presentation variant, without its payload
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentationKind {
    Title,
    Loading,
}

/// A single centered line of text
#[derive(Clone, Debug, PartialEq)]
pub struct TitlePresentation {
    pub text: String,
    pub color: Color,
    pub font: Font,
}

impl TitlePresentation {
    pub fn new(text: impl Into<String>, color: Color, font: Font) -> Self {
        Self {
            text: text.into(),
            color,
            font,
        }
    }
}

/// Content shown inside the button
#[derive(Clone, Debug)]
pub enum Presentation {
    Title(TitlePresentation),
    Loading(LoadingIndicator),
}

impl Presentation {
    pub fn kind(&self) -> PresentationKind {
        match self {
            Presentation::Title(_) => PresentationKind::Title,
            Presentation::Loading(_) => PresentationKind::Loading,
        }
    }

    pub fn as_title(&self) -> Option<&TitlePresentation> {
        match self {
            Presentation::Title(title) => Some(title),
            Presentation::Loading(_) => None,
        }
    }

    pub fn as_title_mut(&mut self) -> Option<&mut TitlePresentation> {
        match self {
            Presentation::Title(title) => Some(title),
            Presentation::Loading(_) => None,
        }
    }

    pub fn as_loading(&self) -> Option<&LoadingIndicator> {
        match self {
            Presentation::Loading(indicator) => Some(indicator),
            Presentation::Title(_) => None,
        }
    }

    pub fn as_loading_mut(&mut self) -> Option<&mut LoadingIndicator> {
        match self {
            Presentation::Loading(indicator) => Some(indicator),
            Presentation::Title(_) => None,
        }
    }

    fn tick(&mut self, dt_ms: f32) {
        if let Presentation::Loading(indicator) = self {
            indicator.tick(dt_ms);
        }
    }

    /// Paint filling `frame` at the given opacity
    fn paint(&self, list: &mut DrawList, frame: Rect, opacity: f32) {
        if opacity <= 0.0 {
            return;
        }
        match self {
            Presentation::Title(title) => list.push(DrawCommand::Text {
                rect: frame,
                text: title.text.clone(),
                color: title.color.fade(opacity),
                font: title.font.clone(),
            }),
            Presentation::Loading(indicator) => indicator.paint(list, frame.origin, opacity),
        }
    }
}

#[derive(Clone, Debug)]
struct Crossfade {
    outgoing: Presentation,
    /// Opacity of the incoming presentation
    fade: Tween<f32>,
}

/// The current presentation plus any outgoing one still fading out
#[derive(Clone, Debug)]
pub struct PresentationSlot {
    current: Presentation,
    crossfade: Option<Crossfade>,
}

impl PresentationSlot {
    pub fn new(initial: Presentation) -> Self {
        Self {
            current: initial,
            crossfade: None,
        }
    }

    pub fn current(&self) -> &Presentation {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Presentation {
        &mut self.current
    }

    pub fn kind(&self) -> PresentationKind {
        self.current.kind()
    }

    /// Presentation fading out, if a crossfade is running
    pub fn outgoing(&self) -> Option<&Presentation> {
        self.crossfade.as_ref().map(|fade| &fade.outgoing)
    }

    pub fn is_transitioning(&self) -> bool {
        self.crossfade.is_some()
    }

    /// Number of presentations currently drawn
    pub fn attached_count(&self) -> usize {
        1 + usize::from(self.crossfade.is_some())
    }

    /// Opacity of the current presentation
    pub fn current_opacity(&self) -> f32 {
        self.crossfade
            .as_ref()
            .map_or(1.0, |fade| fade.fade.value())
    }

    /// Crossfade from the current presentation to `incoming`.
    ///
    /// A crossfade already in flight is cut short: its outgoing presentation
    /// is dropped at once and the current one becomes the new outgoing.
    pub fn transition_to(&mut self, incoming: Presentation, duration_ms: f32) {
        if let Some(interrupted) = self.crossfade.take() {
            tracing::trace!(
                dropped = ?interrupted.outgoing.kind(),
                "crossfade interrupted"
            );
        }

        tracing::debug!(
            from = ?self.current.kind(),
            to = ?incoming.kind(),
            duration_ms,
            "presentation crossfade"
        );

        let outgoing = std::mem::replace(&mut self.current, incoming);
        let fade = Tween::new(0.0, 1.0, duration_ms, Easing::STANDARD);
        if fade.is_finished() {
            return;
        }
        self.crossfade = Some(Crossfade { outgoing, fade });
    }

    /// Advance the crossfade and the presentations' own animations.
    /// Returns true on the tick that finishes a crossfade.
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        self.current.tick(dt_ms);

        let Some(crossfade) = self.crossfade.as_mut() else {
            return false;
        };
        crossfade.outgoing.tick(dt_ms);
        if crossfade.fade.tick(dt_ms) {
            self.crossfade = None;
            return true;
        }
        false
    }

    /// Paint into `frame`, outgoing first
    pub fn paint(&self, list: &mut DrawList, frame: Rect) {
        let opacity = self.current_opacity();
        if let Some(crossfade) = &self.crossfade {
            crossfade.outgoing.paint(list, frame, 1.0 - opacity);
        }
        self.current.paint(list, frame, opacity);
    }
}
