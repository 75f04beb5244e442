//! Display list recorded by widgets and consumed by a host renderer

use crate::color::Color;
use crate::geometry::{Point, Rect};

/// Font weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

/// Font description handed to the host text renderer
#[derive(Clone, Debug, PartialEq)]
pub struct Font {
    /// Family name; `None` selects the host's system font
    pub family: Option<String>,
    pub size: f32,
    pub weight: FontWeight,
}

impl Font {
    /// System font at the given size
    pub fn system(size: f32) -> Self {
        Self {
            family: None,
            size,
            weight: FontWeight::Regular,
        }
    }

    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(16.0)
    }
}

/// A single drawing command; all coordinates are in the host's space
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle with uniform corner radius
    FillRect {
        rect: Rect,
        color: Color,
        corner_radius: f32,
    },
    /// Rectangle outline drawn inside `rect`
    StrokeRect {
        rect: Rect,
        color: Color,
        width: f32,
        corner_radius: f32,
    },
    /// Single line of text centered in `rect`
    Text {
        rect: Rect,
        text: String,
        color: Color,
        font: Font,
    },
    /// Filled circle
    FillCircle {
        center: Point,
        radius: f32,
        color: Color,
    },
    /// Clip subsequent commands to a rounded rect until the matching `PopClip`
    PushClip { rect: Rect, corner_radius: f32 },
    PopClip,
}

/// Ordered list of draw commands
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text strings in paint order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of circles painted
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|cmd| matches!(cmd, DrawCommand::FillCircle { .. }))
            .count()
    }
}
