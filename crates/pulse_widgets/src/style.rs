//! Visual parameters of the loading button

use pulse_core::{Color, Font, Size};

/// Duration of background color fades and presentation crossfades
pub const FADE_DURATION_MS: f32 = 150.0;

/// Loading button style
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonStyle {
    /// Title shown while idle or pressed
    pub title: String,
    pub title_color: Color,
    pub title_font: Font,
    /// Color of the three loading dots
    pub indicator_color: Color,
    pub border_width: f32,
    pub border_color: Color,
    /// Corner radius; a positive radius also clips the content
    pub corner_radius: f32,
    /// Background while idle or loading
    pub idle_background: Color,
    /// Background while pressed
    pub pressed_background: Color,
    /// Length of one indicator cycle in seconds
    pub animation_duration: f32,
    /// Size of each loading dot
    pub dot_size: Size,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            title: "Button".to_string(),
            title_color: Color::WHITE,
            title_font: Font::system(16.0),
            indicator_color: Color::WHITE,
            border_width: 0.0,
            border_color: Color::WHITE,
            corner_radius: 0.0,
            idle_background: Color::LIGHT_GRAY,
            pressed_background: Color::DARK_GRAY,
            animation_duration: 2.0,
            dot_size: Size::square(10.0),
        }
    }
}

impl ButtonStyle {
    /// Create a style with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Indicator cycle length in milliseconds
    pub fn cycle_ms(&self) -> f32 {
        (self.animation_duration * 1000.0).max(0.0)
    }

    /// Set the title color
    pub fn title_color(mut self, color: Color) -> Self {
        self.title_color = color;
        self
    }

    /// Set the title font
    pub fn title_font(mut self, font: Font) -> Self {
        self.title_font = font;
        self
    }

    /// Set the loading dot color
    pub fn indicator_color(mut self, color: Color) -> Self {
        self.indicator_color = color;
        self
    }

    /// Set the border
    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border_width = width;
        self.border_color = color;
        self
    }

    /// Set the corner radius
    pub fn corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the idle background color
    pub fn idle_background(mut self, color: Color) -> Self {
        self.idle_background = color;
        self
    }

    /// Set the pressed background color
    pub fn pressed_background(mut self, color: Color) -> Self {
        self.pressed_background = color;
        self
    }

    /// Set the indicator cycle length in seconds
    pub fn animation_duration(mut self, seconds: f32) -> Self {
        self.animation_duration = seconds;
        self
    }

    /// Set the loading dot size
    pub fn dot_size(mut self, size: Size) -> Self {
        self.dot_size = size;
        self
    }
}
