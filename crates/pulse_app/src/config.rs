//! Demo configuration file handling

use anyhow::{bail, Context, Result};
use pulse_core::{Color, Font, FontWeight, Rect, Size};
use pulse_widgets::ButtonStyle;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level demo configuration (demo.toml)
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct DemoConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub button: ButtonConfig,
    #[serde(default)]
    pub demo: DemoSection,
}

/// Host screen dimensions
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Screen background as `#RRGGBB` or `#RRGGBBAA`
    #[serde(default = "default_background")]
    pub background: String,
}

fn default_title() -> String {
    "Pulse Demo".to_string()
}

fn default_width() -> u32 {
    375
}

fn default_height() -> u32 {
    667
}

fn default_background() -> String {
    "#1C1C1E".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_width(),
            height: default_height(),
            background: default_background(),
        }
    }
}

/// Button frame and style overrides; unset fields keep the widget defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Frame origin; the button is centered in the window when unset
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: f32,
    pub height: f32,

    pub title: Option<String>,
    pub title_color: Option<String>,
    pub title_font_size: Option<f32>,
    /// light, regular, medium, semibold or bold
    pub title_font_weight: Option<String>,
    pub indicator_color: Option<String>,
    pub border_width: Option<f32>,
    pub border_color: Option<String>,
    pub corner_radius: Option<f32>,
    pub idle_background: Option<String>,
    pub pressed_background: Option<String>,
    /// Indicator cycle length in seconds
    pub animation_duration: Option<f32>,
    /// Side of each (square) loading dot
    pub dot_size: Option<f32>,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            x: None,
            y: None,
            width: 240.0,
            height: 48.0,
            title: None,
            title_color: None,
            title_font_size: None,
            title_font_weight: None,
            indicator_color: None,
            border_width: None,
            border_color: None,
            corner_radius: None,
            idle_background: None,
            pressed_background: None,
            animation_duration: None,
            dot_size: None,
        }
    }
}

/// Example host behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DemoSection {
    /// Seconds between a tap and the host stopping the button
    #[serde(default = "default_delay_secs")]
    pub delay_secs: f32,
}

fn default_delay_secs() -> f32 {
    4.0
}

impl Default for DemoSection {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("No config found at {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Load the file at `path`, or the defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(input: &str) -> Result<Self> {
        let config: DemoConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            bail!("window dimensions must be non-zero");
        }
        if self.button.width <= 0.0 || self.button.height <= 0.0 {
            bail!("button dimensions must be positive");
        }
        if !(self.demo.delay_secs >= 0.0) {
            bail!("demo.delay_secs must be >= 0");
        }
        if let Some(duration) = self.button.animation_duration {
            if !(duration > 0.0) {
                bail!("button.animation_duration must be > 0");
            }
        }
        // Surface bad colours and weights at load time
        self.background()?;
        self.button_style()?;
        Ok(())
    }

    pub fn window_size(&self) -> Size {
        Size::new(self.window.width as f32, self.window.height as f32)
    }

    pub fn background(&self) -> Result<Color> {
        parse_color("window.background", &self.window.background)
    }

    /// Button frame in window coordinates
    pub fn button_frame(&self) -> Rect {
        let window = self.window_size();
        let size = Size::new(self.button.width, self.button.height);
        let x = self
            .button
            .x
            .unwrap_or((window.width - size.width) / 2.0);
        let y = self
            .button
            .y
            .unwrap_or((window.height - size.height) / 2.0);
        Rect::new(x, y, size.width, size.height)
    }

    /// Build the button style from the defaults plus overrides
    pub fn button_style(&self) -> Result<ButtonStyle> {
        let b = &self.button;
        let mut style = ButtonStyle::default();

        if let Some(title) = &b.title {
            style.title.clone_from(title);
        }
        if let Some(color) = &b.title_color {
            style.title_color = parse_color("button.title_color", color)?;
        }
        if b.title_font_size.is_some() || b.title_font_weight.is_some() {
            let size = b.title_font_size.unwrap_or(style.title_font.size);
            let weight = match &b.title_font_weight {
                Some(name) => parse_weight(name)?,
                None => style.title_font.weight,
            };
            style.title_font = Font::system(size).weight(weight);
        }
        if let Some(color) = &b.indicator_color {
            style.indicator_color = parse_color("button.indicator_color", color)?;
        }
        if let Some(width) = b.border_width {
            style.border_width = width;
        }
        if let Some(color) = &b.border_color {
            style.border_color = parse_color("button.border_color", color)?;
        }
        if let Some(radius) = b.corner_radius {
            style.corner_radius = radius;
        }
        if let Some(color) = &b.idle_background {
            style.idle_background = parse_color("button.idle_background", color)?;
        }
        if let Some(color) = &b.pressed_background {
            style.pressed_background = parse_color("button.pressed_background", color)?;
        }
        if let Some(duration) = b.animation_duration {
            style.animation_duration = duration;
        }
        if let Some(side) = b.dot_size {
            style.dot_size = Size::square(side);
        }

        Ok(style)
    }

    /// Tap-to-stop delay in milliseconds
    pub fn delay_ms(&self) -> f32 {
        self.demo.delay_secs * 1000.0
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color> {
    value
        .parse::<Color>()
        .with_context(|| format!("Invalid colour for {field}"))
}

fn parse_weight(name: &str) -> Result<FontWeight> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "light" => FontWeight::Light,
        "regular" => FontWeight::Regular,
        "medium" => FontWeight::Medium,
        "semibold" => FontWeight::Semibold,
        "bold" => FontWeight::Bold,
        other => bail!("Unknown font weight '{other}'"),
    })
}
