//! Scenario definition for headless button runs.

use anyhow::{Context, Result};
use pulse_widgets::{ButtonState, PresentationKind};
use serde::Deserialize;
use std::path::Path;

/// Named sequence of headless steps.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    #[serde(default)]
    pub name: Option<String>,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// One scenario step. Pointer coordinates are in screen space; omitted
/// coordinates target the button center.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Tap,
    Press {
        #[serde(default)]
        x: Option<f32>,
        #[serde(default)]
        y: Option<f32>,
    },
    Move {
        x: f32,
        y: f32,
    },
    Release {
        #[serde(default)]
        x: Option<f32>,
        #[serde(default)]
        y: Option<f32>,
    },
    Start,
    Stop,
    Wait {
        ms: u64,
    },
    Tick {
        frames: u32,
    },
    AssertState {
        state: ExpectedState,
    },
    AssertPresentation {
        presentation: ExpectedPresentation,
    },
    AssertTaps {
        count: u64,
    },
}

impl ScenarioStep {
    /// Assertion name used in reports, `None` for non-assertion steps.
    pub fn assertion_name(&self) -> Option<&'static str> {
        match self {
            ScenarioStep::AssertState { .. } => Some("assert_state"),
            ScenarioStep::AssertPresentation { .. } => Some("assert_presentation"),
            ScenarioStep::AssertTaps { .. } => Some("assert_taps"),
            _ => None,
        }
    }
}

/// Button state named in a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedState {
    Idle,
    Pressed,
    Loading,
}

impl From<ExpectedState> for ButtonState {
    fn from(state: ExpectedState) -> Self {
        match state {
            ExpectedState::Idle => ButtonState::Idle,
            ExpectedState::Pressed => ButtonState::Pressed,
            ExpectedState::Loading => ButtonState::Loading,
        }
    }
}

/// Presentation named in a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedPresentation {
    Title,
    Loading,
}

impl From<ExpectedPresentation> for PresentationKind {
    fn from(presentation: ExpectedPresentation) -> Self {
        match presentation {
            ExpectedPresentation::Title => PresentationKind::Title,
            ExpectedPresentation::Loading => PresentationKind::Loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_every_step_kind() {
        let scenario = HeadlessScenario::from_json(
            r#"{
                "name": "all steps",
                "steps": [
                    { "type": "tap" },
                    { "type": "press" },
                    { "type": "press", "x": 1.0, "y": 2.0 },
                    { "type": "move", "x": 3.0, "y": 4.0 },
                    { "type": "release" },
                    { "type": "start" },
                    { "type": "stop" },
                    { "type": "wait", "ms": 150 },
                    { "type": "tick", "frames": 2 },
                    { "type": "assert_state", "state": "loading" },
                    { "type": "assert_presentation", "presentation": "title" },
                    { "type": "assert_taps", "count": 1 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(scenario.name.as_deref(), Some("all steps"));
        assert_eq!(scenario.steps.len(), 12);
        assert!(matches!(
            scenario.steps[2],
            ScenarioStep::Press {
                x: Some(_),
                y: Some(_)
            }
        ));
        assert_eq!(scenario.steps[9].assertion_name(), Some("assert_state"));
        assert_eq!(scenario.steps[0].assertion_name(), None);
    }

    #[test]
    fn test_rejects_unknown_state() {
        let result = HeadlessScenario::from_json(
            r#"{ "steps": [ { "type": "assert_state", "state": "busy" } ] }"#,
        );
        assert!(result.is_err());
    }
}
