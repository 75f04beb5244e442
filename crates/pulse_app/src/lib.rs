//! Pulse demo host
//!
//! Hosts a single [`pulse_widgets::LoadingButton`] the way an application
//! screen would: configuration from TOML, a frame-clocked delay helper that
//! stops the button some time after a tap, and a headless runner that
//! replays JSON scenarios against the screen and reports the outcome.

pub mod config;
pub mod delay;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod screen;

pub use config::DemoConfig;
pub use delay::{DelayId, DelayQueue};
pub use headless_report::{HeadlessReport, ReportStatus};
pub use headless_runner::{run_loaded_scenario, run_scenario, RunOutcome};
pub use headless_runtime::{HeadlessContext, HeadlessRunConfig, HeadlessRuntime};
pub use headless_scenario::{HeadlessScenario, ScenarioStep};
pub use screen::{ExampleScreen, ScreenAction};
