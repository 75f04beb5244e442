//! Scenario runner that drives the example screen headlessly.

use anyhow::{bail, Result};
use pulse_core::{Event, Point};
use pulse_widgets::Widget;

use crate::config::DemoConfig;
use crate::headless_assert::{
    evaluate_assert_presentation, evaluate_assert_state, evaluate_assert_taps, AssertionResult,
    ButtonSnapshot,
};
use crate::headless_report::HeadlessReport;
use crate::headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use crate::screen::ExampleScreen;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON against a fresh example screen.
pub fn run_scenario(
    input: &str,
    config: &DemoConfig,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    let mut screen = ExampleScreen::new(config)?;
    run_loaded_scenario(&scenario, &mut screen, runtime_cfg)
}

/// Execute a pre-loaded scenario against an existing screen.
pub fn run_loaded_scenario(
    scenario: &HeadlessScenario,
    screen: &mut ExampleScreen,
    runtime_cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    validate(scenario, runtime_cfg)?;

    let mut clock = Clock::default();
    tracing::debug!(
        scenario = scenario.name.as_deref().unwrap_or("unnamed"),
        steps = scenario.steps.len(),
        "running scenario"
    );

    for (step_index, step) in scenario.steps.iter().enumerate() {
        tracing::trace!(step_index, ?step, "scenario step");
        let center = screen.button().bounds().center();
        let at = |x: Option<f32>, y: Option<f32>| {
            Point::new(x.unwrap_or(center.x), y.unwrap_or(center.y))
        };

        let result = match step {
            ScenarioStep::Tap => {
                screen.tap_button();
                None
            }
            ScenarioStep::Press { x, y } => {
                let p = at(*x, *y);
                screen.handle_event(&Event::pointer_down(p.x, p.y));
                None
            }
            ScenarioStep::Move { x, y } => {
                screen.handle_event(&Event::pointer_move(*x, *y));
                None
            }
            ScenarioStep::Release { x, y } => {
                let p = at(*x, *y);
                screen.handle_event(&Event::pointer_up(p.x, p.y));
                None
            }
            ScenarioStep::Start => {
                screen.button_mut().start();
                None
            }
            ScenarioStep::Stop => {
                screen.button_mut().stop();
                None
            }
            ScenarioStep::Wait { ms } => {
                let frames = wait_frames(*ms, runtime_cfg.tick_ms);
                let mut remaining_ms = *ms;
                run_frames(screen, runtime_cfg, frames, &mut clock, || {
                    let step_ms = remaining_ms.min(runtime_cfg.tick_ms);
                    remaining_ms = remaining_ms.saturating_sub(step_ms);
                    step_ms
                })?;
                None
            }
            ScenarioStep::Tick { frames } => {
                run_frames(screen, runtime_cfg, *frames, &mut clock, || {
                    runtime_cfg.tick_ms
                })?;
                None
            }
            ScenarioStep::AssertState { state } => Some(evaluate_assert_state(
                (*state).into(),
                &ButtonSnapshot::capture(screen),
            )),
            ScenarioStep::AssertPresentation { presentation } => {
                Some(evaluate_assert_presentation(
                    (*presentation).into(),
                    &ButtonSnapshot::capture(screen),
                ))
            }
            ScenarioStep::AssertTaps { count } => Some(evaluate_assert_taps(
                *count,
                &ButtonSnapshot::capture(screen),
            )),
        };

        if let Some(AssertionResult::Failed { code, message }) = result {
            let assertion = step.assertion_name().unwrap_or("assertion");
            tracing::warn!(step_index, assertion, %message, "scenario assertion failed");
            let report = HeadlessReport::failed(
                scenario.name.clone(),
                &ButtonSnapshot::capture(screen),
                assertion,
                step_index,
                code,
                message,
                clock.frames,
                clock.ms,
            );
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(
            scenario.name.clone(),
            &ButtonSnapshot::capture(screen),
            clock.frames,
            clock.ms,
        ),
    })
}

#[derive(Debug, Default)]
struct Clock {
    frames: u64,
    ms: u64,
}

fn validate(scenario: &HeadlessScenario, runtime_cfg: HeadlessRunConfig) -> Result<()> {
    if runtime_cfg.tick_ms == 0 {
        bail!("headless tick_ms must be > 0");
    }
    if scenario.steps.is_empty() {
        bail!("scenario has no steps");
    }
    for (index, step) in scenario.steps.iter().enumerate() {
        let coords = match step {
            ScenarioStep::Press { x, y } | ScenarioStep::Release { x, y } => [*x, *y],
            ScenarioStep::Move { x, y } => [Some(*x), Some(*y)],
            _ => continue,
        };
        if coords.iter().flatten().any(|c| !c.is_finite()) {
            bail!("step {index}: pointer coordinates must be finite");
        }
    }
    Ok(())
}

fn run_frames<A>(
    screen: &mut ExampleScreen,
    runtime_cfg: HeadlessRunConfig,
    frames: u32,
    clock: &mut Clock,
    mut advance_ms: A,
) -> Result<()>
where
    A: FnMut() -> u64,
{
    if frames == 0 {
        return Ok(());
    }

    let mut cfg = runtime_cfg;
    cfg.max_frames = frames;
    HeadlessRuntime::run(cfg, |_| {
        let dt = advance_ms();
        screen.tick(dt as f32);
        clock.frames = clock.frames.saturating_add(1);
        clock.ms = clock.ms.saturating_add(dt);
    })
}

fn wait_frames(wait_ms: u64, tick_ms: u64) -> u32 {
    if wait_ms == 0 {
        return 0;
    }
    let tick = tick_ms.max(1);
    let frames = wait_ms.saturating_add(tick.saturating_sub(1)) / tick;
    frames.min(u32::MAX as u64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(input: &str) -> RunOutcome {
        run_scenario(input, &DemoConfig::default(), HeadlessRunConfig::default()).unwrap()
    }

    #[test]
    fn test_wait_frames_rounds_up() {
        assert_eq!(wait_frames(0, 16), 0);
        assert_eq!(wait_frames(16, 16), 1);
        assert_eq!(wait_frames(17, 16), 2);
    }

    #[test]
    fn test_tap_and_assert() {
        let outcome = run(r#"{
            "steps": [
                { "type": "tap" },
                { "type": "assert_state", "state": "loading" },
                { "type": "assert_taps", "count": 1 },
                { "type": "wait", "ms": 200 },
                { "type": "assert_presentation", "presentation": "loading" }
            ]
        }"#);
        assert!(!outcome.is_failed(), "{}", outcome.report().summary());
        assert_eq!(outcome.report().elapsed_ms, 200);
        assert_eq!(outcome.report().elapsed_frames, 13);
    }

    #[test]
    fn test_failure_reports_step() {
        let outcome = run(r#"{
            "name": "wrong",
            "steps": [
                { "type": "start" },
                { "type": "assert_state", "state": "idle" }
            ]
        }"#);
        assert!(outcome.is_failed());
        let report = outcome.report();
        assert_eq!(report.failed_step_index, Some(1));
        assert_eq!(report.assertion.as_deref(), Some("assert_state"));
        assert_eq!(report.code.as_deref(), Some("state_mismatch"));
        assert_eq!(report.final_state, "loading");
    }

    #[test]
    fn test_rejects_invalid_runs() {
        let empty = run_scenario(r#"{ "steps": [] }"#, &DemoConfig::default(), HeadlessRunConfig::default());
        assert!(empty.is_err());

        let zero_tick = run_scenario(
            r#"{ "steps": [ { "type": "tap" } ] }"#,
            &DemoConfig::default(),
            HeadlessRunConfig::with_tick_ms(0),
        );
        assert!(zero_tick.is_err());
    }
}
