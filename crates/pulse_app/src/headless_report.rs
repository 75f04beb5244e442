//! Report output model for headless scenario runs.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

use crate::headless_assert::ButtonSnapshot;

/// Report status for a headless scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a headless scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub scenario: Option<String>,
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub elapsed_frames: u64,
    pub elapsed_ms: u64,
    /// Button state when the run ended
    pub final_state: String,
    pub taps: u64,
}

impl HeadlessReport {
    pub fn passed(
        scenario: Option<String>,
        snapshot: &ButtonSnapshot,
        elapsed_frames: u64,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            scenario,
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            code: None,
            message: None,
            elapsed_frames,
            elapsed_ms,
            final_state: format!("{:?}", snapshot.state).to_lowercase(),
            taps: snapshot.taps,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn failed(
        scenario: Option<String>,
        snapshot: &ButtonSnapshot,
        assertion: &str,
        failed_step_index: usize,
        code: String,
        message: String,
        elapsed_frames: u64,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            code: Some(code),
            message: Some(message),
            ..Self::passed(scenario, snapshot, elapsed_frames, elapsed_ms)
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let name = self.scenario.as_deref().unwrap_or("scenario");
        match (&self.assertion, self.failed_step_index, &self.message) {
            (Some(assertion), Some(step), Some(message)) => format!(
                "{name}: FAILED at step {step} ({assertion}): {message} [{} frames, {} ms]",
                self.elapsed_frames, self.elapsed_ms
            ),
            _ => format!(
                "{name}: passed [{} frames, {} ms, {} taps, final state {}]",
                self.elapsed_frames, self.elapsed_ms, self.taps, self.final_state
            ),
        }
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}
