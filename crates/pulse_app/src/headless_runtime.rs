//! Headless frame clock for deterministic scenario execution.

use anyhow::{bail, Result};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Number of frames to execute.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            max_frames: 1,
            tick_ms: 16,
        }
    }
}

impl HeadlessRunConfig {
    pub fn with_tick_ms(tick_ms: u64) -> Self {
        Self {
            tick_ms,
            ..Default::default()
        }
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    /// Logical time at the start of this frame, relative to the run.
    pub elapsed_ms: u64,
}

/// Deterministic headless runtime loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run a fixed frame budget in headless mode.
    pub fn run<F>(cfg: HeadlessRunConfig, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        if cfg.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }

        for frame in 0..cfg.max_frames {
            on_frame(&HeadlessContext {
                frame_index: frame,
                elapsed_ms: cfg.tick_ms.saturating_mul(frame as u64),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_frame_budget() {
        let mut seen = Vec::new();
        let cfg = HeadlessRunConfig {
            max_frames: 3,
            tick_ms: 10,
        };
        HeadlessRuntime::run(cfg, |ctx| seen.push((ctx.frame_index, ctx.elapsed_ms))).unwrap();
        assert_eq!(seen, vec![(0, 0), (1, 10), (2, 20)]);
    }

    #[test]
    fn test_rejects_zero_budget() {
        let cfg = HeadlessRunConfig {
            max_frames: 0,
            tick_ms: 16,
        };
        assert!(HeadlessRuntime::run(cfg, |_| {}).is_err());
        assert!(HeadlessRuntime::run(HeadlessRunConfig::with_tick_ms(0), |_| {}).is_err());
    }
}
