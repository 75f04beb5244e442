//! Example host screen
//!
//! One loading button on a plain background. Tapping the button schedules a
//! stop after the configured delay, standing in for asynchronous work that
//! finishes later on the UI loop.

use anyhow::Result;
use pulse_core::{Color, DrawCommand, DrawList, Event, Point, Rect, Size};
use pulse_widgets::{LoadingButton, Widget};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::config::DemoConfig;
use crate::delay::DelayQueue;

/// Work the screen performs when a delay comes due
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenAction {
    StopButton,
}

type SharedDelays = Arc<Mutex<DelayQueue<ScreenAction>>>;

fn lock(delays: &SharedDelays) -> MutexGuard<'_, DelayQueue<ScreenAction>> {
    delays.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Host screen owning a single loading button
pub struct ExampleScreen {
    size: Size,
    background: Color,
    button: LoadingButton,
    delays: SharedDelays,
    frames: u64,
    elapsed_ms: f64,
}

impl ExampleScreen {
    pub fn new(config: &DemoConfig) -> Result<Self> {
        let mut button = LoadingButton::with_style(config.button_frame(), config.button_style()?);
        let delays: SharedDelays = Arc::new(Mutex::new(DelayQueue::new()));

        let queue = Arc::clone(&delays);
        let delay_ms = config.delay_ms();
        button.on_tap(move || {
            lock(&queue).after(delay_ms, ScreenAction::StopButton);
            tracing::info!(delay_ms, "work started, stop scheduled");
        });

        Ok(Self {
            size: config.window_size(),
            background: config.background()?,
            button,
            delays,
            frames: 0,
            elapsed_ms: 0.0,
        })
    }

    pub fn button(&self) -> &LoadingButton {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut LoadingButton {
        &mut self.button
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Delayed actions not yet run
    pub fn pending_actions(&self) -> usize {
        lock(&self.delays).len()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Forward a pointer event in screen coordinates
    pub fn handle_event(&mut self, event: &Event) {
        self.button.handle_event(event);
    }

    /// Press and release at the button center
    pub fn tap_button(&mut self) {
        let center = self.button.bounds().center();
        self.handle_event(&Event::pointer_down(center.x, center.y));
        self.handle_event(&Event::pointer_up(center.x, center.y));
    }

    /// Advance one frame: run due actions, then animations
    pub fn tick(&mut self, dt_ms: f32) {
        self.frames += 1;
        self.elapsed_ms += f64::from(dt_ms);

        let due = lock(&self.delays).advance(dt_ms);
        for action in due {
            self.run(action);
        }

        self.button.tick(dt_ms);
    }

    fn run(&mut self, action: ScreenAction) {
        tracing::debug!(?action, "delayed action due");
        match action {
            ScreenAction::StopButton => self.button.stop(),
        }
    }

    pub fn paint(&self, list: &mut DrawList) {
        list.push(DrawCommand::FillRect {
            rect: Rect::from_origin_size(Point::ZERO, self.size),
            color: self.background,
            corner_radius: 0.0,
        });
        self.button.paint(list);
    }
}
