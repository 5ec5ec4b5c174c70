//! Indeterminate loader shown while a removal job runs.
//!
//! The bar does not report real progress: it sweeps a counter around
//! `0..100` on a fixed tick. When the job ends it shows one full-width bar in
//! the outcome color, then disappears after [`CLEAR_DELAY`].

use std::time::{Duration, Instant};

use eframe::epaint::Color32;

use crate::palette::{ERROR, SUCCESS};

pub const TICK: Duration = Duration::from_millis(20);
pub const STEP: u8 = 2;
pub const CLEAR_DELAY: Duration = Duration::from_millis(1200);
pub const HEIGHT: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Hidden,
    Running { value: u8, last_tick: Instant },
    Finished { color: Color32, at: Instant },
}

/// What the bar looks like at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bar {
    Hidden,
    /// Accent up to `fraction` of the width, neutral for the rest
    Running { fraction: f32 },
    /// Full width in the outcome color
    Terminal(Color32),
}

#[derive(Debug, Clone)]
pub struct ProgressBar {
    state: State,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self {
            state: State::Hidden,
        }
    }
}

impl ProgressBar {
    pub fn start(&mut self, now: Instant) {
        self.state = State::Running {
            value: 0,
            last_tick: now,
        };
    }

    /// Single step of the animation; a no-op unless running
    pub fn tick(&mut self) -> bool {
        match &mut self.state {
            State::Running { value, .. } => {
                *value = (*value + STEP) % 100;
                true
            }
            _ => false,
        }
    }

    /// Catch up on every full tick elapsed since the last one
    pub fn advance(&mut self, now: Instant) -> bool {
        let State::Running { value, last_tick } = &mut self.state else {
            return false;
        };
        let mut changed = false;
        while now.saturating_duration_since(*last_tick) >= TICK {
            *value = (*value + STEP) % 100;
            *last_tick += TICK;
            changed = true;
        }
        changed
    }

    pub fn stop(&mut self, success: bool, now: Instant) {
        let color = if success { SUCCESS } else { ERROR };
        self.state = State::Finished { color, at: now };
    }

    pub fn value(&self) -> Option<u8> {
        match self.state {
            State::Running { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    pub fn bar(&self, now: Instant) -> Bar {
        match self.state {
            State::Hidden => Bar::Hidden,
            State::Running { value, .. } => Bar::Running {
                fraction: f32::from(value) / 100.0,
            },
            State::Finished { color, at } => {
                if now.saturating_duration_since(at) >= CLEAR_DELAY {
                    Bar::Hidden
                } else {
                    Bar::Terminal(color)
                }
            }
        }
    }

    /// How long the caller may sleep before the bar needs another frame
    pub fn next_repaint(&self, now: Instant) -> Option<Duration> {
        match self.state {
            State::Hidden => None,
            State::Running { last_tick, .. } => {
                Some((last_tick + TICK).saturating_duration_since(now))
            }
            State::Finished { at, .. } => {
                let elapsed = now.saturating_duration_since(at);
                (elapsed < CLEAR_DELAY).then(|| CLEAR_DELAY - elapsed)
            }
        }
    }
}
