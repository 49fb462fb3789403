//! Timers — the delayed-callback mechanism between ticks.

use std::thread;
use std::time::Duration;

/// How a wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Elapsed,
    /// The host is shutting down; no further tick should run.
    Interrupted,
}

pub trait Timer {
    fn wait(&mut self, delay: Duration) -> Wake;
}

impl<T: Timer + ?Sized> Timer for &mut T {
    fn wait(&mut self, delay: Duration) -> Wake {
        (**self).wait(delay)
    }
}

/// Blocks the current thread for each delay.
#[derive(Debug, Default, Clone, Copy)]
pub struct SleepTimer;

impl Timer for SleepTimer {
    fn wait(&mut self, delay: Duration) -> Wake {
        thread::sleep(delay);
        Wake::Elapsed
    }
}

/// Returns immediately and remembers every requested delay.
#[derive(Debug, Default, Clone)]
pub struct RecordingTimer {
    waits: Vec<Duration>,
    interrupt_after: Option<usize>,
}

impl RecordingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Let `waits` waits elapse, then report `Wake::Interrupted`.
    pub fn interrupt_after(waits: usize) -> Self {
        Self {
            waits: Vec::new(),
            interrupt_after: Some(waits),
        }
    }

    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }

    pub fn total(&self) -> Duration {
        self.waits.iter().sum()
    }
}

impl Timer for RecordingTimer {
    fn wait(&mut self, delay: Duration) -> Wake {
        self.waits.push(delay);
        match self.interrupt_after {
            Some(n) if self.waits.len() > n => Wake::Interrupted,
            _ => Wake::Elapsed,
        }
    }
}
