//! In-memory backlight store for unit testing.
//!
//! Clones share state, so a test can hand one clone to the dispatcher and
//! keep another to inspect writes and close calls afterwards.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use backlight_core::step_for;

use crate::application::BacklightStore;
use crate::domain::config::DEFAULT_STEP_PERCENT;
use crate::domain::DaemonError;

#[derive(Debug, Default)]
struct MemoryState {
    current: i64,
    writes: Vec<i64>,
    closes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

/// A [`BacklightStore`] that keeps the brightness in memory.
#[derive(Debug, Clone)]
pub struct MemoryBacklight {
    max_brightness: i64,
    step: i64,
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBacklight {
    /// Creates a store at `current` with the default 1% step of `max`.
    pub fn new(current: i64, max_brightness: i64) -> Self {
        Self {
            max_brightness,
            step: step_for(max_brightness, DEFAULT_STEP_PERCENT),
            state: Arc::new(Mutex::new(MemoryState {
                current,
                ..MemoryState::default()
            })),
        }
    }

    /// Current stored brightness.
    pub fn current(&self) -> i64 {
        self.state.lock().expect("lock poisoned").current
    }

    /// Every value written so far, oldest first.
    pub fn writes(&self) -> Vec<i64> {
        self.state.lock().expect("lock poisoned").writes.clone()
    }

    /// Number of times [`BacklightStore::close`] was called on any clone.
    pub fn close_count(&self) -> usize {
        self.state.lock().expect("lock poisoned").closes
    }

    /// Makes every subsequent read fail.
    pub fn fail_reads(&self) {
        self.state.lock().expect("lock poisoned").fail_reads = true;
    }

    /// Makes every subsequent write fail.
    pub fn fail_writes(&self) {
        self.state.lock().expect("lock poisoned").fail_writes = true;
    }
}

fn injected(context: &'static str) -> DaemonError {
    DaemonError::Io {
        context,
        path: PathBuf::from("memory"),
        source: std::io::Error::other("injected failure"),
    }
}

impl BacklightStore for MemoryBacklight {
    fn max_brightness(&self) -> i64 {
        self.max_brightness
    }

    fn step(&self) -> i64 {
        self.step
    }

    fn read_current(&mut self) -> Result<i64, DaemonError> {
        let state = self.state.lock().expect("lock poisoned");
        if state.fail_reads {
            return Err(injected("failed to read brightness from"));
        }
        Ok(state.current)
    }

    fn write_current(&mut self, value: i64) -> Result<(), DaemonError> {
        let mut state = self.state.lock().expect("lock poisoned");
        if state.fail_writes {
            return Err(injected("failed to write brightness to"));
        }
        state.current = value;
        state.writes.push(value);
        Ok(())
    }

    fn close(self) {
        self.state.lock().expect("lock poisoned").closes += 1;
    }
}
