use serde::{Deserialize, Serialize};

/// Whole seconds of play, counted only while running.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    elapsed_secs: u32,
    running: bool,
}

impl Timer {
    pub const fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Freezes the counter at its current value.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advances one second, ignored while stopped.
    pub fn tick(&mut self) -> bool {
        if self.running {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
        self.running
    }
}

/// External once-per-second tick source driven by the engine.
///
/// The engine starts it on the first reveal and stops it when the game ends or a
/// new game begins; it never delivers ticks on its own. Callers poll it via
/// `BoardEngine::poll_ticks`.
pub trait TickSource {
    fn start(&mut self);

    /// Cancels the source, pending ticks are discarded.
    fn stop(&mut self);

    /// Whole seconds fired since the previous call.
    fn take_ticks(&mut self) -> u32;
}

impl<T: TickSource + ?Sized> TickSource for &mut T {
    fn start(&mut self) {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn take_ticks(&mut self) -> u32 {
        (**self).take_ticks()
    }
}

/// Tick source driven by hand, for tests and headless play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualTicks {
    running: bool,
    pending: u32,
    starts: u32,
    stops: u32,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires `secs` ticks, dropped when the source is not running.
    pub fn advance(&mut self, secs: u32) {
        if self.running {
            self.pending = self.pending.saturating_add(secs);
        }
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub const fn start_count(&self) -> u32 {
        self.starts
    }

    pub const fn stop_count(&self) -> u32 {
        self.stops
    }
}

impl TickSource for ManualTicks {
    fn start(&mut self) {
        self.running = true;
        self.pending = 0;
        self.starts += 1;
    }

    fn stop(&mut self) {
        if self.running {
            self.stops += 1;
        }
        self.running = false;
        self.pending = 0;
    }

    fn take_ticks(&mut self) -> u32 {
        core::mem::take(&mut self.pending)
    }
}
