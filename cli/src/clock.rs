use sweeper_core::TickSource;
use web_time::Instant;

/// Ticks once per wall-clock second since `start`.
#[derive(Clone, Debug, Default)]
pub(crate) struct WallClock {
    started_at: Option<Instant>,
    delivered: u32,
}

impl WallClock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn take_ticks_at(&mut self, now: Instant) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let whole_secs = u32::try_from(now.saturating_duration_since(started_at).as_secs())
            .unwrap_or(u32::MAX);
        let fired = whole_secs.saturating_sub(self.delivered);
        self.delivered = whole_secs;
        fired
    }
}

impl TickSource for WallClock {
    fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.delivered = 0;
    }

    fn stop(&mut self) {
        self.started_at = None;
        self.delivered = 0;
    }

    fn take_ticks(&mut self) -> u32 {
        self.take_ticks_at(Instant::now())
    }
}
