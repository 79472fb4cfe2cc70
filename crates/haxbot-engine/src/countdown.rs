use std::time::Duration;

use tokio::time::Instant;

use haxbot_settings::AutostartSettings;

use crate::session::SessionContext;

/// Outcome of one countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    Pending { remaining: u32 },
    Aborted,
    Complete,
}

/// Countdown armed after a victory with autostart enabled.
///
/// It holds no handle on the session. Each tick re-checks the session and
/// aborts for good when autostart was turned off, a match is no longer
/// stopped, or the generation moved since arming.
#[derive(Clone, Debug)]
pub struct AutostartCountdown {
    remaining: u32,
    generation: u64,
    interval: Duration,
    deadline: Instant,
}

impl AutostartCountdown {
    pub fn arm(ticks: u32, session: &SessionContext, interval: Duration) -> Self {
        Self {
            remaining: ticks.max(1),
            generation: session.generation(),
            interval,
            deadline: Instant::now() + interval,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn tick(&mut self, session: &SessionContext) -> Tick {
        if !session.autostart_enabled()
            || !session.is_stopped()
            || session.generation() != self.generation
        {
            return Tick::Aborted;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            return Tick::Complete;
        }
        self.deadline += self.interval;
        Tick::Pending {
            remaining: self.remaining,
        }
    }
}

/// Stadium for the next automatic match, picked by roster size.
pub fn stadium_for(roster_len: usize, settings: &AutostartSettings) -> &str {
    if roster_len <= settings.small_roster_max {
        &settings.small_stadium
    } else {
        &settings.large_stadium
    }
}
