use haxbot_core::SessionState;

/// Inputs that move the session state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    GameStarted,
    GameStopped,
    GamePaused,
    GameUnpaused,
    TeamVictory,
    StopCommand,
}

/// Result of applying a [`Trigger`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: SessionState,
    pub to: SessionState,
    /// Whether the pause flag flipped.
    pub pause_changed: bool,
}

/// Mutable session state owned by the controller.
///
/// Pause is tracked as its own flag next to the lifecycle state, so
/// [`SessionState::Paused`] is never entered here. The generation counter
/// is bumped by every match start and every explicit stop; an autostart
/// countdown compares it against the value it was armed with.
#[derive(Clone, Debug)]
pub struct SessionContext {
    state: SessionState,
    paused: bool,
    autostart: bool,
    generation: u64,
}

impl SessionContext {
    pub fn new(autostart: bool) -> Self {
        Self {
            state: SessionState::Stopped,
            paused: false,
            autostart,
            generation: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_stopped(&self) -> bool {
        self.state == SessionState::Stopped
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn autostart_enabled(&self) -> bool {
        self.autostart
    }

    pub fn set_autostart(&mut self, enabled: bool) {
        self.autostart = enabled;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn apply(&mut self, trigger: Trigger) -> Transition {
        let from = self.state;
        let was_paused = self.paused;
        match trigger {
            Trigger::GameStarted => {
                self.state = SessionState::Running;
                self.paused = false;
                self.generation += 1;
            }
            Trigger::GameStopped => {
                self.state = SessionState::Stopped;
                self.paused = false;
            }
            Trigger::GamePaused => self.paused = true,
            Trigger::GameUnpaused => self.paused = false,
            Trigger::TeamVictory => self.state = SessionState::Stopped,
            Trigger::StopCommand => {
                self.state = SessionState::Stopped;
                self.generation += 1;
            }
        }
        Transition {
            from,
            to: self.state,
            pause_changed: was_paused != self.paused,
        }
    }

    /// Flip the pause flag for the `Pause` command. Returns the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(false)
    }
}
