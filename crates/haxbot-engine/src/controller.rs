use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use haxbot_core::{Command, Player, RoomEvent, RoomEventHandler, RoomHost, SessionState};
use haxbot_parser::COMMAND_PREFIX;
use haxbot_settings::HaxbotSettings;

use crate::balancer::{assign_on_join, rebalance_on_leave};
use crate::countdown::{stadium_for, AutostartCountdown, Tick};
use crate::error::EngineError;
use crate::session::{SessionContext, Trigger};

/// Length of one autostart countdown tick.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drives one room session from host events.
pub struct SessionController {
    host: Arc<dyn RoomHost>,
    settings: HaxbotSettings,
    session: SessionContext,
    countdown: Option<AutostartCountdown>,
    tick_interval: Duration,
}

impl SessionController {
    pub fn new(host: Arc<dyn RoomHost>, settings: HaxbotSettings) -> Self {
        let session = SessionContext::new(settings.autostart.enabled);
        Self {
            host,
            settings,
            session,
            countdown: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn countdown(&self) -> Option<&AutostartCountdown> {
        self.countdown.as_ref()
    }

    /// Apply the configured stadium and limits to a freshly opened room.
    pub async fn init(&self) -> Result<(), EngineError> {
        let game = &self.settings.game;
        info!(
            room = %self.settings.room.name,
            stadium = %game.default_stadium,
            score_limit = game.score_limit,
            time_limit = game.time_limit,
            "room init"
        );
        self.host.set_default_stadium(&game.default_stadium).await?;
        self.host.set_score_limit(game.score_limit).await?;
        self.host.set_time_limit(game.time_limit).await?;
        Ok(())
    }

    /// Process events until the channel closes or `shutdown` fires.
    ///
    /// Queued events are handled before shutdown is honoured and before a
    /// countdown tick that is due at the same time. Returns the controller so
    /// callers can inspect it.
    pub async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<RoomEvent>,
        shutdown: CancellationToken,
    ) -> Self {
        info!("session controller running");
        loop {
            let deadline = self.countdown.as_ref().map(AutostartCountdown::deadline);
            tokio::select! {
                biased;
                event = events.recv() => match event {
                    Some(event) => self.handle(event).await,
                    None => {
                        info!("event channel closed");
                        break;
                    }
                },
                _ = shutdown.cancelled() => {
                    info!("shutdown requested");
                    break;
                }
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.on_countdown_tick().await;
                }
            }
        }
        self
    }

    pub async fn handle(&mut self, event: RoomEvent) {
        debug!(event_type = event.event_type(), "room event");
        event.dispatch(self).await;
    }

    /// Advance the armed countdown by one tick.
    pub async fn on_countdown_tick(&mut self) {
        let Some(countdown) = self.countdown.as_mut() else {
            return;
        };
        match countdown.tick(&self.session) {
            Tick::Pending { remaining } => debug!(remaining, "autostart countdown"),
            Tick::Aborted => {
                debug!(state = %self.session.state(), "autostart countdown aborted");
                self.countdown = None;
            }
            Tick::Complete => {
                self.countdown = None;
                if let Err(e) = self.autostart().await {
                    self.report(None, e).await;
                }
            }
        }
    }

    /// Drop an armed countdown because an admin took over.
    fn cancel_countdown(&mut self, reason: &'static str) {
        if let Some(countdown) = self.countdown.take() {
            info!(reason, remaining = countdown.remaining(), "autostart countdown cancelled");
        }
    }

    async fn autostart(&self) -> Result<(), EngineError> {
        self.host.stop_match().await?;
        let roster = self.host.roster().await?;
        let stadium = stadium_for(roster.len(), &self.settings.autostart);
        info!(players = roster.len(), stadium, "autostart");
        self.host.set_default_stadium(stadium).await?;
        self.host.start_match().await?;
        Ok(())
    }

    /// Authorize, parse and execute a `!` chat line.
    pub async fn handle_command_line(&mut self, player: &Player, text: &str) -> Result<(), EngineError> {
        if !player.is_admin {
            return Err(EngineError::Unauthorized {
                player: player.name.clone(),
            });
        }
        let command = haxbot_parser::parse(text)?;
        self.execute(player, command).await
    }

    /// Run an already authorized command on behalf of `player`.
    pub async fn execute(&mut self, player: &Player, command: Command) -> Result<(), EngineError> {
        info!(player = %player.name, command = command.name(), "command");
        match command {
            Command::Help => self.host.announce(&self.help_text()).await?,
            Command::Start { stadium } => {
                self.cancel_countdown("start command");
                self.start(stadium.as_deref()).await?;
            }
            Command::Restart { stadium } => {
                self.cancel_countdown("restart command");
                self.host.stop_match().await?;
                self.host.announce("Restarting...").await?;
                self.start(stadium.as_deref()).await?;
            }
            Command::Stop => {
                self.session.apply(Trigger::StopCommand);
                self.host.stop_match().await?;
            }
            Command::Pause => {
                if self.session.state() == SessionState::Stopped {
                    self.host
                        .announce(&format!("{}, game is stopped...", player.name))
                        .await?;
                    return Ok(());
                }
                let paused = self.session.toggle_pause();
                self.host.pause_match(paused).await?;
                self.host.announce(if paused { "Pause" } else { "Unpause" }).await?;
            }
            Command::Go { team } => self.host.set_player_team(player.id, team).await?,
            Command::Autostart { enabled } => {
                self.session.set_autostart(enabled);
                let msg = if enabled {
                    "Autostart enabled"
                } else {
                    "Autostart disabled"
                };
                self.host.announce(msg).await?;
            }
        }
        Ok(())
    }

    async fn start(&self, stadium: Option<&str>) -> Result<(), EngineError> {
        if let Some(stadium) = stadium {
            self.host.set_default_stadium(stadium).await?;
        }
        self.host.start_match().await?;
        self.host.announce("Let's go").await?;
        Ok(())
    }

    pub fn help_text(&self) -> String {
        format!(
            "{} v{}\n\
             Commands are: help, start [STADIUM]?, restart [STADIUM]?, stop, pause, go [TEAM], as [on|off]\n\
             Teams are: red, blue, spec\n\
             Stadiums are all the valid ones, in lowercase, e.g. 'big'\n\
             as is AutoStart\n\
             Enjoy!",
            self.settings.bot.name, self.settings.bot.version
        )
    }

    async fn welcome(&self, player: &Player) -> Result<(), EngineError> {
        if self.settings.room.is_admin_name(&player.name) {
            self.host.set_player_admin(player.id, true).await?;
        }
        let roster = self.host.roster().await?;
        let team = assign_on_join(&roster);
        debug!(player = %player.name, %team, "assigning team");
        self.host.set_player_team(player.id, team).await?;
        self.host.announce(&format!("Hi, {}!", player.name)).await?;
        Ok(())
    }

    async fn farewell(&self, player: &Player) -> Result<(), EngineError> {
        self.host.announce(":(").await?;
        let roster = self.host.roster().await?;
        if let Some(transfer) = rebalance_on_leave(player, &roster) {
            info!(
                player = %transfer.name,
                from = %transfer.from,
                to = %transfer.to,
                "balancing teams"
            );
            self.host.set_player_team(transfer.player, transfer.to).await?;
            self.host.announce("Teams balanced").await?;
        }
        Ok(())
    }

    /// Log a failure and tell the chat when the failure is the player's.
    async fn report(&self, player: Option<&Player>, err: EngineError) {
        match &err {
            EngineError::Host(e) => {
                warn!(error_kind = err.error_kind(), error = %e, "room host call failed");
            }
            EngineError::Parse(e) => {
                debug!(
                    player = player.map(|p| p.name.as_str()),
                    position = e.position,
                    found = ?e.found,
                    error = %e,
                    "command did not parse"
                );
            }
            EngineError::Unauthorized { player } => {
                info!(player = %player, "command from non-admin rejected");
            }
        }
        if let Some(msg) = err.user_message() {
            if let Err(e) = self.host.announce(&msg).await {
                warn!(error_kind = e.error_kind(), error = %e, "room host call failed");
            }
        }
    }
}

#[async_trait]
impl RoomEventHandler for SessionController {
    #[instrument(skip_all, fields(player = %player.name, id = %player.id))]
    async fn on_player_join(&mut self, player: Player) {
        if let Err(e) = self.welcome(&player).await {
            self.report(Some(&player), e).await;
        }
    }

    #[instrument(skip_all, fields(player = %player.name, id = %player.id, team = %player.team))]
    async fn on_player_leave(&mut self, player: Player) {
        if let Err(e) = self.farewell(&player).await {
            self.report(Some(&player), e).await;
        }
    }

    #[instrument(skip_all, fields(player = %player.name))]
    async fn on_player_chat(&mut self, player: Player, text: String) {
        if !text.starts_with(COMMAND_PREFIX) {
            return;
        }
        if let Err(e) = self.handle_command_line(&player, &text).await {
            self.report(Some(&player), e).await;
        }
    }

    #[instrument(skip_all)]
    async fn on_team_victory(&mut self) {
        self.session.apply(Trigger::TeamVictory);
        if !self.session.autostart_enabled() {
            return;
        }
        let delay = self.settings.autostart.delay_secs;
        self.countdown = Some(AutostartCountdown::arm(delay, &self.session, self.tick_interval));
        info!(delay, "autostart armed");
        if let Err(e) = self.host.announce(&format!("Starting in {delay} seconds...")).await {
            self.report(None, e.into()).await;
        }
    }

    #[instrument(skip_all)]
    async fn on_game_start(&mut self) {
        let t = self.session.apply(Trigger::GameStarted);
        info!(from = %t.from, "game started");
    }

    #[instrument(skip_all)]
    async fn on_game_stop(&mut self) {
        let t = self.session.apply(Trigger::GameStopped);
        info!(from = %t.from, "game stopped");
    }

    #[instrument(skip_all)]
    async fn on_game_pause(&mut self) {
        if self.session.apply(Trigger::GamePaused).pause_changed {
            if let Err(e) = self.host.announce("Pause").await {
                self.report(None, e.into()).await;
            }
        }
    }

    #[instrument(skip_all)]
    async fn on_game_unpause(&mut self) {
        if self.session.apply(Trigger::GameUnpaused).pause_changed {
            if let Err(e) = self.host.announce("Unpause").await {
                self.report(None, e.into()).await;
            }
        }
    }
}
