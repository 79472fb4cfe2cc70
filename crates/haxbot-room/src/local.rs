use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::{debug, info};

use haxbot_core::{HostError, Player, PlayerId, RoomEvent, RoomHost, Team};
use haxbot_settings::RoomSettings;

/// One recorded call into the host, in the order it was made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostCall {
    Announce(String),
    SetPlayerTeam { player: PlayerId, team: Team },
    SetDefaultStadium(String),
    SetScoreLimit(u32),
    SetTimeLimit(u32),
    SetPlayerAdmin { player: PlayerId, admin: bool },
    StartMatch,
    StopMatch,
    PauseMatch(bool),
}

impl HostCall {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Announce(_) => "announce",
            Self::SetPlayerTeam { .. } => "set_player_team",
            Self::SetDefaultStadium(_) => "set_default_stadium",
            Self::SetScoreLimit(_) => "set_score_limit",
            Self::SetTimeLimit(_) => "set_time_limit",
            Self::SetPlayerAdmin { .. } => "set_player_admin",
            Self::StartMatch => "start_match",
            Self::StopMatch => "stop_match",
            Self::PauseMatch(_) => "pause_match",
        }
    }
}

/// Creation parameters fixed when the room opens.
#[derive(Clone, Debug)]
struct RoomConfig {
    name: String,
    max_players: usize,
    public: bool,
    password: Option<String>,
}

impl From<&RoomSettings> for RoomConfig {
    fn from(room: &RoomSettings) -> Self {
        Self {
            name: room.name.clone(),
            max_players: room.max_players as usize,
            public: room.public,
            password: room.password.clone(),
        }
    }
}

#[derive(Default)]
struct RoomState {
    roster: Vec<Player>,
    next_id: u32,
    stadium: String,
    running: bool,
    paused: bool,
    calls: Vec<HostCall>,
    closed: bool,
}

/// In-process room host.
pub struct LocalRoom {
    config: RoomConfig,
    state: Mutex<RoomState>,
    events: mpsc::UnboundedSender<RoomEvent>,
    rejections: Mutex<HashMap<&'static str, String>>,
    print_announcements: bool,
}

impl LocalRoom {
    /// Open a room with [`RoomSettings::default()`].
    pub fn new(events: mpsc::UnboundedSender<RoomEvent>) -> Self {
        Self::open(&RoomSettings::default(), events)
    }

    pub fn open(room: &RoomSettings, events: mpsc::UnboundedSender<RoomEvent>) -> Self {
        Self {
            config: RoomConfig::from(room),
            state: Mutex::new(RoomState {
                next_id: 1,
                ..RoomState::default()
            }),
            events,
            rejections: Mutex::new(HashMap::new()),
            print_announcements: false,
        }
    }

    /// Write announcements to stdout as `[room] <text>`.
    pub fn with_transcript(mut self) -> Self {
        self.print_announcements = true;
        self
    }

    /// Make every call named `call` fail with [`HostError::Rejected`].
    pub fn reject(&self, call: &'static str, reason: impl Into<String>) {
        self.rejections.lock().insert(call, reason.into());
    }

    /// Shut the room. Every later call fails with [`HostError::Unavailable`].
    pub fn close(&self) {
        let mut state = self.state.lock();
        if !state.closed {
            state.closed = true;
            info!(room = %self.config.name, "room closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// One-line room summary as a lobby would list it.
    pub fn listing(&self) -> String {
        let players = self.state.lock().roster.len();
        let access = match (self.config.public, self.config.password.is_some()) {
            (true, false) => "public",
            (true, true) => "public, locked",
            (false, false) => "private",
            (false, true) => "private, locked",
        };
        format!(
            "{} [{access}] {players}/{}",
            self.config.name, self.config.max_players
        )
    }

    /// Check a joining player against capacity and the room password.
    pub(crate) fn admit(&self, password: Option<&str>) -> Result<(), HostError> {
        let state = self.state.lock();
        if state.roster.len() >= self.config.max_players {
            return Err(HostError::Rejected {
                call: "join",
                reason: format!("room is full ({} players)", self.config.max_players),
            });
        }
        if let Some(expected) = &self.config.password {
            if password != Some(expected.as_str()) {
                return Err(HostError::Rejected {
                    call: "join",
                    reason: "wrong password".into(),
                });
            }
        }
        Ok(())
    }

    /// Add a player to the roster without emitting an event.
    pub fn add_player(&self, name: &str, team: Team) -> Player {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        let player = Player::new(id, name).with_team(team);
        state.roster.push(player.clone());
        player
    }

    /// Remove a player by id, returning the last known snapshot.
    pub fn remove_player(&self, id: PlayerId) -> Option<Player> {
        let mut state = self.state.lock();
        let idx = state.roster.iter().position(|p| p.id == id)?;
        Some(state.roster.remove(idx))
    }

    pub fn find_by_name(&self, name: &str) -> Option<Player> {
        self.state.lock().roster.iter().find(|p| p.name == name).cloned()
    }

    pub fn player(&self, id: PlayerId) -> Option<Player> {
        self.state.lock().roster.iter().find(|p| p.id == id).cloned()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.state.lock().calls.clone()
    }

    /// Announced texts, in order.
    pub fn announcements(&self) -> Vec<String> {
        self.state
            .lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                HostCall::Announce(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn stadium(&self) -> String {
        self.state.lock().stadium.clone()
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    pub(crate) fn set_running(&self, running: bool) -> bool {
        let mut state = self.state.lock();
        let changed = state.running != running;
        state.running = running;
        if !running {
            state.paused = false;
        }
        changed
    }

    pub(crate) fn set_paused(&self, paused: bool) -> bool {
        let mut state = self.state.lock();
        if !state.running || state.paused == paused {
            return false;
        }
        state.paused = paused;
        true
    }

    pub(crate) fn emit(&self, event: RoomEvent) {
        let event_type = event.event_type();
        if self.events.send(event).is_err() {
            debug!(event_type, "event receiver closed, dropping event");
        }
    }

    fn record(&self, call: HostCall) -> Result<(), HostError> {
        if self.is_closed() {
            return Err(HostError::Unavailable("room closed".into()));
        }
        if let Some(reason) = self.rejections.lock().get(call.name()) {
            return Err(HostError::Rejected {
                call: call.name(),
                reason: reason.clone(),
            });
        }
        self.state.lock().calls.push(call);
        Ok(())
    }

    fn with_player<T>(&self, id: PlayerId, f: impl FnOnce(&mut Player) -> T) -> Result<T, HostError> {
        let mut state = self.state.lock();
        let player = state
            .roster
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(HostError::UnknownPlayer(id))?;
        Ok(f(player))
    }
}

#[async_trait]
impl RoomHost for LocalRoom {
    async fn announce(&self, text: &str) -> Result<(), HostError> {
        self.record(HostCall::Announce(text.to_string()))?;
        info!(text, "announce");
        if self.print_announcements {
            println!("[room] {text}");
        }
        Ok(())
    }

    async fn set_player_team(&self, player: PlayerId, team: Team) -> Result<(), HostError> {
        self.with_player(player, |_| ())?;
        self.record(HostCall::SetPlayerTeam { player, team })?;
        self.with_player(player, |p| p.team = team)
    }

    async fn set_default_stadium(&self, name: &str) -> Result<(), HostError> {
        self.record(HostCall::SetDefaultStadium(name.to_string()))?;
        self.state.lock().stadium = name.to_string();
        Ok(())
    }

    async fn set_score_limit(&self, limit: u32) -> Result<(), HostError> {
        self.record(HostCall::SetScoreLimit(limit))
    }

    async fn set_time_limit(&self, minutes: u32) -> Result<(), HostError> {
        self.record(HostCall::SetTimeLimit(minutes))
    }

    async fn set_player_admin(&self, player: PlayerId, admin: bool) -> Result<(), HostError> {
        self.with_player(player, |_| ())?;
        self.record(HostCall::SetPlayerAdmin { player, admin })?;
        self.with_player(player, |p| p.is_admin = admin)
    }

    async fn start_match(&self) -> Result<(), HostError> {
        self.record(HostCall::StartMatch)?;
        if self.set_running(true) {
            self.emit(RoomEvent::GameStarted);
        }
        Ok(())
    }

    async fn stop_match(&self) -> Result<(), HostError> {
        self.record(HostCall::StopMatch)?;
        if self.set_running(false) {
            self.emit(RoomEvent::GameStopped);
        }
        Ok(())
    }

    async fn pause_match(&self, paused: bool) -> Result<(), HostError> {
        self.record(HostCall::PauseMatch(paused))?;
        if self.set_paused(paused) {
            self.emit(if paused {
                RoomEvent::GamePaused
            } else {
                RoomEvent::GameUnpaused
            });
        }
        Ok(())
    }

    async fn roster(&self) -> Result<Vec<Player>, HostError> {
        let state = self.state.lock();
        if state.closed {
            return Err(HostError::Unavailable("room closed".into()));
        }
        Ok(state.roster.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room() -> (LocalRoom, mpsc::UnboundedReceiver<RoomEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (LocalRoom::new(tx), rx)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<RoomEvent>) -> Vec<RoomEvent> {
        let mut out = Vec::new();
        while let Ok(evt) = rx.try_recv() {
            out.push(evt);
        }
        out
    }

    #[test]
    fn ids_are_sequential() {
        let (room, _rx) = room();
        let a = room.add_player("Tracy", Team::Red);
        let b = room.add_player("John", Team::Spectator);
        assert_eq!(a.id, PlayerId::new(1));
        assert_eq!(b.id, PlayerId::new(2));
        assert_eq!(room.find_by_name("John"), Some(b));
    }

    #[tokio::test]
    async fn team_change_updates_roster() {
        let (room, _rx) = room();
        let p = room.add_player("Tracy", Team::Spectator);
        room.set_player_team(p.id, Team::Blue).await.unwrap();
        assert_eq!(room.player(p.id).unwrap().team, Team::Blue);
        assert_eq!(
            room.calls(),
            vec![HostCall::SetPlayerTeam {
                player: p.id,
                team: Team::Blue
            }]
        );
    }

    #[tokio::test]
    async fn unknown_player_is_an_error() {
        let (room, _rx) = room();
        let err = room
            .set_player_admin(PlayerId::new(9), true)
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::UnknownPlayer(id) if id == PlayerId::new(9)));
        assert!(room.calls().is_empty());
    }

    #[tokio::test]
    async fn lifecycle_is_echoed_once() {
        let (room, mut rx) = room();
        room.start_match().await.unwrap();
        room.start_match().await.unwrap();
        room.pause_match(true).await.unwrap();
        room.pause_match(true).await.unwrap();
        room.stop_match().await.unwrap();
        room.stop_match().await.unwrap();

        assert_eq!(
            drain(&mut rx),
            vec![
                RoomEvent::GameStarted,
                RoomEvent::GamePaused,
                RoomEvent::GameStopped,
            ]
        );
        assert!(!room.is_paused());
        assert_eq!(room.calls().len(), 6);
    }

    #[tokio::test]
    async fn pause_needs_a_running_match() {
        let (room, mut rx) = room();
        room.pause_match(true).await.unwrap();
        assert!(drain(&mut rx).is_empty());
        assert!(!room.is_paused());
    }

    #[tokio::test]
    async fn rejected_calls_are_not_recorded() {
        let (room, _rx) = room();
        room.reject("set_default_stadium", "no such stadium");
        let err = room.set_default_stadium("Moon").await.unwrap_err();
        assert_eq!(err.to_string(), "set_default_stadium rejected: no such stadium");
        assert_eq!(room.stadium(), "");
        room.announce("still here").await.unwrap();
        assert_eq!(room.announcements(), vec!["still here"]);
    }

    #[tokio::test]
    async fn closed_room_is_unavailable() {
        let (room, _rx) = room();
        room.add_player("Tracy", Team::Red);
        room.close();
        room.close();

        let err = room.announce("anyone?").await.unwrap_err();
        assert_eq!(err.error_kind(), "unavailable");
        assert!(room.roster().await.is_err());
        assert!(room.calls().is_empty());
    }

    #[test]
    fn listing_shows_access_and_head_count() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let settings = RoomSettings {
            name: "Friday".into(),
            max_players: 4,
            public: false,
            password: Some("hunter2".into()),
            ..RoomSettings::default()
        };
        let room = LocalRoom::open(&settings, tx);
        room.add_player("Tracy", Team::Red);
        assert_eq!(room.listing(), "Friday [private, locked] 1/4");

        let (tx, _rx) = mpsc::unbounded_channel();
        assert_eq!(LocalRoom::new(tx).listing(), "My Great Room [public] 0/6");
    }

    #[tokio::test]
    async fn closed_receiver_does_not_fail_calls() {
        let (room, rx) = room();
        drop(rx);
        room.start_match().await.unwrap();
        assert!(room.is_running());
    }
}
