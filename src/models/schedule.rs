//! Schedule, ScheduleConfig and ScheduleError.

use crate::models::court_match::CourtMatch;
use crate::models::player::{Gender, Player, PlayerId, SkillLevel};
use crate::models::roster::RosterState;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur when editing a schedule or importing a roster.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScheduleError {
    /// Player id is not part of the schedule's roster.
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Player name is empty after trimming.
    InvalidPlayerName,
    /// Gender must be "male" or "female".
    InvalidGender(String),
    /// Start time is not "HH:MM".
    InvalidStartTime(String),
    /// A configuration value is out of range.
    InvalidConfig(&'static str),
    /// Round 1 needs at least one selected player.
    EmptySelection,
    /// Round 1 cannot hold more players than its courts do.
    TooManyRound1Players { max: usize, selected: usize },
    /// A roster CSV row could not be read.
    Csv { row: usize, message: String },
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::PlayerNotFound(_) => write!(f, "Player not found"),
            ScheduleError::DuplicatePlayerName => write!(f, "A player with this name already exists"),
            ScheduleError::InvalidPlayerName => write!(f, "Player name must not be empty"),
            ScheduleError::InvalidGender(g) => write!(f, "Unknown gender '{}' (expected male or female)", g),
            ScheduleError::InvalidStartTime(t) => write!(f, "Invalid start time '{}' (expected HH:MM)", t),
            ScheduleError::InvalidConfig(what) => write!(f, "Invalid configuration: {}", what),
            ScheduleError::EmptySelection => write!(f, "Select at least one player for round 1"),
            ScheduleError::TooManyRound1Players { max, selected } => {
                write!(f, "Maximum {} players allowed for round 1 (selected {})", max, selected)
            }
            ScheduleError::Csv { row, message } => write!(f, "Roster row {}: {}", row, message),
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Unique identifier for a schedule.
pub type ScheduleId = Uuid;

pub const DEFAULT_SESSION_MINUTES: u32 = 24;

/// Upper bound on courts per schedule.
pub const MAX_COURT_COUNT: u32 = 64;

/// Upper bound on sessions per schedule (a full day of 15-minute sessions).
pub const MAX_SESSION_COUNT: u32 = 96;

fn default_court_count() -> u32 {
    2
}

fn default_start_time() -> String {
    "20:00".to_string()
}

fn default_duration_minutes() -> u32 {
    120
}

fn default_session_minutes() -> u32 {
    DEFAULT_SESSION_MINUTES
}

/// Courts and time window of a playing evening.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_court_count")]
    pub court_count: u32,
    /// "HH:MM" of the first session.
    #[serde(default = "default_start_time")]
    pub start_time: String,
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,
    #[serde(default = "default_session_minutes")]
    pub session_minutes: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            court_count: default_court_count(),
            start_time: default_start_time(),
            duration_minutes: default_duration_minutes(),
            session_minutes: default_session_minutes(),
        }
    }
}

impl ScheduleConfig {
    pub fn session_count(&self) -> u32 {
        crate::logic::session_count(self.duration_minutes, self.session_minutes)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.court_count == 0 {
            return Err(ScheduleError::InvalidConfig("court count must be at least 1"));
        }
        if self.court_count > MAX_COURT_COUNT {
            return Err(ScheduleError::InvalidConfig("court count must be at most 64"));
        }
        if self.session_minutes == 0 {
            return Err(ScheduleError::InvalidConfig("session length must be at least 1 minute"));
        }
        if self.session_count() > MAX_SESSION_COUNT {
            return Err(ScheduleError::InvalidConfig("at most 96 sessions fit in one schedule"));
        }
        NaiveTime::parse_from_str(self.start_time.trim(), "%H:%M")
            .map_err(|_| ScheduleError::InvalidStartTime(self.start_time.clone()))?;
        Ok(())
    }

    /// Round 1 may not hold more players than its courts.
    pub fn max_round1_players(&self) -> usize {
        self.court_count as usize * 4
    }

    /// This configuration with every field set in `patch` replaced.
    pub fn merged(&self, patch: ScheduleConfigPatch) -> ScheduleConfig {
        ScheduleConfig {
            court_count: patch.court_count.unwrap_or(self.court_count),
            start_time: patch.start_time.unwrap_or_else(|| self.start_time.clone()),
            duration_minutes: patch.duration_minutes.unwrap_or(self.duration_minutes),
            session_minutes: patch.session_minutes.unwrap_or(self.session_minutes),
        }
    }
}

/// Partial configuration update; missing fields keep their current value.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct ScheduleConfigPatch {
    pub court_count: Option<u32>,
    pub start_time: Option<String>,
    pub duration_minutes: Option<u32>,
    pub session_minutes: Option<u32>,
}

/// Roster readiness shown next to the round-1 selection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RosterStatus {
    pub players: usize,
    pub round1_players: usize,
    pub max_round1_players: usize,
    /// Players still needed to fill the next round-1 court.
    pub needed_players: usize,
    pub has_enough_players: bool,
}

/// All matches of one round, for grouped display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub time: String,
    pub matches: Vec<CourtMatch>,
}

/// One playing evening: roster, configuration, round-1 curation and the generated matches.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    /// Registered players. Order matters: it breaks ties during generation.
    pub players: Vec<Player>,
    pub config: ScheduleConfig,
    pub roster: RosterState,
    /// Generated matches, round-major then court-minor.
    pub matches: Vec<CourtMatch>,
}

impl Schedule {
    /// Create a schedule with every player selected for round 1 and generate its matches.
    pub fn new(players: Vec<Player>, config: ScheduleConfig) -> Result<Self, ScheduleError> {
        config.validate()?;
        let roster = RosterState::new(&players);
        let mut schedule = Self {
            id: Uuid::new_v4(),
            players,
            config,
            roster,
            matches: Vec::new(),
        };
        schedule.regenerate();
        Ok(schedule)
    }

    /// Rebuild all matches from the roster, configuration and frozen round-1 matches.
    pub fn regenerate(&mut self) {
        crate::logic::regenerate_schedule(self);
    }

    /// Replace the round-1 selection, keeping round-1 matches whose players all stay selected,
    /// and regenerate.
    pub fn update_round1(&mut self, player_ids: &[PlayerId]) -> Result<(), ScheduleError> {
        crate::logic::update_round1(self, player_ids)
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Doubles needs at least four registered players.
    pub fn has_enough_players(&self) -> bool {
        self.players.len() >= 4
    }

    /// Register a player. Names must be unique (case-insensitive). New players are not put in
    /// round 1; the operator curates that separately.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        gender: Gender,
        skill_level: SkillLevel,
    ) -> Result<PlayerId, ScheduleError> {
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(ScheduleError::InvalidPlayerName);
        }
        let is_duplicate = self
            .players
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(ScheduleError::DuplicatePlayerName);
        }
        let player = Player::new(name_trimmed, gender, skill_level);
        let id = player.id;
        self.players.push(player);
        Ok(id)
    }

    /// Remove a player from the roster, from round 1, and from any frozen match.
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), ScheduleError> {
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(ScheduleError::PlayerNotFound(player_id))?;
        self.players.remove(idx);
        self.roster.forget_player(player_id);
        Ok(())
    }

    /// Replace the configuration. Frozen matches on courts that no longer exist are dropped,
    /// the rest move to the new first session time.
    pub fn set_config(&mut self, config: ScheduleConfig) -> Result<(), ScheduleError> {
        config.validate()?;
        let court_count = config.court_count;
        let first_session = crate::logic::session_time(&config.start_time, 0, config.session_minutes);
        self.roster.frozen.retain(|m| m.court <= court_count);
        for m in &mut self.roster.frozen {
            m.time.clone_from(&first_session);
        }
        self.config = config;
        Ok(())
    }

    pub fn status(&self) -> RosterStatus {
        RosterStatus {
            players: self.players.len(),
            round1_players: self.roster.round1.len(),
            max_round1_players: self.config.max_round1_players(),
            needed_players: self.roster.players_to_fill_court(),
            has_enough_players: self.has_enough_players(),
        }
    }

    /// Matches grouped by round, in round order.
    pub fn rounds(&self) -> Vec<Round> {
        let mut rounds: Vec<Round> = Vec::new();
        for m in &self.matches {
            match rounds.iter_mut().find(|r| r.number == m.round) {
                Some(round) => round.matches.push(m.clone()),
                None => rounds.push(Round {
                    number: m.round,
                    time: m.time.clone(),
                    matches: vec![m.clone()],
                }),
            }
        }
        rounds.sort_by_key(|r| r.number);
        rounds
    }
}
