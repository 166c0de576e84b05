//! Player, Gender and SkillLevel data structures.

use crate::models::schedule::ScheduleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a player (used in matches, round-1 selection and lookups).
pub type PlayerId = Uuid;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("male") {
            Ok(Gender::Male)
        } else if trimmed.eq_ignore_ascii_case("female") {
            Ok(Gender::Female)
        } else {
            Err(ScheduleError::InvalidGender(trimmed.to_string()))
        }
    }
}

/// Self-reported skill level, ordered from weakest to strongest.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    #[default]
    Unrated,
    Beginner,
    Novice,
    Intermediate,
    Advanced,
    Pro,
}

impl SkillLevel {
    /// Numeric score 0..=5 used for balancing.
    pub fn score(self) -> u32 {
        match self {
            SkillLevel::Unrated => 0,
            SkillLevel::Beginner => 1,
            SkillLevel::Novice => 2,
            SkillLevel::Intermediate => 3,
            SkillLevel::Advanced => 4,
            SkillLevel::Pro => 5,
        }
    }

    /// Inverse of [`SkillLevel::score`]; scores above 5 saturate at `Pro`.
    pub fn from_score(score: u32) -> Self {
        match score {
            0 => SkillLevel::Unrated,
            1 => SkillLevel::Beginner,
            2 => SkillLevel::Novice,
            3 => SkillLevel::Intermediate,
            4 => SkillLevel::Advanced,
            _ => SkillLevel::Pro,
        }
    }

    /// Lenient parse: case-insensitive, unknown names count as `Unrated`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => SkillLevel::Beginner,
            "novice" => SkillLevel::Novice,
            "intermediate" => SkillLevel::Intermediate,
            "advanced" => SkillLevel::Advanced,
            "pro" => SkillLevel::Pro,
            _ => SkillLevel::Unrated,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SkillLevel::Unrated => "Unrated",
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Novice => "Novice",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
            SkillLevel::Pro => "Pro",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A registered player. Immutable for the duration of one generation run.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gender: Gender,
    pub skill_level: SkillLevel,
}

impl Player {
    /// Create a new player with a fresh id.
    pub fn new(name: impl Into<String>, gender: Gender, skill_level: SkillLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            gender,
            skill_level,
        }
    }

    pub fn skill_score(&self) -> u32 {
        self.skill_level.score()
    }
}
