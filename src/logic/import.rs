//! Roster import from CSV (`name,gender,skill_level`).

use crate::models::{Gender, Player, ScheduleError, SkillLevel};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    gender: String,
    #[serde(default)]
    skill_level: String,
}

/// Read players from CSV with a header row. Rows are numbered from 1 after the header in errors.
/// Unknown skill levels count as unrated; unknown genders and duplicate names are rejected.
pub fn load_players_csv<R: Read>(reader: R) -> Result<Vec<Player>, ScheduleError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut players: Vec<Player> = Vec::new();
    for (idx, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        let row = idx + 1;
        let record = record.map_err(|e| ScheduleError::Csv {
            row,
            message: e.to_string(),
        })?;
        let name = record.name.trim();
        if name.is_empty() {
            return Err(ScheduleError::Csv {
                row,
                message: ScheduleError::InvalidPlayerName.to_string(),
            });
        }
        if players.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
            return Err(ScheduleError::Csv {
                row,
                message: ScheduleError::DuplicatePlayerName.to_string(),
            });
        }
        let gender: Gender = record.gender.parse().map_err(|e: ScheduleError| ScheduleError::Csv {
            row,
            message: e.to_string(),
        })?;
        players.push(Player::new(name, gender, SkillLevel::parse_lenient(&record.skill_level)));
    }
    log::info!("Imported {} players from CSV", players.len());
    Ok(players)
}
