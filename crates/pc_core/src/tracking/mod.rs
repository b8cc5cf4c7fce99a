//! # Tracking Data Model
//!
//! Match-long tracking tables for both teams, the event list, and the
//! per-frame snapshots the model consumes.
//!
//! - `table` - per-team tracking tables and the home/away pair
//! - `events` - event list (start frame + team in possession)
//! - `snapshot` - one frame, split into attacking and defending sides

pub mod events;
pub mod snapshot;
pub mod table;

pub use events::{Event, EventTable};
pub use snapshot::{PlayerEntry, PlayerOverride, Snapshot};
pub use table::{MatchTracking, TrackingTable};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PitchControlError;

/// The two sides of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Home,
    Away,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Home, Team::Away];

    pub fn opponent(&self) -> Team {
        match self {
            Team::Home => Team::Away,
            Team::Away => Team::Home,
        }
    }

    /// Column prefix used by tracking tables (`Home_11_x`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Home => "Home",
            Team::Away => "Away",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = PitchControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home" => Ok(Team::Home),
            "away" => Ok(Team::Away),
            _ => Err(PitchControlError::InvalidTeam { team: s.to_string() }),
        }
    }
}

/// Player identifier as used in tracking column names.
///
/// Jersey numbers and vendor string ids are both accepted; the id must be
/// usable as the middle part of `<team>_<id>_x`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Result<Self, PitchControlError> {
        let id = id.into();
        if !Self::is_valid(&id) {
            return Err(PitchControlError::InvalidPlayer { id });
        }
        Ok(Self(id))
    }

    pub fn is_valid(id: &str) -> bool {
        !id.is_empty() && !id.contains('_') && !id.chars().any(char::is_whitespace)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Column key for one of this player's fields (`x`, `y`, `vx`, `vy`)
    pub fn column(&self, team: Team, field: &str) -> String {
        format!("{}_{}_{}", team, self.0, field)
    }
}

impl From<u32> for PlayerId {
    fn from(number: u32) -> Self {
        Self(number.to_string())
    }
}

impl FromStr for PlayerId {
    type Err = PitchControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerId::new(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_parsing() {
        assert_eq!("Home".parse::<Team>().unwrap(), Team::Home);
        assert_eq!(" away ".parse::<Team>().unwrap(), Team::Away);
        let err = "Visitors".parse::<Team>().unwrap_err();
        assert!(matches!(err, PitchControlError::InvalidTeam { .. }));
    }

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::Home.opponent(), Team::Away);
        assert_eq!(Team::Away.opponent().opponent(), Team::Away);
    }

    #[test]
    fn test_player_id_validation() {
        assert_eq!(PlayerId::from(11).as_str(), "11");
        assert!(PlayerId::new("GK1").is_ok());
        assert!(matches!(PlayerId::new(""), Err(PitchControlError::InvalidPlayer { .. })));
        assert!(PlayerId::new("11_x").is_err());
        assert!(PlayerId::new("1 1").is_err());
    }

    #[test]
    fn test_player_column_key() {
        let id = PlayerId::from(23);
        assert_eq!(id.column(Team::Away, "vx"), "Away_23_vx");
    }
}
