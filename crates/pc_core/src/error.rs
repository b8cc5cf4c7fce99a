use thiserror::Error;

use crate::tracking::Team;

#[derive(Error, Debug)]
pub enum PitchControlError {
    #[error("Invalid player id: {id:?} (must be a non-empty integer or string without '_' or whitespace)")]
    InvalidPlayer { id: String },

    #[error("Invalid team: {team:?} (must be one of Home, Away)")]
    InvalidTeam { team: String },

    #[error("Player {player} is either not on the {team} team or was not on the pitch at frame {frame}")]
    PlayerNotOnPitch { team: Team, player: String, frame: u32 },

    #[error("Invalid perturbation mode: {mode:?} (must be movement, presence or location)")]
    InvalidMode { mode: String },

    #[error("Home and away tracking tables have different frame indices: home {home} rows, away {away} rows")]
    MismatchedFrameIndex { home: usize, away: usize },

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: u32 },

    #[error("Frame not found in tracking data: {frame}")]
    FrameNotFound { frame: u32 },

    #[error("Column {column} has {found} rows, expected {expected}")]
    ColumnLength { column: String, expected: usize, found: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl PitchControlError {
    /// Errors the caller can fix by changing the analysis request
    /// (as opposed to broken tracking or configuration input).
    pub fn is_input_error(&self) -> bool {
        match self {
            PitchControlError::InvalidPlayer { .. } => true,
            PitchControlError::InvalidTeam { .. } => true,
            PitchControlError::PlayerNotOnPitch { .. } => true,
            PitchControlError::InvalidMode { .. } => true,
            PitchControlError::EventNotFound { .. } => true,
            PitchControlError::FrameNotFound { .. } => true,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PitchControlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_classification() {
        assert!(PitchControlError::InvalidMode { mode: "teleport".into() }.is_input_error());
        assert!(!PitchControlError::MismatchedFrameIndex { home: 3, away: 4 }.is_input_error());
        assert!(!PitchControlError::InvalidParameter("int_dt".into()).is_input_error());
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = PitchControlError::PlayerNotOnPitch {
            team: Team::Away,
            player: "23".into(),
            frame: 812,
        };
        let msg = err.to_string();
        assert!(msg.contains("23"));
        assert!(msg.contains("Away"));
        assert!(msg.contains("812"));
    }
}
