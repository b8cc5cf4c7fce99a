//! One frame of tracking data, split by possession.
//!
//! Snapshots are derived per call from the match-long tables and thrown away
//! afterwards. A hypothetical edit to one player is a `PlayerOverride` applied
//! to that per-call snapshot; the tables themselves are never touched.

use serde::{Deserialize, Serialize};

use super::{PlayerId, Team};
use crate::model::kinematics::{Kinematics, Point};

/// One player at one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub id: PlayerId,
    /// `None` = not on the pitch
    pub state: Option<Kinematics>,
    pub is_goalkeeper: bool,
}

impl PlayerEntry {
    pub fn on_pitch(id: impl Into<PlayerId>, state: Kinematics) -> Self {
        Self { id: id.into(), state: Some(state), is_goalkeeper: false }
    }

    pub fn goalkeeper(mut self) -> Self {
        self.is_goalkeeper = true;
        self
    }

    pub fn is_on_pitch(&self) -> bool {
        self.state.is_some()
    }
}

/// All players and the ball at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub frame: u32,
    /// Team in possession
    pub attacking_team: Team,
    pub attacking: Vec<PlayerEntry>,
    pub defending: Vec<PlayerEntry>,
    pub ball: Option<Point>,
}

impl Snapshot {
    pub fn side(&self, team: Team) -> &[PlayerEntry] {
        if team == self.attacking_team {
            &self.attacking
        } else {
            &self.defending
        }
    }

    fn side_mut(&mut self, team: Team) -> &mut Vec<PlayerEntry> {
        if team == self.attacking_team {
            &mut self.attacking
        } else {
            &mut self.defending
        }
    }

    pub fn player(&self, team: Team, id: &PlayerId) -> Option<&PlayerEntry> {
        self.side(team).iter().find(|entry| &entry.id == id)
    }

    /// Apply an override in place. A player unknown to this frame is added.
    pub fn apply(&mut self, edit: &PlayerOverride) {
        let side = self.side_mut(edit.team);
        match side.iter_mut().find(|entry| entry.id == edit.player) {
            Some(entry) => entry.state = edit.state,
            None => side.push(PlayerEntry {
                id: edit.player.clone(),
                state: edit.state,
                is_goalkeeper: false,
            }),
        }
    }

    pub fn with_override(mut self, edit: &PlayerOverride) -> Self {
        self.apply(edit);
        self
    }
}

/// Replacement state for one player at the analysed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerOverride {
    pub team: Team,
    pub player: PlayerId,
    /// `None` removes the player from the pitch
    pub state: Option<Kinematics>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            frame: 10,
            attacking_team: Team::Away,
            attacking: vec![PlayerEntry::on_pitch(9u32, Kinematics::at(Point::new(5.0, 0.0)))],
            defending: vec![
                PlayerEntry::on_pitch(1u32, Kinematics::at(Point::new(-50.0, 0.0))).goalkeeper(),
                PlayerEntry::on_pitch(4u32, Kinematics::at(Point::new(-5.0, 2.0))),
            ],
            ball: Some(Point::ORIGIN),
        }
    }

    #[test]
    fn test_side_lookup_follows_possession() {
        let s = snapshot();
        assert_eq!(s.side(Team::Away).len(), 1);
        assert_eq!(s.side(Team::Home).len(), 2);
        assert!(s.player(Team::Home, &PlayerId::from(1)).unwrap().is_goalkeeper);
        assert!(s.player(Team::Away, &PlayerId::from(1)).is_none());
    }

    #[test]
    fn test_override_replaces_state_without_touching_original() {
        let base = snapshot();
        let edit = PlayerOverride { team: Team::Home, player: PlayerId::from(4), state: None };
        let edited = base.clone().with_override(&edit);

        assert!(!edited.player(Team::Home, &PlayerId::from(4)).unwrap().is_on_pitch());
        assert!(base.player(Team::Home, &PlayerId::from(4)).unwrap().is_on_pitch());
        // Goalkeeper flag untouched
        assert!(edited.player(Team::Home, &PlayerId::from(1)).unwrap().is_goalkeeper);
    }

    #[test]
    fn test_override_adds_unknown_player() {
        let edit = PlayerOverride {
            team: Team::Away,
            player: PlayerId::from(17),
            state: Some(Kinematics::at(Point::new(20.0, 20.0))),
        };
        let edited = snapshot().with_override(&edit);
        assert_eq!(edited.attacking.len(), 2);
    }
}
