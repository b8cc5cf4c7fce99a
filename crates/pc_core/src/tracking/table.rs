//! Match-long tracking tables
//!
//! One table per team, row-indexed by frame. Upstream data arrives as named
//! columns (`Time [s]`, `ball_x`, `ball_y`, `Home_11_x`, `Home_11_vx`, ...)
//! with NaN marking players that are not on the pitch; here absence is an
//! explicit `None` per player per frame.

use fxhash::FxHashMap;
use std::collections::BTreeMap;
use tracing::debug;

use super::snapshot::{PlayerEntry, Snapshot};
use super::{PlayerId, Team};
use crate::error::{PitchControlError, Result};
use crate::model::kinematics::{Kinematics, Point};

pub const TIME_COLUMN: &str = "Time [s]";
pub const BALL_X_COLUMN: &str = "ball_x";
pub const BALL_Y_COLUMN: &str = "ball_y";

/// Tracking data of one team over a whole match.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackingTable {
    team: Team,
    /// Frame ids, strictly increasing
    frames: Vec<u32>,
    /// Match clock (s) per row
    times: Vec<f64>,
    ball: Vec<Option<Point>>,
    players: BTreeMap<PlayerId, Vec<Option<Kinematics>>>,
    goalkeeper: Option<PlayerId>,
}

impl TrackingTable {
    /// Empty table (no ball, no players) over the given frames.
    pub fn new(team: Team, frames: Vec<u32>, times: Vec<f64>) -> Result<Self> {
        if times.len() != frames.len() {
            return Err(PitchControlError::ColumnLength {
                column: TIME_COLUMN.to_string(),
                expected: frames.len(),
                found: times.len(),
            });
        }
        if frames.windows(2).any(|w| w[0] >= w[1]) {
            return Err(PitchControlError::InvalidParameter(
                "frame index must be strictly increasing".to_string(),
            ));
        }

        let rows = frames.len();
        Ok(Self {
            team,
            frames,
            times,
            ball: vec![None; rows],
            players: BTreeMap::new(),
            goalkeeper: None,
        })
    }

    /// Build a table from upstream named columns.
    ///
    /// A player sample is present only if all four of its values are finite.
    /// Columns of the other team or with unknown suffixes are skipped.
    pub fn from_columns(team: Team, frames: Vec<u32>, columns: &[(&str, &[f64])]) -> Result<Self> {
        let rows = frames.len();
        for &(name, values) in columns {
            if values.len() != rows {
                return Err(PitchControlError::ColumnLength {
                    column: name.to_string(),
                    expected: rows,
                    found: values.len(),
                });
            }
        }

        let lookup: FxHashMap<&str, &[f64]> = columns.iter().copied().collect();
        let times = lookup
            .get(TIME_COLUMN)
            .map(|v| v.to_vec())
            .ok_or_else(|| {
                PitchControlError::InvalidParameter(format!("missing column {:?}", TIME_COLUMN))
            })?;

        let mut table = Self::new(team, frames, times)?;

        if let (Some(bx), Some(by)) = (lookup.get(BALL_X_COLUMN), lookup.get(BALL_Y_COLUMN)) {
            table.ball = bx
                .iter()
                .zip(by.iter())
                .map(|(&x, &y)| {
                    let p = Point::new(x, y);
                    p.is_finite().then_some(p)
                })
                .collect();
        }

        // id → [x, y, vx, vy]
        let prefix = format!("{}_", team);
        let mut grouped: FxHashMap<&str, [Option<&[f64]>; 4]> = FxHashMap::default();
        for &(name, values) in columns {
            let Some(rest) = name.strip_prefix(prefix.as_str()) else {
                continue;
            };
            let Some((id, field)) = rest.rsplit_once('_') else {
                debug!(column = %name, "skipping column without field suffix");
                continue;
            };
            let slot = match field {
                "x" => 0,
                "y" => 1,
                "vx" => 2,
                "vy" => 3,
                _ => {
                    debug!(column = %name, "skipping unrecognised player column");
                    continue;
                }
            };
            grouped.entry(id).or_default()[slot] = Some(values);
        }

        for (id, fields) in grouped {
            let player = PlayerId::new(id)?;
            let [Some(x), Some(y), vx, vy] = fields else {
                debug!(player = %player, "skipping player without position columns");
                continue;
            };
            let samples = (0..rows)
                .map(|row| {
                    let position = Point::new(x[row], y[row]);
                    let velocity = Point::new(
                        vx.map_or(f64::NAN, |v| v[row]),
                        vy.map_or(f64::NAN, |v| v[row]),
                    );
                    (position.is_finite() && velocity.is_finite())
                        .then(|| Kinematics::new(position, velocity))
                })
                .collect();
            table.players.insert(player, samples);
        }

        debug!(team = %team, rows, players = table.players.len(), "tracking table loaded");
        Ok(table)
    }

    pub fn with_ball(mut self, ball: Vec<Option<Point>>) -> Result<Self> {
        if ball.len() != self.frames.len() {
            return Err(PitchControlError::ColumnLength {
                column: BALL_X_COLUMN.to_string(),
                expected: self.frames.len(),
                found: ball.len(),
            });
        }
        self.ball = ball;
        Ok(self)
    }

    pub fn insert_player(&mut self, id: PlayerId, samples: Vec<Option<Kinematics>>) -> Result<()> {
        if samples.len() != self.frames.len() {
            return Err(PitchControlError::ColumnLength {
                column: id.column(self.team, "x"),
                expected: self.frames.len(),
                found: samples.len(),
            });
        }
        self.players.insert(id, samples);
        Ok(())
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn frames(&self) -> &[u32] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &PlayerId> {
        self.players.keys()
    }

    pub fn row_of(&self, frame: u32) -> Result<usize> {
        self.frames
            .binary_search(&frame)
            .map_err(|_| PitchControlError::FrameNotFound { frame })
    }

    pub fn time_at(&self, frame: u32) -> Result<f64> {
        Ok(self.times[self.row_of(frame)?])
    }

    pub fn ball_at(&self, frame: u32) -> Result<Option<Point>> {
        Ok(self.ball[self.row_of(frame)?])
    }

    /// A player's state at `frame`; `None` if off the pitch or not in this table.
    pub fn player_at(&self, id: &PlayerId, frame: u32) -> Result<Option<Kinematics>> {
        let row = self.row_of(frame)?;
        Ok(self.players.get(id).and_then(|samples| samples[row]))
    }

    /// Ids of players with a defined position and velocity at `frame`
    pub fn players_on_pitch(&self, frame: u32) -> Result<Vec<PlayerId>> {
        let row = self.row_of(frame)?;
        Ok(self
            .players
            .iter()
            .filter(|(_, samples)| samples[row].is_some())
            .map(|(id, _)| id.clone())
            .collect())
    }

    pub fn goalkeeper(&self) -> Option<&PlayerId> {
        self.goalkeeper.as_ref()
    }

    pub fn set_goalkeeper(&mut self, id: PlayerId) -> Result<()> {
        if !self.players.contains_key(&id) {
            return Err(PitchControlError::InvalidPlayer { id: id.to_string() });
        }
        self.goalkeeper = Some(id);
        Ok(())
    }

    /// Goalkeeper = the player deepest in his own half at the first frame
    /// (largest |x| at kick-off).
    pub fn detect_goalkeeper(&mut self) -> Option<&PlayerId> {
        let keeper = self
            .players
            .iter()
            .filter_map(|(id, samples)| {
                samples.first().copied().flatten().map(|s| (id, s.position.x.abs()))
            })
            .fold(None::<(&PlayerId, f64)>, |best, (id, depth)| match best {
                Some((_, best_depth)) if best_depth >= depth => best,
                _ => Some((id, depth)),
            })
            .map(|(id, _)| id.clone());

        self.goalkeeper = keeper;
        self.goalkeeper.as_ref()
    }

    /// This team's players at `frame`, absent ones included as `state: None`.
    pub fn entries_at(&self, frame: u32) -> Result<Vec<PlayerEntry>> {
        let row = self.row_of(frame)?;
        Ok(self
            .players
            .iter()
            .map(|(id, samples)| PlayerEntry {
                id: id.clone(),
                state: samples[row],
                is_goalkeeper: self.goalkeeper.as_ref() == Some(id),
            })
            .collect())
    }
}

/// Home and away tables over the same frame index.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchTracking {
    home: TrackingTable,
    away: TrackingTable,
}

impl MatchTracking {
    pub fn new(home: TrackingTable, away: TrackingTable) -> Result<Self> {
        if home.team() != Team::Home {
            return Err(PitchControlError::InvalidTeam {
                team: format!("{} (home table)", home.team()),
            });
        }
        if away.team() != Team::Away {
            return Err(PitchControlError::InvalidTeam {
                team: format!("{} (away table)", away.team()),
            });
        }
        if home.frames() != away.frames() {
            return Err(PitchControlError::MismatchedFrameIndex {
                home: home.len(),
                away: away.len(),
            });
        }
        Ok(Self { home, away })
    }

    pub fn table(&self, team: Team) -> &TrackingTable {
        match team {
            Team::Home => &self.home,
            Team::Away => &self.away,
        }
    }

    pub fn frames(&self) -> &[u32] {
        self.home.frames()
    }

    /// Ball position at `frame`, taken from whichever table carries it.
    pub fn ball_at(&self, frame: u32) -> Result<Option<Point>> {
        Ok(self.home.ball_at(frame)?.or(self.away.ball_at(frame)?))
    }

    /// Slice one frame with `attacking` as the side in possession.
    pub fn snapshot(&self, frame: u32, attacking: Team) -> Result<Snapshot> {
        Ok(Snapshot {
            frame,
            attacking_team: attacking,
            attacking: self.table(attacking).entries_at(frame)?,
            defending: self.table(attacking.opponent()).entries_at(frame)?,
            ball: self.ball_at(frame)?,
        })
    }
}
