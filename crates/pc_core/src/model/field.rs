//! Pitch control field generator
//!
//! Samples a regular grid over the pitch and runs the race model at every
//! cell centre. Cells are independent, so they are fanned out with rayon and
//! collected back in grid order; the result is identical to a sequential run.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::constants::{control::UNDECIDED, integration::CHECKSUM_TOL};
use super::kinematics::{ball_travel_time, time_to_reach, Point};
use super::race::{race, RaceEntrant, RaceOutcome};
use crate::config::{ModelParams, PitchConfig};
use crate::error::Result;
use crate::tracking::{EventTable, MatchTracking, PlayerEntry, Snapshot, Team};

// ============================================================
// Grid
// ============================================================

/// Cell-centre coordinates. Cell (i, j) ↔ (x[i], y[j]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub xgrid: Vec<f64>,
    pub ygrid: Vec<f64>,
}

impl Grid {
    pub fn new(pitch: &PitchConfig) -> Self {
        let nx = pitch.n_grid_cells_x;
        let ny = pitch.n_grid_cells_y();
        let dx = pitch.field_length / nx as f64;
        let dy = pitch.field_width / ny as f64;

        let xgrid = (0..nx)
            .map(|i| i as f64 * dx - pitch.field_length / 2.0 + dx / 2.0)
            .collect();
        let ygrid = (0..ny)
            .map(|j| j as f64 * dy - pitch.field_width / 2.0 + dy / 2.0)
            .collect();
        Self { xgrid, ygrid }
    }

    #[inline]
    pub fn nx(&self) -> usize {
        self.xgrid.len()
    }

    #[inline]
    pub fn ny(&self) -> usize {
        self.ygrid.len()
    }

    pub fn cell_count(&self) -> usize {
        self.nx() * self.ny()
    }

    /// Centre of cell (i, j)
    #[inline]
    pub fn point(&self, i: usize, j: usize) -> Point {
        Point::new(self.xgrid[i], self.ygrid[j])
    }

    /// Index of the cell whose centre is closest to `p`
    pub fn nearest_cell(&self, p: Point) -> (usize, usize) {
        (nearest_index(&self.xgrid, p.x), nearest_index(&self.ygrid, p.y))
    }
}

fn nearest_index(samples: &[f64], value: f64) -> usize {
    samples
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |(best, best_dist), (i, &s)| {
            let dist = (s - value).abs();
            if dist < best_dist {
                (i, dist)
            } else {
                (best, best_dist)
            }
        })
        .0
}

// ============================================================
// Surface
// ============================================================

/// Per-cell values over a grid, stored row-major by y then x.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    nx: usize,
    ny: usize,
    values: Vec<f64>,
}

impl Surface {
    pub fn filled(nx: usize, ny: usize, value: f64) -> Self {
        Self { nx, ny, values: vec![value; nx * ny] }
    }

    pub fn zeros(nx: usize, ny: usize) -> Self {
        Self::filled(nx, ny, 0.0)
    }

    /// Value at cell (i, j): i along x (length), j along y (width)
    #[inline]
    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.nx + i]
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Defending team's surface (1 - attacking), computed on demand
    pub fn defending(&self) -> Surface {
        self.map(|v| 1.0 - v)
    }

    pub fn map(&self, f: impl Fn(f64) -> f64) -> Surface {
        Surface { nx: self.nx, ny: self.ny, values: self.values.iter().map(|&v| f(v)).collect() }
    }

    /// Elementwise `self - other`.
    ///
    /// # Panics
    /// If the shapes differ; surfaces from one grid always match.
    pub fn difference(&self, other: &Surface) -> Surface {
        assert_eq!(self.shape(), other.shape(), "surface shapes differ");
        Surface {
            nx: self.nx,
            ny: self.ny,
            values: self.values.iter().zip(&other.values).map(|(a, b)| a - b).collect(),
        }
    }

    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        if self.values.is_empty() {
            0.0
        } else {
            self.sum() / self.values.len() as f64
        }
    }

    pub fn min(&self) -> f64 {
        self.values.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Attacking-team control surface plus the grid it was sampled on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchControlField {
    pub surface: Surface,
    pub xgrid: Vec<f64>,
    pub ygrid: Vec<f64>,
}

impl PitchControlField {
    /// Control probability at the cell nearest to `p`
    pub fn value_near(&self, p: Point) -> f64 {
        let grid = Grid { xgrid: self.xgrid.clone(), ygrid: self.ygrid.clone() };
        let (i, j) = grid.nearest_cell(p);
        self.surface.at(i, j)
    }
}

// ============================================================
// Generator
// ============================================================

fn entrants(
    side: &[PlayerEntry],
    target: Point,
    params: &ModelParams,
    lambda: impl Fn(&PlayerEntry) -> f64,
) -> Vec<RaceEntrant> {
    side.iter()
        .filter(|entry| entry.is_on_pitch())
        .map(|entry| {
            RaceEntrant::new(time_to_reach(entry.state.as_ref(), target, params), lambda(entry))
        })
        .collect()
}

/// Race outcome at a single target point.
pub fn pitch_control_at_target(
    target: Point,
    snapshot: &Snapshot,
    params: &ModelParams,
) -> RaceOutcome {
    let ball_time = ball_travel_time(snapshot.ball, target, params);
    // 공이 시간 내에 도달할 수 없는 지점
    if ball_time > params.max_int_time {
        return RaceOutcome { attacking: UNDECIDED, total_mass: 1.0 };
    }

    let attackers = entrants(&snapshot.attacking, target, params, |_| params.lambda_att);
    let defenders = entrants(&snapshot.defending, target, params, |entry| {
        if entry.is_goalkeeper {
            params.lambda_gk()
        } else {
            params.lambda_def()
        }
    });

    race(&attackers, &defenders, ball_time, params)
}

/// Surface for one snapshot. Inputs are assumed validated.
fn surface_for_snapshot(snapshot: &Snapshot, params: &ModelParams, grid: &Grid) -> Surface {
    let nx = grid.nx();
    let outcomes: Vec<RaceOutcome> = (0..grid.cell_count())
        .into_par_iter()
        .map(|idx| pitch_control_at_target(grid.point(idx % nx, idx / nx), snapshot, params))
        .collect();

    // Checksum: un-normalised mass should cover (almost) the whole probability
    let mean_mass =
        outcomes.iter().map(|o| o.total_mass).sum::<f64>() / outcomes.len().max(1) as f64;
    if 1.0 - mean_mass > CHECKSUM_TOL.max(params.model_converge_tol) {
        warn!(
            frame = snapshot.frame,
            mean_mass,
            "pitch control checksum failed: integration did not converge over much of the pitch"
        );
    }

    Surface {
        nx,
        ny: grid.ny(),
        values: outcomes.into_iter().map(|o| o.attacking).collect(),
    }
}

/// Pitch control for an arbitrary snapshot (attacking side = `snapshot.attacking`).
pub fn generate_pitch_control_for_snapshot(
    snapshot: &Snapshot,
    params: &ModelParams,
    pitch: &PitchConfig,
) -> Result<PitchControlField> {
    params.validate()?;
    pitch.validate()?;

    let grid = Grid::new(pitch);
    debug!(
        frame = snapshot.frame,
        attacking = %snapshot.attacking_team,
        nx = grid.nx(),
        ny = grid.ny(),
        "generating pitch control surface"
    );
    let surface = surface_for_snapshot(snapshot, params, &grid);
    Ok(PitchControlField { surface, xgrid: grid.xgrid, ygrid: grid.ygrid })
}

/// Pitch control at a tracking frame with `attacking` in possession.
pub fn generate_pitch_control_for_frame(
    frame: u32,
    attacking: Team,
    tracking: &MatchTracking,
    params: &ModelParams,
    pitch: &PitchConfig,
) -> Result<PitchControlField> {
    let snapshot = tracking.snapshot(frame, attacking)?;
    generate_pitch_control_for_snapshot(&snapshot, params, pitch)
}

/// Pitch control at the start of an event; the team in possession attacks.
pub fn generate_pitch_control_for_event(
    event_id: u32,
    events: &EventTable,
    tracking: &MatchTracking,
    params: &ModelParams,
    pitch: &PitchConfig,
) -> Result<PitchControlField> {
    let event = events.get(event_id)?;
    generate_pitch_control_for_frame(event.start_frame, event.team, tracking, params, pitch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PitchControlError;
    use crate::model::kinematics::Kinematics;
    use crate::tracking::{Event, PlayerId, TrackingTable};

    fn pitch_2m() -> PitchConfig {
        // 106 / 53 = 2 m cells
        PitchConfig::default().with_grid_cells_x(53)
    }

    fn two_vs_one() -> Snapshot {
        Snapshot {
            frame: 1,
            attacking_team: Team::Home,
            attacking: vec![
                PlayerEntry::on_pitch(1u32, Kinematics::at(Point::new(-10.0, 0.0))),
                PlayerEntry::on_pitch(2u32, Kinematics::at(Point::new(10.0, 0.0))),
            ],
            defending: vec![PlayerEntry::on_pitch(3u32, Kinematics::at(Point::ORIGIN))],
            ball: Some(Point::ORIGIN),
        }
    }

    fn tracking_for(snapshot: &Snapshot) -> MatchTracking {
        let mut home = TrackingTable::new(Team::Home, vec![1], vec![0.0]).unwrap();
        let mut away = TrackingTable::new(Team::Away, vec![1], vec![0.0]).unwrap();
        for entry in snapshot.side(Team::Home) {
            home.insert_player(entry.id.clone(), vec![entry.state]).unwrap();
        }
        for entry in snapshot.side(Team::Away) {
            away.insert_player(entry.id.clone(), vec![entry.state]).unwrap();
        }
        let home = home.with_ball(vec![snapshot.ball]).unwrap();
        MatchTracking::new(home, away).unwrap()
    }

    #[test]
    fn test_grid_layout() {
        let grid = Grid::new(&PitchConfig::default());
        assert_eq!(grid.nx(), 50);
        assert_eq!(grid.ny(), 32);
        assert!((grid.xgrid[0] - (-51.94)).abs() < 1e-9);
        assert!((grid.ygrid[0] - (-32.9375)).abs() < 1e-9);
        // Symmetric about the centre spot
        assert!((grid.xgrid[0] + grid.xgrid[49]).abs() < 1e-9);
        assert!((grid.ygrid[0] + grid.ygrid[31]).abs() < 1e-9);
    }

    #[test]
    fn test_nearest_cell() {
        let grid = Grid::new(&pitch_2m());
        let (i, j) = grid.nearest_cell(Point::new(-10.0, 0.2));
        assert!((grid.xgrid[i] + 10.0).abs() < 1e-9);
        assert!((grid.ygrid[j] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_surface_access_and_reductions() {
        let mut s = Surface::zeros(3, 2);
        // row j = 1, column i = 2
        s.values[5] = 0.75;
        assert_eq!(s.at(2, 1), 0.75);
        assert_eq!(s.shape(), (3, 2));
        assert!((s.sum() - 0.75).abs() < 1e-12);
        assert!((s.defending().at(2, 1) - 0.25).abs() < 1e-12);
        assert_eq!(s.difference(&s).max(), 0.0);
    }

    #[test]
    fn test_two_attackers_one_defender() {
        let p = ModelParams::default();
        let field = generate_pitch_control_for_snapshot(&two_vs_one(), &p, &pitch_2m()).unwrap();

        // Attackers own their own spots
        assert!(field.value_near(Point::new(-10.0, 0.0)) > 0.9);
        assert!(field.value_near(Point::new(10.0, 0.0)) > 0.9);
        // The defender stands on the centre spot
        assert!(field.value_near(Point::ORIGIN) < 0.5);

        // Exactly half way between attacker and defender the contest is even
        let midway = pitch_control_at_target(Point::new(-5.0, 0.0), &two_vs_one(), &p).attacking;
        assert!((midway - 0.5).abs() < 0.05, "midway = {}", midway);
    }

    #[test]
    fn test_surface_is_probability_and_complement() {
        let p = ModelParams::default();
        let field = generate_pitch_control_for_snapshot(&two_vs_one(), &p, &pitch_2m()).unwrap();
        let defending = field.surface.defending();
        for (a, d) in field.surface.iter().zip(defending.iter()) {
            assert!((0.0..=1.0).contains(&a));
            assert!((a + d - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let p = ModelParams::default();
        let pitch = PitchConfig::default();
        let a = generate_pitch_control_for_snapshot(&two_vs_one(), &p, &pitch).unwrap();
        let b = generate_pitch_control_for_snapshot(&two_vs_one(), &p, &pitch).unwrap();
        let bits_a: Vec<u64> = a.surface.iter().map(f64::to_bits).collect();
        let bits_b: Vec<u64> = b.surface.iter().map(f64::to_bits).collect();
        assert_eq!(bits_a, bits_b);
    }

    #[test]
    fn test_absent_players_are_ignored() {
        let p = ModelParams::default();
        let pitch = PitchConfig::default().with_grid_cells_x(20);
        let base = generate_pitch_control_for_snapshot(&two_vs_one(), &p, &pitch).unwrap();

        let mut with_ghost = two_vs_one();
        with_ghost.defending.push(PlayerEntry {
            id: PlayerId::from(99),
            state: None,
            is_goalkeeper: false,
        });
        let ghost = generate_pitch_control_for_snapshot(&with_ghost, &p, &pitch).unwrap();
        assert_eq!(base.surface, ghost.surface);
    }

    #[test]
    fn test_empty_pitch_is_undecided() {
        let p = ModelParams::default();
        let snapshot = Snapshot {
            frame: 1,
            attacking_team: Team::Away,
            attacking: vec![],
            defending: vec![],
            ball: None,
        };
        let pitch = PitchConfig::default().with_grid_cells_x(10);
        let field = generate_pitch_control_for_snapshot(&snapshot, &p, &pitch).unwrap();
        assert!(field.surface.iter().all(|v| v == 0.5));
    }

    #[test]
    fn test_event_uses_team_in_possession() {
        let p = ModelParams::default();
        let pitch = PitchConfig::default().with_grid_cells_x(20);
        let snapshot = two_vs_one();
        let tracking = tracking_for(&snapshot);
        let events: EventTable = [(7, Event::new(1, Team::Home)), (8, Event::new(1, Team::Away))]
            .into_iter()
            .collect();

        let home_attack =
            generate_pitch_control_for_event(7, &events, &tracking, &p, &pitch).unwrap();
        let away_attack =
            generate_pitch_control_for_event(8, &events, &tracking, &p, &pitch).unwrap();
        let direct = generate_pitch_control_for_snapshot(&snapshot, &p, &pitch).unwrap();

        assert_eq!(home_attack.surface, direct.surface);
        for (h, a) in home_attack.surface.iter().zip(away_attack.surface.iter()) {
            assert!((h + a - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_invalid_inputs_fail_before_computing() {
        let pitch = PitchConfig::default();
        let bad = ModelParams { int_dt: 0.0, ..ModelParams::default() };
        assert!(generate_pitch_control_for_snapshot(&two_vs_one(), &bad, &pitch).is_err());

        let p = ModelParams::default();
        let tracking = tracking_for(&two_vs_one());
        let events = EventTable::new();
        let err = generate_pitch_control_for_event(1, &events, &tracking, &p, &pitch).unwrap_err();
        assert!(matches!(err, PitchControlError::EventNotFound { event_id: 1 }));

        let events: EventTable = [(1, Event::new(42, Team::Home))].into_iter().collect();
        let err = generate_pitch_control_for_event(1, &events, &tracking, &p, &pitch).unwrap_err();
        assert!(matches!(err, PitchControlError::FrameNotFound { frame: 42 }));
    }
}
