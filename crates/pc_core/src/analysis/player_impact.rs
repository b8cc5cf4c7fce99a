//! Player impact analysis
//!
//! Isolates one player's contribution to pitch control at an event: compare
//! the actual surface against the surface after changing that player's
//! velocity, location or presence.
//!
//! # 사용법
//! ```ignore
//! let analyzer = PlayerImpactAnalyzer::new(&tracking, params, &events, 820, Team::Home, "11", pitch)?;
//! let gained = analyzer.space_created(&Perturbation::Movement { vx: 0.0, vy: 0.0 })?;
//! let occupied = analyzer.space_created(&Perturbation::Presence)?;
//! ```
//!
//! The session state is an immutable `AnalysisContext`; every operation is a
//! free function over it, so one context can serve any number of concurrent
//! queries.

use tracing::{debug, warn};

use super::perturbation::{Perturbation, PerturbationArgs};
use super::space::{space_from_team_view, space_occupied};
use crate::config::{ModelParams, PitchConfig};
use crate::error::{PitchControlError, Result};
use crate::model::field::{
    generate_pitch_control_for_event, generate_pitch_control_for_snapshot, PitchControlField,
    Surface,
};
use crate::model::kinematics::Kinematics;
use crate::tracking::{EventTable, MatchTracking, PlayerId, PlayerOverride, Team};

/// Everything an analysis session needs, fixed at construction.
#[derive(Debug, Clone)]
pub struct AnalysisContext<'a> {
    pub tracking: &'a MatchTracking,
    pub events: &'a EventTable,
    pub params: ModelParams,
    pub pitch: PitchConfig,
    pub event_id: u32,
    /// Start frame of the event
    pub frame: u32,
    /// Team in possession at the event
    pub possession: Team,
    /// Team of the analysed player
    pub team: Team,
    /// Analysed player id, as supplied by the caller
    pub player: String,
    /// Surface of the event as it happened
    pub baseline: PitchControlField,
}

// ============================================================
// Context operations
// ============================================================

/// Reject requests that cannot be answered at the event frame.
pub fn validate_inputs(ctx: &AnalysisContext<'_>) -> Result<()> {
    current_state(ctx).map(|_| ())
}

/// Validated id and current state of the analysed player.
fn current_state(ctx: &AnalysisContext<'_>) -> Result<(PlayerId, Kinematics)> {
    let player = PlayerId::new(ctx.player.as_str())?;

    let table = ctx.tracking.table(ctx.team);
    if table.team() != ctx.team {
        return Err(PitchControlError::InvalidTeam { team: ctx.team.to_string() });
    }

    match table.player_at(&player, ctx.frame)? {
        Some(state) => Ok((player, state)),
        None => Err(PitchControlError::PlayerNotOnPitch {
            team: ctx.team,
            player: ctx.player.clone(),
            frame: ctx.frame,
        }),
    }
}

/// Players of the analysed team on the pitch at the event frame.
pub fn players_on_pitch(ctx: &AnalysisContext<'_>) -> Result<Vec<PlayerId>> {
    ctx.tracking.table(ctx.team).players_on_pitch(ctx.frame)
}

/// Surface after applying `perturbation` to the analysed player.
pub fn perturbed_field(
    ctx: &AnalysisContext<'_>,
    perturbation: &Perturbation,
) -> Result<PitchControlField> {
    let (player, current) = current_state(ctx)?;

    if perturbation.is_stationary_relocation() {
        warn!(
            team = %ctx.team,
            player = %player,
            "no new velocity given for relocated player; assuming the player is stationary at the new location"
        );
    }

    let edit = PlayerOverride { team: ctx.team, player, state: perturbation.apply_to(current) };
    let snapshot = ctx.tracking.snapshot(ctx.frame, ctx.possession)?.with_override(&edit);

    debug!(
        event_id = ctx.event_id,
        mode = %perturbation.mode(),
        "regenerating pitch control with perturbed player"
    );
    generate_pitch_control_for_snapshot(&snapshot, &ctx.params, &ctx.pitch)
}

/// Baseline minus perturbed surface (w.r.t. the team in possession).
pub fn surface_difference(
    ctx: &AnalysisContext<'_>,
    perturbation: &Perturbation,
) -> Result<PitchControlField> {
    let perturbed = perturbed_field(ctx, perturbation)?;
    Ok(PitchControlField {
        surface: ctx.baseline.surface.difference(&perturbed.surface),
        xgrid: perturbed.xgrid,
        ygrid: perturbed.ygrid,
    })
}

/// Space (m²) the analysed player's team gains through the player's actual
/// state compared with the perturbed one. Negative = space lost.
pub fn space_created(ctx: &AnalysisContext<'_>, perturbation: &Perturbation) -> Result<f64> {
    let difference = surface_difference(ctx, perturbation)?;
    let change = space_occupied(&difference.surface, &ctx.pitch);
    Ok(space_from_team_view(change, ctx.team, ctx.possession))
}

// ============================================================
// Session wrapper
// ============================================================

/// Analysis session for one player at one event.
///
/// Construction computes the baseline surface once; every query afterwards
/// works on its own copy of the event frame and leaves the session untouched.
#[derive(Debug, Clone)]
pub struct PlayerImpactAnalyzer<'a> {
    ctx: AnalysisContext<'a>,
}

impl<'a> PlayerImpactAnalyzer<'a> {
    pub fn new(
        tracking: &'a MatchTracking,
        params: ModelParams,
        events: &'a EventTable,
        event_id: u32,
        team: Team,
        player: impl Into<String>,
        pitch: PitchConfig,
    ) -> Result<Self> {
        let event = events.get(event_id)?;
        let baseline = generate_pitch_control_for_event(event_id, events, tracking, &params, &pitch)?;
        let player = player.into();

        debug!(
            event_id,
            frame = event.start_frame,
            possession = %event.team,
            team = %team,
            player = %player,
            "player impact session ready"
        );

        Ok(Self {
            ctx: AnalysisContext {
                tracking,
                events,
                params,
                pitch,
                event_id,
                frame: event.start_frame,
                possession: event.team,
                team,
                player,
                baseline,
            },
        })
    }

    /// Same as `new`, with the team given by name (`"Home"` / `"Away"`).
    pub fn from_names(
        tracking: &'a MatchTracking,
        params: ModelParams,
        events: &'a EventTable,
        event_id: u32,
        team: &str,
        player: impl Into<String>,
        pitch: PitchConfig,
    ) -> Result<Self> {
        let team = team.parse::<Team>()?;
        Self::new(tracking, params, events, event_id, team, player, pitch)
    }

    pub fn context(&self) -> &AnalysisContext<'a> {
        &self.ctx
    }

    pub fn baseline(&self) -> &PitchControlField {
        &self.ctx.baseline
    }

    pub fn validate_inputs(&self) -> Result<()> {
        validate_inputs(&self.ctx)
    }

    pub fn players_on_pitch(&self) -> Result<Vec<PlayerId>> {
        players_on_pitch(&self.ctx)
    }

    /// What if the player had moved with velocity (vx, vy)?
    pub fn replace_velocity(&self, vx: f64, vy: f64) -> Result<PitchControlField> {
        perturbed_field(&self.ctx, &Perturbation::Movement { vx, vy })
    }

    /// What if the player had not been on the pitch?
    pub fn remove_player(&self) -> Result<PitchControlField> {
        perturbed_field(&self.ctx, &Perturbation::Presence)
    }

    /// What if the player had stood (dx, dy) away, optionally moving at (vx, vy)?
    pub fn relocate_player(
        &self,
        dx: f64,
        dy: f64,
        replace_velocity: bool,
        vx: f64,
        vy: f64,
    ) -> Result<PitchControlField> {
        perturbed_field(&self.ctx, &Perturbation::Location { dx, dy, replace_velocity, vx, vy })
    }

    pub fn surface_difference(&self, perturbation: &Perturbation) -> Result<PitchControlField> {
        surface_difference(&self.ctx, perturbation)
    }

    /// Mode-string dispatch: `movement`, `presence` or `location`.
    pub fn surface_difference_by_mode(
        &self,
        mode: &str,
        args: &PerturbationArgs,
    ) -> Result<PitchControlField> {
        let perturbation = Perturbation::from_mode(mode, args)?;
        self.surface_difference(&perturbation)
    }

    /// Square metres represented by `surface` on this session's pitch.
    pub fn space_occupied(&self, surface: &Surface) -> f64 {
        space_occupied(surface, &self.ctx.pitch)
    }

    /// Space the team in possession occupies at the event.
    pub fn space_occupied_baseline(&self) -> f64 {
        self.space_occupied(&self.ctx.baseline.surface)
    }

    pub fn space_created(&self, perturbation: &Perturbation) -> Result<f64> {
        space_created(&self.ctx, perturbation)
    }

    pub fn space_created_by_mode(&self, mode: &str, args: &PerturbationArgs) -> Result<f64> {
        let perturbation = Perturbation::from_mode(mode, args)?;
        self.space_created(&perturbation)
    }
}
