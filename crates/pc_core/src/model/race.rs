//! Arrival-time race model
//!
//! Each side's chance of controlling a point grows like a Poisson process:
//! a player who has arrived (logistic in his earliest arrival time) takes
//! control at rate λ. Both sides draw from the same remaining probability,
//! so whoever arrives first and controls fastest wins the point.
//!
//! # 핵심 규칙
//! - A side ruled out by the time-to-control veto gets exactly 0
//! - Only players close to their side's fastest arrival take part
//! - A point nobody reaches within the horizon is undecided (0.5)

use tracing::trace;

use super::constants::control::UNDECIDED;
use super::kinematics::probability_intercept;
use crate::config::ModelParams;

/// One player's entry in the race for a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceEntrant {
    /// Earliest arrival (s); infinite for players off the pitch
    pub time_to_reach: f64,
    /// Control rate once arrived (1/s)
    pub lambda: f64,
}

impl RaceEntrant {
    pub fn new(time_to_reach: f64, lambda: f64) -> Self {
        Self { time_to_reach, lambda }
    }
}

/// Race result at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaceOutcome {
    /// Probability the attacking side controls the point, in [0, 1]
    pub attacking: f64,
    /// Un-normalised attacking + defending mass at the stopping step.
    /// 1.0 for points decided without integrating.
    pub total_mass: f64,
}

impl RaceOutcome {
    fn decided(attacking: f64) -> Self {
        Self { attacking, total_mass: 1.0 }
    }

    #[inline]
    pub fn defending(&self) -> f64 {
        1.0 - self.attacking
    }
}

/// Attacking control probability from bare arrival times, with the outfield
/// rates (`lambda_att`, `lambda_def`) for every player.
pub fn attacking_control_probability(
    attacking_arrival_times: &[f64],
    defending_arrival_times: &[f64],
    ball_travel_time: f64,
    params: &ModelParams,
) -> f64 {
    let attackers: Vec<RaceEntrant> = attacking_arrival_times
        .iter()
        .map(|&t| RaceEntrant::new(t, params.lambda_att))
        .collect();
    let defenders: Vec<RaceEntrant> = defending_arrival_times
        .iter()
        .map(|&t| RaceEntrant::new(t, params.lambda_def()))
        .collect();

    race(&attackers, &defenders, ball_travel_time, params).attacking
}

/// Fastest arrival on one side (∞ for an empty side)
fn fastest(entrants: &[RaceEntrant]) -> f64 {
    entrants.iter().map(|e| e.time_to_reach).fold(f64::INFINITY, f64::min)
}

/// Run the race for one point.
pub fn race(
    attackers: &[RaceEntrant],
    defenders: &[RaceEntrant],
    ball_travel_time: f64,
    params: &ModelParams,
) -> RaceOutcome {
    let tau_att = fastest(attackers);
    let tau_def = fastest(defenders);

    // 아무도 시간 내에 도달 못함 → 미결정
    let horizon = ball_travel_time + params.max_int_time;
    if !(tau_att <= horizon) && !(tau_def <= horizon) {
        return RaceOutcome::decided(UNDECIDED);
    }

    let ttc_att = params.time_to_control_att();
    let ttc_def = params.time_to_control_def();

    // Veto: one side is so much later that the other has all but surely
    // controlled the ball before it arrives.
    if tau_att - ball_travel_time.max(tau_def) >= ttc_def {
        return RaceOutcome::decided(0.0);
    }
    if tau_def - ball_travel_time.max(tau_att) >= ttc_att {
        return RaceOutcome::decided(1.0);
    }

    let attackers: Vec<RaceEntrant> = attackers
        .iter()
        .copied()
        .filter(|e| e.time_to_reach - tau_att < ttc_att)
        .collect();
    let defenders: Vec<RaceEntrant> = defenders
        .iter()
        .copied()
        .filter(|e| e.time_to_reach - tau_def < ttc_def)
        .collect();

    let mut att_mass = vec![0.0; attackers.len()];
    let mut def_mass = vec![0.0; defenders.len()];
    let mut att_total = 0.0;
    let mut def_total = 0.0;

    let dt = params.int_dt;
    let steps = params.max_integration_steps();
    let mut converged = false;

    for step in 0..steps {
        let t = ball_travel_time + step as f64 * dt;
        let remaining = 1.0 - att_total - def_total;

        let mut att_now = 0.0;
        for (mass, entrant) in att_mass.iter_mut().zip(&attackers) {
            let rate = remaining * probability_intercept(t, entrant.time_to_reach, params) * entrant.lambda;
            *mass += rate.max(0.0) * dt;
            att_now += *mass;
        }

        let mut def_now = 0.0;
        for (mass, entrant) in def_mass.iter_mut().zip(&defenders) {
            let rate = remaining * probability_intercept(t, entrant.time_to_reach, params) * entrant.lambda;
            *mass += rate.max(0.0) * dt;
            def_now += *mass;
        }

        att_total = att_now;
        def_total = def_now;

        if 1.0 - (att_total + def_total) <= params.model_converge_tol {
            converged = true;
            break;
        }
    }

    let total_mass = att_total + def_total;
    if !converged {
        trace!(total_mass, steps, "race integration did not converge within horizon");
    }

    if total_mass > 0.0 {
        RaceOutcome { attacking: (att_total / total_mass).clamp(0.0, 1.0), total_mass }
    } else {
        RaceOutcome { attacking: UNDECIDED, total_mass }
    }
}
