//! # pc_core - Pitch Control Model
//!
//! Probabilistic pitch control for football tracking data: for every point on
//! the pitch, the probability that the team in possession would control a
//! ball sent there.
//!
//! ## Features
//! - Arrival-time race model (logistic intercept, time-integrated control)
//! - Whole-pitch surfaces, generated in parallel with identical results
//! - Player impact analysis (velocity, presence and location counterfactuals)
//! - Space occupied / created in square metres

// Model entry points take tracking, params and pitch together
#![allow(clippy::too_many_arguments)]
#![allow(clippy::doc_lazy_continuation)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod tracking;

// Re-export main API
pub use analysis::{Perturbation, PerturbationArgs, PerturbationMode, PlayerImpactAnalyzer};
pub use config::{ModelParams, PitchConfig};
pub use error::{PitchControlError, Result};
pub use model::{
    generate_pitch_control_for_event, generate_pitch_control_for_frame,
    generate_pitch_control_for_snapshot, pitch_control_at_target, PitchControlField, Surface,
};
pub use tracking::{Event, EventTable, MatchTracking, PlayerId, Team, TrackingTable};
