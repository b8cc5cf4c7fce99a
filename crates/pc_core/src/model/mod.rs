//! # Pitch Control Model
//!
//! - `kinematics` - time for a player or the ball to reach a point
//! - `race` - which side controls a point, given everyone's arrival times
//! - `field` - grid sampling and surface assembly

pub mod constants;
pub mod field;
pub mod kinematics;
pub mod race;

pub use field::{
    generate_pitch_control_for_event, generate_pitch_control_for_frame,
    generate_pitch_control_for_snapshot, pitch_control_at_target, Grid, PitchControlField,
    Surface,
};
pub use kinematics::{ball_travel_time, probability_intercept, time_to_reach, Kinematics, Point};
pub use race::{attacking_control_probability, race, RaceEntrant, RaceOutcome};
