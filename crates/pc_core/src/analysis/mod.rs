//! # Player Impact Analysis
//!
//! Counterfactual pitch control: how much space does a player create or
//! occupy at an event?
//!
//! - `perturbation` - hypothetical edits to one player (movement, presence, location)
//! - `player_impact` - analysis sessions over one player at one event
//! - `space` - surfaces converted to square metres

pub mod perturbation;
pub mod player_impact;
pub mod space;

pub use perturbation::{Perturbation, PerturbationArgs, PerturbationMode};
pub use player_impact::{AnalysisContext, PlayerImpactAnalyzer};
pub use space::{space_from_team_view, space_occupied};
