//! Surface → square metres.
//!
//! Every cell is weighted equally: no notion of "valuable" space here.

use crate::config::PitchConfig;
use crate::model::field::Surface;
use crate::tracking::Team;

/// Area (m²) a surface represents: `length · width · Σcells / cell_count`.
///
/// For a control surface this is the space the attacking team occupies;
/// for a difference surface, the space that changed hands.
pub fn space_occupied(surface: &Surface, pitch: &PitchConfig) -> f64 {
    if surface.is_empty() {
        return 0.0;
    }
    pitch.area() * surface.sum() / surface.len() as f64
}

/// Express a baseline-minus-perturbed area from the analysed team's side.
pub fn space_from_team_view(space_change: f64, analysed_team: Team, possession: Team) -> f64 {
    if analysed_team == possession {
        space_change
    } else {
        -space_change
    }
}
