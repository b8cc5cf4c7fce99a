//! Pitch dimensions and grid resolution

use serde::{Deserialize, Serialize};

use crate::error::{PitchControlError, Result};
use crate::model::constants::pitch;

/// 피치 크기 + 그리드 해상도
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    /// Length including border (m) (기본: 106)
    pub field_length: f64,
    /// Width including border (m) (기본: 68)
    pub field_width: f64,
    /// Cells along the length; the y count follows from the aspect ratio (기본: 50)
    pub n_grid_cells_x: usize,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            field_length: pitch::LENGTH_M,
            field_width: pitch::WIDTH_M,
            n_grid_cells_x: pitch::DEFAULT_GRID_CELLS_X,
        }
    }
}

impl PitchConfig {
    pub fn with_grid_cells_x(mut self, n_grid_cells_x: usize) -> Self {
        self.n_grid_cells_x = n_grid_cells_x;
        self
    }

    /// Cells across the width, keeping cells roughly square.
    pub fn n_grid_cells_y(&self) -> usize {
        let n = (self.n_grid_cells_x as f64 * self.field_width / self.field_length).floor();
        (n as usize).max(1)
    }

    /// Total pitch area (m²)
    pub fn area(&self) -> f64 {
        self.field_length * self.field_width
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.field_length.is_finite() && self.field_length > 0.0) {
            return Err(PitchControlError::InvalidParameter(format!(
                "field_length must be positive, got {}",
                self.field_length
            )));
        }
        if !(self.field_width.is_finite() && self.field_width > 0.0) {
            return Err(PitchControlError::InvalidParameter(format!(
                "field_width must be positive, got {}",
                self.field_width
            )));
        }
        if self.n_grid_cells_x == 0 {
            return Err(PitchControlError::InvalidParameter(
                "n_grid_cells_x must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
