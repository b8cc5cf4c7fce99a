//! Physical constants for the pitch control model
//!
//! Defaults follow the Spearman-style pitch control model as presented in the
//! Friends of Tracking series (Metrica sample data conventions).

// ============================================================
// Pitch geometry
// ============================================================
pub mod pitch {
    /// Pitch length including a small border (m)
    pub const LENGTH_M: f64 = 106.0;

    /// Pitch width including a small border (m)
    pub const WIDTH_M: f64 = 68.0;

    /// Grid resolution along the pitch length
    pub const DEFAULT_GRID_CELLS_X: usize = 50;
}

// ============================================================
// Player / ball motion
// ============================================================
pub mod motion {
    /// Top running speed (m/s)
    pub const MAX_PLAYER_SPEED: f64 = 5.0;

    /// 반응 시간: 선수가 현재 속도를 유지하는 시간 (s)
    pub const REACTION_TIME: f64 = 0.7;

    /// Average speed of a pass along the ground (m/s)
    pub const AVERAGE_BALL_SPEED: f64 = 15.0;

    /// Below this distance a mover is considered already at the target (m)
    pub const AT_TARGET_EPSILON_M: f64 = 1e-9;
}

// ============================================================
// Ball control (race model)
// ============================================================
pub mod control {
    /// Standard deviation of the arrival-time logistic (s)
    pub const TTI_SIGMA: f64 = 0.45;

    /// Defender control-rate multiplier (1.0 = no defensive advantage)
    pub const KAPPA_DEF: f64 = 1.0;

    /// Ball control rate for attackers (1/s)
    pub const LAMBDA_ATT: f64 = 4.3;

    /// Goalkeepers control the ball this many times faster than outfield defenders
    pub const LAMBDA_GK_MULTIPLIER: f64 = 3.0;

    /// Time-to-control threshold, in log10 units of the remaining probability.
    /// 3.0 → a side is ruled out once the other would control with 99.9%.
    pub const TIME_TO_CONTROL_VETO: f64 = 3.0;

    /// Probability assigned to a point neither side can reach
    pub const UNDECIDED: f64 = 0.5;
}

// ============================================================
// Numerical integration
// ============================================================
pub mod integration {
    /// Integration step (s)
    pub const INT_DT: f64 = 0.04;

    /// Integration horizon after ball arrival (s)
    pub const MAX_INT_TIME: f64 = 10.0;

    /// Stop once total control probability is within this of 1
    pub const MODEL_CONVERGE_TOL: f64 = 0.01;

    /// Allowed deviation of mean(attacking + defending) from 1 across a surface
    pub const CHECKSUM_TOL: f64 = 0.01;
}
