//! Hypothetical edits to one player's state.
//!
//! - `movement` - same place, different velocity
//! - `presence` - player taken off the pitch
//! - `location` - shifted position, optionally a new velocity

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{PitchControlError, Result};
use crate::model::kinematics::{Kinematics, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerturbationMode {
    Movement,
    Presence,
    Location,
}

impl PerturbationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerturbationMode::Movement => "movement",
            PerturbationMode::Presence => "presence",
            PerturbationMode::Location => "location",
        }
    }
}

impl fmt::Display for PerturbationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PerturbationMode {
    type Err = PitchControlError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "movement" => Ok(PerturbationMode::Movement),
            "presence" => Ok(PerturbationMode::Presence),
            "location" => Ok(PerturbationMode::Location),
            _ => Err(PitchControlError::InvalidMode { mode: s.to_string() }),
        }
    }
}

/// Loose argument bundle for mode-string dispatch. Fields a mode does not
/// use are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PerturbationArgs {
    /// New x velocity (m/s); movement, location
    pub replace_x_velocity: f64,
    /// New y velocity (m/s); movement, location
    pub replace_y_velocity: f64,
    /// Shift along the length (m); location only
    pub relative_x_change: f64,
    /// Shift along the width (m); location only
    pub relative_y_change: f64,
    /// Whether location also replaces the velocity
    pub replace_velocity: bool,
}

/// One edit to the analysed player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Perturbation {
    /// Keep the position, use this velocity instead
    Movement { vx: f64, vy: f64 },
    /// Take the player off the pitch
    Presence,
    /// Shift the player; replace the velocity only if asked to
    Location { dx: f64, dy: f64, replace_velocity: bool, vx: f64, vy: f64 },
}

impl Perturbation {
    pub fn from_mode(mode: &str, args: &PerturbationArgs) -> Result<Self> {
        Ok(match mode.parse::<PerturbationMode>()? {
            PerturbationMode::Movement => Perturbation::Movement {
                vx: args.replace_x_velocity,
                vy: args.replace_y_velocity,
            },
            PerturbationMode::Presence => Perturbation::Presence,
            PerturbationMode::Location => Perturbation::Location {
                dx: args.relative_x_change,
                dy: args.relative_y_change,
                replace_velocity: args.replace_velocity,
                vx: args.replace_x_velocity,
                vy: args.replace_y_velocity,
            },
        })
    }

    pub fn mode(&self) -> PerturbationMode {
        match self {
            Perturbation::Movement { .. } => PerturbationMode::Movement,
            Perturbation::Presence => PerturbationMode::Presence,
            Perturbation::Location { .. } => PerturbationMode::Location,
        }
    }

    /// Stationary at the new location (ambiguous: intended or forgotten velocity?)
    pub fn is_stationary_relocation(&self) -> bool {
        matches!(
            self,
            Perturbation::Location { replace_velocity: true, vx, vy, .. } if *vx == 0.0 && *vy == 0.0
        )
    }

    /// The player's state after the edit; `None` = off the pitch.
    pub fn apply_to(&self, current: Kinematics) -> Option<Kinematics> {
        match *self {
            Perturbation::Movement { vx, vy } => {
                Some(Kinematics::new(current.position, Point::new(vx, vy)))
            }
            Perturbation::Presence => None,
            Perturbation::Location { dx, dy, replace_velocity, vx, vy } => {
                let velocity = if replace_velocity { Point::new(vx, vy) } else { current.velocity };
                Some(Kinematics::new(current.position.offset(dx, dy), velocity))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner() -> Kinematics {
        Kinematics::new(Point::new(12.0, -3.0), Point::new(4.0, 1.0))
    }

    #[test]
    fn test_mode_dispatch() {
        let args = PerturbationArgs {
            replace_x_velocity: 1.0,
            replace_y_velocity: 2.0,
            relative_x_change: 3.0,
            relative_y_change: 4.0,
            replace_velocity: true,
        };
        assert_eq!(
            Perturbation::from_mode("movement", &args).unwrap(),
            Perturbation::Movement { vx: 1.0, vy: 2.0 }
        );
        assert_eq!(Perturbation::from_mode("presence", &args).unwrap(), Perturbation::Presence);
        assert_eq!(
            Perturbation::from_mode("location", &args).unwrap().mode(),
            PerturbationMode::Location
        );
    }

    #[test]
    fn test_unknown_mode() {
        let err = Perturbation::from_mode("teleport", &PerturbationArgs::default()).unwrap_err();
        assert!(matches!(err, PitchControlError::InvalidMode { ref mode } if mode == "teleport"));
        // Case matters
        assert!("Movement".parse::<PerturbationMode>().is_err());
    }

    #[test]
    fn test_movement_keeps_position() {
        let edited = Perturbation::Movement { vx: 0.0, vy: 0.0 }.apply_to(runner()).unwrap();
        assert_eq!(edited.position, runner().position);
        assert_eq!(edited.velocity, Point::ORIGIN);
    }

    #[test]
    fn test_presence_removes() {
        assert!(Perturbation::Presence.apply_to(runner()).is_none());
    }

    #[test]
    fn test_location_shifts_and_optionally_replaces_velocity() {
        let keep = Perturbation::Location { dx: 5.0, dy: -1.0, replace_velocity: false, vx: 9.0, vy: 9.0 };
        let edited = keep.apply_to(runner()).unwrap();
        assert_eq!(edited.position, Point::new(17.0, -4.0));
        assert_eq!(edited.velocity, runner().velocity);

        let replace = Perturbation::Location { dx: 0.0, dy: 0.0, replace_velocity: true, vx: -2.0, vy: 0.0 };
        assert_eq!(replace.apply_to(runner()).unwrap().velocity, Point::new(-2.0, 0.0));
    }

    #[test]
    fn test_stationary_relocation_flag() {
        let still = Perturbation::Location { dx: 3.0, dy: 0.0, replace_velocity: true, vx: 0.0, vy: 0.0 };
        assert!(still.is_stationary_relocation());
        let kept = Perturbation::Location { dx: 3.0, dy: 0.0, replace_velocity: false, vx: 0.0, vy: 0.0 };
        assert!(!kept.is_stationary_relocation());
        assert!(!Perturbation::Presence.is_stationary_relocation());
    }

    #[test]
    fn test_args_deserialise_partially() {
        let args: PerturbationArgs = serde_json::from_str(r#"{"relative_x_change": 4.0}"#).unwrap();
        assert_eq!(args.relative_x_change, 4.0);
        assert!(!args.replace_velocity);
    }
}
