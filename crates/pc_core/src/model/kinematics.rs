//! Kinematic model: earliest arrival time of a player or the ball.
//!
//! 선수는 반응 시간 동안 현재 속도로 직진한 뒤, 최대 속도로 목표 지점까지 직선 이동한다.
//! The ball simply travels in a straight line at the average pass speed.

use serde::{Deserialize, Serialize};

use super::constants::motion::AT_TARGET_EPSILON_M;
use crate::config::ModelParams;

/// Position or velocity on the pitch.
/// - x: along the length (m), 0 = centre spot
/// - y: along the width (m), 0 = centre spot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[inline]
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Instantaneous state of one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Point,
    pub velocity: Point,
}

impl Kinematics {
    pub const fn new(position: Point, velocity: Point) -> Self {
        Self { position, velocity }
    }

    /// Stationary player at `position`
    pub const fn at(position: Point) -> Self {
        Self { position, velocity: Point::ORIGIN }
    }

    /// Where the player ends up after drifting for `seconds` on the current velocity.
    #[inline]
    pub fn drift(&self, seconds: f64) -> Point {
        self.position.offset(self.velocity.x * seconds, self.velocity.y * seconds)
    }
}

/// Earliest time (s) a player can reach `target`.
///
/// Absent players (`None`) never arrive and get `f64::INFINITY`, so they carry
/// no weight in the race model. A player already standing on the target
/// arrives at t = 0, reaction time notwithstanding.
pub fn time_to_reach(state: Option<&Kinematics>, target: Point, params: &ModelParams) -> f64 {
    let Some(state) = state else {
        return f64::INFINITY;
    };

    if state.position.distance(target) <= AT_TARGET_EPSILON_M {
        return 0.0;
    }

    let after_reaction = state.drift(params.reaction_time);
    params.reaction_time + after_reaction.distance(target) / params.max_player_speed
}

/// Ball flight time to `target` at the average pass speed.
///
/// Without a ball position the ball is assumed to be there already (0 s).
pub fn ball_travel_time(ball: Option<Point>, target: Point, params: &ModelParams) -> f64 {
    match ball {
        Some(ball) if ball.is_finite() => ball.distance(target) / params.average_ball_speed,
        _ => 0.0,
    }
}

/// Probability that a player with earliest arrival `time_to_reach` has
/// arrived by time `t` (logistic CDF centred on the arrival time).
#[inline]
pub fn probability_intercept(t: f64, time_to_reach: f64, params: &ModelParams) -> f64 {
    if time_to_reach.is_infinite() {
        return 0.0;
    }
    1.0 / (1.0 + (-params.arrival_steepness() * (t - time_to_reach)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ModelParams {
        ModelParams::default()
    }

    #[test]
    fn test_time_to_reach_at_target_is_zero() {
        let p = params();
        let moving = Kinematics::new(Point::new(10.0, 5.0), Point::new(4.0, -3.0));
        assert_eq!(time_to_reach(Some(&moving), Point::new(10.0, 5.0), &p), 0.0);

        let still = Kinematics::at(Point::new(-20.0, 0.0));
        assert_eq!(time_to_reach(Some(&still), Point::new(-20.0, 0.0), &p), 0.0);
    }

    #[test]
    fn test_time_to_reach_absent_is_infinite() {
        let t = time_to_reach(None, Point::ORIGIN, &params());
        assert!(t.is_infinite() && t > 0.0);
    }

    #[test]
    fn test_stationary_player() {
        let p = params();
        let player = Kinematics::at(Point::new(-10.0, 0.0));
        // 0.7 s reaction + 10 m at 5 m/s
        let t = time_to_reach(Some(&player), Point::ORIGIN, &p);
        assert!((t - 2.7).abs() < 1e-12, "t = {}", t);
    }

    #[test]
    fn test_running_towards_target_is_faster() {
        let p = params();
        let target = Point::new(20.0, 0.0);
        let towards = Kinematics::new(Point::ORIGIN, Point::new(5.0, 0.0));
        let away = Kinematics::new(Point::ORIGIN, Point::new(-5.0, 0.0));

        let t_towards = time_to_reach(Some(&towards), target, &p);
        let t_away = time_to_reach(Some(&away), target, &p);

        // towards: drift 3.5 m, then 16.5 m → 0.7 + 3.3
        assert!((t_towards - 4.0).abs() < 1e-9);
        // away: drift -3.5 m, then 23.5 m → 0.7 + 4.7
        assert!((t_away - 5.4).abs() < 1e-9);
    }

    #[test]
    fn test_ball_travel_time() {
        let p = params();
        let t = ball_travel_time(Some(Point::new(0.0, 0.0)), Point::new(30.0, 0.0), &p);
        assert!((t - 2.0).abs() < 1e-12);
        assert_eq!(ball_travel_time(None, Point::new(30.0, 0.0), &p), 0.0);
        assert_eq!(ball_travel_time(Some(Point::new(f64::NAN, 0.0)), Point::ORIGIN, &p), 0.0);
    }

    #[test]
    fn test_probability_intercept_shape() {
        let p = params();
        assert!((probability_intercept(2.0, 2.0, &p) - 0.5).abs() < 1e-12);
        assert!(probability_intercept(0.0, 2.0, &p) < 0.01);
        assert!(probability_intercept(4.0, 2.0, &p) > 0.99);
        assert_eq!(probability_intercept(100.0, f64::INFINITY, &p), 0.0);
    }
}
