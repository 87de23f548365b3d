use std::fmt;

use crate::aggregator::LoadoutTotals;
use crate::constants::layout::PAD_HEIGHT;
use crate::constants::phases::{ATMOSPHERE_CEILING, LIFTOFF_CEILING};

/// Coarse altitude band shown on the flight HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightPhase {
    Liftoff,
    Atmosphere,
    Space,
}

impl FlightPhase {
    pub fn from_altitude(altitude: f64) -> Self {
        if altitude > ATMOSPHERE_CEILING {
            FlightPhase::Space
        } else if altitude > LIFTOFF_CEILING {
            FlightPhase::Atmosphere
        } else {
            FlightPhase::Liftoff
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FlightPhase::Liftoff => "LIFTOFF",
            FlightPhase::Atmosphere => "ATMOSPHERE",
            FlightPhase::Space => "SPACE",
        }
    }
}

impl fmt::Display for FlightPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle of a flight session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    /// On the pad, waiting for launch
    Prelaunch,
    Flying,
    /// Came back down; can be re-armed
    Landed,
    /// Aborted by the player; terminal
    Cancelled,
}

impl FlightStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FlightStatus::Prelaunch => "PRELAUNCH",
            FlightStatus::Flying => "FLYING",
            FlightStatus::Landed => "LANDED",
            FlightStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, FlightStatus::Landed | FlightStatus::Cancelled)
    }
}

/// Where the renderer should put the rocket model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RocketPose {
    pub x: f64,
    /// Height of the model's base, pad included
    pub y: f64,
    /// Roll about the forward axis, in radians
    pub roll: f64,
}

/// Kinematic state of the rocket during one flight
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    /// Metres above the pad, never negative
    pub altitude: f64,
    /// Vertical speed in m/s, positive is up
    pub velocity: f64,
    pub fuel_remaining: f64,
    pub fuel_capacity: f64,
    /// Thrust currently produced, in newtons
    pub current_thrust: f64,
    pub max_thrust: f64,
    pub weight_kg: f64,
    /// Roll in radians
    pub tilt: f64,
    /// Sideways drift from the pad centreline
    pub lateral_offset: f64,
}

impl FlightState {
    /// Fresh state on the pad: full tanks, engines idle
    pub fn from_totals(totals: &LoadoutTotals) -> Self {
        Self {
            altitude: 0.0,
            velocity: 0.0,
            fuel_remaining: totals.fuel_capacity,
            fuel_capacity: totals.fuel_capacity,
            current_thrust: 0.0,
            max_thrust: totals.max_thrust_n(),
            weight_kg: totals.weight_kg,
            tilt: 0.0,
            lateral_offset: 0.0,
        }
    }

    pub fn phase(&self) -> FlightPhase {
        FlightPhase::from_altitude(self.altitude)
    }

    /// Share of maximum thrust being produced, for the engine sound
    pub fn thrust_fraction(&self) -> f64 {
        if self.max_thrust > 0.0 {
            (self.current_thrust / self.max_thrust).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn fuel_fraction(&self) -> f64 {
        if self.fuel_capacity > 0.0 {
            (self.fuel_remaining / self.fuel_capacity).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn pose(&self) -> RocketPose {
        RocketPose {
            x: self.lateral_offset,
            y: PAD_HEIGHT + self.altitude,
            roll: self.tilt,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals() -> LoadoutTotals {
        LoadoutTotals { weight_kg: 150.0, thrust_kn: 30.0, fuel_capacity: 300.0 }
    }

    #[test]
    fn test_phase_thresholds() {
        assert_eq!(FlightPhase::from_altitude(0.0), FlightPhase::Liftoff);
        assert_eq!(FlightPhase::from_altitude(500.0), FlightPhase::Liftoff);
        assert_eq!(FlightPhase::from_altitude(1000.0), FlightPhase::Liftoff);
        assert_eq!(FlightPhase::from_altitude(1000.5), FlightPhase::Atmosphere);
        assert_eq!(FlightPhase::from_altitude(2000.0), FlightPhase::Atmosphere);
        assert_eq!(FlightPhase::from_altitude(50_000.0), FlightPhase::Atmosphere);
        assert_eq!(FlightPhase::from_altitude(60_000.0), FlightPhase::Space);
        assert_eq!(FlightPhase::Space.label(), "SPACE");
    }

    #[test]
    fn test_from_totals() {
        let state = FlightState::from_totals(&totals());
        assert_eq!(state.altitude, 0.0);
        assert_eq!(state.velocity, 0.0);
        assert_eq!(state.fuel_remaining, 300.0);
        assert_eq!(state.max_thrust, 30_000.0);
        assert_eq!(state.current_thrust, 0.0);
        assert_eq!(state.phase(), FlightPhase::Liftoff);
    }

    #[test]
    fn test_fractions() {
        let mut state = FlightState::from_totals(&totals());
        state.current_thrust = 15_000.0;
        state.fuel_remaining = 75.0;
        assert_eq!(state.thrust_fraction(), 0.5);
        assert_eq!(state.fuel_fraction(), 0.25);

        // No engines means no thrust share, not NaN
        state.max_thrust = 0.0;
        assert_eq!(state.thrust_fraction(), 0.0);
    }

    #[test]
    fn test_pose_sits_on_pad() {
        let mut state = FlightState::from_totals(&totals());
        assert_eq!(state.pose(), RocketPose { x: 0.0, y: 10.0, roll: 0.0 });

        state.altitude = 250.0;
        state.tilt = -0.25;
        state.lateral_offset = 3.0;
        assert_eq!(state.pose(), RocketPose { x: 3.0, y: 260.0, roll: -0.25 });
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!FlightStatus::Prelaunch.is_terminal());
        assert!(!FlightStatus::Flying.is_terminal());
        assert!(FlightStatus::Landed.is_terminal());
        assert!(FlightStatus::Cancelled.is_terminal());
    }
}
