//! Per-frame flight integration.
//!
//! [`tick`] is the whole physics model: a thrust ramp, constant-rate fuel
//! drain, thrust-over-mass minus gravity, forward-Euler integration and an
//! inelastic ground. [`FlightSession`] wraps it with the launch / land /
//! cancel lifecycle and the per-frame delta cap, and is what a frame driver
//! should hold.

use crate::aggregator::{LaunchBlocker, LoadoutTotals};
use crate::config::SimConfig;
use crate::constants::{physics, steering};
use crate::flight_state::{FlightPhase, FlightState, FlightStatus};
use crate::loadout::Loadout;

/// Left/right steering input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TiltInput {
    /// Roll toward +max tilt
    Left,
    #[default]
    Neutral,
    /// Roll toward -max tilt
    Right,
}

impl TiltInput {
    /// Negative axis is left, positive is right
    pub fn from_axis(axis: i32) -> Self {
        match axis {
            a if a < 0 => TiltInput::Left,
            a if a > 0 => TiltInput::Right,
            _ => TiltInput::Neutral,
        }
    }

    /// Left wins when both keys are held
    pub fn from_keys(left: bool, right: bool) -> Self {
        if left {
            TiltInput::Left
        } else if right {
            TiltInput::Right
        } else {
            TiltInput::Neutral
        }
    }
}

/// Player input sampled once per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlightControls {
    pub throttle: bool,
    pub tilt: TiltInput,
}

impl FlightControls {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn full_throttle() -> Self {
        Self {
            throttle: true,
            tilt: TiltInput::Neutral,
        }
    }

    pub fn with_tilt(mut self, tilt: TiltInput) -> Self {
        self.tilt = tilt;
        self
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Net vertical acceleration used this tick
    pub acceleration: f64,
    /// The rocket hit the ground and was stopped
    pub ground_contact: bool,
    pub phase: FlightPhase,
}

/// Negative and non-finite deltas advance nothing
fn sanitize_dt(dt: f64) -> f64 {
    if dt.is_finite() && dt > 0.0 {
        dt
    } else {
        0.0
    }
}

/// Fraction of tilt kept after `dt` seconds with no steering input.
/// One reference frame keeps exactly one per-frame decay step.
pub fn tilt_retention(dt: f64) -> f64 {
    steering::TILT_DECAY_PER_FRAME.powf(dt * steering::REFERENCE_FRAME_RATE)
}

/// Thrust over mass minus gravity. A massless or corrupt weight gets gravity only.
pub fn net_acceleration(thrust_n: f64, weight_kg: f64, gravity: f64) -> f64 {
    if weight_kg.is_finite() && weight_kg > 0.0 {
        thrust_n / weight_kg - gravity
    } else {
        -gravity
    }
}

/// Advance `state` by `dt` seconds.
///
/// `dt` is not capped here; [`FlightSession::advance`] caps frame deltas.
/// A zero `dt` leaves a valid state untouched.
pub fn tick(state: &mut FlightState, controls: FlightControls, dt: f64, config: &SimConfig) -> TickReport {
    let dt = sanitize_dt(dt);
    let max_thrust = if state.max_thrust.is_finite() {
        state.max_thrust.max(0.0)
    } else {
        0.0
    };

    // Throttle ramps thrust at max_thrust per second in either direction
    let ramp = max_thrust * dt;
    if controls.throttle && state.fuel_remaining > 0.0 {
        state.current_thrust = (state.current_thrust + ramp).min(max_thrust).max(0.0);
        state.fuel_remaining = (state.fuel_remaining - physics::FUEL_BURN_RATE * dt).max(0.0);
    } else {
        state.current_thrust = (state.current_thrust - ramp).max(0.0);
    }

    let acceleration = net_acceleration(state.current_thrust, state.weight_kg, physics::GRAVITY);

    // Sitting on the pad without enough thrust: nothing moves
    if state.altitude > 0.0 || acceleration > 0.0 {
        state.velocity += acceleration * dt;
        state.altitude += state.velocity * dt;
    }

    let ground_contact = state.altitude < 0.0;
    if ground_contact {
        state.altitude = 0.0;
        state.velocity = 0.0;
        state.current_thrust = 0.0;
    }

    match controls.tilt {
        TiltInput::Left => state.tilt = (state.tilt + steering::TILT_RATE * dt).min(steering::MAX_TILT),
        TiltInput::Right => state.tilt = (state.tilt - steering::TILT_RATE * dt).max(-steering::MAX_TILT),
        TiltInput::Neutral => state.tilt *= tilt_retention(dt),
    }
    state.lateral_offset -= state.tilt * config.lateral_drift_speed * dt;

    TickReport {
        acceleration,
        ground_contact,
        phase: state.phase(),
    }
}

/// One launch of one loadout, from the pad until it lands or is called off
#[derive(Debug, Clone)]
pub struct FlightSession {
    config: SimConfig,
    totals: LoadoutTotals,
    state: FlightState,
    status: FlightStatus,
    elapsed: f64,
    apogee: f64,
}

impl FlightSession {
    /// A session on the pad for the given totals. Does not check the launch gate.
    pub fn new(totals: LoadoutTotals, config: SimConfig) -> Self {
        Self {
            state: FlightState::from_totals(&totals),
            config,
            totals,
            status: FlightStatus::Prelaunch,
            elapsed: 0.0,
            apogee: 0.0,
        }
    }

    /// A session for a loadout that passes the launch gate
    pub fn prepare(loadout: &Loadout, config: SimConfig) -> Result<Self, Vec<LaunchBlocker>> {
        let report = loadout.report(&config);
        if !report.readiness.is_ready() {
            return Err(report.readiness.blockers().to_vec());
        }
        Ok(Self::new(report.stats.totals, config))
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn status(&self) -> FlightStatus {
        self.status
    }

    pub fn phase(&self) -> FlightPhase {
        self.state.phase()
    }

    /// Simulated seconds since launch
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Highest altitude reached so far
    pub fn apogee(&self) -> f64 {
        self.apogee
    }

    pub fn is_flying(&self) -> bool {
        self.status == FlightStatus::Flying
    }

    /// Leave the pad. Only valid before launch.
    pub fn launch(&mut self) -> bool {
        if self.status != FlightStatus::Prelaunch {
            return false;
        }
        self.status = FlightStatus::Flying;
        true
    }

    /// Abort the flight. No further ticks are processed afterwards.
    pub fn cancel(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = FlightStatus::Cancelled;
        true
    }

    /// Put a landed rocket back on the pad with full tanks
    pub fn rearm(&mut self) -> bool {
        if self.status != FlightStatus::Landed {
            return false;
        }
        self.state = FlightState::from_totals(&self.totals);
        self.status = FlightStatus::Prelaunch;
        self.elapsed = 0.0;
        self.apogee = 0.0;
        true
    }

    /// Feed one rendered frame. Returns `None` unless the rocket is flying.
    pub fn advance(&mut self, controls: FlightControls, frame_delta: f64) -> Option<TickReport> {
        if self.status != FlightStatus::Flying {
            return None;
        }

        let dt = sanitize_dt(frame_delta).min(physics::MAX_TICK_SECONDS);
        let report = tick(&mut self.state, controls, dt, &self.config);
        self.elapsed += dt;
        self.apogee = self.apogee.max(self.state.altitude);

        if report.ground_contact {
            self.status = FlightStatus::Landed;
        }
        Some(report)
    }
}
