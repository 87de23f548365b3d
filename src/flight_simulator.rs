use godot::prelude::*;

use crate::config::SimConfig;
use crate::flight_state::{FlightPhase, FlightStatus};
use crate::integrator::{FlightControls, FlightSession, TiltInput};
use crate::rocket_builder::RocketBuilder;

/// Godot-accessible flight node
/// Runs one flight session per launch, advancing it from the engine's frame callback
#[derive(GodotClass)]
#[class(base=Node)]
pub struct FlightSimulator {
    base: Base<Node>,
    session: Option<FlightSession>,
    /// Constants for sessions launched from raw totals
    config: SimConfig,
    controls: FlightControls,
    /// Phase reported on the previous frame, to detect transitions
    last_phase: Option<FlightPhase>,
}

#[godot_api]
impl INode for FlightSimulator {
    fn init(base: Base<Node>) -> Self {
        godot_print!("FlightSimulator initialized");
        Self {
            base,
            session: None,
            config: SimConfig::default(),
            controls: FlightControls::idle(),
            last_phase: None,
        }
    }

    fn process(&mut self, delta: f64) {
        let controls = self.controls;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(report) = session.advance(controls, delta) else {
            return;
        };
        let landed = session.status() == FlightStatus::Landed;
        let apogee = session.apogee();

        if self.last_phase != Some(report.phase) {
            self.last_phase = Some(report.phase);
            self.base_mut().emit_signal(
                "phase_changed",
                &[GString::from(report.phase.label()).to_variant()],
            );
        }

        if landed {
            godot_print!("Flight landed, apogee {:.0} m", apogee);
            self.base_mut().emit_signal("flight_landed", &[apogee.to_variant()]);
        }
    }
}

#[godot_api]
impl FlightSimulator {
    // ==========================================
    // Signals
    // ==========================================

    /// Parameters: phase label (LIFTOFF, ATMOSPHERE, SPACE)
    #[signal]
    fn phase_changed(phase: GString);

    /// Parameters: highest altitude reached in metres
    #[signal]
    fn flight_landed(apogee: f64);

    #[signal]
    fn flight_cancelled();

    // ==========================================
    // Configuration
    // ==========================================

    /// Replace the constants used by launch_with_totals from TOML text
    /// Builder launches use the builder's own constants
    #[func]
    pub fn apply_config_toml(&mut self, source: GString) -> bool {
        match SimConfig::from_toml_str(&source.to_string()) {
            Ok(config) => {
                self.config = config;
                true
            }
            Err(err) => {
                godot_warn!("FlightSimulator: config rejected: {}", err);
                false
            }
        }
    }

    // ==========================================
    // Session Control
    // ==========================================

    /// Arm and launch the loadout currently on a RocketBuilder
    /// Returns false if the loadout fails the launch gate
    #[func]
    pub fn launch_from(&mut self, builder: Gd<RocketBuilder>) -> bool {
        let (loadout, config) = builder.bind().snapshot();
        match FlightSession::prepare(&loadout, config) {
            Ok(mut session) => {
                session.launch();
                godot_print!(
                    "Launching {} parts: {:.0} kg, {:.0} N max thrust, {:.0} L fuel",
                    loadout.len(),
                    session.state().weight_kg,
                    session.state().max_thrust,
                    session.state().fuel_capacity
                );
                self.session = Some(session);
                self.controls = FlightControls::idle();
                self.last_phase = None;
                true
            }
            Err(blockers) => {
                let reasons: Vec<&str> = blockers.iter().map(|b| b.reason()).collect();
                godot_warn!("FlightSimulator: launch refused: {}", reasons.join(" "));
                false
            }
        }
    }

    /// Launch from raw totals, bypassing the builder's launch gate
    /// Weight in kg, thrust in kN
    #[func]
    pub fn launch_with_totals(&mut self, weight_kg: f64, thrust_kn: f64, fuel_capacity: f64) {
        let totals = crate::aggregator::LoadoutTotals {
            weight_kg,
            thrust_kn,
            fuel_capacity,
        };
        let mut session = FlightSession::new(totals, self.config.clone());
        session.launch();
        self.session = Some(session);
        self.controls = FlightControls::idle();
        self.last_phase = None;
    }

    /// Abort the current flight
    #[func]
    pub fn cancel(&mut self) {
        let cancelled = self.session.as_mut().is_some_and(|s| s.cancel());
        if cancelled {
            godot_print!("Flight cancelled");
            self.base_mut().emit_signal("flight_cancelled", &[]);
        }
    }

    /// Put a landed rocket back on the pad and launch it again
    #[func]
    pub fn rearm(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if !session.rearm() {
            return false;
        }
        session.launch();
        self.controls = FlightControls::idle();
        self.last_phase = None;
        true
    }

    /// Drop the session entirely
    #[func]
    pub fn end_session(&mut self) {
        self.session = None;
        self.last_phase = None;
    }

    #[func]
    pub fn is_flying(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_flying())
    }

    /// PRELAUNCH, FLYING, LANDED, CANCELLED, or empty with no session
    #[func]
    pub fn get_status_label(&self) -> GString {
        self.session
            .as_ref()
            .map(|s| GString::from(s.status().label()))
            .unwrap_or_default()
    }

    // ==========================================
    // Controls
    // ==========================================

    #[func]
    pub fn set_throttle(&mut self, on: bool) {
        self.controls.throttle = on;
    }

    /// -1 steers left, 1 steers right, 0 lets the rocket self-centre
    #[func]
    pub fn set_tilt_axis(&mut self, axis: i32) {
        self.controls.tilt = TiltInput::from_axis(axis);
    }

    /// Raw key state; left wins if both are held
    #[func]
    pub fn set_tilt_keys(&mut self, left: bool, right: bool) {
        self.controls.tilt = TiltInput::from_keys(left, right);
    }

    // ==========================================
    // HUD
    // ==========================================

    #[func]
    pub fn get_altitude(&self) -> f64 {
        self.session.as_ref().map(|s| s.state().altitude).unwrap_or(0.0)
    }

    #[func]
    pub fn get_velocity(&self) -> f64 {
        self.session.as_ref().map(|s| s.state().velocity).unwrap_or(0.0)
    }

    #[func]
    pub fn get_fuel(&self) -> f64 {
        self.session.as_ref().map(|s| s.state().fuel_remaining).unwrap_or(0.0)
    }

    /// Remaining fuel as 0..1, for the fuel bar
    #[func]
    pub fn get_fuel_fraction(&self) -> f64 {
        self.session.as_ref().map(|s| s.state().fuel_fraction()).unwrap_or(0.0)
    }

    /// Current thrust as 0..1 of maximum, for the engine sound
    #[func]
    pub fn get_thrust_fraction(&self) -> f64 {
        self.session.as_ref().map(|s| s.state().thrust_fraction()).unwrap_or(0.0)
    }

    #[func]
    pub fn get_tilt(&self) -> f64 {
        self.session.as_ref().map(|s| s.state().tilt).unwrap_or(0.0)
    }

    #[func]
    pub fn get_phase_label(&self) -> GString {
        let phase = self.session.as_ref().map(|s| s.phase()).unwrap_or(FlightPhase::Liftoff);
        GString::from(phase.label())
    }

    #[func]
    pub fn get_elapsed(&self) -> f64 {
        self.session.as_ref().map(|s| s.elapsed()).unwrap_or(0.0)
    }

    #[func]
    pub fn get_apogee(&self) -> f64 {
        self.session.as_ref().map(|s| s.apogee()).unwrap_or(0.0)
    }

    /// Where to draw the rocket: x is lateral drift, y is height above ground including the pad
    #[func]
    pub fn get_rocket_position(&self) -> Vector2 {
        match &self.session {
            Some(session) => {
                let pose = session.state().pose();
                Vector2::new(pose.x as f32, pose.y as f32)
            }
            None => Vector2::ZERO,
        }
    }

    /// Roll in radians for the rocket model
    #[func]
    pub fn get_rocket_roll(&self) -> f64 {
        self.session.as_ref().map(|s| s.state().pose().roll).unwrap_or(0.0)
    }
}
