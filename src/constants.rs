/// Physics constants for the flight toy
pub mod physics {
    /// Gravitational acceleration in m/s²
    pub const GRAVITY: f64 = 9.8;

    /// Newtons per kilonewton (part thrust is listed in kN)
    pub const NEWTONS_PER_KN: f64 = 1000.0;

    /// Fuel every rocket carries before any tank is added, in litres
    pub const BASE_FUEL_CAPACITY: f64 = 100.0;

    /// Fuel burned per second with the throttle open, in litres
    /// Independent of how much thrust is actually being produced
    pub const FUEL_BURN_RATE: f64 = 10.0;

    /// Minimum thrust-to-weight ratio a loadout must exceed to launch
    pub const LAUNCH_TWR_THRESHOLD: f64 = 1.0;

    /// Estimated top speed per unit of thrust-to-weight (cosmetic "Mach" figure)
    pub const TOP_SPEED_FACTOR: f64 = 2.0;

    /// Longest frame delta fed to the integrator, in seconds
    pub const MAX_TICK_SECONDS: f64 = 0.1;
}

/// Lateral tilt and drift
pub mod steering {
    /// Maximum roll in either direction, in radians
    pub const MAX_TILT: f64 = 0.5;

    /// Roll rate while a steering key is held, in rad/s
    pub const TILT_RATE: f64 = 1.0;

    /// Auto-centering factor applied once per reference frame
    pub const TILT_DECAY_PER_FRAME: f64 = 0.95;

    /// Frame rate the per-frame decay factor was tuned at
    pub const REFERENCE_FRAME_RATE: f64 = 60.0;

    /// Sideways drift speed at one radian of tilt, in m/s
    pub const LATERAL_DRIFT_SPEED: f64 = 100.0;
}

/// Altitude thresholds for the HUD flight phase, in metres
pub mod phases {
    /// Highest altitude still reported as liftoff
    pub const LIFTOFF_CEILING: f64 = 1000.0;

    /// Highest altitude still reported as atmosphere
    pub const ATMOSPHERE_CEILING: f64 = 50_000.0;
}

/// Build grid and scene layout
pub mod layout {
    pub const GRID_ROWS: usize = 12;
    pub const GRID_COLS: usize = 10;

    /// Model-space width of one grid column
    pub const CELL_WIDTH: f64 = 10.0;

    /// Model-space height of one grid row
    pub const CELL_HEIGHT: f64 = 15.0;

    /// Sideways offset of a wing from its cell centre
    pub const WING_OFFSET: f64 = 8.0;

    /// Height of the launch pad the rocket rests on
    pub const PAD_HEIGHT: f64 = 10.0;
}

/// Full-scale values for the builder status bars
pub mod gauges {
    pub const WEIGHT_FULL_SCALE_KG: f64 = 1000.0;
    pub const THRUST_FULL_SCALE_KN: f64 = 5000.0;
    pub const FUEL_FULL_SCALE: f64 = 2000.0;
    pub const TOP_SPEED_FULL_SCALE: f64 = 10.0;
}
