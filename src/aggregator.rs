//! Loadout statistics and the launch gate.
//!
//! Everything here is a pure function of the parts passed in. Totals are
//! summed from scratch on every call, so there is nothing to keep in sync
//! when parts come and go.

use std::fmt;

use crate::config::SimConfig;
use crate::constants::gauges;
use crate::constants::physics::{self, NEWTONS_PER_KN};
use crate::part::{Part, PartKind};

/// Summed stats of every placed part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadoutTotals {
    pub weight_kg: f64,
    pub thrust_kn: f64,
    /// Includes the base allowance every rocket carries
    pub fuel_capacity: f64,
}

impl LoadoutTotals {
    /// Engine thrust over the weight of the whole rocket.
    /// Defined as 0 for a weightless loadout rather than infinity.
    pub fn thrust_to_weight(&self, gravity: f64) -> f64 {
        let weight_force_n = self.weight_kg * gravity;
        if self.weight_kg > 0.0 && weight_force_n > 0.0 {
            self.thrust_kn * NEWTONS_PER_KN / weight_force_n
        } else {
            0.0
        }
    }

    pub fn max_thrust_n(&self) -> f64 {
        self.thrust_kn * NEWTONS_PER_KN
    }
}

/// Sum weight, thrust and fuel capacity over a loadout
pub fn compute_totals(parts: &[Part]) -> LoadoutTotals {
    parts.iter().fold(
        LoadoutTotals {
            weight_kg: 0.0,
            thrust_kn: 0.0,
            fuel_capacity: physics::BASE_FUEL_CAPACITY,
        },
        |totals, part| LoadoutTotals {
            weight_kg: totals.weight_kg + part.weight_kg(),
            thrust_kn: totals.thrust_kn + part.thrust_kn(),
            fuel_capacity: totals.fuel_capacity + part.fuel_capacity(),
        },
    )
}

/// Totals plus the derived figures shown in the builder status bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadoutStats {
    pub totals: LoadoutTotals,
    pub thrust_to_weight: f64,
    /// Cosmetic "Mach" figure, not a bound on actual flight speed
    pub estimated_top_speed: f64,
}

impl LoadoutStats {
    pub fn from_parts(parts: &[Part], config: &SimConfig) -> Self {
        let totals = compute_totals(parts);
        let thrust_to_weight = totals.thrust_to_weight(physics::GRAVITY);
        Self {
            totals,
            thrust_to_weight,
            estimated_top_speed: thrust_to_weight * config.top_speed_factor,
        }
    }

    /// Status bar fill levels, each in [0, 1]
    pub fn gauges(&self) -> StatGauges {
        StatGauges {
            weight: gauge(self.totals.weight_kg, gauges::WEIGHT_FULL_SCALE_KG),
            thrust: gauge(self.totals.thrust_kn, gauges::THRUST_FULL_SCALE_KN),
            fuel: gauge(self.totals.fuel_capacity, gauges::FUEL_FULL_SCALE),
            top_speed: gauge(self.estimated_top_speed, gauges::TOP_SPEED_FULL_SCALE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatGauges {
    pub weight: f64,
    pub thrust: f64,
    pub fuel: f64,
    pub top_speed: f64,
}

fn gauge(value: f64, full_scale: f64) -> f64 {
    (value / full_scale).clamp(0.0, 1.0)
}

/// A reason the launch button stays disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaunchBlocker {
    NoCockpit,
    NoEngine,
    /// Thrust-to-weight at or below the launch threshold
    Underpowered,
}

impl LaunchBlocker {
    pub fn reason(&self) -> &'static str {
        match self {
            LaunchBlocker::NoCockpit => "NO COCKPIT.",
            LaunchBlocker::NoEngine => "NO ENGINE.",
            LaunchBlocker::Underpowered => "T/W RATIO < 1 (TOO HEAVY).",
        }
    }
}

impl fmt::Display for LaunchBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchReadiness {
    Ready,
    /// Every failed condition, in check order (cockpit, engine, power)
    NotReady(Vec<LaunchBlocker>),
}

impl LaunchReadiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, LaunchReadiness::Ready)
    }

    pub fn blockers(&self) -> &[LaunchBlocker] {
        match self {
            LaunchReadiness::Ready => &[],
            LaunchReadiness::NotReady(blockers) => blockers,
        }
    }

    /// One-line status for the builder footer
    pub fn message(&self) -> String {
        match self {
            LaunchReadiness::Ready => "SYSTEMS GREEN. READY FOR LAUNCH.".to_string(),
            LaunchReadiness::NotReady(blockers) => {
                let reasons: Vec<&str> = blockers.iter().map(|b| b.reason()).collect();
                format!("STATUS: {}", reasons.join(" "))
            }
        }
    }
}

/// Check the launch gate: a cockpit, an engine, and enough thrust to lift the lot
pub fn assess_launch(parts: &[Part], stats: &LoadoutStats) -> LaunchReadiness {
    let has_kind = |kind: PartKind| parts.iter().any(|p| p.kind() == kind);

    let mut blockers = Vec::new();
    if !has_kind(PartKind::Cockpit) {
        blockers.push(LaunchBlocker::NoCockpit);
    }
    if !has_kind(PartKind::Engine) {
        blockers.push(LaunchBlocker::NoEngine);
    }
    if !(stats.thrust_to_weight > physics::LAUNCH_TWR_THRESHOLD) {
        blockers.push(LaunchBlocker::Underpowered);
    }

    if blockers.is_empty() {
        LaunchReadiness::Ready
    } else {
        LaunchReadiness::NotReady(blockers)
    }
}

/// Everything the builder UI shows about a loadout
#[derive(Debug, Clone, PartialEq)]
pub struct LoadoutReport {
    pub stats: LoadoutStats,
    pub readiness: LaunchReadiness,
}

impl LoadoutReport {
    pub fn evaluate(parts: &[Part], config: &SimConfig) -> Self {
        let stats = LoadoutStats::from_parts(parts, config);
        let readiness = assess_launch(parts, &stats);
        Self { stats, readiness }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::PartSpec;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn cockpit(weight: f64) -> PartSpec {
        PartSpec::new(PartKind::Cockpit, "cockpit_test", "Test Pod", weight)
    }

    fn engine(weight: f64, thrust_kn: f64) -> PartSpec {
        PartSpec::new(PartKind::Engine, "engine_test", "Test Engine", weight).with_thrust(thrust_kn)
    }

    fn tank(weight: f64, fuel: f64) -> PartSpec {
        PartSpec::new(PartKind::Hull, "tank_test", "Test Tank", weight).with_fuel_capacity(fuel)
    }

    fn random_part(rng: &mut ChaCha8Rng, row: usize) -> Part {
        let kind = PartKind::from_index(rng.gen_range(0..4)).unwrap();
        let mut spec = PartSpec::new(kind, "random", "Random", rng.gen_range(0.0..500.0));
        if kind == PartKind::Engine {
            spec = spec.with_thrust(rng.gen_range(0.0..200.0));
        }
        if kind == PartKind::Hull && rng.gen_bool(0.5) {
            spec = spec.with_fuel_capacity(rng.gen_range(0.0..500.0));
        }
        spec.place_at(row, rng.gen_range(0..10))
    }

    #[test]
    fn test_reference_loadout() {
        let config = SimConfig::default();
        let parts = vec![cockpit(50.0).place_at(0, 4), engine(100.0, 30.0).place_at(1, 4)];

        let report = LoadoutReport::evaluate(&parts, &config);
        assert_eq!(
            report.stats.totals,
            LoadoutTotals { weight_kg: 150.0, thrust_kn: 30.0, fuel_capacity: 100.0 }
        );
        assert!((report.stats.thrust_to_weight - 30_000.0 / (150.0 * 9.8)).abs() < 1e-9);
        assert!((report.stats.thrust_to_weight - 20.4).abs() < 0.05);
        assert!((report.stats.estimated_top_speed - report.stats.thrust_to_weight * 2.0).abs() < 1e-9);
        assert!(report.readiness.is_ready());
        assert_eq!(report.readiness.message(), "SYSTEMS GREEN. READY FOR LAUNCH.");
    }

    #[test]
    fn test_tanks_add_to_base_fuel() {
        let parts = vec![tank(60.0, 200.0).place_at(3, 4), tank(120.0, 500.0).place_at(4, 4)];
        let totals = compute_totals(&parts);
        assert_eq!(totals.fuel_capacity, 800.0);
        assert_eq!(totals.weight_kg, 180.0);
        assert_eq!(totals.thrust_kn, 0.0);
    }

    #[test]
    fn test_empty_loadout() {
        let config = SimConfig::default();
        let report = LoadoutReport::evaluate(&[], &config);

        assert_eq!(report.stats.totals.weight_kg, 0.0);
        assert_eq!(report.stats.totals.fuel_capacity, 100.0);
        assert_eq!(report.stats.thrust_to_weight, 0.0);
        assert_eq!(
            report.readiness.blockers(),
            &[LaunchBlocker::NoCockpit, LaunchBlocker::NoEngine, LaunchBlocker::Underpowered]
        );
        assert_eq!(
            report.readiness.message(),
            "STATUS: NO COCKPIT. NO ENGINE. T/W RATIO < 1 (TOO HEAVY)."
        );
    }

    #[test]
    fn test_weightless_loadout_has_zero_twr() {
        let config = SimConfig::default();
        // A massless engine with real thrust still yields T/W 0, never infinity
        let parts = vec![cockpit(0.0).place_at(0, 4), engine(0.0, 50.0).place_at(1, 4)];
        let report = LoadoutReport::evaluate(&parts, &config);

        assert_eq!(report.stats.thrust_to_weight, 0.0);
        assert!(report.stats.estimated_top_speed.is_finite());
        assert_eq!(report.readiness.blockers(), &[LaunchBlocker::Underpowered]);
    }

    #[test]
    fn test_underpowered_only() {
        let config = SimConfig::default();
        // 10 kN against 1500 kg: T/W ≈ 0.68
        let parts = vec![cockpit(1000.0).place_at(0, 4), engine(500.0, 10.0).place_at(1, 4)];
        let readiness = LoadoutReport::evaluate(&parts, &config).readiness;
        assert_eq!(readiness, LaunchReadiness::NotReady(vec![LaunchBlocker::Underpowered]));
    }

    #[test]
    fn test_twr_exactly_one_is_not_enough() {
        let config = SimConfig::default();
        // 9.8 kN lifting 1000 kg is exactly T/W 1
        let parts = vec![cockpit(900.0).place_at(0, 4), engine(100.0, 9.8).place_at(1, 4)];
        let report = LoadoutReport::evaluate(&parts, &config);
        assert!((report.stats.thrust_to_weight - 1.0).abs() < 1e-12);
        assert!(!report.readiness.is_ready());
    }

    #[test]
    fn test_missing_cockpit_always_blocks() {
        let config = SimConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let count = rng.gen_range(0..12);
            let parts: Vec<Part> = (0..count)
                .map(|row| random_part(&mut rng, row))
                .filter(|p| p.kind() != PartKind::Cockpit)
                .collect();

            let readiness = LoadoutReport::evaluate(&parts, &config).readiness;
            assert!(!readiness.is_ready());
            assert!(readiness.blockers().contains(&LaunchBlocker::NoCockpit));
        }
    }

    #[test]
    fn test_totals_equal_part_sums() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            let count = rng.gen_range(0..12);
            let parts: Vec<Part> = (0..count).map(|row| random_part(&mut rng, row)).collect();
            let totals = compute_totals(&parts);

            let weight: f64 = parts.iter().map(|p| p.weight_kg()).sum();
            let thrust: f64 = parts.iter().map(|p| p.thrust_kn()).sum();
            let fuel: f64 = parts.iter().map(|p| p.fuel_capacity()).sum();
            assert!((totals.weight_kg - weight).abs() < 1e-6);
            assert!((totals.thrust_kn - thrust).abs() < 1e-6);
            assert!((totals.fuel_capacity - (100.0 + fuel)).abs() < 1e-6);

            let twr = totals.thrust_to_weight(physics::GRAVITY);
            assert!(twr.is_finite() && twr >= 0.0);
        }
    }

    #[test]
    fn test_gauges_clamp() {
        let config = SimConfig::default();
        let parts = vec![cockpit(50.0).place_at(0, 4), engine(100.0, 30.0).place_at(1, 4)];
        let gauges = LoadoutStats::from_parts(&parts, &config).gauges();

        assert!((gauges.weight - 0.15).abs() < 1e-12);
        assert!((gauges.thrust - 0.006).abs() < 1e-12);
        assert!((gauges.fuel - 0.05).abs() < 1e-12);
        // T/W ≈ 20 gives a top speed ≈ 40, well past full scale
        assert_eq!(gauges.top_speed, 1.0);
    }

    #[test]
    fn test_configurable_top_speed_factor() {
        let config = SimConfig { top_speed_factor: 3.0, ..SimConfig::default() };
        let parts = vec![cockpit(50.0).place_at(0, 4), engine(100.0, 30.0).place_at(1, 4)];
        let stats = LoadoutStats::from_parts(&parts, &config);
        assert!((stats.estimated_top_speed - stats.thrust_to_weight * 3.0).abs() < 1e-9);
    }
}
