use std::env;

use rocket_builder::config::SimConfig;
use rocket_builder::flight_state::FlightStatus;
use rocket_builder::integrator::{FlightControls, FlightSession, TiltInput};
use rocket_builder::loadout::Loadout;
use rocket_builder::part::PartCatalog;

fn main() {
    println!("=== Rocket Builder Flight Demo ===\n");

    // Optional TOML overrides: cargo run --example flight_demo -- demos/sim.toml
    let config = match env::args().nth(1) {
        Some(path) => match SimConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };

    let catalog = PartCatalog::standard();
    let mut loadout = Loadout::new();

    let layout = [
        ("cockpit_mk1", 7, 4),
        ("fuel_tank", 8, 4),
        ("fuel_tank", 9, 4),
        ("wing_l", 9, 3),
        ("wing_r", 9, 5),
        ("engine_sparrow", 10, 4),
    ];

    for (id, row, col) in layout {
        if let Err(err) = loadout.place_from_catalog(&catalog, id, row, col) {
            println!("  ✗ {err}");
            continue;
        }
        let report = loadout.report(&config);
        println!(
            "  + {:<16} ({:>2},{:>2})  weight {:>5.0} kg  thrust {:>4.0} kN  T/W {:>5.2}  {}",
            id,
            row,
            col,
            report.stats.totals.weight_kg,
            report.stats.totals.thrust_kn,
            report.stats.thrust_to_weight,
            report.readiness.message()
        );
    }

    let mut session = match FlightSession::prepare(&loadout, config) {
        Ok(session) => session,
        Err(blockers) => {
            println!("\nLaunch refused: {blockers:?}");
            return;
        }
    };

    println!("\nIgnition!\n");
    session.launch();

    // Burn for 20 s with a short steer left, then coast until touchdown
    let frame = 1.0 / 60.0;
    let mut last_phase = session.phase();
    while session.status() == FlightStatus::Flying {
        let t = session.elapsed();
        let controls = if t < 20.0 {
            let tilt = if (5.0..6.0).contains(&t) { TiltInput::Left } else { TiltInput::Neutral };
            FlightControls::full_throttle().with_tilt(tilt)
        } else {
            FlightControls::idle()
        };

        if let Some(report) = session.advance(controls, frame) {
            if report.phase != last_phase {
                let state = session.state();
                println!(
                    "  T+{:>6.1}s  {:<10}  alt {:>8.0} m  vel {:>7.0} m/s  fuel {:>5.1}",
                    session.elapsed(),
                    report.phase.label(),
                    state.altitude,
                    state.velocity,
                    state.fuel_remaining
                );
                last_phase = report.phase;
            }
        }
    }

    println!(
        "\n{} after {:.1}s, apogee {:.0} m, drifted {:.0} m",
        session.status().label(),
        session.elapsed(),
        session.apogee(),
        session.state().lateral_offset
    );
}
