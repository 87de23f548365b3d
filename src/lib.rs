use godot::prelude::*;

pub mod aggregator;
pub mod config;
pub mod constants;
pub mod error;
pub mod flight_state;
pub mod integrator;
pub mod loadout;
pub mod part;

mod flight_simulator;
mod rocket_builder;

struct RocketBuilderExtension;

#[gdextension]
unsafe impl ExtensionLibrary for RocketBuilderExtension {}
