use godot::prelude::*;

use crate::aggregator::LoadoutReport;
use crate::config::SimConfig;
use crate::loadout::Loadout;
use crate::part::{PartCatalog, PartFinish, PartKind, PartSpec};

/// Godot-accessible build grid node
/// Holds the loadout being assembled and reports its stats and launch readiness
#[derive(GodotClass)]
#[class(base=Node)]
pub struct RocketBuilder {
    base: Base<Node>,
    loadout: Loadout,
    catalog: PartCatalog,
    config: SimConfig,
}

#[godot_api]
impl INode for RocketBuilder {
    fn init(base: Base<Node>) -> Self {
        godot_print!("RocketBuilder initialized");
        Self {
            base,
            loadout: Loadout::new(),
            catalog: PartCatalog::standard(),
            config: SimConfig::default(),
        }
    }
}

#[godot_api]
impl RocketBuilder {
    // ==========================================
    // Signals
    // ==========================================

    /// Emitted after any part is placed or removed
    #[signal]
    fn loadout_changed();

    // ==========================================
    // Configuration
    // ==========================================

    /// Replace the simulation constants from TOML text
    /// Returns false (and keeps the old values) if the text is rejected
    #[func]
    pub fn apply_config_toml(&mut self, source: GString) -> bool {
        match SimConfig::from_toml_str(&source.to_string()) {
            Ok(config) => {
                self.config = config;
                self.emit_loadout_changed();
                true
            }
            Err(err) => {
                godot_warn!("RocketBuilder: config rejected: {}", err);
                false
            }
        }
    }

    // ==========================================
    // Part Palette
    // ==========================================

    #[func]
    pub fn get_catalog_size(&self) -> i32 {
        self.catalog.len() as i32
    }

    #[func]
    pub fn get_catalog_part_id(&self, index: i32) -> GString {
        self.catalog_entry(index)
            .map(|spec| GString::from(spec.id.as_str()))
            .unwrap_or_default()
    }

    #[func]
    pub fn get_catalog_part_name(&self, index: i32) -> GString {
        self.catalog_entry(index)
            .map(|spec| GString::from(spec.display_name.as_str()))
            .unwrap_or_default()
    }

    /// Lowercase kind name: cockpit, engine, hull or wing
    #[func]
    pub fn get_catalog_part_kind(&self, index: i32) -> GString {
        self.catalog_entry(index)
            .map(|spec| GString::from(spec.kind.name()))
            .unwrap_or_default()
    }

    /// Weight in kg
    #[func]
    pub fn get_catalog_part_weight(&self, index: i32) -> f64 {
        self.catalog_entry(index).map(|spec| spec.weight_kg).unwrap_or(0.0)
    }

    /// Thrust in kN
    #[func]
    pub fn get_catalog_part_thrust(&self, index: i32) -> f64 {
        self.catalog_entry(index).map(|spec| spec.thrust_kn).unwrap_or(0.0)
    }

    #[func]
    pub fn get_catalog_part_fuel_capacity(&self, index: i32) -> f64 {
        self.catalog_entry(index).map(|spec| spec.fuel_capacity).unwrap_or(0.0)
    }

    // ==========================================
    // Grid Editing
    // ==========================================

    /// Drop a palette part onto a cell
    /// Returns false if the cell is taken, off the grid, or the id is unknown
    #[func]
    pub fn place_part(&mut self, part_id: GString, row: i32, col: i32) -> bool {
        let Some((row, col)) = grid_cell(row, col) else {
            godot_warn!("RocketBuilder: negative cell ({}, {})", row, col);
            return false;
        };

        let placed = self
            .loadout
            .place_from_catalog(&self.catalog, &part_id.to_string(), row, col)
            .map(|part| part.id().to_string());
        match placed {
            Ok(id) => {
                godot_print!("Placed {} at ({}, {})", id, row, col);
                self.emit_loadout_changed();
                true
            }
            Err(err) => {
                godot_warn!("RocketBuilder: {}", err);
                false
            }
        }
    }

    /// Drop a part that is not in the palette (e.g. from a mod or a saved layout)
    #[func]
    pub fn place_custom_part(
        &mut self,
        kind: GString,
        part_id: GString,
        weight_kg: f64,
        thrust_kn: f64,
        fuel_capacity: f64,
        row: i32,
        col: i32,
    ) -> bool {
        let kind: PartKind = match kind.to_string().parse() {
            Ok(kind) => kind,
            Err(err) => {
                godot_warn!("RocketBuilder: {}", err);
                return false;
            }
        };
        let Some((row, col)) = grid_cell(row, col) else {
            godot_warn!("RocketBuilder: negative cell ({}, {})", row, col);
            return false;
        };

        let id = part_id.to_string();
        let spec = PartSpec::new(kind, &id, &id, weight_kg.max(0.0))
            .with_thrust(thrust_kn.max(0.0))
            .with_fuel_capacity(fuel_capacity.max(0.0));

        match self.loadout.place(&spec, row, col).map(|_| ()) {
            Ok(()) => {
                self.emit_loadout_changed();
                true
            }
            Err(err) => {
                godot_warn!("RocketBuilder: {}", err);
                false
            }
        }
    }

    /// Remove whatever is on a cell (grid click)
    /// Returns false if the cell was empty
    #[func]
    pub fn remove_part_at(&mut self, row: i32, col: i32) -> bool {
        let removed = grid_cell(row, col).and_then(|(row, col)| self.loadout.remove_at(row, col));
        match removed {
            Some(part) => {
                godot_print!("Removed {} from ({}, {})", part.id(), part.row, part.col);
                self.emit_loadout_changed();
                true
            }
            None => false,
        }
    }

    #[func]
    pub fn clear_grid(&mut self) {
        self.loadout.clear();
        self.emit_loadout_changed();
    }

    // ==========================================
    // Grid Queries
    // ==========================================

    #[func]
    pub fn get_grid_rows(&self) -> i32 {
        self.loadout.rows() as i32
    }

    #[func]
    pub fn get_grid_cols(&self) -> i32 {
        self.loadout.cols() as i32
    }

    #[func]
    pub fn get_part_count(&self) -> i32 {
        self.loadout.len() as i32
    }

    /// Id of the part on a cell, or empty string
    #[func]
    pub fn get_part_id_at(&self, row: i32, col: i32) -> GString {
        grid_cell(row, col)
            .and_then(|(row, col)| self.loadout.part_at(row, col))
            .map(|part| GString::from(part.id()))
            .unwrap_or_default()
    }

    /// Model-space offset of the nth placed part, for the 3D preview
    #[func]
    pub fn get_part_render_offset(&self, index: i32) -> Vector2 {
        self.placed_part(index)
            .map(|part| {
                let (x, y) = part.render_offset();
                Vector2::new(x as f32, y as f32)
            })
            .unwrap_or(Vector2::ZERO)
    }

    /// Material for the nth placed part: nose, shuttle_nose, engine, hull or tank
    #[func]
    pub fn get_part_finish(&self, index: i32) -> GString {
        let Some(part) = self.placed_part(index) else {
            return GString::new();
        };
        let finish = match part.spec.finish() {
            PartFinish::Nose => "nose",
            PartFinish::ShuttleNose => "shuttle_nose",
            PartFinish::Engine => "engine",
            PartFinish::Hull => "hull",
            PartFinish::Tank => "tank",
        };
        GString::from(finish)
    }

    #[func]
    pub fn get_part_kind(&self, index: i32) -> GString {
        self.placed_part(index)
            .map(|part| GString::from(part.kind().name()))
            .unwrap_or_default()
    }

    // ==========================================
    // Stats
    // ==========================================

    /// Total weight in kg
    #[func]
    pub fn get_total_weight(&self) -> f64 {
        self.report().stats.totals.weight_kg
    }

    /// Total thrust in kN
    #[func]
    pub fn get_total_thrust(&self) -> f64 {
        self.report().stats.totals.thrust_kn
    }

    /// Fuel capacity including the base allowance
    #[func]
    pub fn get_total_fuel_capacity(&self) -> f64 {
        self.report().stats.totals.fuel_capacity
    }

    #[func]
    pub fn get_thrust_to_weight(&self) -> f64 {
        self.report().stats.thrust_to_weight
    }

    #[func]
    pub fn get_estimated_top_speed(&self) -> f64 {
        self.report().stats.estimated_top_speed
    }

    /// Status bar fill levels as [weight, thrust, fuel, top_speed], each 0..1
    #[func]
    pub fn get_stat_gauges(&self) -> PackedFloat64Array {
        let gauges = self.report().stats.gauges();
        PackedFloat64Array::from(&[gauges.weight, gauges.thrust, gauges.fuel, gauges.top_speed][..])
    }

    // ==========================================
    // Launch Readiness
    // ==========================================

    #[func]
    pub fn is_launch_ready(&self) -> bool {
        self.report().readiness.is_ready()
    }

    /// Reasons the launch button is disabled (empty when ready)
    #[func]
    pub fn get_launch_blockers(&self) -> PackedStringArray {
        let reasons: Vec<GString> = self
            .report()
            .readiness
            .blockers()
            .iter()
            .map(|blocker| GString::from(blocker.reason()))
            .collect();
        PackedStringArray::from(reasons.as_slice())
    }

    #[func]
    pub fn get_status_message(&self) -> GString {
        GString::from(self.report().readiness.message().as_str())
    }
}

impl RocketBuilder {
    fn emit_loadout_changed(&mut self) {
        self.base_mut().emit_signal("loadout_changed", &[]);
    }

    fn report(&self) -> LoadoutReport {
        self.loadout.report(&self.config)
    }

    fn catalog_entry(&self, index: i32) -> Option<&PartSpec> {
        usize::try_from(index).ok().and_then(|i| self.catalog.entries().get(i))
    }

    fn placed_part(&self, index: i32) -> Option<&crate::part::Part> {
        usize::try_from(index).ok().and_then(|i| self.loadout.parts().get(i))
    }

    /// The loadout and constants a flight should start from
    pub fn snapshot(&self) -> (Loadout, SimConfig) {
        (self.loadout.clone(), self.config.clone())
    }
}

/// GDScript hands cells over as signed ints
fn grid_cell(row: i32, col: i32) -> Option<(usize, usize)> {
    Some((usize::try_from(row).ok()?, usize::try_from(col).ok()?))
}
