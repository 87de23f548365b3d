use std::fmt;
use std::str::FromStr;

use crate::constants::layout::{CELL_HEIGHT, CELL_WIDTH, GRID_COLS, GRID_ROWS, WING_OFFSET};
use crate::error::BuildError;

/// Broad category of a rocket part.
/// Launch readiness only cares about cockpits and engines; the rest is mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    Cockpit,
    Engine,
    Hull,
    Wing,
}

impl PartKind {
    pub fn all() -> [PartKind; 4] {
        [PartKind::Cockpit, PartKind::Engine, PartKind::Hull, PartKind::Wing]
    }

    /// Lowercase name used by the part palette
    pub fn name(&self) -> &'static str {
        match self {
            PartKind::Cockpit => "cockpit",
            PartKind::Engine => "engine",
            PartKind::Hull => "hull",
            PartKind::Wing => "wing",
        }
    }

    pub fn from_index(i: usize) -> Option<PartKind> {
        match i {
            0 => Some(PartKind::Cockpit),
            1 => Some(PartKind::Engine),
            2 => Some(PartKind::Hull),
            3 => Some(PartKind::Wing),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            PartKind::Cockpit => 0,
            PartKind::Engine => 1,
            PartKind::Hull => 2,
            PartKind::Wing => 3,
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PartKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PartKind::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BuildError::UnknownPartKind(s.to_string()))
    }
}

/// Surface finish the renderer picks a material for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartFinish {
    /// Red nose cone
    Nose,
    /// White shuttle-style nose cone
    ShuttleNose,
    /// Dark engine bell
    Engine,
    /// Brushed hull plating
    Hull,
    /// Orange fuel tank
    Tank,
}

/// A part as listed in the palette, before it is placed
#[derive(Debug, Clone, PartialEq)]
pub struct PartSpec {
    pub kind: PartKind,
    /// Stable identifier, also used to pick render variants
    pub id: String,
    pub display_name: String,
    pub weight_kg: f64,
    /// Zero for anything that is not an engine
    pub thrust_kn: f64,
    /// Zero unless the part is a tank
    pub fuel_capacity: f64,
}

impl PartSpec {
    pub fn new(kind: PartKind, id: &str, display_name: &str, weight_kg: f64) -> Self {
        Self {
            kind,
            id: id.to_string(),
            display_name: display_name.to_string(),
            weight_kg,
            thrust_kn: 0.0,
            fuel_capacity: 0.0,
        }
    }

    pub fn with_thrust(mut self, thrust_kn: f64) -> Self {
        self.thrust_kn = thrust_kn;
        self
    }

    pub fn with_fuel_capacity(mut self, fuel_capacity: f64) -> Self {
        self.fuel_capacity = fuel_capacity;
        self
    }

    /// Place this spec on a grid cell
    pub fn place_at(&self, row: usize, col: usize) -> Part {
        Part {
            spec: self.clone(),
            row,
            col,
        }
    }

    fn id_lower(&self) -> String {
        self.id.to_ascii_lowercase()
    }

    pub fn is_tank(&self) -> bool {
        self.kind == PartKind::Hull && (self.fuel_capacity > 0.0 || self.id_lower().contains("tank"))
    }

    pub fn finish(&self) -> PartFinish {
        match self.kind {
            PartKind::Cockpit => {
                let id = self.id_lower();
                if id.contains("shuttle") || id.contains("mk1") {
                    PartFinish::ShuttleNose
                } else {
                    PartFinish::Nose
                }
            }
            PartKind::Engine => PartFinish::Engine,
            PartKind::Hull if self.is_tank() => PartFinish::Tank,
            PartKind::Hull | PartKind::Wing => PartFinish::Hull,
        }
    }

    /// Which side of its cell a wing hangs off: -1 left, +1 right, 0 centred
    pub fn wing_side(&self) -> f64 {
        if self.kind != PartKind::Wing {
            return 0.0;
        }
        let id = self.id_lower();
        if id.ends_with("_l") || id.ends_with("left") {
            -1.0
        } else if id.ends_with("_r") || id.ends_with("right") {
            1.0
        } else {
            0.0
        }
    }
}

/// A part placed on the build grid. Never edited in place; removal takes the whole part.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub spec: PartSpec,
    pub row: usize,
    pub col: usize,
}

impl Part {
    pub fn kind(&self) -> PartKind {
        self.spec.kind
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn weight_kg(&self) -> f64 {
        self.spec.weight_kg
    }

    pub fn thrust_kn(&self) -> f64 {
        self.spec.thrust_kn
    }

    pub fn fuel_capacity(&self) -> f64 {
        self.spec.fuel_capacity
    }

    /// Model-space (x, y) of this part in the rocket mesh.
    /// Row 0 is the top of the grid, so it sits highest; columns centre on the grid midline.
    pub fn render_offset(&self) -> (f64, f64) {
        let centre_col = (GRID_COLS as f64 - 1.0) / 2.0;
        let x = (self.col as f64 - centre_col) * CELL_WIDTH + self.spec.wing_side() * WING_OFFSET;
        let y = (GRID_ROWS - 1).saturating_sub(self.row) as f64 * CELL_HEIGHT;
        (x, y)
    }
}

/// The palette of parts a player can drag onto the grid
#[derive(Debug, Clone)]
pub struct PartCatalog {
    entries: Vec<PartSpec>,
}

impl PartCatalog {
    pub fn new(entries: Vec<PartSpec>) -> Self {
        Self { entries }
    }

    /// Stock palette
    pub fn standard() -> Self {
        Self::new(vec![
            PartSpec::new(PartKind::Cockpit, "cockpit_mk1", "Mk1 Command Pod", 50.0),
            PartSpec::new(PartKind::Cockpit, "cockpit_shuttle", "Shuttle Nose", 80.0),
            PartSpec::new(PartKind::Cockpit, "cockpit_capsule", "Capsule", 65.0),
            PartSpec::new(PartKind::Engine, "engine_sparrow", "Sparrow Engine", 100.0).with_thrust(30.0),
            PartSpec::new(PartKind::Engine, "engine_mammoth", "Mammoth Engine", 300.0).with_thrust(150.0),
            PartSpec::new(PartKind::Hull, "hull_segment", "Hull Segment", 40.0),
            PartSpec::new(PartKind::Hull, "fuel_tank", "Fuel Tank", 60.0).with_fuel_capacity(200.0),
            PartSpec::new(PartKind::Hull, "fuel_tank_large", "Large Fuel Tank", 120.0)
                .with_fuel_capacity(500.0),
            PartSpec::new(PartKind::Wing, "wing_l", "Wing (Left)", 20.0),
            PartSpec::new(PartKind::Wing, "wing_r", "Wing (Right)", 20.0),
        ])
    }

    pub fn entries(&self) -> &[PartSpec] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&PartSpec> {
        self.entries.iter().find(|spec| spec.id == id)
    }

    /// Like [`PartCatalog::get`], but an unknown id is a build error
    pub fn lookup(&self, id: &str) -> Result<&PartSpec, BuildError> {
        self.get(id)
            .ok_or_else(|| BuildError::UnknownCatalogPart(id.to_string()))
    }
}

impl Default for PartCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!("cockpit".parse::<PartKind>().unwrap(), PartKind::Cockpit);
        assert_eq!("Engine".parse::<PartKind>().unwrap(), PartKind::Engine);
        assert_eq!(" wing ".parse::<PartKind>().unwrap(), PartKind::Wing);
        assert_eq!(
            "booster".parse::<PartKind>(),
            Err(BuildError::UnknownPartKind("booster".to_string()))
        );
    }

    #[test]
    fn test_kind_index_roundtrip() {
        for kind in PartKind::all() {
            assert_eq!(PartKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(PartKind::from_index(4), None);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = PartCatalog::standard();
        assert!(!catalog.is_empty());

        let engine = catalog.get("engine_sparrow").unwrap();
        assert_eq!(engine.kind, PartKind::Engine);
        assert_eq!(engine.thrust_kn, 30.0);
        assert_eq!(engine.fuel_capacity, 0.0);

        assert_eq!(
            catalog.lookup("warp_drive"),
            Err(BuildError::UnknownCatalogPart("warp_drive".to_string()))
        );
    }

    #[test]
    fn test_only_engines_have_thrust() {
        let catalog = PartCatalog::standard();
        for spec in catalog.entries() {
            if spec.kind != PartKind::Engine {
                assert_eq!(spec.thrust_kn, 0.0, "{} should not produce thrust", spec.id);
            }
        }
        let cockpits = catalog.entries().iter().filter(|spec| spec.kind == PartKind::Cockpit);
        assert_eq!(cockpits.count(), 3);
    }

    #[test]
    fn test_finishes() {
        let catalog = PartCatalog::standard();
        assert_eq!(catalog.get("cockpit_mk1").unwrap().finish(), PartFinish::ShuttleNose);
        assert_eq!(catalog.get("cockpit_shuttle").unwrap().finish(), PartFinish::ShuttleNose);
        assert_eq!(catalog.get("cockpit_capsule").unwrap().finish(), PartFinish::Nose);
        assert_eq!(catalog.get("engine_sparrow").unwrap().finish(), PartFinish::Engine);
        assert_eq!(catalog.get("fuel_tank").unwrap().finish(), PartFinish::Tank);
        assert_eq!(catalog.get("hull_segment").unwrap().finish(), PartFinish::Hull);
        assert_eq!(catalog.get("wing_l").unwrap().finish(), PartFinish::Hull);
    }

    #[test]
    fn test_render_offset() {
        let catalog = PartCatalog::standard();

        // Bottom row, left of centre
        let engine = catalog.get("engine_sparrow").unwrap().place_at(11, 4);
        assert_eq!(engine.render_offset(), (-5.0, 0.0));

        // Top row, right of centre
        let nose = catalog.get("cockpit_mk1").unwrap().place_at(0, 5);
        assert_eq!(nose.render_offset(), (5.0, 165.0));

        // Wings hang outward from their cell
        let left = catalog.get("wing_l").unwrap().place_at(10, 3);
        let right = catalog.get("wing_r").unwrap().place_at(10, 6);
        assert_eq!(left.render_offset(), (-23.0, 15.0));
        assert_eq!(right.render_offset(), (23.0, 15.0));
    }
}
