use thiserror::Error;

/// Rejected edits to the build grid
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} build grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("cell ({row}, {col}) is already occupied by {occupant}")]
    CellOccupied {
        row: usize,
        col: usize,
        occupant: String,
    },

    #[error("unknown part kind: {0}")]
    UnknownPartKind(String),

    #[error("no catalog part with id {0}")]
    UnknownCatalogPart(String),
}

/// Problems loading or validating a [`crate::config::SimConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}
