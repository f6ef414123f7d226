//! Error types
//!
//! `SimError` is the "exhausted" half of every bounded random search in the
//! simulation. Callers absorb it and skip the item; it never reaches the player.

use std::path::PathBuf;

/// A bounded random search gave up
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("no free grid space after {attempts} attempts")]
    GridExhausted { attempts: u32 },

    #[error("{width}x{height} block does not fit in a {grid_width}x{grid_height} grid")]
    BlockTooLarge {
        width: i32,
        height: i32,
        grid_width: i32,
        grid_height: i32,
    },

    #[error("perturbation stayed out of range after {attempts} re-rolls")]
    RerollExhausted { attempts: u32 },

    #[error("pad placement gave up after placing {placed} pad(s)")]
    PadPlacementExhausted { placed: usize },
}

/// Failure reading or writing the settings file
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}
