#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Loads overlay tuning from a TOML document.
//!
//! ```toml
//! [settings]
//! magazine_multiplier = 2.0
//! base_turret_damage_multiplier = 1.0
//! per_turret_damage_bonus = 0.25
//! player_damage_penalty_per_turret = 0.25
//! ```
//!
//! Each key is optional. Missing, non-numeric and non-positive values keep their
//! defaults without affecting the other keys.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use better_turrets_core::Tuning;
use thiserror::Error;
use tracing::{debug, warn};

/// File name the adapters look for when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

const SETTINGS_TABLE: &str = "settings";

/// Reasons a configuration document could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config at {}", .path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The document is not valid TOML.
    #[error("failed to parse config toml")]
    Parse(#[from] toml::de::Error),
    /// The document has no `[settings]` table.
    #[error("config has no [settings] table")]
    MissingSettings,
}

/// Parses tuning from TOML text, keeping defaults for unusable keys.
pub fn parse(contents: &str) -> Result<Tuning, ConfigError> {
    let document: toml::Table = contents.parse()?;
    let settings = document
        .get(SETTINGS_TABLE)
        .and_then(toml::Value::as_table)
        .ok_or(ConfigError::MissingSettings)?;

    let mut tuning = Tuning::default();
    read_positive(settings, "magazine_multiplier", &mut tuning.magazine_multiplier);
    read_positive(
        settings,
        "base_turret_damage_multiplier",
        &mut tuning.base_turret_damage_multiplier,
    );
    read_positive(
        settings,
        "per_turret_damage_bonus",
        &mut tuning.per_turret_damage_bonus,
    );
    read_positive(
        settings,
        "player_damage_penalty_per_turret",
        &mut tuning.player_damage_penalty_per_turret,
    );
    Ok(tuning)
}

/// Reads and parses the configuration file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Tuning, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents)
}

/// Loads the configuration at `path`, falling back to defaults on any failure.
#[must_use]
pub fn load_or_default(path: impl AsRef<Path>) -> Tuning {
    let path = path.as_ref();
    match load(path) {
        Ok(tuning) => {
            debug!(path = %path.display(), ?tuning, "loaded config");
            tuning
        }
        Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Tuning::default()
        }
        Err(error) => {
            warn!(path = %path.display(), %error, "ignoring config, using defaults");
            Tuning::default()
        }
    }
}

fn read_positive(settings: &toml::Table, key: &str, target: &mut f32) {
    let Some(value) = settings.get(key) else {
        return;
    };

    let parsed = match value {
        toml::Value::Float(number) => Some(*number as f32),
        toml::Value::Integer(number) => Some(*number as f32),
        _ => None,
    };

    match parsed {
        Some(number) if number > 0.0 => *target = number,
        _ => debug!(key, %value, "ignoring unusable config value"),
    }
}
