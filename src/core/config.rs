//! Trip file loading. The trip document is plain YAML; the default
//! location is resolved through the platform project directories, with a
//! `--trip-path` override at the CLI.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::{fs, path::PathBuf};
use tracing::debug;

use crate::core::trip::Trip;

impl Trip {
    pub fn load() -> Result<Self> {
        debug!("Loading trip from the default path");
        let trip_path = Self::default_trip_path()?;
        Self::load_from_path(&trip_path)
    }

    pub fn default_trip_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "tripsplit", "tripsplit")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("trip.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let trip_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read trip file: {}", path.as_ref().display()))?;

        let trip: Self = serde_yaml::from_str(&trip_str)
            .with_context(|| format!("Failed to parse trip file: {}", path.as_ref().display()))?;
        debug!(trip = %trip.name, "Successfully loaded trip");
        Ok(trip)
    }
}
