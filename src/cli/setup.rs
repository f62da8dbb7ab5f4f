use crate::core::trip::Trip;
use anyhow::{Context, Result};
use std::path::Path;

/// Creates an example trip file at the default location.
pub fn setup() -> Result<()> {
    setup_at_path(Trip::default_trip_path()?)
}

/// Creates an example trip file at the specified path.
pub fn setup_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if path.exists() {
        anyhow::bail!("Trip file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Include the example trip as a string literal in the binary
    let example_trip = include_str!("../../docs/example_trip.yaml");

    std::fs::write(path, example_trip)
        .with_context(|| format!("Failed to write trip file to {}", path.display()))?;

    tracing::info!("Created example trip at {}", path.display());
    Ok(())
}
