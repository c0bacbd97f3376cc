pub mod snapshot;

pub use snapshot::{Snapshot, SNAPSHOT_VERSION};

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::model::Dataset;

/// Get the default dataset file path (~/.config/site-rank/dataset.json)
pub fn get_data_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join("dataset.json"))
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset file at {}", path.display()))?;

    let snapshot: Snapshot = serde_json::from_reader(file)
        .with_context(|| format!("Failed to parse dataset JSON in {}", path.display()))?;

    if snapshot.version != SNAPSHOT_VERSION {
        anyhow::bail!("Unsupported dataset version: {}", snapshot.version);
    }

    Ok(snapshot)
}

fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, snapshot).context("Failed to serialize dataset")?;

    file.commit()
        .with_context(|| format!("Failed to save dataset to {}", path.display()))?;

    Ok(())
}

/// Load the working dataset.
///
/// If the file doesn't exist, returns the sample dataset.
/// Loaded data is validated before it is returned.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        info!(path = %path.display(), "no dataset file, using sample data");
        return Ok(Dataset::sample());
    }

    let snapshot = read_snapshot(path)?;
    let dataset = snapshot
        .into_dataset()
        .with_context(|| format!("Invalid dataset in {}", path.display()))?;
    debug!(
        criteria = dataset.criteria().len(),
        locations = dataset.locations().len(),
        "loaded dataset"
    );
    Ok(dataset)
}

/// Save the working dataset atomically.
pub fn save_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    write_snapshot(path, &Snapshot::from_dataset(dataset))?;
    debug!(path = %path.display(), "saved dataset");
    Ok(())
}

/// Write a timestamped copy of the dataset for sharing.
pub fn export_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    write_snapshot(path, &Snapshot::exported(dataset))
}

/// Read a dataset previously written by [`export_dataset`] (or [`save_dataset`]).
///
/// Unlike [`load_dataset`], a missing file is an error.
pub fn import_dataset(path: &Path) -> Result<Dataset> {
    let snapshot = read_snapshot(path)?;
    snapshot
        .into_dataset()
        .with_context(|| format!("Invalid dataset in {}", path.display()))
}
