//! YAML Export functionality
//!
//! Exports the complete store to YAML for a human-readable snapshot.

use std::io::Write;

use crate::error::{TrackerError, TrackerResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

/// Export the full store to YAML format
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> TrackerResult<()> {
    let export = FullExport::from_storage(storage)?;

    let export_err = |e: std::io::Error| TrackerError::Export(e.to_string());
    writeln!(writer, "# Finance Tracker Full Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(())
}

/// Read back a YAML export (for verification)
pub fn read_yaml_export(yaml_str: &str) -> TrackerResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| TrackerError::Import(e.to_string()))?;

    export.validate().map_err(TrackerError::Import)?;

    Ok(export)
}
