//! Writing encoded assets to disk

use anyhow::{Context, Result};
use nca_common::{Asset, NCA_EXTENSION, asset_id_for_path};
use std::fs;
use std::path::{Path, PathBuf};

/// `<dir>/<name>.nca`
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{NCA_EXTENSION}"))
}

/// Encode `asset` with the id derived from the output file name and write
/// it, creating parent directories. Returns the asset id.
pub fn write_asset(asset: &Asset, output: &Path) -> Result<u64> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }

    let asset_id = asset_id_for_path(output);
    let bytes = asset
        .encode(asset_id)
        .with_context(|| format!("Failed to encode {} for {:?}", asset.asset_type(), output))?;
    fs::write(output, &bytes).with_context(|| format!("Failed to write output: {:?}", output))?;

    tracing::info!(
        "Wrote {} {:?} ({} bytes, id {:#018x})",
        asset.asset_type(),
        output,
        bytes.len(),
        asset_id
    );
    Ok(asset_id)
}
