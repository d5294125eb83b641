//! Manifest build orchestration

use anyhow::{Result, bail};
use rayon::prelude::*;
use std::path::Path;

use crate::convert::import_asset;
use crate::error::ImportError;
use crate::manifest::Target;
use crate::output::write_asset;

/// What happened to one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Built,
    UpToDate,
    /// Named item missing from its source
    Skipped,
}

/// Counts per outcome after a build
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub built: usize,
    pub up_to_date: usize,
    pub skipped: usize,
}

/// Destination exists and is no older than the source
pub fn is_up_to_date(target: &Target) -> bool {
    let modified = |path: &Path| path.metadata().and_then(|m| m.modified()).ok();
    match (modified(&target.destination), modified(&target.source)) {
        (Some(dest), Some(src)) => dest >= src,
        _ => false,
    }
}

/// Convert and write a single target
pub fn build_target(target: &Target, force: bool) -> Result<Outcome> {
    if !force && is_up_to_date(target) {
        tracing::info!("Up-to-date: {:?}", target.destination);
        return Ok(Outcome::UpToDate);
    }

    tracing::debug!(
        "Building {} {:?} -> {:?}",
        target.kind,
        target.source,
        target.destination
    );

    let asset = match import_asset(target.kind, &target.source, target.internal_name.as_deref()) {
        Ok(asset) => asset,
        Err(err) if err.downcast_ref::<ImportError>().is_some() => {
            tracing::warn!("Skipping {:?}: {}", target.destination, err);
            return Ok(Outcome::Skipped);
        }
        Err(err) => return Err(err.context(format!("Failed to convert {:?}", target.source))),
    };
    write_asset(&asset, &target.destination)?;
    Ok(Outcome::Built)
}

/// Build every target in parallel. All targets are attempted; failures are
/// reported together at the end.
pub fn build_all(targets: &[Target], force: bool) -> Result<BuildSummary> {
    let results: Vec<_> = targets
        .par_iter()
        .map(|target| (target, build_target(target, force)))
        .collect();

    let mut summary = BuildSummary::default();
    let mut failures = Vec::new();
    for (target, result) in results {
        match result {
            Ok(Outcome::Built) => summary.built += 1,
            Ok(Outcome::UpToDate) => summary.up_to_date += 1,
            Ok(Outcome::Skipped) => summary.skipped += 1,
            Err(err) => {
                tracing::error!("{:?}: {:#}", target.source, err);
                failures.push(target.source.display().to_string());
            }
        }
    }

    if !failures.is_empty() {
        bail!(
            "{} of {} targets failed: {}",
            failures.len(),
            targets.len(),
            failures.join(", ")
        );
    }

    tracing::info!(
        "Built {}, up-to-date {}, skipped {}",
        summary.built,
        summary.up_to_date,
        summary.skipped
    );
    Ok(summary)
}
