//! nca.toml manifest parsing
//!
//! ```toml
//! [global]
//! output_directory = "out"
//!
//! [[textures]]
//! source = "art/brick.png"
//!
//! [[meshes]]
//! source = "models/crate.glb"
//! name = "crate"
//! internal_name = "CrateMesh"
//! ```

use anyhow::{Context, Result, bail};
use hashbrown::HashMap;
use nca_common::AssetType;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::output::output_path;

/// nca.toml manifest structure
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub global: GlobalSection,
    #[serde(default)]
    pub textures: Vec<TargetEntry>,
    #[serde(default)]
    pub cube_maps: Vec<TargetEntry>,
    #[serde(default)]
    pub audio_clips: Vec<TargetEntry>,
    #[serde(default)]
    pub meshes: Vec<TargetEntry>,
    #[serde(default)]
    pub hull_colliders: Vec<TargetEntry>,
    #[serde(default)]
    pub concave_colliders: Vec<TargetEntry>,
    #[serde(default)]
    pub skeletal_animations: Vec<TargetEntry>,
}

/// Options shared by every target
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlobalSection {
    /// Relative to the manifest's directory
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
}

impl Default for GlobalSection {
    fn default() -> Self {
        Self {
            output_directory: default_output_directory(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("./")
}

/// One `[[kind]]` entry
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetEntry {
    pub source: PathBuf,
    /// Output file stem; defaults to the source stem
    pub name: Option<String>,
    /// Mesh or animation to pick inside the source file
    pub internal_name: Option<String>,
}

/// A fully resolved build target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub kind: AssetType,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub internal_name: Option<String>,
}

/// Load and parse a manifest file
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    parse_manifest(&content).with_context(|| format!("Failed to parse manifest: {:?}", path))
}

pub fn parse_manifest(content: &str) -> Result<Manifest> {
    Ok(toml::from_str(content)?)
}

impl Manifest {
    /// Every entry with its kind, in manifest section order
    pub fn entries(&self) -> impl Iterator<Item = (AssetType, &TargetEntry)> {
        [
            (AssetType::Texture, &self.textures),
            (AssetType::CubeMap, &self.cube_maps),
            (AssetType::AudioClip, &self.audio_clips),
            (AssetType::Mesh, &self.meshes),
            (AssetType::HullCollider, &self.hull_colliders),
            (AssetType::ConcaveCollider, &self.concave_colliders),
            (AssetType::SkeletalAnimationClip, &self.skeletal_animations),
        ]
        .into_iter()
        .flat_map(|(kind, entries)| entries.iter().map(move |entry| (kind, entry)))
    }

    /// Resolve sources against `base_dir` and compute destinations.
    ///
    /// `output_override` replaces the manifest's output directory. Two targets
    /// writing the same file are rejected.
    pub fn targets(&self, base_dir: &Path, output_override: Option<&Path>) -> Result<Vec<Target>> {
        let output_dir = match output_override {
            Some(dir) => dir.to_path_buf(),
            None => base_dir.join(&self.global.output_directory),
        };

        let mut seen: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut targets = Vec::new();
        for (kind, entry) in self.entries() {
            let source = base_dir.join(&entry.source);
            let name = match &entry.name {
                Some(name) => name.clone(),
                None => entry
                    .source
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .with_context(|| format!("Cannot derive a name from {:?}", entry.source))?,
            };
            let destination = output_path(&output_dir, &name);

            if let Some(previous) = seen.insert(destination.clone(), source.clone()) {
                bail!(
                    "{:?} and {:?} both write {:?}; give one of them a different name",
                    previous,
                    source,
                    destination
                );
            }

            targets.push(Target {
                kind,
                source,
                destination,
                internal_name: entry.internal_name.clone(),
            });
        }
        Ok(targets)
    }
}

/// Check that every source exists without building anything
pub fn validate(targets: &[Target]) -> Result<()> {
    let missing: Vec<_> = targets
        .iter()
        .filter(|t| !t.source.is_file())
        .map(|t| t.source.display().to_string())
        .collect();
    if !missing.is_empty() {
        bail!("Missing source files:\n  {}", missing.join("\n  "));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
        [global]
        output_directory = "build"

        [[textures]]
        source = "art/brick.png"

        [[meshes]]
        source = "models/props.glb"
        name = "barrel"
        internal_name = "Barrel"

        [[hull_colliders]]
        source = "models/props.glb"
        name = "barrel_hull"
    "#;

    #[test]
    fn test_parse_manifest() {
        let manifest = parse_manifest(MANIFEST).unwrap();
        assert_eq!(manifest.global.output_directory, PathBuf::from("build"));
        assert_eq!(manifest.textures.len(), 1);
        assert_eq!(manifest.meshes[0].internal_name.as_deref(), Some("Barrel"));
        assert!(manifest.audio_clips.is_empty());
    }

    #[test]
    fn test_targets_resolve_paths() {
        let manifest = parse_manifest(MANIFEST).unwrap();
        let targets = manifest.targets(Path::new("/project"), None).unwrap();

        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].kind, AssetType::Texture);
        assert_eq!(targets[0].source, PathBuf::from("/project/art/brick.png"));
        assert_eq!(
            targets[0].destination,
            PathBuf::from("/project/build/brick.nca")
        );
        assert_eq!(targets[1].kind, AssetType::Mesh);
        assert_eq!(
            targets[1].destination,
            PathBuf::from("/project/build/barrel.nca")
        );
        assert_eq!(targets[2].kind, AssetType::HullCollider);
    }

    #[test]
    fn test_output_override() {
        let manifest = parse_manifest(MANIFEST).unwrap();
        let targets = manifest
            .targets(Path::new("/project"), Some(Path::new("/tmp/out")))
            .unwrap();
        assert_eq!(targets[0].destination, PathBuf::from("/tmp/out/brick.nca"));
    }

    #[test]
    fn test_duplicate_destination_rejected() {
        let manifest = parse_manifest(
            r#"
            [[textures]]
            source = "a/stone.png"

            [[cube_maps]]
            source = "b/stone.png"
            "#,
        )
        .unwrap();
        assert!(manifest.targets(Path::new("."), None).is_err());
    }

    #[test]
    fn test_unknown_section_rejected() {
        assert!(parse_manifest("[[sprites]]\nsource = \"x.png\"").is_err());
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = parse_manifest("").unwrap();
        assert_eq!(manifest.entries().count(), 0);
        assert_eq!(manifest.global.output_directory, PathBuf::from("./"));
    }
}
