//! nca-convert library
//!
//! Imports source assets (images, WAV, glTF) and writes them as `.nca` files.
//! The binary is a thin CLI over these modules.

pub mod analysis;
pub mod animation;
pub mod audio;
pub mod builder;
pub mod convert;
pub mod error;
pub mod geometry;
pub mod inspect;
pub mod manifest;
pub mod output;
pub mod skeleton;
pub mod texture;

pub use builder::{BuildSummary, Outcome, build_all, build_target};
pub use convert::import_asset;
pub use error::ImportError;
pub use inspect::{Report, inspect_file};
pub use manifest::{Manifest, Target, load_manifest};
pub use output::{output_path, write_asset};
