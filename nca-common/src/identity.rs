//! Asset identity.
//!
//! An asset id is the 64-bit FNV-1a hash of the output file name (not the
//! content). Two assets written under the same file name always share an id,
//! which is what lets the engine look them up by name.

use std::path::Path;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hash
pub const fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Asset id for an output path: the hash of its file name only.
///
/// A path without a file name component hashes to the empty-string id.
pub fn asset_id_for_path(path: &Path) -> u64 {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    fnv1a(name.as_bytes())
}
