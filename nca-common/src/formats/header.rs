//! NCA file header (24 bytes)
//!
//! # Layout
//! ```text
//! 0x00: type_tag [u8; 4]         - ASCII, NUL padded, not terminated on disk
//! 0x04: compression_tag [u8; 4]  - always "NONE"
//! 0x08: asset_id u64 LE          - FNV-1a of the output file name
//! 0x10: blob_size u64 LE         - byte length of the blob that follows
//! ```

use std::fmt;
use std::str::FromStr;

use crate::cursor::ByteReader;
use crate::error::{NcaError, Result};

/// The only compression algorithm currently accepted.
pub const COMPRESSION_NONE: [u8; 4] = *b"NONE";

/// File extension for NCA files
pub const NCA_EXTENSION: &str = "nca";

/// Every kind of asset an NCA file can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetType {
    AudioClip,
    ConcaveCollider,
    CubeMap,
    HullCollider,
    Mesh,
    Shader,
    SkeletalAnimationClip,
    Texture,
}

/// Tag table: (type, on-disk tag, manifest name).
const ASSET_TYPES: [(AssetType, [u8; 4], &str); 8] = [
    (AssetType::AudioClip, *b"CLIP", "audio-clip"),
    (AssetType::ConcaveCollider, *b"CONC", "concave-collider"),
    (AssetType::CubeMap, *b"CUBE", "cube-map"),
    (AssetType::HullCollider, *b"HULL", "hull-collider"),
    (AssetType::Mesh, *b"MESH", "mesh"),
    (AssetType::Shader, *b"SHAD", "shader"),
    (AssetType::SkeletalAnimationClip, *b"SKEL", "skeletal-animation"),
    (AssetType::Texture, *b"TEXT", "texture"),
];

impl AssetType {
    /// All asset types in tag table order
    pub fn all() -> impl Iterator<Item = AssetType> {
        ASSET_TYPES.iter().map(|(ty, _, _)| *ty)
    }

    // Table rows follow the enum declaration order
    fn entry(self) -> &'static (AssetType, [u8; 4], &'static str) {
        &ASSET_TYPES[self as usize]
    }

    /// Four character tag written into the header
    pub fn tag(self) -> [u8; 4] {
        self.entry().1
    }

    pub fn tag_str(self) -> &'static str {
        // Tags are ASCII literals
        std::str::from_utf8(&self.entry().1).unwrap_or("????")
    }

    /// Kebab-case name used by manifests and the command line
    pub fn name(self) -> &'static str {
        self.entry().2
    }

    /// Look up a type by its on-disk tag
    pub fn from_tag(tag: [u8; 4]) -> Result<Self> {
        ASSET_TYPES
            .iter()
            .find(|(_, t, _)| *t == tag)
            .map(|(ty, _, _)| *ty)
            .ok_or_else(|| NcaError::UnknownAssetType(tag_to_string(&tag)))
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssetType {
    type Err = NcaError;

    /// Parses manifest names case-insensitively ("mesh", "Hull-Collider", ...)
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();
        ASSET_TYPES
            .iter()
            .find(|(_, _, name)| *name == lower)
            .map(|(ty, _, _)| *ty)
            .ok_or_else(|| NcaError::UnknownAssetType(s.to_string()))
    }
}

/// Pad (or cut) a tag to exactly four bytes, NUL filling the tail.
pub fn encode_tag(tag: &str) -> [u8; 4] {
    let mut out = [0u8; 4];
    for (dst, src) in out.iter_mut().zip(tag.bytes()) {
        *dst = src;
    }
    out
}

/// Render a raw tag for comparison and messages, stopping at the first NUL.
pub fn tag_to_string(tag: &[u8; 4]) -> String {
    let end = tag.iter().position(|&b| b == 0).unwrap_or(tag.len());
    String::from_utf8_lossy(&tag[..end]).into_owned()
}

/// Common header preceding every asset blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct NcaHeader {
    pub type_tag: [u8; 4],
    pub compression_tag: [u8; 4],
    pub asset_id: u64,
    pub blob_size: u64,
}

impl NcaHeader {
    pub const SIZE: usize = 24;

    pub fn new(asset_type: AssetType, asset_id: u64, blob_size: u64) -> Self {
        Self {
            type_tag: asset_type.tag(),
            compression_tag: COMPRESSION_NONE,
            asset_id,
            blob_size,
        }
    }

    /// Header from a raw tag string; shorter tags are NUL padded
    pub fn with_tag(type_tag: &str, asset_id: u64, blob_size: u64) -> Self {
        Self {
            type_tag: encode_tag(type_tag),
            compression_tag: COMPRESSION_NONE,
            asset_id,
            blob_size,
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.type_tag);
        bytes[4..8].copy_from_slice(&self.compression_tag);
        bytes[8..16].copy_from_slice(&self.asset_id.to_le_bytes());
        bytes[16..24].copy_from_slice(&self.blob_size.to_le_bytes());
        bytes
    }

    /// Read header from the start of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read(&mut ByteReader::new(bytes))
    }

    /// Read header at the reader's position. Tags are not validated here.
    pub fn read(reader: &mut ByteReader<'_>) -> Result<Self> {
        if reader.remaining() < Self::SIZE {
            return Err(NcaError::OutOfBounds {
                requested: Self::SIZE as u64,
                remaining: reader.remaining() as u64,
            });
        }
        Ok(Self {
            type_tag: reader.read_array()?,
            compression_tag: reader.read_array()?,
            asset_id: reader.read_u64()?,
            blob_size: reader.read_u64()?,
        })
    }

    pub fn type_tag_str(&self) -> String {
        tag_to_string(&self.type_tag)
    }

    pub fn compression_tag_str(&self) -> String {
        tag_to_string(&self.compression_tag)
    }

    /// Asset type named by the tag
    pub fn asset_type(&self) -> Result<AssetType> {
        AssetType::from_tag(self.type_tag)
    }

    /// Require the given type tag and an uncompressed blob
    pub fn validate(&self, expected: AssetType) -> Result<()> {
        if self.type_tag != expected.tag() {
            return Err(NcaError::FormatMismatch {
                actual: self.type_tag_str(),
                expected: expected.tag_str().to_string(),
            });
        }
        self.validate_compression()
    }

    pub fn validate_compression(&self) -> Result<()> {
        if self.compression_tag != COMPRESSION_NONE {
            return Err(NcaError::UnsupportedCompression {
                actual: self.compression_tag_str(),
            });
        }
        Ok(())
    }

    /// Total file size (header + blob)
    pub fn file_size(&self) -> u64 {
        (Self::SIZE as u64).saturating_add(self.blob_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_size() {
        assert_eq!(NcaHeader::SIZE, 24);
        assert_eq!(NcaHeader::new(AssetType::Mesh, 0, 0).to_bytes().len(), 24);
    }

    #[test]
    fn test_header_roundtrip() {
        let header = NcaHeader::new(AssetType::Texture, 0xDEAD_BEEF, 1024);
        let bytes = header.to_bytes();

        assert_eq!(&bytes[0..4], b"TEXT");
        assert_eq!(&bytes[4..8], b"NONE");

        let parsed = NcaHeader::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, header);
        assert_eq!(parsed.type_tag_str(), "TEXT");
        assert_eq!(parsed.compression_tag_str(), "NONE");
        assert_eq!(parsed.file_size(), 24 + 1024);
    }

    #[test]
    fn test_header_parsing() {
        let data = [
            b'H', b'U', b'L', b'L', // type tag
            b'N', b'O', b'N', b'E', // compression tag
            0x2A, 0, 0, 0, 0, 0, 0, 0, // asset id = 42
            0x10, 0, 0, 0, 0, 0, 0, 0, // blob size = 16
        ];

        let header = NcaHeader::from_bytes(&data).unwrap();
        assert_eq!(header.asset_type().unwrap(), AssetType::HullCollider);
        assert_eq!(header.asset_id, 42);
        assert_eq!(header.blob_size, 16);
    }

    #[test]
    fn test_short_tag_is_nul_padded() {
        let header = NcaHeader::with_tag("AB", 1, 2);
        assert_eq!(header.type_tag, [b'A', b'B', 0, 0]);
        assert_eq!(header.type_tag_str(), "AB");
    }

    #[test]
    fn test_header_from_short_bytes() {
        let err = NcaHeader::from_bytes(&[0u8; 23]).unwrap_err();
        assert_eq!(
            err,
            NcaError::OutOfBounds {
                requested: 24,
                remaining: 23
            }
        );
    }

    #[test]
    fn test_validate_rejects_wrong_tag() {
        let header = NcaHeader::new(AssetType::HullCollider, 0, 0);
        assert_eq!(
            header.validate(AssetType::Mesh),
            Err(NcaError::FormatMismatch {
                actual: "HULL".to_string(),
                expected: "MESH".to_string()
            })
        );
    }

    #[test]
    fn test_validate_rejects_compression() {
        let mut header = NcaHeader::new(AssetType::Mesh, 0, 0);
        header.compression_tag = *b"LZ4\0";
        assert_eq!(
            header.validate(AssetType::Mesh),
            Err(NcaError::UnsupportedCompression {
                actual: "LZ4".to_string()
            })
        );
    }

    #[test]
    fn test_tag_table() {
        for ty in AssetType::all() {
            assert_eq!(ty.entry().0, ty);
            assert_eq!(AssetType::from_tag(ty.tag()).unwrap(), ty);
            assert_eq!(ty.name().parse::<AssetType>().unwrap(), ty);
        }
        assert_eq!(AssetType::SkeletalAnimationClip.tag_str(), "SKEL");
        assert_eq!("Hull-Collider".parse::<AssetType>().unwrap(), AssetType::HullCollider);
        assert!(AssetType::from_tag(*b"XXXX").is_err());
        assert!("sprite".parse::<AssetType>().is_err());
    }
}
