//! Shared encode/decode plumbing for asset blobs.
//!
//! Every asset kind implements [`NcaAsset`]; the generic [`encode`] and
//! [`decode`] functions own the header framing and the exact-size checks so
//! that the per-kind codecs only describe their blob layout.

use super::header::{AssetType, NcaHeader};
use crate::cursor::{ByteReader, ByteWriter};
use crate::error::{NcaError, Result};

/// Trait for asset values stored as an NCA blob.
///
/// # Example
///
/// ```
/// use nca_common::{decode, encode, HullCollider, NcaAsset};
/// use glam::Vec3;
///
/// let hull = HullCollider {
///     extents: Vec3::splat(2.0),
///     max_extent: 1.0,
///     vertices: vec![Vec3::X, Vec3::Y, Vec3::Z],
/// };
///
/// let bytes = encode(&hull, 7).unwrap();
/// let (header, decoded) = decode::<HullCollider>(&bytes).unwrap();
/// assert_eq!(header.blob_size, hull.blob_size());
/// assert_eq!(decoded, hull);
/// ```
pub trait NcaAsset: Sized {
    /// Type tag written into the header
    const ASSET_TYPE: AssetType;

    /// Check internal consistency, e.g. pixel data that matches its
    /// dimensions. [`encode`] runs this before sizing or writing anything.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Exact number of bytes [`NcaAsset::write_blob`] produces.
    fn blob_size(&self) -> u64;

    /// Serialize the blob (no header). Assumes [`NcaAsset::validate`] passed.
    fn write_blob(&self, writer: &mut ByteWriter) -> Result<()>;

    /// Deserialize the blob. The reader is bounded to exactly the declared
    /// blob, so implementations may consume "the rest" of it.
    fn read_blob(reader: &mut ByteReader<'_>) -> Result<Self>;
}

/// Encode an asset into a complete NCA file image (header + blob).
pub fn encode<T: NcaAsset>(asset: &T, asset_id: u64) -> Result<Vec<u8>> {
    asset.validate()?;
    let header = NcaHeader::new(T::ASSET_TYPE, asset_id, asset.blob_size());
    let capacity = usize::try_from(header.file_size()).unwrap_or(NcaHeader::SIZE);
    let mut writer = ByteWriter::with_capacity(capacity);
    writer.write(&header.to_bytes());
    asset.write_blob(&mut writer)?;

    debug_assert_eq!(
        writer.len() as u64,
        header.file_size(),
        "{} blob size calculation drifted from its encoder",
        T::ASSET_TYPE
    );

    Ok(writer.into_inner())
}

/// Decode a complete NCA file image of a specific asset kind.
pub fn decode<T: NcaAsset>(bytes: &[u8]) -> Result<(NcaHeader, T)> {
    let mut reader = ByteReader::new(bytes);
    let header = NcaHeader::read(&mut reader)?;
    header.validate(T::ASSET_TYPE)?;
    let blob = framed_blob(&header, &mut reader)?;
    let asset = decode_blob(&header, blob, T::read_blob)?;
    Ok((header, asset))
}

/// Slice out the blob following the header, requiring it to be exactly
/// `header.blob_size` bytes with nothing trailing.
pub(crate) fn framed_blob<'a>(
    header: &NcaHeader,
    reader: &mut ByteReader<'a>,
) -> Result<&'a [u8]> {
    let available = reader.remaining();
    if available as u64 != header.blob_size {
        return Err(NcaError::TruncatedOrOverlongBlob {
            declared: header.blob_size,
            actual: available as u64,
        });
    }
    reader.read(available)
}

/// Run a blob decoder and require it to consume every byte.
///
/// Running off the end of the blob is reported as a truncated blob rather than
/// a raw cursor error, since the header promised more data than exists.
pub(crate) fn decode_blob<T>(
    header: &NcaHeader,
    blob: &[u8],
    read: impl FnOnce(&mut ByteReader<'_>) -> Result<T>,
) -> Result<T> {
    let mut reader = ByteReader::new(blob);
    let value = read(&mut reader).map_err(|err| match err {
        NcaError::OutOfBounds { requested, .. } => NcaError::TruncatedOrOverlongBlob {
            declared: header.blob_size,
            actual: reader.position() as u64 + requested,
        },
        other => other,
    })?;

    if reader.remaining() != 0 {
        return Err(NcaError::TruncatedOrOverlongBlob {
            declared: header.blob_size,
            actual: reader.position() as u64,
        });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{AudioClip, HullCollider, Texture};
    use glam::Vec3;

    fn sample_hull() -> HullCollider {
        HullCollider {
            extents: Vec3::new(1.0, 2.0, 3.0),
            max_extent: 1.5,
            vertices: vec![Vec3::ONE, Vec3::NEG_ONE],
        }
    }

    #[test]
    fn test_encode_writes_header_then_blob() {
        let hull = sample_hull();
        let bytes = encode(&hull, 99).unwrap();
        let header = NcaHeader::from_bytes(&bytes).unwrap();

        assert_eq!(header.type_tag_str(), "HULL");
        assert_eq!(header.asset_id, 99);
        assert_eq!(header.blob_size, hull.blob_size());
        assert_eq!(bytes.len() as u64, header.file_size());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode(&sample_hull(), 1).unwrap();
        bytes.push(0);

        assert!(matches!(
            decode::<HullCollider>(&bytes),
            Err(NcaError::TruncatedOrOverlongBlob { .. })
        ));
    }

    #[test]
    fn test_missing_last_byte_rejected() {
        let bytes = encode(&sample_hull(), 1).unwrap();
        let truncated = &bytes[..bytes.len() - 1];

        let declared = sample_hull().blob_size();
        assert_eq!(
            decode::<HullCollider>(truncated),
            Err(NcaError::TruncatedOrOverlongBlob {
                declared,
                actual: declared - 1
            })
        );
    }

    #[test]
    fn test_inner_count_overrun_reported_as_truncation() {
        let hull = sample_hull();
        let mut bytes = encode(&hull, 1).unwrap();
        // Vertex count lives after extents (12) + max extent (4)
        let count_offset = NcaHeader::SIZE + 16;
        bytes[count_offset] = 3;

        assert!(matches!(
            decode::<HullCollider>(&bytes),
            Err(NcaError::TruncatedOrOverlongBlob { .. })
        ));
    }

    #[test]
    fn test_underconsumed_blob_rejected() {
        let hull = sample_hull();
        let mut bytes = encode(&hull, 1).unwrap();
        // Claim one vertex fewer than written; the last 12 bytes go unread
        let count_offset = NcaHeader::SIZE + 16;
        bytes[count_offset] = 1;

        assert_eq!(
            decode::<HullCollider>(&bytes),
            Err(NcaError::TruncatedOrOverlongBlob {
                declared: hull.blob_size(),
                actual: hull.blob_size() - 12
            })
        );
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let bytes = encode(&sample_hull(), 1).unwrap();
        assert_eq!(
            decode::<Texture>(&bytes).unwrap_err(),
            NcaError::FormatMismatch {
                actual: "HULL".to_string(),
                expected: "TEXT".to_string()
            }
        );
        assert!(matches!(
            decode::<AudioClip>(&bytes),
            Err(NcaError::FormatMismatch { .. })
        ));
    }

    #[test]
    fn test_header_only_file_rejected() {
        let bytes = encode(&sample_hull(), 1).unwrap();
        assert!(matches!(
            decode::<HullCollider>(&bytes[..NcaHeader::SIZE]),
            Err(NcaError::TruncatedOrOverlongBlob { actual: 0, .. })
        ));
    }
}
