//! Texture and cube map blobs (RGBA8)
//!
//! # TEXT layout
//! ```text
//! 0x00: width u32
//! 0x04: height u32
//! 0x08: pixel_data (width × height × 4 bytes)
//! ```
//!
//! # CUBE layout
//! ```text
//! 0x00: face_side_length u32
//! 0x04: pixel_data (side × side × 6 × 4 bytes)
//! ```
//!
//! Faces are stored consecutively in front, back, up, down, right, left order.

use super::blob_size;
use super::header::{AssetType, NcaHeader};
use super::serialization::NcaAsset;
use crate::cursor::{ByteReader, ByteWriter};
use crate::error::{NcaError, Result};

/// Bytes per RGBA8 pixel
pub const BYTES_PER_PIXEL: u64 = 4;

/// Number of cube faces
pub const CUBE_FACE_COUNT: u64 = 6;

fn check_pixel_len(expected: u64, actual: usize) -> Result<()> {
    if actual as u64 != expected {
        return Err(NcaError::PixelDataSizeMismatch {
            expected,
            actual: actual as u64,
        });
    }
    Ok(())
}

/// 2D RGBA8 texture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub pixel_data: Vec<u8>,
}

impl Texture {
    /// Create a texture, checking the pixel buffer against its dimensions
    pub fn new(width: u32, height: u32, pixel_data: Vec<u8>) -> Result<Self> {
        let texture = Self {
            width,
            height,
            pixel_data,
        };
        texture.validate()?;
        Ok(texture)
    }

    /// Byte length the pixel data must have
    pub fn expected_pixel_len(&self) -> u64 {
        texture_pixel_len(self.width, self.height)
    }
}

fn texture_pixel_len(width: u32, height: u32) -> u64 {
    width as u64 * height as u64 * BYTES_PER_PIXEL
}

fn cube_pixel_len(side: u32) -> u64 {
    side as u64 * side as u64 * CUBE_FACE_COUNT * BYTES_PER_PIXEL
}

/// Six square RGBA8 faces of equal size
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CubeMap {
    pub face_side_length: u32,
    pub pixel_data: Vec<u8>,
}

impl CubeMap {
    pub fn new(face_side_length: u32, pixel_data: Vec<u8>) -> Result<Self> {
        let cube = Self {
            face_side_length,
            pixel_data,
        };
        cube.validate()?;
        Ok(cube)
    }

    pub fn expected_pixel_len(&self) -> u64 {
        cube_pixel_len(self.face_side_length)
    }

    /// Byte length of a single face
    pub fn face_len(&self) -> usize {
        (self.face_side_length as usize).pow(2) * BYTES_PER_PIXEL as usize
    }

    /// Pixels of face `index` (0..6), if the data is large enough
    pub fn face(&self, index: usize) -> Option<&[u8]> {
        let len = self.face_len();
        self.pixel_data.get(index * len..(index + 1) * len)
    }
}

impl NcaAsset for Texture {
    const ASSET_TYPE: AssetType = AssetType::Texture;

    fn validate(&self) -> Result<()> {
        check_pixel_len(self.expected_pixel_len(), self.pixel_data.len())
    }

    fn blob_size(&self) -> u64 {
        blob_size::texture(self)
    }

    fn write_blob(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_u32(self.width);
        writer.write_u32(self.height);
        writer.write(&self.pixel_data);
        Ok(())
    }

    fn read_blob(reader: &mut ByteReader<'_>) -> Result<Self> {
        let width = reader.read_u32()?;
        let height = reader.read_u32()?;
        // Pixels are whatever follows; the dimensions decide if that is right
        let remaining = reader.remaining();
        check_pixel_len(texture_pixel_len(width, height), remaining)?;
        let pixel_data = reader.read(remaining)?.to_vec();

        Ok(Self {
            width,
            height,
            pixel_data,
        })
    }
}

impl NcaAsset for CubeMap {
    const ASSET_TYPE: AssetType = AssetType::CubeMap;

    fn validate(&self) -> Result<()> {
        check_pixel_len(self.expected_pixel_len(), self.pixel_data.len())
    }

    fn blob_size(&self) -> u64 {
        blob_size::cube_map(self)
    }

    fn write_blob(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_u32(self.face_side_length);
        writer.write(&self.pixel_data);
        Ok(())
    }

    fn read_blob(reader: &mut ByteReader<'_>) -> Result<Self> {
        let face_side_length = reader.read_u32()?;
        let remaining = reader.remaining();
        check_pixel_len(cube_pixel_len(face_side_length), remaining)?;
        let pixel_data = reader.read(remaining)?.to_vec();

        Ok(Self {
            face_side_length,
            pixel_data,
        })
    }
}

/// Decode a `TEXT` file image.
pub fn decode_texture(bytes: &[u8]) -> Result<(NcaHeader, Texture)> {
    super::decode(bytes)
}

/// Decode a `CUBE` file image.
pub fn decode_cube_map(bytes: &[u8]) -> Result<(NcaHeader, CubeMap)> {
    super::decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::encode;

    fn checkerboard(width: u32, height: u32) -> Vec<u8> {
        (0..width * height)
            .flat_map(|i| {
                if i % 2 == 0 {
                    [255, 255, 255, 255]
                } else {
                    [0, 0, 0, 255]
                }
            })
            .collect()
    }

    #[test]
    fn test_texture_roundtrip() {
        let texture = Texture::new(4, 3, checkerboard(4, 3)).unwrap();
        let bytes = encode(&texture, 77).unwrap();

        assert_eq!(bytes.len(), NcaHeader::SIZE + 8 + 48);

        let (header, decoded) = decode_texture(&bytes).unwrap();
        assert_eq!(header.type_tag_str(), "TEXT");
        assert_eq!(header.asset_id, 77);
        assert_eq!(decoded, texture);
    }

    #[test]
    fn test_texture_pixel_length_must_match() {
        for (len, ok) in [(15usize, false), (16, true), (17, false)] {
            let result = Texture::new(2, 2, vec![0; len]);
            assert_eq!(result.is_ok(), ok, "pixel length {len}");
        }

        assert_eq!(
            Texture::new(2, 2, vec![0; 15]).unwrap_err(),
            NcaError::PixelDataSizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_encode_rejects_inconsistent_texture() {
        let texture = Texture {
            width: 2,
            height: 2,
            pixel_data: vec![0; 17],
        };
        assert!(matches!(
            encode(&texture, 0),
            Err(NcaError::PixelDataSizeMismatch { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_pixel_mismatch() {
        // Well framed blob whose dimensions claim more pixels than stored
        let texture = Texture::new(2, 2, vec![7; 16]).unwrap();
        let mut bytes = encode(&texture, 0).unwrap();
        bytes[NcaHeader::SIZE] = 3;

        assert_eq!(
            decode_texture(&bytes).unwrap_err(),
            NcaError::PixelDataSizeMismatch {
                expected: 24,
                actual: 16
            }
        );
    }

    #[test]
    fn test_zero_sized_texture() {
        let texture = Texture::new(0, 0, Vec::new()).unwrap();
        let bytes = encode(&texture, 0).unwrap();
        let (header, decoded) = decode_texture(&bytes).unwrap();
        assert_eq!(header.blob_size, 8);
        assert!(decoded.pixel_data.is_empty());
    }

    #[test]
    fn test_cube_map_roundtrip() {
        let pixels: Vec<u8> = (0..6u8)
            .flat_map(|face| std::iter::repeat_n(face * 40, 2 * 2 * 4))
            .collect();
        let cube = CubeMap::new(2, pixels).unwrap();

        let bytes = encode(&cube, 3).unwrap();
        let (header, decoded) = decode_cube_map(&bytes).unwrap();

        assert_eq!(header.type_tag_str(), "CUBE");
        assert_eq!(header.blob_size, 4 + 96);
        assert_eq!(decoded.face(0).unwrap(), &[0; 16]);
        assert_eq!(decoded.face(5).unwrap(), &[200; 16]);
        assert!(decoded.face(6).is_none());
        assert_eq!(decoded, cube);
    }

    #[test]
    fn test_cube_map_pixel_length_must_match() {
        assert_eq!(
            CubeMap::new(1, vec![0; 23]).unwrap_err(),
            NcaError::PixelDataSizeMismatch {
                expected: 24,
                actual: 23
            }
        );
    }
}
