//! AudioClip blob (tag `CLIP`)
//!
//! Uncompressed stereo samples as 64-bit floats.
//!
//! # Layout
//! ```text
//! 0x00: samples_per_channel u64
//! 0x08: left channel  (samples_per_channel × f64)
//! var:  right channel (samples_per_channel × f64)
//! ```

use super::blob_size;
use super::header::AssetType;
use super::serialization::NcaAsset;
use crate::cursor::{ByteReader, ByteWriter};
use crate::error::{NcaError, Result};

/// Two-channel audio clip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioClip {
    pub samples_per_channel: u64,
    pub left_channel: Vec<f64>,
    pub right_channel: Vec<f64>,
}

impl AudioClip {
    /// Build a clip from two channels, deriving the sample count.
    pub fn from_channels(left_channel: Vec<f64>, right_channel: Vec<f64>) -> Result<Self> {
        let clip = Self {
            samples_per_channel: left_channel.len() as u64,
            left_channel,
            right_channel,
        };
        clip.validate()?;
        Ok(clip)
    }
}

impl NcaAsset for AudioClip {
    const ASSET_TYPE: AssetType = AssetType::AudioClip;

    /// Both channels must hold exactly `samples_per_channel` samples
    fn validate(&self) -> Result<()> {
        for channel in [&self.left_channel, &self.right_channel] {
            if channel.len() as u64 != self.samples_per_channel {
                return Err(NcaError::ChannelLengthMismatch {
                    expected: self.samples_per_channel,
                    actual: channel.len() as u64,
                });
            }
        }
        Ok(())
    }

    fn blob_size(&self) -> u64 {
        blob_size::audio_clip(self)
    }

    fn write_blob(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.write_u64(self.samples_per_channel);
        for &sample in self.left_channel.iter().chain(&self.right_channel) {
            writer.write_f64(sample);
        }
        Ok(())
    }

    fn read_blob(reader: &mut ByteReader<'_>) -> Result<Self> {
        let samples_per_channel = reader.read_u64()?;
        // Both channels must fit in what is left
        let count = samples_per_channel
            .checked_mul(2 * blob_size::F64)
            .ok_or(NcaError::CountOverflow(samples_per_channel))?;
        if count > reader.remaining() as u64 {
            return Err(NcaError::OutOfBounds {
                requested: count,
                remaining: reader.remaining() as u64,
            });
        }

        let n = samples_per_channel as usize;
        let mut read_channel = || -> Result<Vec<f64>> {
            (0..n).map(|_| reader.read_f64()).collect()
        };
        let left_channel = read_channel()?;
        let right_channel = read_channel()?;

        Ok(Self {
            samples_per_channel,
            left_channel,
            right_channel,
        })
    }
}

/// Decode a `CLIP` file image.
pub fn decode_audio_clip(bytes: &[u8]) -> Result<(super::NcaHeader, AudioClip)> {
    super::decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{NcaHeader, decode, encode};

    #[test]
    fn test_audio_clip_roundtrip() {
        let clip = AudioClip::from_channels(vec![0.0, 0.25, -0.5, 1.0], vec![1.0, -1.0, 0.125, 0.0])
            .unwrap();

        let bytes = encode(&clip, 1234).unwrap();
        let (header, decoded) = decode_audio_clip(&bytes).unwrap();

        assert_eq!(header.type_tag_str(), "CLIP");
        assert_eq!(header.asset_id, 1234);
        assert_eq!(header.blob_size, 8 + 4 * 8 * 2);
        assert_eq!(decoded, clip);
    }

    #[test]
    fn test_empty_clip() {
        let clip = AudioClip::default();
        let bytes = encode(&clip, 0).unwrap();
        let (header, decoded) = decode::<AudioClip>(&bytes).unwrap();

        assert_eq!(header.blob_size, 8);
        assert_eq!(decoded.samples_per_channel, 0);
        assert!(decoded.left_channel.is_empty());
    }

    #[test]
    fn test_unequal_channels_rejected() {
        assert_eq!(
            AudioClip::from_channels(vec![0.0; 3], vec![0.0; 2]),
            Err(NcaError::ChannelLengthMismatch {
                expected: 3,
                actual: 2
            })
        );

        let clip = AudioClip {
            samples_per_channel: 5,
            left_channel: vec![0.0; 5],
            right_channel: vec![0.0; 4],
        };
        assert!(encode(&clip, 0).is_err());
    }

    #[test]
    fn test_huge_sample_count_rejected_before_sizing() {
        for samples_per_channel in [1u64 << 40, u64::MAX / 8, u64::MAX] {
            let clip = AudioClip {
                samples_per_channel,
                left_channel: Vec::new(),
                right_channel: Vec::new(),
            };
            assert_eq!(
                encode(&clip, 0),
                Err(NcaError::ChannelLengthMismatch {
                    expected: samples_per_channel,
                    actual: 0
                })
            );
        }
    }

    #[test]
    fn test_blob_size_saturates() {
        let clip = AudioClip {
            samples_per_channel: u64::MAX / 8,
            ..Default::default()
        };
        assert_eq!(clip.blob_size(), u64::MAX);
        assert_eq!(NcaHeader::new(AssetType::AudioClip, 0, u64::MAX).file_size(), u64::MAX);
    }
}
