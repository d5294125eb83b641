//! Tests for skeletal animation clips

use super::*;
use crate::formats::{decode, encode};
use glam::{Quat, Vec3};

fn walk_cycle() -> SkeletalAnimationClip {
    let mut frames_per_bone = HashMap::new();
    frames_per_bone.insert(
        "hips".to_string(),
        SkeletalAnimationFrames {
            position_frames: vec![
                PositionFrame {
                    time_in_ticks: 0.0,
                    position: Vec3::ZERO,
                },
                PositionFrame {
                    time_in_ticks: 500.0,
                    position: Vec3::new(0.0, 0.1, 0.0),
                },
            ],
            rotation_frames: vec![RotationFrame {
                time_in_ticks: 0.0,
                rotation: Quat::from_rotation_y(0.5),
            }],
            scale_frames: vec![ScaleFrame::default()],
        },
    );
    frames_per_bone.insert(
        "arm".to_string(),
        SkeletalAnimationFrames {
            rotation_frames: vec![
                RotationFrame::default(),
                RotationFrame {
                    time_in_ticks: 1000.0,
                    rotation: Quat::from_rotation_x(1.0),
                },
            ],
            ..Default::default()
        },
    );

    SkeletalAnimationClip {
        name: "walk".to_string(),
        duration_in_ticks: 1000,
        ticks_per_second: 1000.0,
        frames_per_bone,
    }
}

// ============================================================================
// Sizes
// ============================================================================

#[test]
fn test_frame_sizes() {
    assert_eq!(POSITION_FRAME_SIZE, 16);
    assert_eq!(ROTATION_FRAME_SIZE, 20);
    assert_eq!(SCALE_FRAME_SIZE, 16);
}

#[test]
fn test_blob_size_matches_encoding() {
    let clip = walk_cycle();
    let bytes = encode(&clip, 9).unwrap();

    // name + duration + tps + bone count
    let fixed = (8 + 4) + 4 + 8 + 8;
    let hips = (8 + 4) + (8 + 2 * 16) + (8 + 20) + (8 + 16);
    let arm = (8 + 3) + 8 + (8 + 2 * 20) + 8;
    assert_eq!(clip.blob_size(), fixed + hips + arm);
    assert_eq!(bytes.len() as u64, 24 + clip.blob_size());
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_clip_roundtrip() {
    let clip = walk_cycle();
    let bytes = encode(&clip, 9).unwrap();
    let (header, decoded) = decode_skeletal_animation_clip(&bytes).unwrap();

    assert_eq!(header.type_tag_str(), "SKEL");
    assert_eq!(decoded, clip);
    assert_eq!(decoded.duration_seconds(), 1.0);
    assert_eq!(decoded.frames_per_bone["arm"].key_count(), 2);
}

#[test]
fn test_bones_written_in_name_order() {
    let bytes = encode(&walk_cycle(), 0).unwrap();

    // First bone name follows header, clip name, duration, tps and count
    let offset = 24 + (8 + 4) + 4 + 8 + 8;
    let len = u64::from_le_bytes(bytes[offset..offset + 8].try_into().unwrap()) as usize;
    assert_eq!(&bytes[offset + 8..offset + 8 + len], b"arm");
}

#[test]
fn test_identical_clips_encode_identically() {
    let a = encode(&walk_cycle(), 1).unwrap();
    let b = encode(&walk_cycle(), 1).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_empty_clip() {
    let clip = SkeletalAnimationClip {
        name: String::new(),
        duration_in_ticks: 0,
        ticks_per_second: 0.0,
        frames_per_bone: HashMap::new(),
    };
    let (_, decoded) = decode::<SkeletalAnimationClip>(&encode(&clip, 0).unwrap()).unwrap();
    assert!(decoded.frames_per_bone.is_empty());
    assert_eq!(decoded.duration_seconds(), 0.0);
}

// ============================================================================
// Malformed input
// ============================================================================

#[test]
fn test_duplicate_bone_rejected() {
    let frames = SkeletalAnimationFrames::default();
    let mut writer = ByteWriter::new();
    writer.write_string("dup");
    writer.write_u32(10);
    writer.write_f64(30.0);
    writer.write_len(2);
    for _ in 0..2 {
        writer.write_string("spine");
        write_frames(&frames, &mut writer);
    }
    let blob = writer.into_inner();

    let header = NcaHeader::new(AssetType::SkeletalAnimationClip, 0, blob.len() as u64);
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(&blob);

    assert_eq!(
        decode_skeletal_animation_clip(&bytes),
        Err(NcaError::DuplicateBone("spine".to_string()))
    );
}

#[test]
fn test_truncated_track_rejected() {
    let bytes = encode(&walk_cycle(), 0).unwrap();
    let mut header = NcaHeader::from_bytes(&bytes).unwrap();
    header.blob_size -= 4;
    let mut short = header.to_bytes().to_vec();
    short.extend_from_slice(&bytes[24..bytes.len() - 4]);

    assert!(matches!(
        decode_skeletal_animation_clip(&short),
        Err(NcaError::TruncatedOrOverlongBlob { .. })
    ));
}
