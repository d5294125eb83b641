//! Source asset generators for the integration tests

#![allow(dead_code)]

use image::{Rgba, RgbaImage};
use std::path::Path;

/// 4x4 black and white checkerboard
pub fn generate_checkerboard_png(path: &Path) -> image::ImageResult<()> {
    RgbaImage::from_fn(4, 4, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
    .save(path)
}

/// 6:1 cube atlas; face `i` is filled with red = i * 40
pub fn generate_cube_atlas_png(path: &Path, side: u32) -> image::ImageResult<()> {
    RgbaImage::from_fn(side * 6, side, |x, _| Rgba([(x / side * 40) as u8, 0, 0, 255])).save(path)
}

/// 16-bit WAV with a ramp of `samples` frames
pub fn generate_wav(path: &Path, channels: u16, samples: u32) -> hound::Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 22050,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)?;
    for i in 0..samples {
        for c in 0..channels {
            let value = (i as i32 * 1000 - c as i32 * 500) as i16;
            writer.write_sample(value)?;
        }
    }
    writer.finalize()
}

fn push_f32s(buffer: &mut Vec<u8>, values: &[f32]) {
    for v in values {
        buffer.extend_from_slice(&v.to_le_bytes());
    }
}

/// Skinned triangle with a two-bone skeleton ("root" -> "arm") and one
/// animation ("wave") rotating the arm, written as `<stem>.gltf` +
/// `<stem>.bin`.
pub fn generate_skinned_triangle_gltf(dir: &Path, stem: &str) -> std::io::Result<()> {
    let mut bin = Vec::new();

    // 0: positions (36 bytes)
    push_f32s(&mut bin, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
    // 36: joints, vec4 u16 (24 bytes)
    for joints in [[0u16, 0, 0, 0], [0, 1, 0, 0], [1, 0, 0, 0]] {
        for j in joints {
            bin.extend_from_slice(&j.to_le_bytes());
        }
    }
    // 60: weights (48 bytes)
    push_f32s(
        &mut bin,
        &[1.0, 0.0, 0.0, 0.0, 0.5, 0.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
    );
    // 108: indices u16 (6 bytes + 2 padding)
    for i in [0u16, 1, 2, 0] {
        bin.extend_from_slice(&i.to_le_bytes());
    }
    // 116: inverse bind matrices (128 bytes)
    push_f32s(
        &mut bin,
        &[
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ],
    );
    push_f32s(
        &mut bin,
        &[
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 1.0,
        ],
    );
    // 244: animation times (8 bytes)
    push_f32s(&mut bin, &[0.0, 1.0]);
    // 252: animation rotations (32 bytes)
    push_f32s(&mut bin, &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.7071068, 0.7071068]);
    assert_eq!(bin.len(), 284);

    let json = format!(
        r#"{{
  "asset": {{ "version": "2.0" }},
  "scene": 0,
  "scenes": [{{ "nodes": [0, 1] }}],
  "nodes": [
    {{ "name": "Body", "mesh": 0, "skin": 0 }},
    {{ "name": "root", "children": [2] }},
    {{ "name": "arm", "translation": [0.0, 1.0, 0.0] }}
  ],
  "meshes": [{{
    "name": "Triangle",
    "primitives": [{{
      "attributes": {{ "POSITION": 0, "JOINTS_0": 1, "WEIGHTS_0": 2 }},
      "indices": 3
    }}]
  }}],
  "skins": [{{ "joints": [1, 2], "inverseBindMatrices": 4, "skeleton": 1 }}],
  "animations": [{{
    "name": "wave",
    "channels": [{{ "sampler": 0, "target": {{ "node": 2, "path": "rotation" }} }}],
    "samplers": [{{ "input": 5, "output": 6, "interpolation": "LINEAR" }}]
  }}],
  "buffers": [{{ "uri": "{stem}.bin", "byteLength": 284 }}],
  "bufferViews": [
    {{ "buffer": 0, "byteOffset": 0, "byteLength": 36 }},
    {{ "buffer": 0, "byteOffset": 36, "byteLength": 24 }},
    {{ "buffer": 0, "byteOffset": 60, "byteLength": 48 }},
    {{ "buffer": 0, "byteOffset": 108, "byteLength": 6 }},
    {{ "buffer": 0, "byteOffset": 116, "byteLength": 128 }},
    {{ "buffer": 0, "byteOffset": 244, "byteLength": 8 }},
    {{ "buffer": 0, "byteOffset": 252, "byteLength": 32 }}
  ],
  "accessors": [
    {{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
       "min": [0.0, 0.0, 0.0], "max": [1.0, 2.0, 0.0] }},
    {{ "bufferView": 1, "componentType": 5123, "count": 3, "type": "VEC4" }},
    {{ "bufferView": 2, "componentType": 5126, "count": 3, "type": "VEC4" }},
    {{ "bufferView": 3, "componentType": 5123, "count": 3, "type": "SCALAR" }},
    {{ "bufferView": 4, "componentType": 5126, "count": 2, "type": "MAT4" }},
    {{ "bufferView": 5, "componentType": 5126, "count": 2, "type": "SCALAR",
       "min": [0.0], "max": [1.0] }},
    {{ "bufferView": 6, "componentType": 5126, "count": 2, "type": "VEC4" }}
  ]
}}"#
    );

    std::fs::write(dir.join(format!("{stem}.bin")), &bin)?;
    std::fs::write(dir.join(format!("{stem}.gltf")), json)
}
