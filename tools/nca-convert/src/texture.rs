//! Texture and cube map import (PNG/JPEG/BMP -> RGBA8)

use anyhow::{Context, Result, bail};
use image::RgbaImage;
use nca_common::{CubeMap, Texture};
use std::path::Path;

/// Load any supported image as an RGBA8 texture
pub fn load_texture(input: &Path) -> Result<Texture> {
    let image = open_rgba(input)?;
    let (width, height) = image.dimensions();
    tracing::debug!("Loaded texture {:?}: {}x{}", input, width, height);
    Ok(Texture::new(width, height, image.into_raw())?)
}

/// Load a cube map atlas and cut it into six faces
pub fn load_cube_map(input: &Path) -> Result<CubeMap> {
    let image = open_rgba(input)?;
    let cube =
        cube_map_from_atlas(&image).with_context(|| format!("Invalid cube map: {:?}", input))?;
    tracing::debug!(
        "Loaded cube map {:?}: face size {}",
        input,
        cube.face_side_length
    );
    Ok(cube)
}

fn open_rgba(input: &Path) -> Result<RgbaImage> {
    let img = image::open(input).with_context(|| format!("Failed to load image: {:?}", input))?;
    // Always 4 channels, whatever the source had
    Ok(img.to_rgba8())
}

/// Arrangement of the six faces inside an atlas image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeMapAtlasLayout {
    /// 6 faces in a row (6:1)
    HorizontalArray,
    /// 6 faces in a column (1:6)
    VerticalArray,
    /// Cross on a 4×3 grid
    HorizontalCross,
    /// Cross on a 3×4 grid
    VerticalCross,
}

impl CubeMapAtlasLayout {
    /// Detect the layout from the atlas dimensions
    pub fn detect(width: u32, height: u32) -> Result<Self> {
        let (w, h) = (width as u64, height as u64);
        if w == 0 || h == 0 {
            bail!("Cube map atlas is empty");
        }
        let layout = if h * 6 == w {
            Self::HorizontalArray
        } else if w * 6 == h {
            Self::VerticalArray
        } else if h * 4 == w * 3 {
            Self::HorizontalCross
        } else if w * 4 == h * 3 {
            Self::VerticalCross
        } else {
            bail!(
                "Cube map atlas is {}x{}; expected a 6:1, 1:6, 4:3 or 3:4 layout",
                width,
                height
            );
        };
        Ok(layout)
    }

    pub fn side_length(self, width: u32, height: u32) -> u32 {
        match self {
            Self::HorizontalArray => height,
            Self::VerticalArray => width,
            Self::HorizontalCross => height / 3,
            Self::VerticalCross => width / 3,
        }
    }

    /// Top-left corner of each face, in grid cells, in stored face order:
    /// front, back, up, down, right, left
    pub fn face_cells(self) -> [(u32, u32); 6] {
        match self {
            Self::HorizontalArray => [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)],
            Self::VerticalArray => [(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (0, 5)],
            Self::HorizontalCross => [(1, 1), (3, 1), (1, 0), (1, 2), (2, 1), (0, 1)],
            Self::VerticalCross => [(0, 1), (2, 1), (1, 0), (1, 2), (1, 1), (1, 3)],
        }
    }
}

/// Build a cube map from an RGBA atlas image
pub fn cube_map_from_atlas(atlas: &RgbaImage) -> Result<CubeMap> {
    let (width, height) = atlas.dimensions();
    let layout = CubeMapAtlasLayout::detect(width, height)?;
    let side = layout.side_length(width, height);
    tracing::debug!("Cube map atlas layout {:?}, side {}", layout, side);

    let row_len = side as usize * 4;
    let mut pixel_data = Vec::with_capacity(row_len * side as usize * 6);
    for (cx, cy) in layout.face_cells() {
        let (x0, y0) = (cx * side, cy * side);
        for y in y0..y0 + side {
            let start = (y as usize * width as usize + x0 as usize) * 4;
            pixel_data.extend_from_slice(&atlas.as_raw()[start..start + row_len]);
        }
    }

    Ok(CubeMap::new(side, pixel_data)?)
}
