//! Geometry analysis: NaN sanitization, extents and max extent.

use glam::Vec3;
use nca_common::{MeshVertex, Triangle};

/// Types whose float components can be scrubbed of NaNs
pub trait Sanitize {
    /// Replace every NaN with 0.0, returning how many were replaced
    fn sanitize(&mut self) -> usize;
}

fn sanitize_floats<'a>(values: impl IntoIterator<Item = &'a mut f32>) -> usize {
    let mut count = 0;
    for value in values {
        if value.is_nan() {
            *value = 0.0;
            count += 1;
        }
    }
    count
}

impl Sanitize for Vec3 {
    fn sanitize(&mut self) -> usize {
        sanitize_floats([&mut self.x, &mut self.y, &mut self.z])
    }
}

impl Sanitize for Triangle {
    fn sanitize(&mut self) -> usize {
        self.a.sanitize() + self.b.sanitize() + self.c.sanitize()
    }
}

impl Sanitize for MeshVertex {
    fn sanitize(&mut self) -> usize {
        let w = &mut self.bone_weights;
        self.position.sanitize()
            + self.normal.sanitize()
            + sanitize_floats([&mut self.uv.x, &mut self.uv.y])
            + self.tangent.sanitize()
            + self.bitangent.sanitize()
            + sanitize_floats(AsMut::<[f32; 4]>::as_mut(w))
    }
}

impl<T: Sanitize> Sanitize for [T] {
    fn sanitize(&mut self) -> usize {
        self.iter_mut().map(Sanitize::sanitize).sum()
    }
}

/// Anything that contributes points to a bounding volume
pub trait Points {
    fn points(&self) -> impl Iterator<Item = Vec3> + '_;
}

impl Points for [Vec3] {
    fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.iter().copied()
    }
}

impl Points for [Triangle] {
    fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.iter().flat_map(|t| [t.a, t.b, t.c])
    }
}

impl Points for [MeshVertex] {
    fn points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.iter().map(|v| v.position)
    }
}

/// Size of the axis-aligned bounds (max - min per axis); zero when empty
pub fn extents<P: Points + ?Sized>(geometry: &P) -> Vec3 {
    let mut points = geometry.points();
    let Some(first) = points.next() else {
        return Vec3::ZERO;
    };
    let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    max - min
}

/// Distance from the origin to the furthest point; zero when empty
pub fn max_extent<P: Points + ?Sized>(geometry: &P) -> f32 {
    geometry
        .points()
        .map(Vec3::length)
        .fold(0.0, f32::max)
}
