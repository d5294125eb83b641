//! Bounds-checked byte cursor.
//!
//! [`ByteReader`] walks a borrowed slice and refuses to read past its end;
//! [`ByteWriter`] appends to an owned buffer. Every multi-byte value is
//! little-endian on the wire so files are portable across hosts.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::error::{NcaError, Result};

/// Read cursor over an in-memory byte buffer.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Borrow the next `n` bytes and advance past them.
    pub fn read(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(NcaError::OutOfBounds {
                requested: n as u64,
                remaining: self.remaining() as u64,
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Copy `dest.len()` bytes into `dest` and advance.
    pub fn read_into(&mut self, dest: &mut [u8]) -> Result<()> {
        let src = self.read(dest.len())?;
        dest.copy_from_slice(src);
        Ok(())
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.read_into(&mut out)?;
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Any non-zero byte reads as `true`
    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_u8()? != 0)
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    pub fn read_vec2(&mut self) -> Result<Vec2> {
        Ok(Vec2::new(self.read_f32()?, self.read_f32()?))
    }

    pub fn read_vec3(&mut self) -> Result<Vec3> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    pub fn read_vec4(&mut self) -> Result<Vec4> {
        Ok(Vec4::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Quaternion stored as [x, y, z, w]
    pub fn read_quat(&mut self) -> Result<Quat> {
        Ok(Quat::from_vec4(self.read_vec4()?))
    }

    /// 4×4 matrix stored as 16 floats, column-major
    pub fn read_mat4(&mut self) -> Result<Mat4> {
        let mut cols = [0.0f32; 16];
        for value in &mut cols {
            *value = self.read_f32()?;
        }
        Ok(Mat4::from_cols_array(&cols))
    }

    /// Read a u64 element count and check that `count × element_size` bytes
    /// are actually left before anyone allocates for them.
    pub fn read_len(&mut self, element_size: usize) -> Result<usize> {
        let count = self.read_u64()?;
        let needed = count
            .checked_mul(element_size as u64)
            .ok_or(NcaError::CountOverflow(count))?;
        if needed > self.remaining() as u64 {
            return Err(NcaError::OutOfBounds {
                requested: needed,
                remaining: self.remaining() as u64,
            });
        }
        usize::try_from(count).map_err(|_| NcaError::CountOverflow(count))
    }

    /// Length-prefixed UTF-8 string
    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_len(1)?;
        let position = self.pos;
        let bytes = self.read(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| NcaError::InvalidString { position })
    }
}

/// Append-only write cursor.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the buffer when the final length is known up front
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }

    pub fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    pub fn write_u32(&mut self, value: u32) {
        self.write(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.write(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.write(&value.to_le_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.write(&value.to_le_bytes());
    }

    pub fn write_vec2(&mut self, v: Vec2) {
        self.write_f32(v.x);
        self.write_f32(v.y);
    }

    pub fn write_vec3(&mut self, v: Vec3) {
        self.write_f32(v.x);
        self.write_f32(v.y);
        self.write_f32(v.z);
    }

    pub fn write_vec4(&mut self, v: Vec4) {
        self.write_f32(v.x);
        self.write_f32(v.y);
        self.write_f32(v.z);
        self.write_f32(v.w);
    }

    pub fn write_quat(&mut self, q: Quat) {
        self.write_vec4(Vec4::from(q));
    }

    pub fn write_mat4(&mut self, m: &Mat4) {
        for value in m.to_cols_array() {
            self.write_f32(value);
        }
    }

    /// Element counts are always u64 on the wire
    pub fn write_len(&mut self, len: usize) {
        self.write_u64(len as u64);
    }

    pub fn write_string(&mut self, value: &str) {
        self.write_len(value.len());
        self.write(value.as_bytes());
    }
}
