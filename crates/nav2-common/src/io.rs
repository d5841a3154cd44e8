//! Binary reading/writing helpers for 3-component vectors
//!
//! NAV2 stores every position as three little-endian IEEE-754 singles
//! (12 bytes), so the record codecs read and write whole vectors at a time.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use glam::Vec3;
use std::io::{Read, Write};

/// Extends [`Read`] with a NAV2 vector read
pub trait ReadVec3Ext: Read {
    fn read_vec3(&mut self) -> std::io::Result<Vec3> {
        let x = self.read_f32::<LittleEndian>()?;
        let y = self.read_f32::<LittleEndian>()?;
        let z = self.read_f32::<LittleEndian>()?;
        Ok(Vec3::new(x, y, z))
    }
}

impl<R: Read + ?Sized> ReadVec3Ext for R {}

/// Extends [`Write`] with a NAV2 vector write
pub trait WriteVec3Ext: Write {
    fn write_vec3(&mut self, v: Vec3) -> std::io::Result<()> {
        self.write_f32::<LittleEndian>(v.x)?;
        self.write_f32::<LittleEndian>(v.y)?;
        self.write_f32::<LittleEndian>(v.z)?;
        Ok(())
    }
}

impl<W: Write + ?Sized> WriteVec3Ext for W {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn vec3_roundtrip_is_12_bytes() {
        let mut buffer = Vec::new();
        buffer.write_vec3(Vec3::new(1.5, -2.0, 640.25)).unwrap();
        assert_eq!(buffer.len(), 12);

        let mut cursor = Cursor::new(&buffer);
        assert_eq!(cursor.read_vec3().unwrap(), Vec3::new(1.5, -2.0, 640.25));
    }
}
