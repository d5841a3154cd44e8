//! Fixed-layout NAV2 record types
//!
//! Each record mirrors the on-disk layout exactly: all integers are
//! little-endian, all vectors are three IEEE-754 singles. Cross-references
//! between records are flat array indices, never pointers.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use nav2_common::{Error, ReadVec3Ext, Result, Vec3, WriteVec3Ext};
use std::io::{Read, Write};

use super::FormatVersion;

/// Sentinel traversal index meaning "this link has no traversal"
pub const NO_TRAVERSAL: u16 = 0xFFFF;

/// Node record (8 bytes)
///
/// A node's links are the slice
/// `[connection_start, connection_start + connection_count)` of the file's
/// flat link array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileNode {
    /// Flag bitmask applying to this node
    pub flags: u16,
    /// How many links leave this node
    pub connection_count: u16,
    /// Index into the flat link array where this node's links begin
    pub connection_start: u16,
    /// Node radius, drawn in the in-game editor as a green circle
    pub radius: u16,
}

impl FileNode {
    pub const SIZE: usize = 8;

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            flags: reader.read_u16::<LittleEndian>()?,
            connection_count: reader.read_u16::<LittleEndian>()?,
            connection_start: reader.read_u16::<LittleEndian>()?,
            radius: reader.read_u16::<LittleEndian>()?,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u16::<LittleEndian>(self.flags)?;
        writer.write_u16::<LittleEndian>(self.connection_count)?;
        writer.write_u16::<LittleEndian>(self.connection_start)?;
        writer.write_u16::<LittleEndian>(self.radius)?;
        Ok(())
    }
}

/// Node origin record (12 bytes)
///
/// Stored in a separate array parallel to the node array, one entry per
/// node in the same order. The split is a historical layout artifact.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FileNodeOrigin {
    pub origin: Vec3,
}

impl FileNodeOrigin {
    pub const SIZE: usize = 12;

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            origin: reader.read_vec3()?,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_vec3(self.origin)?;
        Ok(())
    }
}

/// Link record (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileLink {
    /// Node index this link leads to
    pub destination: u16,
    /// Link connection type code
    pub link_type: u16,
    /// Index into the traversal array, or [`NO_TRAVERSAL`]
    pub traversal_index: u16,
}

impl FileLink {
    pub const SIZE: usize = 6;

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            destination: reader.read_u16::<LittleEndian>()?,
            link_type: reader.read_u16::<LittleEndian>()?,
            traversal_index: reader.read_u16::<LittleEndian>()?,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u16::<LittleEndian>(self.destination)?;
        writer.write_u16::<LittleEndian>(self.link_type)?;
        writer.write_u16::<LittleEndian>(self.traversal_index)?;
        Ok(())
    }
}

/// Traversal record (36 bytes): three waypoints of a movement arc
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FileTraversal {
    pub point1: Vec3,
    pub point2: Vec3,
    pub point3: Vec3,
}

impl FileTraversal {
    pub const SIZE: usize = 36;

    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        Ok(Self {
            point1: reader.read_vec3()?,
            point2: reader.read_vec3()?,
            point3: reader.read_vec3()?,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_vec3(self.point1)?;
        writer.write_vec3(self.point2)?;
        writer.write_vec3(self.point3)?;
        Ok(())
    }
}

/// Version-dependent entity reference carried by an edict
///
/// This is the only part of the NAV2 layout that differs between format
/// revisions. Version 15 stores a bare entity id computed as
/// `-entity_index - 1` (func_train_17 becomes -18); versions 14 and 17
/// store two engine string-table ids instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdictKey {
    EntityId(i32),
    StringIds { targetname: i32, classname: i32 },
}

/// Edict record (30 or 34 bytes depending on version)
///
/// A sparse side-table entry attaching a bounding box and an entity
/// reference to one link, addressed by the link's flat array index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileEdict {
    /// Flat link index this edict belongs to
    pub link_id: u16,
    /// Mins bounds of the edict
    pub mins: Vec3,
    /// Maxs bounds of the edict
    pub maxs: Vec3,
    pub key: EdictKey,
}

impl FileEdict {
    pub fn read_from<R: Read>(reader: &mut R, version: FormatVersion) -> Result<Self> {
        let link_id = reader.read_u16::<LittleEndian>()?;
        let mins = reader.read_vec3()?;
        let maxs = reader.read_vec3()?;

        let key = match version {
            FormatVersion::V15 => EdictKey::EntityId(reader.read_i32::<LittleEndian>()?),
            FormatVersion::V14 | FormatVersion::V17 => EdictKey::StringIds {
                targetname: reader.read_i32::<LittleEndian>()?,
                classname: reader.read_i32::<LittleEndian>()?,
            },
        };

        Ok(Self {
            link_id,
            mins,
            maxs,
            key,
        })
    }

    pub fn write_to<W: Write>(&self, writer: &mut W, version: FormatVersion) -> Result<()> {
        writer.write_u16::<LittleEndian>(self.link_id)?;
        writer.write_vec3(self.mins)?;
        writer.write_vec3(self.maxs)?;

        match (version, self.key) {
            (FormatVersion::V15, EdictKey::EntityId(entity_id)) => {
                writer.write_i32::<LittleEndian>(entity_id)?;
            }
            (
                FormatVersion::V14 | FormatVersion::V17,
                EdictKey::StringIds {
                    targetname,
                    classname,
                },
            ) => {
                writer.write_i32::<LittleEndian>(targetname)?;
                writer.write_i32::<LittleEndian>(classname)?;
            }
            _ => {
                return Err(Error::EdictShapeMismatch {
                    version: version.number(),
                });
            }
        }

        Ok(())
    }
}
