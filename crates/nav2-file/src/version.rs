//! Format version registry
//!
//! Maps the version number carried in a NAV2 header to the codec variant
//! responsible for it. Identification only touches the fixed 8-byte stream
//! prefix, so callers can pick a variant without running a full decode.

use byteorder::{LittleEndian, ReadBytesExt};
use nav2_common::{Error, Result};
use std::io::Cursor;

/// Magic number for NAV2 files ('NAV2' in little-endian)
pub const NAV2_MAGIC: u32 = 0x3256_414E;

/// Size of the magic + version stream prefix read by [`FormatVersion::identify`]
const PREFIX_SIZE: usize = 8;

/// A supported revision of the NAV2 binary format
///
/// The record layouts are identical across revisions except for the edict
/// record: version 15 stores a bare entity id while versions 14 and 17 store
/// a pair of engine string-table ids. Version 17 additionally defines two
/// extra node flag bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatVersion {
    V14,
    V15,
    V17,
}

impl FormatVersion {
    /// All registered versions, oldest first
    pub const ALL: [FormatVersion; 3] = [Self::V14, Self::V15, Self::V17];

    /// The version number written to the file header
    pub const fn number(self) -> u32 {
        match self {
            Self::V14 => 14,
            Self::V15 => 15,
            Self::V17 => 17,
        }
    }

    /// Looks up the codec variant registered for a header version number
    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            14 => Some(Self::V14),
            15 => Some(Self::V15),
            17 => Some(Self::V17),
            _ => None,
        }
    }

    /// Identifies the format version of a NAV2 stream from its 8-byte prefix
    ///
    /// Fails with [`Error::MalformedHeader`] when the magic number does not
    /// match and [`Error::UnsupportedVersion`] when no variant is registered
    /// for the version number.
    pub fn identify(data: &[u8]) -> Result<Self> {
        if data.len() < PREFIX_SIZE {
            return Err(Error::TruncatedInput {
                what: "header",
                expected: PREFIX_SIZE,
                actual: data.len(),
            });
        }

        let mut cursor = Cursor::new(data);
        let magic = cursor.read_u32::<LittleEndian>()?;
        if magic != NAV2_MAGIC {
            return Err(Error::MalformedHeader);
        }

        let version = cursor.read_u32::<LittleEndian>()?;
        Self::from_number(version).ok_or(Error::UnsupportedVersion { version })
    }

    /// Size in bytes of one edict record in this version
    pub const fn edict_size(self) -> usize {
        match self {
            Self::V15 => 30,
            Self::V14 | Self::V17 => 34,
        }
    }

    /// Mask of node flag bits defined by this version
    pub const fn node_flag_mask(self) -> u16 {
        match self {
            Self::V14 | Self::V15 => 0x003F,
            Self::V17 => 0x00FF,
        }
    }
}

impl std::fmt::Display for FormatVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}
