//! Whole-document encode/decode for NAV2 files

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use nav2_common::{Error, Result};
use std::io::Cursor;

use super::records::{FileEdict, FileLink, FileNode, FileNodeOrigin, FileTraversal};
use super::version::{FormatVersion, NAV2_MAGIC};

/// Size of the common NAV2 header:
/// `[magic:4][version:4][nodeCount:4][linkCount:4][traversalCount:4]`
pub const HEADER_SIZE: usize = 20;

/// Size of the edict count prefix preceding the edict array
const EDICT_HEADER_SIZE: usize = 4;

/// A raw NAV2 document: the flat record arrays of one file, plus the
/// format version they were laid out for
///
/// Invariants of a well-formed document (the decoder checks array bounds,
/// the `nav2-graph` converters check the cross-references):
/// - `node_origins.len() == nodes.len()`, same order;
/// - each node's connection slice lies inside `links`, and the slices
///   cover `links` exactly once in node order;
/// - every `traversal_index` is [`super::NO_TRAVERSAL`] or a valid index
///   into `traversals`;
/// - at most one edict references a given flat link index.
#[derive(Debug, Clone, PartialEq)]
pub struct NavFile {
    pub version: FormatVersion,
    pub nodes: Vec<FileNode>,
    pub node_origins: Vec<FileNodeOrigin>,
    pub links: Vec<FileLink>,
    pub traversals: Vec<FileTraversal>,
    pub edicts: Vec<FileEdict>,
}

/// Fails with [`Error::TruncatedInput`] when fewer than `needed` bytes
/// remain past `position`.
fn ensure_available(data: &[u8], position: u64, needed: usize, what: &'static str) -> Result<()> {
    let available = data.len().saturating_sub(position as usize);
    if available < needed {
        return Err(Error::TruncatedInput {
            what,
            expected: needed,
            actual: available,
        });
    }
    Ok(())
}

impl NavFile {
    /// Creates an empty document for the given format version
    pub fn new(version: FormatVersion) -> Self {
        Self {
            version,
            nodes: Vec::new(),
            node_origins: Vec::new(),
            links: Vec::new(),
            traversals: Vec::new(),
            edicts: Vec::new(),
        }
    }

    /// Decodes a complete NAV2 byte buffer with the given codec variant
    ///
    /// The magic and version fields are re-validated idempotently, so
    /// running [`FormatVersion::identify`] first never makes the two
    /// disagree. Decoding is all-or-nothing: a short buffer yields
    /// [`Error::TruncatedInput`] with the byte counts involved, never a
    /// zero-filled or partially populated document.
    pub fn decode(data: &[u8], version: FormatVersion) -> Result<Self> {
        ensure_available(data, 0, HEADER_SIZE, "header")?;
        let mut cursor = Cursor::new(data);

        let magic = cursor.read_u32::<LittleEndian>()?;
        if magic != NAV2_MAGIC {
            return Err(Error::MalformedHeader);
        }

        let file_version = cursor.read_u32::<LittleEndian>()?;
        if file_version != version.number() {
            return Err(Error::UnsupportedVersion {
                version: file_version,
            });
        }

        let node_count = cursor.read_u32::<LittleEndian>()? as usize;
        let link_count = cursor.read_u32::<LittleEndian>()? as usize;
        let traversal_count = cursor.read_u32::<LittleEndian>()? as usize;

        ensure_available(data, cursor.position(), node_count * FileNode::SIZE, "nodes")?;
        let mut nodes = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            nodes.push(FileNode::read_from(&mut cursor)?);
        }

        ensure_available(
            data,
            cursor.position(),
            node_count * FileNodeOrigin::SIZE,
            "node origins",
        )?;
        let mut node_origins = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            node_origins.push(FileNodeOrigin::read_from(&mut cursor)?);
        }

        ensure_available(data, cursor.position(), link_count * FileLink::SIZE, "links")?;
        let mut links = Vec::with_capacity(link_count);
        for _ in 0..link_count {
            links.push(FileLink::read_from(&mut cursor)?);
        }

        ensure_available(
            data,
            cursor.position(),
            traversal_count * FileTraversal::SIZE,
            "traversals",
        )?;
        let mut traversals = Vec::with_capacity(traversal_count);
        for _ in 0..traversal_count {
            traversals.push(FileTraversal::read_from(&mut cursor)?);
        }

        ensure_available(data, cursor.position(), EDICT_HEADER_SIZE, "edict count")?;
        let edict_count = cursor.read_u32::<LittleEndian>()? as usize;

        ensure_available(
            data,
            cursor.position(),
            edict_count * version.edict_size(),
            "edicts",
        )?;
        let mut edicts = Vec::with_capacity(edict_count);
        for _ in 0..edict_count {
            edicts.push(FileEdict::read_from(&mut cursor, version)?);
        }

        Ok(Self {
            version,
            nodes,
            node_origins,
            links,
            traversals,
            edicts,
        })
    }

    /// Identifies the version from the stream prefix and decodes with the
    /// matching codec variant
    pub fn decode_any(data: &[u8]) -> Result<Self> {
        let version = FormatVersion::identify(data)?;
        Self::decode(data, version)
    }

    /// Encodes the document into a NAV2 byte buffer
    ///
    /// Records are emitted in the fixed file order: nodes, node origins,
    /// links, traversals, then the edict count and edicts.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let version = self.version;
        let mut buffer = Vec::with_capacity(
            HEADER_SIZE
                + self.nodes.len() * FileNode::SIZE
                + self.node_origins.len() * FileNodeOrigin::SIZE
                + self.links.len() * FileLink::SIZE
                + self.traversals.len() * FileTraversal::SIZE
                + EDICT_HEADER_SIZE
                + self.edicts.len() * version.edict_size(),
        );

        buffer.write_u32::<LittleEndian>(NAV2_MAGIC)?;
        buffer.write_u32::<LittleEndian>(version.number())?;
        buffer.write_u32::<LittleEndian>(self.nodes.len() as u32)?;
        buffer.write_u32::<LittleEndian>(self.links.len() as u32)?;
        buffer.write_u32::<LittleEndian>(self.traversals.len() as u32)?;

        for node in &self.nodes {
            node.write_to(&mut buffer)?;
        }
        for node_origin in &self.node_origins {
            node_origin.write_to(&mut buffer)?;
        }
        for link in &self.links {
            link.write_to(&mut buffer)?;
        }
        for traversal in &self.traversals {
            traversal.write_to(&mut buffer)?;
        }

        buffer.write_u32::<LittleEndian>(self.edicts.len() as u32)?;
        for edict in &self.edicts {
            edict.write_to(&mut buffer, version)?;
        }

        Ok(buffer)
    }
}
