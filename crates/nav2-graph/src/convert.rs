//! Conversion between the offset-addressed NAV2 file layout and the
//! reference-addressed graph
//!
//! This is the only layer that touches flat-array index arithmetic; the
//! graph model itself never sees a connection start index or a traversal
//! sentinel.

use std::collections::HashMap;

use nav2_common::{Error, Result};
use nav2_file::{
    FileEdict, FileLink, FileNode, FileNodeOrigin, FileTraversal, FormatVersion, NavFile,
    NO_TRAVERSAL,
};

use super::graph::{Edict, LinkType, NavigationGraph, NodeFlags, NodeId, Traversal};

/// Highest node identity addressable by a link's u16 destination field
const MAX_NODES: usize = u16::MAX as usize + 1;
/// Link and traversal arrays are indexed by u16 fields; 0xFFFF doubles as
/// the "no traversal" sentinel
const MAX_LINKS: usize = u16::MAX as usize;
const MAX_TRAVERSALS: usize = NO_TRAVERSAL as usize;

impl NavigationGraph {
    /// Builds a graph from a raw NAV2 document
    ///
    /// Nodes are created in array order, so a graph identity equals the raw
    /// array index directly. Every cross-reference in the document is
    /// bounds-checked; a bad one fails the whole conversion with
    /// [`Error::DanglingReference`] rather than producing a partial graph.
    pub fn from_file(file: &NavFile) -> Result<Self> {
        if file.node_origins.len() != file.nodes.len() {
            return Err(Error::DanglingReference {
                what: "node origin",
                detail: format!(
                    "{} origins for {} nodes",
                    file.node_origins.len(),
                    file.nodes.len()
                ),
            });
        }

        let mut graph = NavigationGraph::new();
        let flag_mask = file.version.node_flag_mask();

        for (file_node, file_origin) in file.nodes.iter().zip(&file.node_origins) {
            let node = graph.new_node();
            node.flags = NodeFlags::from_bits_truncate(file_node.flags & flag_mask);
            node.origin = file_origin.origin;
            node.radius = file_node.radius;
        }

        // Reverse lookup from flat link index to edict. The format does not
        // guarantee uniqueness; the last edict declaring a link id wins.
        let mut link_to_edict: HashMap<u16, &FileEdict> = HashMap::with_capacity(file.edicts.len());
        for edict in &file.edicts {
            if link_to_edict.insert(edict.link_id, edict).is_some() {
                log::warn!(
                    "duplicate edict for link {}; keeping the last one",
                    edict.link_id
                );
            }
        }

        for (index, file_node) in file.nodes.iter().enumerate() {
            let link_start = file_node.connection_start as usize;
            let link_end = link_start + file_node.connection_count as usize;
            if link_end > file.links.len() {
                return Err(Error::DanglingReference {
                    what: "link",
                    detail: format!(
                        "node {index} claims links {link_start}..{link_end} of {}",
                        file.links.len()
                    ),
                });
            }

            for flat_index in link_start..link_end {
                let file_link = &file.links[flat_index];

                let destination = file_link.destination as usize;
                if destination >= file.nodes.len() {
                    return Err(Error::DanglingReference {
                        what: "node",
                        detail: format!(
                            "link {flat_index} targets node {destination} of {}",
                            file.nodes.len()
                        ),
                    });
                }

                let traversal = match file_link.traversal_index {
                    NO_TRAVERSAL => None,
                    traversal_index => {
                        let file_traversal = file
                            .traversals
                            .get(traversal_index as usize)
                            .ok_or_else(|| Error::DanglingReference {
                                what: "traversal",
                                detail: format!(
                                    "link {flat_index} references traversal {traversal_index} of {}",
                                    file.traversals.len()
                                ),
                            })?;
                        Some(Traversal {
                            point1: file_traversal.point1,
                            point2: file_traversal.point2,
                            point3: file_traversal.point3,
                        })
                    }
                };

                let edict = link_to_edict
                    .get(&(flat_index as u16))
                    .map(|file_edict| Edict {
                        mins: file_edict.mins,
                        maxs: file_edict.maxs,
                        key: file_edict.key,
                    });

                let node = graph.node_mut(NodeId(index as u32)).unwrap();
                let link = node.new_link(NodeId(file_link.destination as u32))?;
                link.link_type = LinkType::from_code(file_link.link_type);
                link.traversal = traversal;
                link.edict = edict;
            }
        }

        Ok(graph)
    }

    /// Lowers the graph into the raw document layout for one format version
    ///
    /// Each node's links are appended to one continuous flat array; the
    /// node's connection start index is the array length before appending,
    /// which is what reconstructs the file's offset addressing from the
    /// graph's references. Traversals and edicts are appended as their
    /// owning links are emitted, so a well-formed document re-encodes
    /// byte-identically.
    pub fn to_file(&self, version: FormatVersion) -> Result<NavFile> {
        if self.len() > MAX_NODES {
            return Err(Error::FormatLimitExceeded {
                what: "node",
                count: self.len(),
                limit: MAX_NODES,
            });
        }
        let total_links: usize = self.nodes().iter().map(|node| node.links().len()).sum();
        if total_links > MAX_LINKS {
            return Err(Error::FormatLimitExceeded {
                what: "link",
                count: total_links,
                limit: MAX_LINKS,
            });
        }

        let mut file = NavFile::new(version);
        let flag_mask = version.node_flag_mask();

        for node in self.nodes() {
            let file_node = FileNode {
                flags: node.flags.bits() & flag_mask,
                connection_count: node.links().len() as u16,
                connection_start: file.links.len() as u16,
                radius: node.radius,
            };

            for link in node.links() {
                let link_id = file.links.len() as u16;

                let traversal_index = match &link.traversal {
                    Some(traversal) => {
                        if file.traversals.len() >= MAX_TRAVERSALS {
                            return Err(Error::FormatLimitExceeded {
                                what: "traversal",
                                count: file.traversals.len() + 1,
                                limit: MAX_TRAVERSALS,
                            });
                        }
                        file.traversals.push(FileTraversal {
                            point1: traversal.point1,
                            point2: traversal.point2,
                            point3: traversal.point3,
                        });
                        (file.traversals.len() - 1) as u16
                    }
                    None => NO_TRAVERSAL,
                };

                if let Some(edict) = &link.edict {
                    file.edicts.push(FileEdict {
                        link_id,
                        mins: edict.mins,
                        maxs: edict.maxs,
                        key: edict.key,
                    });
                }

                file.links.push(FileLink {
                    destination: link.target.index() as u16,
                    link_type: link.link_type.code(),
                    traversal_index,
                });
            }

            file.node_origins.push(FileNodeOrigin {
                origin: node.origin,
            });
            file.nodes.push(file_node);
        }

        Ok(file)
    }

    /// Decodes a NAV2 byte buffer straight into a graph
    ///
    /// With no `hint`, the version is auto-detected from the stream prefix
    /// via [`FormatVersion::identify`].
    pub fn load_from_bytes(data: &[u8], hint: Option<FormatVersion>) -> Result<Self> {
        let version = match hint {
            Some(version) => version,
            None => FormatVersion::identify(data)?,
        };
        let file = NavFile::decode(data, version)?;
        Self::from_file(&file)
    }

    /// Encodes the graph into a NAV2 byte buffer of the given version
    pub fn save_to_bytes(&self, version: FormatVersion) -> Result<Vec<u8>> {
        self.to_file(version)?.encode()
    }
}
