//! Canonical in-memory navigation graph and its format conversions
//!
//! The [`NavigationGraph`] is the representation every NAV2 format converts
//! through: an owned graph of nodes and directed links in which a node's
//! identity is always its index in the graph's node list. The binary
//! converter rebuilds the file format's offset addressing from the graph's
//! reference addressing; the JSON converter cross-references link targets by
//! node origin instead.

mod convert;
mod graph;
mod json;

mod graph_tests;
mod json_tests;
#[cfg(test)]
mod test_graphs;

pub use graph::{
    Edict, Link, LinkList, LinkType, NavigationGraph, Node, NodeFlags, NodeId, Traversal,
    MAXIMUM_LINKS,
};
pub use json::{JsonEdict, JsonLink, JsonNode, MapInfo, NavJson, DOCUMENT_VERSION};

pub use nav2_file::{EdictKey, FormatVersion};
