//! Graph construction helpers shared by the conversion tests

use nav2_common::Vec3;
use nav2_file::{EdictKey, FormatVersion};

use crate::{Edict, LinkType, NavigationGraph, NodeFlags, NodeId, Traversal};

/// The edict key shape the given format version can represent
pub fn sample_edict_key(version: FormatVersion) -> EdictKey {
    match version {
        FormatVersion::V15 => EdictKey::EntityId(-18),
        FormatVersion::V14 | FormatVersion::V17 => EdictKey::StringIds {
            targetname: 7,
            classname: 12,
        },
    }
}

/// Builds a small but fully featured graph: three nodes, one link with a
/// traversal, one with an edict, and one with neither
pub fn sample_graph(version: FormatVersion) -> NavigationGraph {
    let mut graph = NavigationGraph::new();

    let node = graph.new_node();
    node.flags = NodeFlags::PUSHER;
    node.origin = Vec3::new(0.0, 0.0, 24.0);
    node.radius = 32;

    let node = graph.new_node();
    node.flags = if version == FormatVersion::V17 {
        NodeFlags::UNDERWATER | NodeFlags::CHECK_FOR_FLOOR
    } else {
        NodeFlags::UNDERWATER
    };
    node.origin = Vec3::new(128.0, -64.0, 24.0);
    node.radius = 16;

    let node = graph.new_node();
    node.origin = Vec3::new(256.0, 32.0, -8.0);
    node.radius = 24;

    // Node 0: a jump link with a traversal, and an edict-guarded link.
    let node = graph.node_mut(NodeId(0)).unwrap();
    let link = node.new_link(NodeId(1)).unwrap();
    link.link_type = LinkType::LongJump;
    link.traversal = Some(Traversal {
        point1: Vec3::new(0.0, 0.0, 24.0),
        point2: Vec3::new(64.0, -32.0, 80.0),
        point3: Vec3::new(128.0, -64.0, 24.0),
    });

    let link = node.new_link(NodeId(2)).unwrap();
    link.link_type = LinkType::Elevator;
    link.edict = Some(Edict {
        mins: Vec3::new(-16.0, -16.0, 0.0),
        maxs: Vec3::new(16.0, 16.0, 72.0),
        key: sample_edict_key(version),
    });

    // Node 1: a plain walk link with neither traversal nor edict.
    let node = graph.node_mut(NodeId(1)).unwrap();
    node.new_link(NodeId(0)).unwrap();

    graph
}
