//! The owned navigation graph model
//!
//! Nodes and links are only ever created through their owning collection's
//! factory operations and only ever destroyed through its remove
//! operations, so the identity bookkeeping cannot drift: a node's id equals
//! its index in the node list at all times, forming a dense `0..N` sequence
//! with no gaps.

use bitflags::bitflags;
use nav2_common::{Error, Result, Vec3};
use nav2_file::EdictKey;

/// Hard capacity of one node's link list
///
/// Matches the width the binary format reserves for per-node link counts
/// and the in-game limit.
pub const MAXIMUM_LINKS: usize = 12;

bitflags! {
    /// Flags applying to a node
    ///
    /// `CHECK_FOR_FLOOR` and `CHECK_FOR_SOLID` exist since format
    /// version 17; older codecs mask them off.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct NodeFlags: u16 {
        const TELEPORTER = 1 << 0;
        const PUSHER = 1 << 1;
        const ELEVATOR_TOP = 1 << 2;
        const ELEVATOR_BOTTOM = 1 << 3;
        const UNDERWATER = 1 << 4;
        const HAZARD = 1 << 5;
        const CHECK_FOR_FLOOR = 1 << 6;
        const CHECK_FOR_SOLID = 1 << 7;
    }
}

/// Link connection type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkType {
    #[default]
    Walk,
    LongJump,
    Teleport,
    WalkOffLedge,
    Pusher,
    BarrierJump,
    Elevator,
    Train,
    ManualJump,
    Unknown,
}

impl LinkType {
    /// Maps a raw type code to a link type; unrecognized codes become
    /// [`LinkType::Unknown`]
    pub fn from_code(code: u16) -> Self {
        match code {
            0 => Self::Walk,
            1 => Self::LongJump,
            2 => Self::Teleport,
            3 => Self::WalkOffLedge,
            4 => Self::Pusher,
            5 => Self::BarrierJump,
            6 => Self::Elevator,
            7 => Self::Train,
            8 => Self::ManualJump,
            _ => Self::Unknown,
        }
    }

    /// The raw type code written to files and documents
    pub fn code(self) -> u16 {
        match self {
            Self::Walk => 0,
            Self::LongJump => 1,
            Self::Teleport => 2,
            Self::WalkOffLedge => 3,
            Self::Pusher => 4,
            Self::BarrierJump => 5,
            Self::Elevator => 6,
            Self::Train => 7,
            Self::ManualJump => 8,
            Self::Unknown => 9,
        }
    }
}

/// Identity of a node within its graph
///
/// Always equal to the node's current index in the graph's node list.
/// Removing a node renumbers every id above it, so ids stay dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The node's index in the graph's node list
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A three-point movement arc describing how an agent executes a
/// non-trivial link (a jump, for example)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Traversal {
    pub point1: Vec3,
    pub point2: Vec3,
    pub point3: Vec3,
}

/// Auxiliary entity metadata attached to a link: a bounding box plus a
/// version-dependent entity reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edict {
    pub mins: Vec3,
    pub maxs: Vec3,
    pub key: EdictKey,
}

/// A directed connection from its owning node to a target node in the
/// same graph
///
/// The traversal and edict, when present, are owned exclusively by the
/// link and destroyed with it.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub target: NodeId,
    pub link_type: LinkType,
    pub traversal: Option<Traversal>,
    pub edict: Option<Edict>,
}

/// A node's order-preserving, capacity-bounded link list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkList {
    links: Vec<Link>,
}

impl LinkList {
    fn new() -> Self {
        Self {
            links: Vec::with_capacity(MAXIMUM_LINKS),
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Link> {
        self.links.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Link> {
        self.links.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.links.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Link> {
        self.links.iter_mut()
    }

    pub(crate) fn push(&mut self, link: Link) -> &mut Link {
        self.links.push(link);
        self.links.last_mut().unwrap()
    }

    pub(crate) fn remove(&mut self, index: usize) -> Link {
        self.links.remove(index)
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&Link) -> bool) {
        self.links.retain(keep);
    }
}

impl std::ops::Index<usize> for LinkList {
    type Output = Link;

    fn index(&self, index: usize) -> &Link {
        &self.links[index]
    }
}

impl<'a> IntoIterator for &'a LinkList {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// A waypoint in the graph, owned by it
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    pub flags: NodeFlags,
    pub origin: Vec3,
    pub radius: u16,
    links: LinkList,
}

impl Node {
    /// The node's identity, equal to its index in the graph's node list
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn links(&self) -> &LinkList {
        &self.links
    }

    /// Appends a new walk link to `target` and returns it for further setup
    ///
    /// Fails with [`Error::CapacityExceeded`] once the node holds
    /// [`MAXIMUM_LINKS`] links; the list is left untouched in that case.
    /// The target is not validated here: use
    /// [`NavigationGraph::add_link`] when the id comes from outside the
    /// graph.
    pub fn new_link(&mut self, target: NodeId) -> Result<&mut Link> {
        if self.links.len() >= MAXIMUM_LINKS {
            return Err(Error::CapacityExceeded {
                node: self.id.index(),
                limit: MAXIMUM_LINKS,
            });
        }

        Ok(self.links.push(Link {
            target,
            link_type: LinkType::Walk,
            traversal: None,
            edict: None,
        }))
    }
}

/// The canonical owned graph of nodes and directed links
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavigationGraph {
    nodes: Vec<Node>,
}

impl NavigationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Appends a node with identity equal to the current node count
    pub fn new_node(&mut self) -> &mut Node {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            flags: NodeFlags::empty(),
            origin: Vec3::ZERO,
            radius: 0,
            links: LinkList::new(),
        });
        self.nodes.last_mut().unwrap()
    }

    /// Appends a link from `node` to `target`, validating that both are
    /// members of this graph
    pub fn add_link(&mut self, node: NodeId, target: NodeId) -> Result<&mut Link> {
        let limit = self.nodes.len();
        if target.index() >= limit {
            return Err(Error::DanglingReference {
                what: "node",
                detail: format!("link target {target} out of range 0..{limit}"),
            });
        }
        let node = self.node_mut(node).ok_or_else(|| Error::DanglingReference {
            what: "node",
            detail: format!("node {node} out of range 0..{limit}"),
        })?;
        node.new_link(target)
    }

    /// Removes the node with the given identity
    ///
    /// Two-phase: first every link anywhere in the graph targeting the node
    /// is cascade-deleted, then the node list is compacted and every node
    /// identity and stored link target above the removed index is
    /// decremented. Dangling targets and identity gaps are never
    /// observable. O(nodes x links), acceptable for an editing operation.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        let index = id.index();
        if index >= self.nodes.len() {
            return Err(Error::DanglingReference {
                what: "node",
                detail: format!("node {id} out of range 0..{}", self.nodes.len()),
            });
        }

        // Phase 1: cascade-delete links targeting the node.
        for node in &mut self.nodes {
            node.links.retain(|link| link.target != id);
        }

        // Phase 2: compact and renumber.
        self.nodes.remove(index);
        for node in &mut self.nodes[index..] {
            node.id.0 -= 1;
        }
        for node in &mut self.nodes {
            for link in node.links.iter_mut() {
                if link.target.0 > id.0 {
                    link.target.0 -= 1;
                }
            }
        }

        Ok(())
    }

    /// Removes one link from one node's list
    ///
    /// No cascading effect on other nodes; the link's traversal and edict
    /// are destroyed with it.
    pub fn remove_link(&mut self, node: NodeId, link_index: usize) -> Result<()> {
        let limit = self.nodes.len();
        let node = self.node_mut(node).ok_or_else(|| Error::DanglingReference {
            what: "node",
            detail: format!("node {node} out of range 0..{limit}"),
        })?;

        if link_index >= node.links.len() {
            return Err(Error::DanglingReference {
                what: "link",
                detail: format!(
                    "link index {link_index} out of range 0..{} on node {}",
                    node.links.len(),
                    node.id
                ),
            });
        }

        node.links.remove(link_index);
        Ok(())
    }
}
