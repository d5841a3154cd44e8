//! Graph <-> JSON document conversion
//!
//! The JSON form is the human-editable representation: link targets are
//! cross-referenced by the target node's spatial origin instead of by
//! index, and the document carries free-form authoring metadata that passes
//! through conversion untouched.

use std::collections::HashMap;

use nav2_common::{Error, Result, Vec3};
use nav2_file::EdictKey;
use serde::{Deserialize, Serialize};

use super::graph::{Edict, LinkType, NavigationGraph, NodeFlags, NodeId, Traversal};

/// Version of the JSON document schema
pub const DOCUMENT_VERSION: u32 = 1;

/// Free-form information about the map the navmesh belongs to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urls: Option<Vec<String>>,
}

/// Edict entry of a JSON link
///
/// Carries either `entity_id` (format version 15) or the
/// `targetname`/`classname` string-table pair (versions 14 and 17).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonEdict {
    pub mins: Vec3,
    pub maxs: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targetname: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classname: Option<i32>,
}

/// Link entry of a JSON node; the target node is addressed by its origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonLink {
    pub target: Vec3,
    #[serde(rename = "type")]
    pub link_type: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traversal: Option<[Vec3; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edict: Option<JsonEdict>,
}

/// Node entry of a JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonNode {
    pub origin: Vec3,
    /// Raw [`NodeFlags`] bits; undefined bits fail conversion
    pub flags: u16,
    pub radius: u16,
    #[serde(default)]
    pub links: Vec<JsonLink>,
}

/// A graph-shaped JSON document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavJson {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<MapInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default)]
    pub nodes: Vec<JsonNode>,
}

/// Bit-exact hash/equality key for an origin vector
///
/// Target resolution is defined over exact floating-point equality, so the
/// lookup keys are the raw f32 bit patterns.
fn origin_key(origin: Vec3) -> [u32; 3] {
    [origin.x.to_bits(), origin.y.to_bits(), origin.z.to_bits()]
}

impl NavJson {
    /// Builds a document from a graph; authoring metadata starts empty
    pub fn from_graph(graph: &NavigationGraph) -> Self {
        let nodes = graph
            .nodes()
            .iter()
            .map(|node| JsonNode {
                origin: node.origin,
                flags: node.flags.bits(),
                radius: node.radius,
                links: node
                    .links()
                    .iter()
                    .map(|link| {
                        // Identity equals index, so the target node always
                        // resolves.
                        let target = &graph.nodes()[link.target.index()];
                        JsonLink {
                            target: target.origin,
                            link_type: link.link_type.code(),
                            traversal: link
                                .traversal
                                .map(|traversal| {
                                    [traversal.point1, traversal.point2, traversal.point3]
                                }),
                            edict: link.edict.map(JsonEdict::from_edict),
                        }
                    })
                    .collect(),
            })
            .collect();

        Self {
            version: DOCUMENT_VERSION,
            map: None,
            contributors: None,
            comments: None,
            nodes,
        }
    }

    /// Builds a graph from the document
    ///
    /// Only documents declaring a supported schema version convert; anything
    /// else is rejected before its nodes are interpreted.
    ///
    /// Link targets resolve through a position lookup keyed by exact
    /// floating-point equality. Two nodes sharing a bit-identical origin
    /// would make that lookup ambiguous, so such documents are rejected
    /// outright instead of silently misattributing edges.
    pub fn to_graph(&self) -> Result<NavigationGraph> {
        if self.version != DOCUMENT_VERSION {
            return Err(Error::InvalidDocument(format!(
                "unknown document version {}; expected {DOCUMENT_VERSION}",
                self.version
            )));
        }

        let mut graph = NavigationGraph::new();
        let mut nodes_by_origin = HashMap::with_capacity(self.nodes.len());

        for (index, json_node) in self.nodes.iter().enumerate() {
            let flags = NodeFlags::from_bits(json_node.flags).ok_or_else(|| {
                Error::InvalidDocument(format!(
                    "node {index} declares undefined flag bits {:#06x}",
                    json_node.flags
                ))
            })?;

            let node = graph.new_node();
            node.flags = flags;
            node.origin = json_node.origin;
            node.radius = json_node.radius;

            let id = node.id();
            if nodes_by_origin.insert(origin_key(json_node.origin), id).is_some() {
                return Err(Error::InvalidDocument(format!(
                    "two nodes share the origin {:?}; link targets cannot be resolved",
                    json_node.origin
                )));
            }
        }

        for (index, json_node) in self.nodes.iter().enumerate() {
            for json_link in &json_node.links {
                let target = *nodes_by_origin
                    .get(&origin_key(json_link.target))
                    .ok_or_else(|| Error::DanglingReference {
                        what: "node",
                        detail: format!(
                            "no node has the origin {:?} targeted by a link of node {index}",
                            json_link.target
                        ),
                    })?;

                let node = graph.node_mut(NodeId(index as u32)).unwrap();
                let link = node.new_link(target)?;
                link.link_type = LinkType::from_code(json_link.link_type);
                link.traversal = json_link.traversal.map(|points| Traversal {
                    point1: points[0],
                    point2: points[1],
                    point3: points[2],
                });
                link.edict = json_link
                    .edict
                    .as_ref()
                    .map(JsonEdict::to_edict)
                    .transpose()?;
            }
        }

        Ok(graph)
    }

    /// Serializes the document to pretty-printed JSON text
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserializes a document from JSON text
    pub fn from_json_string(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl JsonEdict {
    fn from_edict(edict: Edict) -> Self {
        let (entity_id, targetname, classname) = match edict.key {
            EdictKey::EntityId(entity_id) => (Some(entity_id), None, None),
            EdictKey::StringIds {
                targetname,
                classname,
            } => (None, Some(targetname), Some(classname)),
        };

        Self {
            mins: edict.mins,
            maxs: edict.maxs,
            entity_id,
            targetname,
            classname,
        }
    }

    fn to_edict(&self) -> Result<Edict> {
        let key = match (self.entity_id, self.targetname, self.classname) {
            (Some(entity_id), None, None) => EdictKey::EntityId(entity_id),
            (None, Some(targetname), Some(classname)) => EdictKey::StringIds {
                targetname,
                classname,
            },
            _ => {
                return Err(Error::InvalidDocument(
                    "an edict must carry either entity_id or both targetname and classname"
                        .to_owned(),
                ));
            }
        };

        Ok(Edict {
            mins: self.mins,
            maxs: self.maxs,
            key,
        })
    }
}
