//! Tests for the graph model's identity and ownership invariants

#[cfg(test)]
mod tests {
    use crate::{Edict, NavigationGraph, NodeId, Traversal, MAXIMUM_LINKS};
    use nav2_common::{Error, Vec3};
    use nav2_file::EdictKey;

    fn graph_with_nodes(count: usize) -> NavigationGraph {
        let mut graph = NavigationGraph::new();
        for i in 0..count {
            let node = graph.new_node();
            node.origin = Vec3::new(i as f32 * 64.0, 0.0, 0.0);
        }
        graph
    }

    #[test]
    fn new_node_identity_equals_index() {
        let graph = graph_with_nodes(3);
        for (index, node) in graph.nodes().iter().enumerate() {
            assert_eq!(node.id().index(), index);
        }
    }

    #[test]
    fn removing_a_node_renumbers_the_rest() {
        // Nodes [A, B, C] with identities 0, 1, 2; removing B must leave
        // A at 0 and C at 1, with no identity gap.
        let mut graph = graph_with_nodes(3);
        let a = graph.nodes()[0].origin;
        let c = graph.nodes()[2].origin;

        graph.remove_node(NodeId(1)).unwrap();

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.nodes()[0].id(), NodeId(0));
        assert_eq!(graph.nodes()[0].origin, a);
        assert_eq!(graph.nodes()[1].id(), NodeId(1));
        assert_eq!(graph.nodes()[1].origin, c);
    }

    #[test]
    fn removing_a_node_cascades_to_links_targeting_it() {
        let mut graph = graph_with_nodes(3);
        graph.add_link(NodeId(0), NodeId(1)).unwrap();
        graph.add_link(NodeId(0), NodeId(2)).unwrap();
        graph.add_link(NodeId(2), NodeId(1)).unwrap();

        graph.remove_node(NodeId(1)).unwrap();

        // The two links targeting the removed node are gone; the survivor
        // now references the renumbered node.
        let node = graph.node(NodeId(0)).unwrap();
        assert_eq!(node.links().len(), 1);
        assert_eq!(node.links()[0].target, NodeId(1));

        let node = graph.node(NodeId(1)).unwrap();
        assert!(node.links().is_empty());
    }

    #[test]
    fn link_capacity_is_enforced_without_truncation() {
        let mut graph = graph_with_nodes(2);

        for _ in 0..MAXIMUM_LINKS {
            graph.add_link(NodeId(0), NodeId(1)).unwrap();
        }

        let result = graph.add_link(NodeId(0), NodeId(1));
        assert!(matches!(
            result,
            Err(Error::CapacityExceeded { node: 0, limit }) if limit == MAXIMUM_LINKS
        ));
        assert_eq!(graph.node(NodeId(0)).unwrap().links().len(), MAXIMUM_LINKS);
    }

    #[test]
    fn remove_link_destroys_its_traversal_and_edict() {
        let mut graph = graph_with_nodes(2);

        let link = graph.add_link(NodeId(0), NodeId(1)).unwrap();
        link.traversal = Some(Traversal {
            point1: Vec3::ZERO,
            point2: Vec3::ONE,
            point3: Vec3::ZERO,
        });
        link.edict = Some(Edict {
            mins: Vec3::ZERO,
            maxs: Vec3::ONE,
            key: EdictKey::EntityId(-2),
        });
        graph.add_link(NodeId(0), NodeId(0)).unwrap();

        graph.remove_link(NodeId(0), 0).unwrap();

        let node = graph.node(NodeId(0)).unwrap();
        assert_eq!(node.links().len(), 1);
        assert_eq!(node.links()[0].target, NodeId(0));
    }

    #[test]
    fn link_targets_outside_the_graph_are_rejected() {
        let mut graph = graph_with_nodes(1);
        assert!(matches!(
            graph.add_link(NodeId(0), NodeId(1)),
            Err(Error::DanglingReference { what: "node", .. })
        ));
    }

    #[test]
    fn removing_an_unknown_node_fails() {
        let mut graph = graph_with_nodes(1);
        assert!(matches!(
            graph.remove_node(NodeId(5)),
            Err(Error::DanglingReference { what: "node", .. })
        ));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn remove_link_out_of_range_fails() {
        let mut graph = graph_with_nodes(1);
        assert!(matches!(
            graph.remove_link(NodeId(0), 0),
            Err(Error::DanglingReference { what: "link", .. })
        ));
    }
}
