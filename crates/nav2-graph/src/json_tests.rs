//! Tests for the graph <-> JSON document conversion

#[cfg(test)]
mod tests {
    use crate::test_graphs::sample_graph;
    use crate::{FormatVersion, MapInfo, NavJson, DOCUMENT_VERSION};
    use nav2_common::{Error, Vec3};

    #[test]
    fn graph_survives_a_json_roundtrip() {
        for version in FormatVersion::ALL {
            let graph = sample_graph(version);
            let text = NavJson::from_graph(&graph).to_json_string().unwrap();
            let decoded = NavJson::from_json_string(&text).unwrap().to_graph().unwrap();
            assert_eq!(decoded, graph, "version {version}");
        }
    }

    #[test]
    fn vectors_are_encoded_as_three_element_arrays() {
        let document = NavJson::from_graph(&sample_graph(FormatVersion::V17));
        let value = serde_json::to_value(&document).unwrap();

        let origin = &value["nodes"][0]["origin"];
        assert!(origin.is_array());
        assert_eq!(origin.as_array().unwrap().len(), 3);

        let traversal = &value["nodes"][0]["links"][0]["traversal"];
        assert_eq!(traversal.as_array().unwrap().len(), 3);
        assert_eq!(traversal[1].as_array().unwrap().len(), 3);
    }

    #[test]
    fn absent_traversal_and_edict_are_omitted() {
        let document = NavJson::from_graph(&sample_graph(FormatVersion::V15));
        let value = serde_json::to_value(&document).unwrap();

        // Node 1's only link has neither traversal nor edict.
        let link = &value["nodes"][1]["links"][0];
        assert!(link.get("traversal").is_none());
        assert!(link.get("edict").is_none());
    }

    #[test]
    fn authoring_metadata_passes_through_unchanged() {
        let mut document = NavJson::from_graph(&sample_graph(FormatVersion::V17));
        assert_eq!(document.version, DOCUMENT_VERSION);

        document.map = Some(MapInfo {
            name: Some("The Edge".to_owned()),
            author: Some("id Software".to_owned()),
            filename: Some("q2dm1.bsp".to_owned()),
            urls: Some(vec!["https://example.com/q2dm1".to_owned()]),
        });
        document.contributors = Some(vec!["alice".to_owned(), "bob".to_owned()]);
        document.comments = Some("hand-tuned around the mega health".to_owned());

        let text = document.to_json_string().unwrap();
        let parsed = NavJson::from_json_string(&text).unwrap();
        assert_eq!(parsed, document);

        // Metadata is irrelevant to graph structure.
        assert_eq!(
            parsed.to_graph().unwrap(),
            sample_graph(FormatVersion::V17)
        );
    }

    #[test]
    fn unknown_document_versions_are_rejected() {
        let mut document = NavJson::from_graph(&sample_graph(FormatVersion::V17));
        document.version = 99;

        // The bad version must also survive a text round trip and still be
        // rejected on conversion, not silently read as the current schema.
        let text = document.to_json_string().unwrap();
        let parsed = NavJson::from_json_string(&text).unwrap();
        assert_eq!(parsed.version, 99);
        assert!(matches!(
            parsed.to_graph(),
            Err(Error::InvalidDocument(_))
        ));
    }

    #[test]
    fn undefined_node_flag_bits_are_rejected() {
        let mut document = NavJson::from_graph(&sample_graph(FormatVersion::V17));
        document.nodes[0].flags |= 0x0100;

        assert!(matches!(
            document.to_graph(),
            Err(Error::InvalidDocument(_))
        ));
    }

    #[test]
    fn duplicate_node_origins_are_rejected() {
        let mut document = NavJson::from_graph(&sample_graph(FormatVersion::V17));
        document.nodes[2].origin = document.nodes[0].origin;

        assert!(matches!(
            document.to_graph(),
            Err(Error::InvalidDocument(_))
        ));
    }

    #[test]
    fn unresolved_target_origin_is_a_dangling_reference() {
        let mut document = NavJson::from_graph(&sample_graph(FormatVersion::V17));
        document.nodes[1].links[0].target = Vec3::new(9999.0, 0.0, 0.0);

        assert!(matches!(
            document.to_graph(),
            Err(Error::DanglingReference { what: "node", .. })
        ));
    }

    #[test]
    fn target_resolution_is_bit_exact() {
        // 0.0 and -0.0 compare equal as floats but differ in bits; the
        // lookup is defined over bits, so the link must not resolve.
        let mut document = NavJson::from_graph(&sample_graph(FormatVersion::V17));
        let origin = document.nodes[0].origin;
        assert_eq!(origin.y, 0.0);
        document.nodes[1].links[0].target = Vec3::new(origin.x, -0.0, origin.z);

        assert!(matches!(
            document.to_graph(),
            Err(Error::DanglingReference { .. })
        ));
    }

    #[test]
    fn edict_without_a_usable_key_is_rejected() {
        let mut document = NavJson::from_graph(&sample_graph(FormatVersion::V14));
        let edict = document.nodes[0].links[1].edict.as_mut().unwrap();
        edict.classname = None;

        assert!(matches!(
            document.to_graph(),
            Err(Error::InvalidDocument(_))
        ));
    }

    #[test]
    fn unknown_link_type_codes_map_to_unknown() {
        let mut document = NavJson::from_graph(&sample_graph(FormatVersion::V17));
        document.nodes[1].links[0].link_type = 42;

        let graph = document.to_graph().unwrap();
        let link = &graph.nodes()[1].links()[0];
        assert_eq!(link.link_type, crate::LinkType::Unknown);
    }
}
