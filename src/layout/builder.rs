use std::collections::HashMap;

use super::error::LayoutWarning;
use super::types::{Edge, EdgeStroke, HandleSide, Node, NodeData, Position};
use crate::config::Settings;
use crate::ir::{Direction, PersonRecord};

/// Parent → child link by node index, parallel to `FamilyGraph::edges`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub parent: usize,
    pub child: usize,
}

#[derive(Debug, Clone)]
pub struct FamilyGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub links: Vec<Link>,
    pub warnings: Vec<LayoutWarning>,
}

pub fn edge_id(parent: &str, child: &str) -> String {
    format!("{parent}->{child}")
}

/// Turns person records into one node per record and one edge per resolvable
/// parent reference. References to ids with no record are dropped and
/// reported as `DanglingParentReference`.
pub fn build_graph(records: &[PersonRecord], settings: &Settings) -> FamilyGraph {
    let mut index_by_id: HashMap<&str, usize> = HashMap::new();
    for (idx, record) in records.iter().enumerate() {
        index_by_id.entry(record.id.as_str()).or_insert(idx);
    }

    let (source_handle, target_handle) = HandleSide::for_direction(Direction::TopDown);
    let nodes: Vec<Node> = records
        .iter()
        .map(|record| Node {
            id: record.id.clone(),
            data: node_data(record, settings),
            position: Position::default(),
            source_handle,
            target_handle,
        })
        .collect();

    let mut edges = Vec::new();
    let mut links = Vec::new();
    let mut warnings = Vec::new();
    for (child_idx, record) in records.iter().enumerate() {
        for parent_id in record.parents() {
            let id = edge_id(parent_id, &record.id);
            let Some(&parent_idx) = index_by_id.get(parent_id) else {
                let warning = LayoutWarning::DanglingParentReference {
                    edge_id: id,
                    child: record.id.clone(),
                    parent: parent_id.to_string(),
                };
                tracing::warn!("{warning}");
                warnings.push(warning);
                continue;
            };
            let parent = &records[parent_idx];
            edges.push(Edge {
                id,
                source: parent_id.to_string(),
                target: record.id.clone(),
                stroke: EdgeStroke {
                    color: settings.colors.color_for(parent.gender).to_string(),
                    width: settings.edge_width,
                    cap: settings.edge_cap,
                },
                curve_kind: settings.edge_style,
                curve_intensity: settings.curve_intensity,
            });
            links.push(Link {
                parent: parent_idx,
                child: child_idx,
            });
        }
    }

    FamilyGraph {
        nodes,
        edges,
        links,
        warnings,
    }
}

fn node_data(record: &PersonRecord, settings: &Settings) -> NodeData {
    let label = format!("{} {}", record.name, record.familyname)
        .trim()
        .to_string();
    let deceased = record
        .dod
        .as_deref()
        .map(|dod| !dod.trim().is_empty())
        .unwrap_or(false);
    NodeData {
        name: record.name.clone(),
        familyname: record.familyname.clone(),
        gender: record.gender,
        dob: record.dob.clone(),
        dod: record.dod.clone(),
        image: record.image.clone(),
        label,
        initials: initials(&record.name, &record.familyname),
        deceased,
        color: settings.colors.color_for(record.gender).to_string(),
    }
}

fn initials(name: &str, familyname: &str) -> String {
    let Some(first) = name.trim().chars().next() else {
        return "?".to_string();
    };
    let mut out = String::new();
    out.push(first);
    if let Some(second) = familyname.trim().chars().next() {
        out.push(second);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EdgeStyle;
    use crate::ir::Gender;

    fn family() -> Vec<PersonRecord> {
        vec![
            PersonRecord::new("1", "Anna").with_gender(Gender::Female),
            PersonRecord::new("2", "Bert").with_gender(Gender::Male),
            PersonRecord::new("3", "Cleo")
                .with_gender(Gender::Other)
                .with_parents(Some("1"), Some("2")),
        ]
    }

    #[test]
    fn one_node_per_record_in_input_order() {
        let graph = build_graph(&family(), &Settings::default());
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }

    #[test]
    fn edge_color_follows_parent_gender() {
        let settings = Settings::default();
        let graph = build_graph(&family(), &settings);
        assert_eq!(graph.edges.len(), 2);
        assert_eq!(graph.edges[0].id, "1->3");
        assert_eq!(graph.edges[0].stroke.color, settings.colors.female);
        assert_eq!(graph.edges[1].id, "2->3");
        assert_eq!(graph.edges[1].stroke.color, settings.colors.male);
        assert_eq!(
            graph.links,
            vec![
                Link { parent: 0, child: 2 },
                Link { parent: 1, child: 2 }
            ]
        );
    }

    #[test]
    fn edge_curve_comes_from_settings() {
        let mut settings = Settings::default().with_edge_style(EdgeStyle::Step);
        settings.curve_intensity = 0.8;
        let graph = build_graph(&family(), &settings);
        assert!(graph.edges.iter().all(|e| e.curve_kind == EdgeStyle::Step));
        assert!(graph.edges.iter().all(|e| e.curve_intensity == 0.8));
    }

    #[test]
    fn dangling_parent_is_dropped_with_warning() {
        let records = vec![PersonRecord::new("5", "Zed").with_parents(Some("999"), None)];
        let graph = build_graph(&records, &Settings::default());
        assert!(graph.edges.is_empty());
        assert_eq!(
            graph.warnings,
            vec![LayoutWarning::DanglingParentReference {
                edge_id: "999->5".to_string(),
                child: "5".to_string(),
                parent: "999".to_string(),
            }]
        );
    }

    #[test]
    fn card_data_is_derived() {
        let mut records = vec![
            PersonRecord::new("1", "Anna")
                .with_gender(Gender::Female)
                .with_dod("2001-01-01"),
            PersonRecord::new("2", ""),
        ];
        records[0].familyname = "Berg".to_string();
        let graph = build_graph(&records, &Settings::default());
        let anna = &graph.nodes[0].data;
        assert_eq!(anna.label, "Anna Berg");
        assert_eq!(anna.initials, "AB");
        assert!(anna.deceased);
        assert_eq!(anna.color, "#E91E63");
        let blank = &graph.nodes[1].data;
        assert_eq!(blank.initials, "?");
        assert!(!blank.deceased);
        assert_eq!(blank.color, "#9E9E9E");
    }
}
