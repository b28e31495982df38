use crate::layout::{CardDisplay, HandleSide, Layout, Position};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Node-link renderer document: `{nodes, edges}` plus bounds and warnings.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub direction: String,
    pub width: f64,
    pub height: f64,
    pub display: CardDisplay,
    pub nodes: Vec<NodeDump>,
    pub edges: Vec<EdgeDump>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub position: Position,
    pub data: NodeDataDump,
    pub source_position: HandleSide,
    pub target_position: HandleSide,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDataDump {
    pub name: String,
    pub familyname: String,
    pub gender: &'static str,
    pub dob: Option<String>,
    pub dod: Option<String>,
    pub image: Option<String>,
    pub label: String,
    pub initials: String,
    pub deceased: bool,
    pub color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDump {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub style: EdgeStyleDump,
    pub path_options: PathOptionsDump,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyleDump {
    pub stroke: String,
    pub stroke_width: f32,
    pub stroke_linecap: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PathOptionsDump {
    pub curvature: f32,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeDump {
                id: node.id.clone(),
                kind: "person",
                position: node.position,
                data: NodeDataDump {
                    name: node.data.name.clone(),
                    familyname: node.data.familyname.clone(),
                    gender: node.data.gender.as_token(),
                    dob: node.data.dob.clone(),
                    dod: node.data.dod.clone(),
                    image: node.data.image.clone(),
                    label: node.data.label.clone(),
                    initials: node.data.initials.clone(),
                    deceased: node.data.deceased,
                    color: node.data.color.clone(),
                },
                source_position: node.source_handle,
                target_position: node.target_handle,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeDump {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                kind: edge.curve_kind.as_token(),
                style: EdgeStyleDump {
                    stroke: edge.stroke.color.clone(),
                    stroke_width: edge.stroke.width,
                    stroke_linecap: edge.stroke.cap.as_token(),
                },
                path_options: PathOptionsDump {
                    curvature: edge.curve_intensity,
                },
            })
            .collect();

        LayoutDump {
            direction: format!("{:?}", layout.direction),
            width: layout.width,
            height: layout.height,
            display: layout.display,
            nodes,
            edges,
            warnings: layout.warnings.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(&mut writer, &dump)?;
    writer.flush()?;
    Ok(())
}
