use serde::Serialize;

use super::error::LayoutWarning;
use crate::config::{EdgeStyle, LineCap};
use crate::ir::{Direction, Gender};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Side of the card an edge attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleSide {
    /// `(source, target)` handle sides for a flow direction.
    pub fn for_direction(direction: Direction) -> (Self, Self) {
        match direction {
            Direction::TopDown => (Self::Bottom, Self::Top),
            Direction::LeftRight => (Self::Right, Self::Left),
        }
    }
}

/// Display data carried to the card renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub name: String,
    pub familyname: String,
    pub gender: Gender,
    pub dob: Option<String>,
    pub dod: Option<String>,
    pub image: Option<String>,
    pub label: String,
    pub initials: String,
    pub deceased: bool,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub data: NodeData,
    pub position: Position,
    pub source_handle: HandleSide,
    pub target_handle: HandleSide,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeStroke {
    pub color: String,
    pub width: f32,
    pub cap: LineCap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub stroke: EdgeStroke,
    pub curve_kind: EdgeStyle,
    pub curve_intensity: f32,
}

/// Card flags forwarded from the settings unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDisplay {
    pub show_death_icons: bool,
    pub show_birth_icons: bool,
    pub show_deceased_banner: bool,
    pub font_size: f32,
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub direction: Direction,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub warnings: Vec<LayoutWarning>,
    pub display: CardDisplay,
    pub width: f64,
    pub height: f64,
}

impl Layout {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id == id)
    }
}
