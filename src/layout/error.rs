use serde::Serialize;
use thiserror::Error;

/// Recoverable problems found while laying out a family tree. None of these
/// abort the pipeline; the affected edge or coordinate is dropped or reset
/// and the layout carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LayoutWarning {
    #[error("edge {edge_id}: parent `{parent}` of `{child}` has no record; edge dropped")]
    DanglingParentReference {
        edge_id: String,
        child: String,
        parent: String,
    },
    #[error("edge {edge_id}: `{parent}` -> `{child}` closes an ancestry cycle; edge dropped")]
    CyclicAncestry {
        edge_id: String,
        parent: String,
        child: String,
    },
    #[error("node {node_id}: non-finite position reset to the origin")]
    NonFinitePosition { node_id: String },
}

impl LayoutWarning {
    pub fn edge_id(&self) -> Option<&str> {
        match self {
            Self::DanglingParentReference { edge_id, .. } | Self::CyclicAncestry { edge_id, .. } => {
                Some(edge_id)
            }
            Self::NonFinitePosition { .. } => None,
        }
    }
}
