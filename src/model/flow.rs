//! Flow model: node records of one diagram grouped by kind

use super::kind::NodeKind;
use super::node::NodeRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// All recognized nodes of one diagram file
///
/// Built once by [`crate::extract`] and read-only afterwards. Kinds iterate
/// in [`NodeKind`] declaration order, records in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowModel {
    path: PathBuf,
    nodes: BTreeMap<NodeKind, Vec<NodeRecord>>,
}

impl FlowModel {
    pub(crate) fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            nodes: BTreeMap::new(),
        }
    }

    pub(crate) fn push(&mut self, record: NodeRecord) {
        self.nodes.entry(record.kind()).or_default().push(record);
    }

    /// Path of the diagram this model was extracted from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records of one kind (empty slice when the flow has none)
    pub fn nodes(&self, kind: NodeKind) -> &[NodeRecord] {
        self.nodes.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes(kind).len()
    }

    /// All records, kind by kind
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values().flatten()
    }

    /// Find a record by its diagram id
    pub fn find(&self, id: &str) -> Option<&NodeRecord> {
        self.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
