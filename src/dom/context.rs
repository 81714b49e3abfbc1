//! Per-document aggregates shared by the builders and the scorer.
//!
//! Built once right after extraction and only read afterwards. id/name counts
//! cover exactly the extracted element universe; "unique" therefore means
//! unique among those records, not in a live DOM.

use super::{Document, ElementRecord, NodeKey};
use std::collections::HashMap;

/// Approximate identity of a record: id, class string and text.
pub type Signature = (Option<String>, Option<String>, Option<String>);

#[derive(Debug, Clone, Default)]
pub struct DocumentContextIndex {
    id_counts: HashMap<String, usize>,
    name_counts: HashMap<String, usize>,
    sibling_positions: HashMap<NodeKey, usize>,
    /// Record signatures per tag, in extraction (document) order.
    tag_signatures: HashMap<String, Vec<Signature>>,
}

impl DocumentContextIndex {
    /// Index built from records alone, e.g. records reloaded from an export.
    /// Sibling positions stay empty.
    pub fn from_elements(elements: &[ElementRecord]) -> Self {
        let mut index = Self::default();
        for element in elements {
            if let Some(id) = &element.id {
                *index.id_counts.entry(id.clone()).or_insert(0) += 1;
            }
            if let Some(name) = &element.name {
                *index.name_counts.entry(name.clone()).or_insert(0) += 1;
            }
            index
                .tag_signatures
                .entry(element.tag.clone())
                .or_default()
                .push(signature(element));
        }
        index
    }

    /// Full index: record counts plus the 1-based position of every document
    /// element among same-tag siblings under its parent.
    pub fn build(document: &Document, elements: &[ElementRecord]) -> Self {
        let mut index = Self::from_elements(elements);
        for key in document.keys() {
            if index.sibling_positions.contains_key(&key) {
                continue;
            }
            for (position, sibling) in document.siblings_by_tag(key).into_iter().enumerate() {
                index.sibling_positions.insert(sibling, position + 1);
            }
        }
        index
    }

    pub fn id_count(&self, id: &str) -> usize {
        self.id_counts.get(id).copied().unwrap_or(0)
    }

    pub fn name_count(&self, name: &str) -> usize {
        self.name_counts.get(name).copied().unwrap_or(0)
    }

    pub fn is_unique_id(&self, id: &str) -> bool {
        self.id_count(id) == 1
    }

    pub fn sibling_position(&self, node: NodeKey) -> Option<usize> {
        self.sibling_positions.get(&node).copied()
    }

    /// 1-based occurrence of `element` among same-tag records, matched by
    /// signature. Attribute-identical elements resolve to the first of them.
    pub fn occurrence_index(&self, element: &ElementRecord) -> usize {
        let wanted = signature(element);
        self.tag_signatures
            .get(&element.tag)
            .and_then(|sigs| sigs.iter().position(|s| *s == wanted))
            .map(|p| p + 1)
            .unwrap_or(1)
    }
}

pub fn signature(element: &ElementRecord) -> Signature {
    (
        element.id.clone(),
        element.class_string(),
        element.text.clone(),
    )
}
