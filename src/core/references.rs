use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::Reference;

const UNTITLED_REFERENCE: &str = "Untitled";

/// Web source attached to a grounded model reply.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GroundingChunk {
    #[must_use]
    pub fn web(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            title: Some(title.into()),
        }
    }
}

/// Keeps the first reference seen for every non-empty `uri`, in first-seen
/// order.
#[must_use]
pub fn dedupe_references<I>(refs: I) -> Vec<Reference>
where
    I: IntoIterator<Item = Reference>,
{
    let mut unique: IndexMap<String, Reference> = IndexMap::new();
    let mut dropped = 0_usize;
    for reference in refs {
        if reference.uri.is_empty() {
            dropped += 1;
            continue;
        }
        match unique.entry(reference.uri.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(reference);
            }
            Entry::Occupied(_) => dropped += 1,
        }
    }
    trace!(kept = unique.len(), dropped, "deduplicated references");
    unique.into_values().collect()
}

/// Converts grounding chunks into deduplicated references.
#[must_use]
pub fn references_from_grounding(chunks: &[GroundingChunk]) -> Vec<Reference> {
    dedupe_references(chunks.iter().map(|chunk| {
        let title = chunk
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(UNTITLED_REFERENCE);
        Reference::new(chunk.uri.clone().unwrap_or_default(), title)
    }))
}
