use std::collections::BTreeMap;

use super::kinds::AnnotationKind;
use crate::{
    error::{CodecError, MalformedReason},
    model::{Annotation, Attributes},
};

/// Accumulates spans into annotations keyed by identity.
///
/// Spans for one identity must arrive in non-decreasing `start` order (the
/// serializer walks leaves left to right). A span that starts exactly where
/// the previous one ended extends it instead of adding a new pair.
#[derive(Debug, Default)]
pub struct AnnotationSet {
    entries: BTreeMap<String, Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records `[start, end)` for the annotation identified by `kind` and
    /// `attributes`, merging with the previous span when adjacent.
    pub fn add_span(
        &mut self,
        kind: AnnotationKind,
        attributes: Attributes,
        start: usize,
        end: usize,
    ) -> Result<(), CodecError> {
        if start >= end {
            return Err(CodecError::malformed(
                kind.as_str(),
                MalformedReason::InvalidRange { start, end },
            ));
        }

        let key = kind.identity_key(&attributes);
        let entry = self
            .entries
            .entry(key)
            .or_insert_with(|| Annotation::new(kind.as_str(), attributes));

        if let Some(last_end) = entry.ends.last_mut() {
            if *last_end == start {
                *last_end = end;
                return Ok(());
            }
            if *last_end > start {
                return Err(CodecError::malformed(
                    kind.as_str(),
                    MalformedReason::OutOfOrder {
                        start,
                        end,
                        last_end: *last_end,
                    },
                ));
            }
        }

        entry.starts.push(start);
        entry.ends.push(end);
        Ok(())
    }

    /// Consumes the set, returning annotations ordered by first position.
    ///
    /// Entries come out of the map in identity-key order; the stable sort by
    /// `starts[0]` then leaves the key as the tie breaker.
    pub fn list(self) -> Vec<Annotation> {
        let mut out: Vec<Annotation> = self.entries.into_values().collect();
        out.sort_by_key(|a| a.starts.first().copied().unwrap_or_default());
        out
    }
}
