use crate::model::{Annotation, Span};

/// Finds the span of `annotation` containing code-point position `pos`.
///
/// Spans must be sorted and disjoint. The search discards every span whose
/// end is at or before `pos`; the first remaining span contains `pos` iff it
/// starts at or before it. O(log n) in the number of spans.
pub fn contains(annotation: &Annotation, pos: usize) -> Option<usize> {
    let n = annotation.starts.len().min(annotation.ends.len());
    let ends = &annotation.ends[..n];
    let idx = ends.partition_point(|&end| end <= pos);
    if idx < n && Span::new(annotation.starts[idx], ends[idx]).contains(pos) {
        Some(idx)
    } else {
        None
    }
}
