use crate::{
    error::{CodecError, MalformedReason},
    model::Annotation,
};

/// Checks the `starts`/`ends` invariants of an incoming annotation.
///
/// Spans must pair up, be non-empty, be sorted and disjoint, and end within
/// a text of `text_len` code points.
pub fn validate(annotation: &Annotation, text_len: usize) -> Result<(), CodecError> {
    let fail = |reason| Err(CodecError::malformed(annotation.kind.as_str(), reason));

    if annotation.starts.len() != annotation.ends.len() {
        return fail(MalformedReason::LengthMismatch {
            starts: annotation.starts.len(),
            ends: annotation.ends.len(),
        });
    }

    let mut prev_end = None;
    for (index, span) in annotation.spans().enumerate() {
        if span.start >= span.end {
            return fail(MalformedReason::EmptySpan {
                index,
                start: span.start,
                end: span.end,
            });
        }
        if prev_end.is_some_and(|end| span.start < end) {
            return fail(MalformedReason::Unsorted { index });
        }
        if span.end > text_len {
            return fail(MalformedReason::OutOfBounds {
                index,
                end: span.end,
                len: text_len,
            });
        }
        prev_end = Some(span.end);
    }
    Ok(())
}
