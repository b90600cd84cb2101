/// Errors raised while converting between leaf trees and annotated blocks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("malformed `{kind}` annotation: {reason}")]
    MalformedAnnotation {
        kind: String,
        reason: MalformedReason,
    },
    #[error("wrappers `{first}` and `{second}` overlap at position {pos}")]
    OverlappingWrappers {
        pos: usize,
        first: String,
        second: String,
    },
    #[error("unknown annotation type `{0}`")]
    UnknownAnnotation(String),
}

impl CodecError {
    pub(crate) fn malformed(kind: impl Into<String>, reason: MalformedReason) -> Self {
        CodecError::MalformedAnnotation {
            kind: kind.into(),
            reason,
        }
    }
}

/// Why an annotation's `starts`/`ends` pair was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("{starts} starts but {ends} ends")]
    LengthMismatch { starts: usize, ends: usize },
    #[error("span {index} is empty or inverted ({start}..{end})")]
    EmptySpan {
        index: usize,
        start: usize,
        end: usize,
    },
    #[error("span {index} starts before the previous span ends")]
    Unsorted { index: usize },
    #[error("span {index} ends at {end}, past the text length {len}")]
    OutOfBounds { index: usize, end: usize, len: usize },
    #[error("range {start}..{end} is empty or inverted")]
    InvalidRange { start: usize, end: usize },
    #[error("range {start}..{end} submitted after a span ending at {last_end}")]
    OutOfOrder {
        start: usize,
        end: usize,
        last_end: usize,
    },
}
