use serde::{Deserialize, Serialize};

/// Knobs for the lenient corners of deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
    pub wrapper_overlap: WrapperOverlap,
    pub unknown_annotations: UnknownAnnotations,
}

impl CodecOptions {
    /// Options that turn every tolerated irregularity into an error.
    pub fn strict() -> Self {
        Self {
            wrapper_overlap: WrapperOverlap::Reject,
            unknown_annotations: UnknownAnnotations::Reject,
        }
    }
}

/// What to do when two different wrappers cover the same code point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WrapperOverlap {
    /// The wrapper listed later in the block's annotations wins.
    #[default]
    LastWins,
    Reject,
}

/// What to do with annotation types the codec doesn't know.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownAnnotations {
    #[default]
    Skip,
    Reject,
}
