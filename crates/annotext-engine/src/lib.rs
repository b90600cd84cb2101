pub mod codec;
pub mod error;
pub mod model;
pub mod render;

// Re-export key types for easier usage
pub use codec::{
    CodecOptions, UnknownAnnotations, WrapperOverlap, deserialize, deserialize_with, serialize,
};
pub use error::{CodecError, MalformedReason};
pub use model::{
    Annotation, Attributes, Block, BlockTree, BlockType, Inline, Leaf, Span, Styles, Wrapper,
    WrapperKind,
};
