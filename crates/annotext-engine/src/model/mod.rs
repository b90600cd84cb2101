//! # Data Model
//!
//! The two representations of a single paragraph block.
//!
//! ## Modules
//!
//! - **`tree`**: the editor side. A `BlockTree` holds a sequence of `Inline`s,
//!   each either a styled `Leaf` or a `Wrapper` (link, embed, image, video, file)
//!   around leaves.
//! - **`block`**: the storage side. A `Block` is one string plus a list of
//!   `Annotation`s whose spans are Unicode code-point offsets into that string.
//! - **`span`**: the `[start, end)` code-point range shared by both.
//!
//! Both sides derive `serde` so the wire format is plain JSON.

pub mod block;
pub mod span;
pub mod tree;

use std::collections::BTreeMap;

pub use block::{Annotation, Block};
pub use span::Span;
pub use tree::{BlockTree, BlockType, Inline, Leaf, Styles, Wrapper, WrapperKind};

/// String attributes carried by annotations, wrappers and blocks.
pub type Attributes = BTreeMap<String, String>;
