//! # Codec
//!
//! Conversion between a leaf tree ([`BlockTree`](crate::model::BlockTree))
//! and a flat annotated block ([`Block`](crate::model::Block)).
//!
//! ## Modules
//!
//! - **`serialize`**: tree to text plus annotations. Leaves are walked left
//!   to right and every active style or wrapper contributes a span.
//! - **`deserialize`**: text plus annotations back to a tree. Text is scanned
//!   one code point at a time; a new leaf starts whenever the set of
//!   annotations covering the position changes.
//! - **`annotation_set`**: the span accumulator used by the serializer.
//! - **`containment`**: binary search over an annotation's sorted spans.
//! - **`validate`**: invariant checks on incoming annotations.
//! - **`kinds`**: the annotation type enum and attribute names.
//! - **`code_point`**: offset arithmetic for UTF-8 and UTF-16 hosts.
//! - **`cursor`**: code-point cursor tracking byte and code-point offsets.
//!
//! All offsets on the annotation side are Unicode code points, so an emoji
//! outside the BMP counts as one position regardless of the host encoding.

pub mod annotation_set;
pub mod code_point;
pub mod containment;
pub mod cursor;
pub mod deserialize;
pub mod kinds;
pub mod options;
pub mod serialize;
pub mod validate;

pub use deserialize::{deserialize, deserialize_with};
pub use options::{CodecOptions, UnknownAnnotations, WrapperOverlap};
pub use serialize::serialize;
