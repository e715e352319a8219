//! Domain layer: the element tree and its rendering
//!
//! This layer is independent of external concerns (no I/O, no config loading).

pub mod arena;
pub mod attribute;
pub mod error;
pub mod render;

pub use arena::{Content, Document, Element, ElementId, TreeIterator};
pub use attribute::Attribute;
pub use error::{XmlError, XmlResult};
