//! Minimal in-memory XML element tree.
//!
//! Elements live in a [`Document`] arena and are addressed by [`ElementId`].
//! Each element carries attributes and either a text value or child
//! elements, and renders to indented or compact XML text.
//!
//! ```
//! use dumbxml::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.create_element("root").unwrap();
//! doc.add_attribute(root, "href", Some("/a")).unwrap();
//! let p = doc.create_child("p", Some(root)).unwrap();
//! doc.add_text_child(p, "hello").unwrap();
//!
//! assert_eq!(
//!     doc.render(root, true).unwrap(),
//!     r#"<root href="/a"><p>hello</p></root>"#
//! );
//! ```

pub mod config;
pub mod domain;
pub mod tree_traits;
pub mod util;

pub use config::Settings;
pub use domain::{Attribute, Content, Document, Element, ElementId, XmlError, XmlResult};
