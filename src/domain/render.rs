//! Textual rendering of an element subtree.
//!
//! Indented output puts every tag and text value on its own line, indented
//! by the element's depth. Compact output is produced by the same walk with
//! indentation and line breaks switched off, so text is never rewritten.

use tracing::instrument;

use crate::config::Settings;
use crate::domain::arena::{Content, Document, Element, ElementId};
use crate::domain::attribute::Attribute;
use crate::domain::error::{XmlError, XmlResult};

struct Renderer<'a> {
    document: &'a Document,
    settings: &'a Settings,
    compact: bool,
    out: String,
}

impl<'a> Renderer<'a> {
    fn indent(&mut self, depth: usize) {
        if !self.compact {
            for _ in 0..depth {
                self.out.push_str(&self.settings.indent);
            }
        }
    }

    fn newline(&mut self) {
        if !self.compact {
            self.out.push_str(&self.settings.newline);
        }
    }

    fn write_attribute(&mut self, attribute: &Attribute) {
        self.out.push(' ');
        if self.settings.escape {
            self.out.push_str(attribute.name());
            self.out.push_str("=\"");
            write_escaped(&mut self.out, attribute.value(), true);
            self.out.push('"');
        } else {
            self.out.push_str(&attribute.to_string());
        }
    }

    fn write_text(&mut self, text: &str) {
        if self.settings.escape {
            write_escaped(&mut self.out, text, false);
        } else {
            self.out.push_str(text);
        }
    }

    /// Opening tag plus, for leaf elements, everything up to the closing tag.
    ///
    /// Returns the children still to be written when the element is a container.
    fn open_element(&mut self, element: &'a Element, depth: usize) -> Option<&'a [ElementId]> {
        self.indent(depth);
        self.out.push('<');
        self.out.push_str(element.name());
        for attribute in element.attributes() {
            self.write_attribute(attribute);
        }

        match element.content() {
            Content::Empty => {
                self.out.push_str("/>");
                self.newline();
                None
            }
            Content::Text(text) => {
                self.out.push('>');
                self.newline();
                self.indent(depth + 1);
                self.write_text(text);
                self.newline();
                self.close_element(element, depth);
                None
            }
            Content::Children(children) => {
                self.out.push('>');
                self.newline();
                if self.settings.empty_text_line && !self.compact {
                    self.indent(depth + 1);
                    self.newline();
                }
                Some(children.as_slice())
            }
        }
    }

    fn close_element(&mut self, element: &Element, depth: usize) {
        self.indent(depth);
        self.out.push_str("</");
        self.out.push_str(element.name());
        self.out.push('>');
        self.newline();
    }

    /// Depth-first walk with an explicit stack, so tree depth is not bounded
    /// by the call stack.
    fn write_tree(&mut self, root: &'a Element, depth: usize) {
        let mut stack = vec![Frame::Open(root, depth)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Open(element, depth) => {
                    if let Some(children) = self.open_element(element, depth) {
                        stack.push(Frame::Close(element, depth));
                        // Push children in reverse order for left-to-right output
                        for &child_idx in children.iter().rev() {
                            if let Some(child) = self.document.get(child_idx) {
                                stack.push(Frame::Open(child, depth + 1));
                            }
                        }
                    }
                }
                Frame::Close(element, depth) => self.close_element(element, depth),
            }
        }
    }
}

enum Frame<'a> {
    Open(&'a Element, usize),
    Close(&'a Element, usize),
}

/// Escape `&`, `<`, `>` and, inside attribute values, `"`.
fn write_escaped(out: &mut String, text: &str, in_attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

impl Document {
    /// Render the subtree rooted at `idx`, indented by its depth in the tree.
    ///
    /// With `compact` set, indentation, line breaks and the blank line of a
    /// container element are left out.
    #[instrument(level = "trace", skip(self))]
    pub fn render(&self, idx: ElementId, compact: bool) -> XmlResult<String> {
        let element = self.get(idx).ok_or(XmlError::UnknownElement(idx))?;
        let depth = self.depth(idx).unwrap_or_default();
        let mut renderer = Renderer {
            document: self,
            settings: self.settings(),
            compact,
            out: String::new(),
        };
        renderer.write_tree(element, depth);
        Ok(renderer.out)
    }

    /// Indented rendering; same as `render(idx, false)`.
    pub fn to_xml_string(&self, idx: ElementId) -> XmlResult<String> {
        self.render(idx, false)
    }
}
