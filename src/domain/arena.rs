use generational_arena::{Arena, Index};
use indexmap::IndexMap;
use tracing::{debug, instrument};

use crate::config::Settings;
use crate::domain::attribute::Attribute;
use crate::domain::error::{XmlError, XmlResult};

/// Handle to an element stored in a [`Document`].
pub type ElementId = Index;

/// What an element holds besides its attributes.
///
/// Text and child elements are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    #[default]
    Empty,
    Text(String),
    Children(Vec<ElementId>),
}

/// Tree node in the arena-based element structure.
#[derive(Debug)]
pub struct Element {
    name: String,
    /// Keyed by trimmed attribute name, rendered in insertion order
    attributes: IndexMap<String, Attribute>,
    /// Index of parent element in the arena, None for roots
    parent: Option<ElementId>,
    content: Content,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            attributes: IndexMap::new(),
            parent: None,
            content: Content::Empty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name.trim())
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Child indices in insertion order; empty for text or empty elements.
    pub fn children(&self) -> &[ElementId] {
        match &self.content {
            Content::Children(children) => children,
            _ => &[],
        }
    }
}

/// Arena owning every element of one or more trees.
///
/// Parents own their children through index lists; the parent link is a
/// plain index used for depth computation only.
#[derive(Debug, Default)]
pub struct Document {
    arena: Arena<Element>,
    settings: Settings,
}

fn validated_name(name: &str) -> XmlResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        debug!("rejected empty element name");
        return Err(XmlError::InvalidArgument(
            "element must have a non-empty name.".to_string(),
        ));
    }
    Ok(name)
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            arena: Arena::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Create a detached root element at depth 0.
    #[instrument(level = "trace", skip(self))]
    pub fn create_element(&mut self, name: &str) -> XmlResult<ElementId> {
        let name = validated_name(name)?;
        Ok(self.arena.insert(Element::new(name.to_string())))
    }

    /// Create an element and, if `parent` is given, append it to the parent.
    ///
    /// Nothing is inserted when the parent cannot accept the new child.
    #[instrument(level = "trace", skip(self))]
    pub fn create_child(&mut self, name: &str, parent: Option<ElementId>) -> XmlResult<ElementId> {
        let name = validated_name(name)?;
        let Some(parent_idx) = parent else {
            return Ok(self.arena.insert(Element::new(name.to_string())));
        };
        self.check_accepts_children(parent_idx)?;

        let child_idx = self.arena.insert(Element::new(name.to_string()));
        self.link(parent_idx, child_idx);
        Ok(child_idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, idx: ElementId) -> Option<&Element> {
        self.arena.get(idx)
    }

    fn element(&self, idx: ElementId) -> XmlResult<&Element> {
        self.arena.get(idx).ok_or(XmlError::UnknownElement(idx))
    }

    fn element_mut(&mut self, idx: ElementId) -> XmlResult<&mut Element> {
        self.arena
            .get_mut(idx)
            .ok_or(XmlError::UnknownElement(idx))
    }

    /// Number of ancestors between `idx` and its root.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self, idx: ElementId) -> Option<usize> {
        let mut current = self.arena.get(idx)?;
        let mut depth = 0;
        while let Some(parent) = current.parent.and_then(|p| self.arena.get(p)) {
            depth += 1;
            current = parent;
        }
        Some(depth)
    }

    /// Elements without a parent, in arena order.
    pub fn roots(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.arena
            .iter()
            .filter(|(_, element)| element.parent.is_none())
            .map(|(idx, _)| idx)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn add_attribute(
        &mut self,
        idx: ElementId,
        name: &str,
        value: Option<&str>,
    ) -> XmlResult<()> {
        let key = name.trim();
        if key.is_empty() {
            debug!("rejected empty attribute name");
            return Err(XmlError::InvalidAttribute(
                "the name cannot have null or empty value.".to_string(),
            ));
        }
        let element = self.element_mut(idx)?;
        if element.attributes.contains_key(key) {
            debug!(name = key, "rejected duplicate attribute");
            return Err(XmlError::InvalidAttribute(format!(
                "the element already has an attribute with this name : {}",
                key
            )));
        }
        let attribute =
            Attribute::new(key, value).map_err(|e| XmlError::InvalidAttribute(e.to_string()))?;
        element.attributes.insert(key.to_string(), attribute);
        Ok(())
    }

    /// Append a detached element to `parent`.
    ///
    /// The child must belong to this document, must not already have a
    /// parent and must not be `parent` or one of its ancestors.
    #[instrument(level = "trace", skip(self))]
    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> XmlResult<()> {
        self.check_accepts_children(parent)?;
        let child_node = self.arena.get(child).ok_or_else(|| {
            debug!("rejected unknown child");
            XmlError::InvalidChild("the child cannot have null value.".to_string())
        })?;
        if child_node.parent.is_some() {
            debug!("rejected child that already has a parent");
            return Err(XmlError::InvalidChild(
                "the child already belongs to another element.".to_string(),
            ));
        }
        if self.is_ancestor_or_self(child, parent) {
            debug!("rejected child that would create a cycle");
            return Err(XmlError::InvalidChild(
                "the child cannot be the element itself nor one of its ancestors.".to_string(),
            ));
        }
        self.link(parent, child);
        Ok(())
    }

    /// Set the text value (trimmed); allowed once and only on elements without children.
    #[instrument(level = "trace", skip(self))]
    pub fn add_text_child(&mut self, idx: ElementId, text: &str) -> XmlResult<()> {
        let element = self.element_mut(idx)?;
        match element.content {
            Content::Empty => {}
            Content::Text(_) => {
                debug!("rejected second text value");
                return Err(XmlError::InvalidChild(
                    "the element has already a text child.".to_string(),
                ));
            }
            Content::Children(_) => {
                debug!("rejected text on element with children");
                return Err(XmlError::InvalidChild(
                    "the element already has child elements.".to_string(),
                ));
            }
        }
        element.content = Content::Text(text.trim().to_string());
        Ok(())
    }

    fn check_accepts_children(&self, idx: ElementId) -> XmlResult<()> {
        if let Content::Text(_) = self.element(idx)?.content {
            debug!("rejected child on element with text");
            return Err(XmlError::InvalidChild(
                "the element already contains a text value.".to_string(),
            ));
        }
        Ok(())
    }

    fn is_ancestor_or_self(&self, candidate: ElementId, idx: ElementId) -> bool {
        let mut current = Some(idx);
        while let Some(node_idx) = current {
            if node_idx == candidate {
                return true;
            }
            current = self.arena.get(node_idx).and_then(|node| node.parent);
        }
        false
    }

    // Callers have validated both indices.
    fn link(&mut self, parent_idx: ElementId, child_idx: ElementId) {
        if let Some(parent) = self.arena.get_mut(parent_idx) {
            match &mut parent.content {
                Content::Children(children) => children.push(child_idx),
                content => *content = Content::Children(vec![child_idx]),
            }
        }
        if let Some(child) = self.arena.get_mut(child_idx) {
            child.parent = Some(parent_idx);
        }
    }

    /// Pre-order traversal of the subtree rooted at `root`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self, root: ElementId) -> TreeIterator<'_> {
        TreeIterator::new(self, root)
    }
}

pub struct TreeIterator<'a> {
    document: &'a Document,
    stack: Vec<ElementId>,
}

impl<'a> TreeIterator<'a> {
    fn new(document: &'a Document, root: ElementId) -> Self {
        let mut stack = Vec::new();
        if document.arena.contains(root) {
            stack.push(root);
        }
        Self { document, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (ElementId, &'a Element);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.document.arena.get(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children().iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}
