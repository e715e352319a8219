//! Outline view of an element subtree, for debugging and logs.

use termtree::Tree;
use tracing::instrument;

use crate::domain::{Content, Document, Element, ElementId};

pub trait TreeNodeConvert {
    fn to_tree_string(&self, root: ElementId) -> Tree<String>;
}

/// A node whose remaining children are still being converted.
struct Pending<'a> {
    tree: Tree<String>,
    children: std::slice::Iter<'a, ElementId>,
}

/// Label `name attr="value"...`; text becomes a quoted leaf.
fn start_node(element: &Element) -> Pending<'_> {
    let mut label = element.name().to_string();
    for attribute in element.attributes() {
        label.push(' ');
        label.push_str(&attribute.to_string());
    }
    let mut tree = Tree::new(label);
    if let Content::Text(text) = element.content() {
        tree.push(Tree::new(format!("{:?}", text)));
    }
    Pending {
        tree,
        children: element.children().iter(),
    }
}

impl TreeNodeConvert for Document {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, root: ElementId) -> Tree<String> {
        let Some(element) = self.get(root) else {
            return Tree::new("Empty tree".to_string());
        };

        let mut stack = vec![start_node(element)];
        loop {
            let next_child = stack.last_mut().and_then(|top| top.children.next().copied());
            match next_child {
                Some(child_idx) => {
                    if let Some(child) = self.get(child_idx) {
                        stack.push(start_node(child));
                    }
                }
                None => {
                    let Some(done) = stack.pop() else {
                        return Tree::new("Empty tree".to_string());
                    };
                    match stack.last_mut() {
                        Some(parent) => {
                            parent.tree.push(done.tree);
                        }
                        None => return done.tree,
                    }
                }
            }
        }
    }
}
