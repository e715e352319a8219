//! Tests for element construction, attributes and child attachment

use rstest::{fixture, rstest};

use dumbxml::util::testing;
use dumbxml::{Content, Document, ElementId, XmlError};

#[fixture]
fn doc() -> Document {
    testing::init_test_setup();
    Document::new()
}

/// An id that no element of a small test document can have.
fn foreign_element() -> ElementId {
    let mut other = Document::new();
    for i in 0..16 {
        other.create_element(&format!("e{}", i)).unwrap();
    }
    other.create_element("foreign").unwrap()
}

// ============================================================
// Construction
// ============================================================

#[rstest]
fn given_name_when_creating_root_then_depth_is_zero(mut doc: Document) {
    let root = doc.create_element("  test ").unwrap();

    let element = doc.get(root).unwrap();
    assert_eq!(element.name(), "test");
    assert_eq!(element.parent(), None);
    assert_eq!(doc.depth(root), Some(0));
    assert_eq!(element.content(), &Content::Empty);
}

#[rstest]
#[case("")]
#[case("   ")]
fn given_blank_name_when_creating_then_invalid_argument(mut doc: Document, #[case] name: &str) {
    assert!(matches!(doc.create_element(name), Err(XmlError::InvalidArgument(_))));
    assert!(matches!(doc.create_child(name, None), Err(XmlError::InvalidArgument(_))));
    assert!(doc.is_empty());
}

#[rstest]
fn given_blank_name_and_parent_when_creating_then_parent_is_untouched(mut doc: Document) {
    let parent = doc.create_element("test").unwrap();

    let result = doc.create_child("", Some(parent));

    assert!(matches!(result, Err(XmlError::InvalidArgument(_))));
    assert!(doc.get(parent).unwrap().children().is_empty());
    assert_eq!(doc.len(), 1);
}

#[rstest]
fn given_no_parent_when_creating_child_then_behaves_like_root(mut doc: Document) {
    let e = doc.create_child("test", None).unwrap();
    assert_eq!(doc.depth(e), Some(0));
    assert_eq!(doc.get(e).unwrap().parent(), None);
}

#[rstest]
fn given_parent_when_creating_child_then_appended_once_at_next_depth(mut doc: Document) {
    let root = doc.create_element("root").unwrap();
    let first = doc.create_child("first", Some(root)).unwrap();
    let second = doc.create_child("second", Some(root)).unwrap();
    let grandchild = doc.create_child("grandchild", Some(second)).unwrap();

    assert_eq!(doc.get(root).unwrap().children(), &[first, second]);
    assert_eq!(doc.get(second).unwrap().children(), &[grandchild]);
    assert_eq!(doc.get(first).unwrap().parent(), Some(root));
    assert_eq!(doc.depth(first), Some(1));
    assert_eq!(doc.depth(grandchild), Some(2));
}

#[rstest]
fn given_parent_with_text_when_creating_child_then_nothing_is_inserted(mut doc: Document) {
    let parent = doc.create_element("p").unwrap();
    doc.add_text_child(parent, "text").unwrap();

    let result = doc.create_child("child", Some(parent));

    assert!(matches!(result, Err(XmlError::InvalidChild(_))));
    assert_eq!(doc.len(), 1);
}

#[rstest]
fn given_stale_parent_when_creating_child_then_unknown_element(mut doc: Document) {
    let foreign = foreign_element();

    let result = doc.create_child("child", Some(foreign));

    assert!(matches!(result, Err(XmlError::UnknownElement(_))));
    assert!(doc.is_empty());
}

// ============================================================
// Attributes
// ============================================================

#[rstest]
fn given_attributes_when_adding_then_kept_in_insertion_order(mut doc: Document) {
    let e = doc.create_element("test").unwrap();
    doc.add_attribute(e, "zeta", Some("1")).unwrap();
    doc.add_attribute(e, "alpha", None).unwrap();
    doc.add_attribute(e, " mid ", Some(" x ")).unwrap();

    let element = doc.get(e).unwrap();
    let names: Vec<_> = element.attributes().map(|a| a.name()).collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    assert_eq!(element.attribute("alpha").unwrap().value(), "");
    assert_eq!(element.attribute("mid").unwrap().value(), " x ");
}

#[rstest]
#[case("")]
#[case("  ")]
fn given_blank_attribute_name_when_adding_then_invalid_attribute(
    mut doc: Document,
    #[case] name: &str,
) {
    let e = doc.create_element("test").unwrap();
    let result = doc.add_attribute(e, name, Some("test"));
    assert!(matches!(result, Err(XmlError::InvalidAttribute(_))));
    assert_eq!(doc.get(e).unwrap().attributes().count(), 0);
}

#[rstest]
fn given_duplicate_attribute_when_adding_then_first_stays_intact(mut doc: Document) {
    let e = doc.create_element("test").unwrap();
    doc.add_attribute(e, "test", Some("first")).unwrap();

    let result = doc.add_attribute(e, "test", Some("second"));

    assert!(matches!(result, Err(XmlError::InvalidAttribute(_))));
    let element = doc.get(e).unwrap();
    assert_eq!(element.attributes().count(), 1);
    assert_eq!(element.attribute("test").unwrap().value(), "first");
}

#[rstest]
fn given_duplicate_differing_in_whitespace_when_adding_then_rejected(mut doc: Document) {
    let e = doc.create_element("test").unwrap();
    doc.add_attribute(e, "test", Some("first")).unwrap();

    let result = doc.add_attribute(e, "  test ", Some("second"));

    assert!(matches!(result, Err(XmlError::InvalidAttribute(_))));
}

// ============================================================
// Children
// ============================================================

#[rstest]
fn given_detached_element_when_adding_child_then_parent_and_depth_are_set(mut doc: Document) {
    let parent = doc.create_element("parent").unwrap();
    let child = doc.create_element("child").unwrap();
    let grandchild = doc.create_child("grandchild", Some(child)).unwrap();

    doc.add_child(parent, child).unwrap();

    assert_eq!(doc.get(parent).unwrap().children(), &[child]);
    assert_eq!(doc.get(child).unwrap().parent(), Some(parent));
    assert_eq!(doc.depth(child), Some(1));
    // descendants follow their ancestor
    assert_eq!(doc.depth(grandchild), Some(2));
}

#[rstest]
fn given_unknown_child_when_adding_then_invalid_child_and_children_unchanged(mut doc: Document) {
    let foreign = foreign_element();
    let parent = doc.create_element("parent").unwrap();
    doc.create_child("existing", Some(parent)).unwrap();

    let result = doc.add_child(parent, foreign);

    assert!(matches!(result, Err(XmlError::InvalidChild(_))));
    assert_eq!(doc.get(parent).unwrap().children().len(), 1);
}

#[rstest]
fn given_text_when_adding_child_then_invalid_child(mut doc: Document) {
    let parent = doc.create_element("parent").unwrap();
    let child = doc.create_element("child").unwrap();
    doc.add_text_child(parent, "test").unwrap();

    let result = doc.add_child(parent, child);

    assert!(matches!(result, Err(XmlError::InvalidChild(_))));
    assert_eq!(doc.get(parent).unwrap().text(), Some("test"));
    assert_eq!(doc.get(child).unwrap().parent(), None);
}

#[rstest]
fn given_attached_child_when_adding_to_second_parent_then_invalid_child(mut doc: Document) {
    let first = doc.create_element("first").unwrap();
    let second = doc.create_element("second").unwrap();
    let child = doc.create_child("child", Some(first)).unwrap();

    let result = doc.add_child(second, child);

    assert!(matches!(result, Err(XmlError::InvalidChild(_))));
    assert_eq!(doc.get(child).unwrap().parent(), Some(first));
    assert!(doc.get(second).unwrap().children().is_empty());
}

#[rstest]
fn given_ancestor_when_adding_as_child_then_invalid_child(mut doc: Document) {
    let root = doc.create_element("root").unwrap();
    let leaf = doc.create_child("leaf", Some(root)).unwrap();

    assert!(matches!(doc.add_child(leaf, root), Err(XmlError::InvalidChild(_))));
    assert!(matches!(doc.add_child(root, root), Err(XmlError::InvalidChild(_))));
    assert!(doc.get(leaf).unwrap().children().is_empty());
}

// ============================================================
// Text
// ============================================================

#[rstest]
fn given_text_when_adding_then_stored_trimmed(mut doc: Document) {
    let e = doc.create_element("test").unwrap();
    doc.add_text_child(e, "  Coucou le monde !  ").unwrap();
    assert_eq!(doc.get(e).unwrap().text(), Some("Coucou le monde !"));
}

#[rstest]
fn given_text_when_adding_text_again_then_invalid_child(mut doc: Document) {
    let e = doc.create_element("parent").unwrap();
    doc.add_text_child(e, "test").unwrap();

    let result = doc.add_text_child(e, "other");

    assert!(matches!(result, Err(XmlError::InvalidChild(_))));
    assert_eq!(doc.get(e).unwrap().text(), Some("test"));
}

#[rstest]
fn given_children_when_adding_text_then_invalid_child(mut doc: Document) {
    let parent = doc.create_element("parent").unwrap();
    doc.create_child("child", Some(parent)).unwrap();

    let result = doc.add_text_child(parent, "test");

    assert!(matches!(result, Err(XmlError::InvalidChild(_))));
    assert_eq!(doc.get(parent).unwrap().text(), None);
}

// ============================================================
// Traversal
// ============================================================

fn build_sample(doc: &mut Document) -> ElementId {
    let root = doc.create_element("root").unwrap();
    let a = doc.create_child("a", Some(root)).unwrap();
    doc.create_child("a1", Some(a)).unwrap();
    doc.create_child("b", Some(root)).unwrap();
    root
}

#[rstest]
fn given_tree_when_iterating_then_visits_pre_order(mut doc: Document) {
    let root = build_sample(&mut doc);

    let names: Vec<_> = doc.iter(root).map(|(_, e)| e.name().to_string()).collect();

    assert_eq!(names, vec!["root", "a", "a1", "b"]);
}

#[rstest]
fn given_detached_elements_when_listing_roots_then_only_parentless(mut doc: Document) {
    let root = build_sample(&mut doc);
    let loose = doc.create_element("loose").unwrap();

    let roots: Vec<_> = doc.roots().collect();

    assert_eq!(roots.len(), 2);
    assert!(roots.contains(&root));
    assert!(roots.contains(&loose));
}
