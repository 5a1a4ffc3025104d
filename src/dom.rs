//! DOM operations adapter.
//!
//! Thin helpers over the `dom_query` crate, giving the rest of the pipeline
//! a small, consistent surface for the handful of operations it needs:
//! parsing a page snapshot, reading tags/attributes/text, and cloning a
//! subtree into an owned document that can be mutated safely.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

// Re-export StrTendril: dom_query returns reference-counted text, cloning is O(1)
pub use tendril::StrTendril;

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Get the tag name of the first element in a selection (lowercase).
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_lowercase())
}

/// Get the tag name of a node (lowercase), or `None` for non-elements.
#[must_use]
pub fn node_tag(node: &NodeRef) -> Option<String> {
    node.node_name().map(|t| t.to_lowercase())
}

/// Get an attribute value (empty string if missing).
///
/// Many selector rules combine "missing" and "empty" the same way, so the
/// `Option` is collapsed here once.
#[inline]
#[must_use]
pub fn attr(sel: &Selection, name: &str) -> String {
    sel.attr(name).map(|s| s.to_string()).unwrap_or_default()
}

/// Get all text content of a selection and its descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Trimmed text content of a selection, as an owned string.
#[must_use]
pub fn trimmed_text(sel: &Selection) -> String {
    sel.text().trim().to_string()
}

/// Deep-clone a subtree into a new, owned document.
///
/// The live page is owned by the host; every mutation this crate performs
/// happens on a clone produced here. Round-tripping through the outer HTML
/// detaches the copy completely from the source tree.
#[must_use]
pub fn clone_subtree(sel: &Selection) -> Document {
    Document::from(sel.html().to_string())
}

/// Direct element children of a node that have the given tag name.
#[must_use]
pub fn element_children_with_tag<'a>(node: &NodeRef<'a>, tag: &str) -> Vec<NodeRef<'a>> {
    node.children()
        .into_iter()
        .filter(|child| {
            child.is_element() && node_tag(child).as_deref() == Some(tag)
        })
        .collect()
}
