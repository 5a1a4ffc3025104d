//! Content normalizer: converts a message's DOM subtree into Markdown.
//!
//! The conversion is a three-pass pure transform over a cloned subtree:
//!
//! 1. Every `<pre>` containing a `<code>` element is rewritten into a unique
//!    placeholder token, and the corresponding fenced-code Markdown string is
//!    recorded. This protects code content from the inline-formatting rules
//!    of the recursive pass; code bodies round-trip byte-for-byte apart from
//!    the fence wrapping.
//! 2. A recursive descent renders the tree: text nodes emit literal text,
//!    element nodes dispatch on tag identity, unrecognized tags are
//!    transparent.
//! 3. Placeholder tokens are replaced with their recorded fenced strings.
//!
//! The live page is never mutated; the transform operates on a clone and
//! always returns a string, possibly empty.

use std::collections::HashMap;

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::patterns::CODE_LANGUAGE_CLASS;

/// Fenced-code strings keyed by the placeholder token that stands in for
/// them during the recursive pass. Lives only within a single `normalize`
/// call.
type CodeBlockPlaceholders = HashMap<String, String>;

/// Convert a DOM subtree into Markdown.
///
/// Operates on a clone of the given selection; the caller's tree is left
/// untouched. Never fails: malformed or empty input yields an empty string.
#[must_use]
pub fn normalize(content: &Selection) -> String {
    if !content.exists() {
        return String::new();
    }

    let clone = dom::clone_subtree(content);
    let placeholders = replace_code_blocks(&clone);

    // Fragment parsing wraps the clone in html/body; render from the body.
    let body = clone.select("body");
    let root = if body.exists() { body } else { clone.select("html") };

    let mut rendered = String::new();
    if let Some(node) = root.nodes().first() {
        render_children(node, &mut rendered);
    }

    for (token, fenced) in &placeholders {
        rendered = rendered.replace(token, fenced);
    }

    rendered.trim().to_string()
}

/// Pre-pass: swap each fenced-code container for a placeholder token.
///
/// The code's language hint comes from the `language-<lang>` class pattern;
/// its text content is recorded verbatim. A `<pre>` without a `<code>` child
/// is left alone and later renders as plain text.
fn replace_code_blocks(doc: &dom_query::Document) -> CodeBlockPlaceholders {
    let mut placeholders = CodeBlockPlaceholders::new();

    for (index, pre) in doc.select("pre").iter().enumerate() {
        let Some(code) = pre.select("code").iter().next() else {
            continue;
        };

        let class = dom::attr(&code, "class");
        let language = CODE_LANGUAGE_CLASS
            .captures(&class)
            .and_then(|caps| caps.get(1))
            .map_or("", |m| m.as_str());

        let body = dom::text_content(&code);
        let token = format!("{{{{CODE_BLOCK_{index}}}}}");
        let fenced = format!("\n```{language}\n{body}\n```\n");

        pre.set_html(token.clone());
        placeholders.insert(token, fenced);
    }

    placeholders
}

/// Render all children of a node, in order.
fn render_children(node: &NodeRef, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            out.push_str(&child.text());
        } else if child.is_element() {
            render_element(&child, out);
        }
    }
}

/// Render one element node, dispatching on tag identity.
fn render_element(node: &NodeRef, out: &mut String) {
    let tag = dom::node_tag(node).unwrap_or_default();

    match tag.as_str() {
        "p" => {
            out.push_str("\n\n");
            render_children(node, out);
            out.push_str("\n\n");
        }
        "br" => out.push('\n'),
        "strong" | "b" => {
            out.push_str("**");
            render_children(node, out);
            out.push_str("**");
        }
        "em" | "i" => {
            out.push('*');
            render_children(node, out);
            out.push('*');
        }
        "code" => {
            // Inline code only; code inside a fence was consumed by the
            // placeholder pre-pass and is never visited here.
            if !has_pre_parent(node) {
                out.push('`');
                out.push_str(&Selection::from(*node).text());
                out.push('`');
            }
        }
        "pre" => {
            // After the pre-pass this is the placeholder token. A pre that
            // was not registered (no code child) degrades to plain text.
            out.push_str(&Selection::from(*node).text());
        }
        "a" => {
            let href = dom::attr(&Selection::from(*node), "href");
            out.push('[');
            render_children(node, out);
            out.push_str("](");
            out.push_str(&href);
            out.push(')');
        }
        "ul" => {
            out.push('\n');
            render_list(node, false, out);
            out.push('\n');
        }
        "ol" => {
            out.push('\n');
            render_list(node, true, out);
            out.push('\n');
        }
        "h1" | "h2" | "h3" | "h4" => {
            let level = usize::from(tag.as_bytes()[1] - b'0');
            out.push('\n');
            out.push_str(&"#".repeat(level));
            out.push(' ');
            render_children(node, out);
            out.push('\n');
        }
        "blockquote" => {
            let mut inner = String::new();
            render_children(node, &mut inner);
            out.push_str("\n> ");
            out.push_str(&inner.trim().replace('\n', "\n> "));
            out.push('\n');
        }
        // Unrecognized tags (div, span, li outside a list, ...) are
        // transparent: recurse without wrapping.
        _ => render_children(node, out),
    }
}

/// Render the direct `li` children of a list element.
///
/// Nested lists recurse naturally through each item's content; every item's
/// rendered body is trimmed before the marker is attached.
fn render_list(node: &NodeRef, ordered: bool, out: &mut String) {
    for (index, item) in dom::element_children_with_tag(node, "li").iter().enumerate() {
        if ordered {
            out.push_str(&format!("{}. ", index + 1));
        } else {
            out.push_str("- ");
        }

        let mut body = String::new();
        render_children(item, &mut body);
        out.push_str(body.trim());
        out.push('\n');
    }
}

fn has_pre_parent(node: &NodeRef) -> bool {
    node.parent()
        .and_then(|parent| dom::node_tag(&parent))
        .as_deref()
        == Some("pre")
}
