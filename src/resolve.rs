//! Element resolution: which element a trigger edits, and which template
//! hosts the edit form.
//!
//! All lookups are pure functions over a [`Document`]. Missing attributes
//! mean "no target" and fall back gracefully; only a foreign [`NodeId`] is a
//! hard error.

use crate::dom::{Document, NodeId};
use crate::{Error, markup};

/// Resolve the element whose content a trigger edits.
///
/// A trigger carrying a same-document anchor (`href="#..."`) or an explicit
/// [`markup::TARGET`] attribute delegates to that element when it exists;
/// otherwise the trigger edits itself.
///
/// # Errors
///
/// [`Error::DetachedElement`] when `source` does not belong to `doc`.
pub fn content_element(doc: &Document, source: NodeId) -> Result<NodeId, Error> {
    if !doc.contains(source) {
        return Err(Error::DetachedElement);
    }
    let resolved = anchor_target(doc, source)
        .and_then(|target| element_by_id(doc, &target))
        .unwrap_or(source);
    Ok(resolved)
}

fn anchor_target(doc: &Document, source: NodeId) -> Option<String> {
    if let Some(target) = doc.attr(source, markup::TARGET) {
        return Some(target.trim().to_owned());
    }
    let href = doc.attr(source, "href")?.trim();
    href.strip_prefix('#').map(str::to_owned)
}

fn element_by_id(doc: &Document, id: &str) -> Option<NodeId> {
    if id.is_empty() {
        return None;
    }
    doc.find_descendant(doc.root(), |el| doc.attr(el, "id") == Some(id))
}

/// Resolve the template form for a content element.
///
/// The identifier is read from the content element (empty when absent) and
/// matched against the document's `form` elements; an empty identifier
/// matches a form whose own identifier is empty or absent — the default,
/// global template. Returns `None` when no template exists, which callers
/// treat as "no template available, abort edit".
pub fn template_element(doc: &Document, content: NodeId) -> Option<NodeId> {
    let key = doc.attr(content, markup::TEMPLATE).unwrap_or("");
    doc.find_descendant(doc.root(), |el| {
        doc.tag(el) == "form" && doc.attr(el, markup::TEMPLATE).unwrap_or("") == key
    })
}

/// Find the template relevant to an arbitrary context element.
///
/// Precedence is self, then nearest ancestor, then first descendant in
/// document order. The order governs nested-editable disambiguation and is
/// load-bearing.
pub fn context_source(doc: &Document, context: NodeId) -> Option<NodeId> {
    if doc.has_attr(context, markup::TEMPLATE) && !doc.has_attr(context, markup::EDITABLE) {
        return Some(context);
    }
    doc.find_ancestor(context, |el| is_template_form(doc, el))
        .or_else(|| doc.find_descendant(context, |el| is_template_form(doc, el)))
}

fn is_template_form(doc: &Document, el: NodeId) -> bool {
    doc.tag(el) == "form" && doc.has_attr(el, markup::TEMPLATE)
}

/// Nearest ancestor grouping several editable fields behind one template.
pub fn context_element(doc: &Document, element: NodeId) -> Option<NodeId> {
    doc.find_ancestor(element, |el| doc.has_attr(el, markup::CONTEXT))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A page with a default template, a named template, and an anchor
    /// trigger pointing at a remote heading.
    fn fixture() -> (Document, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let heading = doc.append_child(doc.root(), "h2");
        doc.set_attr(heading, "id", "title");
        doc.set_attr(heading, markup::EDITABLE, "");

        let anchor = doc.append_child(doc.root(), "a");
        doc.set_attr(anchor, "href", "#title");
        doc.set_attr(anchor, markup::EDITABLE, "");

        let default_form = doc.append_child(doc.root(), "form");
        doc.set_attr(default_form, markup::TEMPLATE, "");

        let wrapper = doc.append_child(doc.root(), "div");
        let named_form = doc.append_child(wrapper, "form");
        doc.set_attr(named_form, markup::TEMPLATE, "longtext");

        (doc, heading, anchor, default_form, named_form)
    }

    #[test]
    fn test_content_element_follows_same_document_anchor() {
        let (doc, heading, anchor, _, _) = fixture();
        assert_eq!(content_element(&doc, anchor).unwrap(), heading);
    }

    #[test]
    fn test_content_element_falls_back_to_source() {
        let (mut doc, heading, _, _, _) = fixture();
        assert_eq!(content_element(&doc, heading).unwrap(), heading);

        // dangling anchor still falls back
        let dangling = doc.append_child(doc.root(), "a");
        doc.set_attr(dangling, "href", "#missing");
        assert_eq!(content_element(&doc, dangling).unwrap(), dangling);

        // off-document hrefs are not anchors
        let external = doc.append_child(doc.root(), "a");
        doc.set_attr(external, "href", "https://example.com");
        assert_eq!(content_element(&doc, external).unwrap(), external);
    }

    #[test]
    fn test_content_element_honors_explicit_target_attribute() {
        let (mut doc, heading, _, _, _) = fixture();
        let button = doc.append_child(doc.root(), "button");
        doc.set_attr(button, markup::TARGET, "title");
        assert_eq!(content_element(&doc, button).unwrap(), heading);
    }

    #[test]
    fn test_content_element_rejects_foreign_node() {
        let (big, _, _, _, named_form) = fixture();
        let other = Document::new();
        assert!(big.contains(named_form));
        assert_eq!(
            content_element(&other, named_form),
            Err(Error::DetachedElement)
        );
    }

    #[test]
    fn test_template_element_empty_key_matches_default_form() {
        let (doc, heading, _, default_form, _) = fixture();
        assert_eq!(template_element(&doc, heading), Some(default_form));
    }

    #[test]
    fn test_template_element_named_key_matches_named_form() {
        let (mut doc, heading, _, _, named_form) = fixture();
        doc.set_attr(heading, markup::TEMPLATE, "longtext");
        assert_eq!(template_element(&doc, heading), Some(named_form));
    }

    #[test]
    fn test_template_element_none_when_no_match() {
        let (mut doc, heading, _, default_form, _) = fixture();
        doc.set_attr(heading, markup::TEMPLATE, "missing");
        assert_eq!(template_element(&doc, heading), None);
        // sanity: the default form is still there, it just doesn't match
        assert!(doc.has_attr(default_form, markup::TEMPLATE));
    }

    #[test]
    fn test_context_source_prefers_self_over_ancestor() {
        let (mut doc, _, _, _, named_form) = fixture();
        // a template-bearing element nested inside a template-bearing form
        let inner = doc.append_child(named_form, "div");
        doc.set_attr(inner, markup::TEMPLATE, "inner");
        assert_eq!(context_source(&doc, inner), Some(inner));
    }

    #[test]
    fn test_context_source_self_requires_non_editable() {
        let (mut doc, heading, _, _, _) = fixture();
        doc.set_attr(heading, markup::TEMPLATE, "longtext");
        // heading is editable, so "self" is skipped; no form around it either
        assert_eq!(context_source(&doc, heading), None);
    }

    #[test]
    fn test_context_source_ancestor_then_descendant() {
        let (doc, _, _, _, named_form) = fixture();
        let wrapper = doc.parent(named_form).unwrap();
        // wrapper is not a template itself, but contains one
        assert_eq!(context_source(&doc, wrapper), Some(named_form));
        // a control inside the form resolves upward to it
        let (mut doc2, _, _, _, named_form2) = fixture();
        let field = doc2.append_child(named_form2, "textarea");
        assert_eq!(context_source(&doc2, field), Some(named_form2));
    }

    #[test]
    fn test_context_source_none_when_nothing_matches() {
        let (mut doc, _, _, _, _) = fixture();
        let lonely = doc.append_child(doc.root(), "span");
        assert_eq!(context_source(&doc, lonely), None);
    }

    #[test]
    fn test_context_element_finds_nearest_grouping_ancestor() {
        let (mut doc, _, _, _, _) = fixture();
        let group = doc.append_child(doc.root(), "div");
        doc.set_attr(group, markup::CONTEXT, "");
        let row = doc.append_child(group, "div");
        let cell = doc.append_child(row, "span");
        assert_eq!(context_element(&doc, cell), Some(group));
        assert_eq!(context_element(&doc, group), None);
    }
}
