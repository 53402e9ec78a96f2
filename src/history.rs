//! Revision-history extension.
//!
//! A showcase of the extension seam: the core never learns that history
//! exists. The extension lazily resolves a panel element per binding, shows
//! and hides it alongside the editing lifecycle, and turns revision-row
//! clicks into content-setter plus transition requests on the owning
//! binding. Reverting a revision is "paste old content, then save".

use std::collections::HashMap;

use crate::dom::{Document, NodeId};
use crate::editor::{Binding, EditState};
use crate::extension::{Extension, ExtensionAction};
use crate::markup;

/// Name under which the extension registers.
pub const NAMESPACE: &str = "history";

/// Revision action carried by [`markup::HISTORY_ACTION`].
const ACTION_COPY: &str = "copy";
const ACTION_REVERT: &str = "revert";

#[derive(Debug, Clone, Copy)]
struct PanelState {
    /// Resolved panel element; `None` degrades every operation to a no-op.
    panel: Option<NodeId>,
}

/// Overlays a revision-history panel on editable bindings.
#[derive(Debug, Default)]
pub struct HistoryExtension {
    /// Lazily created per-binding state, keyed by content element.
    states: HashMap<NodeId, PanelState>,
    /// Back-references from a panel to the binding it currently serves.
    /// Set on editing, cleared on idle, so a revision click can find its
    /// way back without a global registry.
    bound: HashMap<NodeId, NodeId>,
}

impl HistoryExtension {
    /// Fresh extension with no per-binding state yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Panel resolved for a binding's content element, if state exists.
    pub fn panel_for(&self, element: NodeId) -> Option<NodeId> {
        self.states.get(&element).and_then(|state| state.panel)
    }

    /// The binding a panel currently serves, if any.
    pub fn bound_binding(&self, panel: NodeId) -> Option<NodeId> {
        self.bound.get(&panel).copied()
    }

    /// Get or lazily create the per-binding state, resolving the panel.
    fn state_for(&mut self, doc: &Document, binding: &Binding) -> PanelState {
        *self
            .states
            .entry(binding.content_element())
            .or_insert_with(|| PanelState {
                panel: resolve_panel(doc, binding),
            })
    }
}

/// Resolve a binding's history panel: a sibling of the template carrying the
/// template's identifier, with a document-wide lookup as fallback.
fn resolve_panel(doc: &Document, binding: &Binding) -> Option<NodeId> {
    let template = binding.template_element()?;
    let key = binding.template_key(doc);
    let matches = |el: NodeId| doc.attr(el, markup::HISTORY) == Some(key.as_str());
    doc.siblings(template)
        .into_iter()
        .find(|&el| matches(el))
        .or_else(|| doc.find_descendant(doc.root(), matches))
}

impl Extension for HistoryExtension {
    fn name(&self) -> &'static str {
        NAMESPACE
    }

    fn on_editing(&mut self, doc: &mut Document, binding: &Binding) {
        let state = self.state_for(doc, binding);
        if let Some(panel) = state.panel {
            self.bound.insert(panel, binding.content_element());
            doc.remove_class(panel, &binding.options().visibility_toggling_class);
        }
    }

    fn on_idle(&mut self, doc: &mut Document, binding: &Binding) {
        let state = self.state_for(doc, binding);
        if let Some(panel) = state.panel {
            if self.bound.get(&panel) == Some(&binding.content_element()) {
                self.bound.remove(&panel);
            }
            doc.add_class(panel, &binding.options().visibility_toggling_class);
        }
    }

    fn on_saving(&mut self, doc: &mut Document, binding: &Binding) {
        // State is created on the first observed transition, whichever it is.
        let _ = self.state_for(doc, binding);
    }

    fn on_click(&mut self, doc: &mut Document, target: NodeId) -> Vec<ExtensionAction> {
        // Delegated matching: the click may land on markup nested inside the
        // action link, so walk the target-to-root chain like the panel and
        // revision-row lookups below.
        let Some(action) = doc
            .self_and_ancestors(target)
            .find(|&el| doc.tag(el) == "a" && doc.has_attr(el, markup::HISTORY_ACTION))
            .and_then(|link| doc.attr(link, markup::HISTORY_ACTION))
            .map(ToOwned::to_owned)
        else {
            return Vec::new();
        };
        let Some(panel) = doc
            .self_and_ancestors(target)
            .find(|&el| doc.has_attr(el, markup::HISTORY))
        else {
            return Vec::new();
        };
        // An unbound panel means no editing is in flight; decline.
        let Some(&element) = self.bound.get(&panel) else {
            return Vec::new();
        };
        let Some(revision) = doc
            .self_and_ancestors(target)
            .find(|&el| doc.has_class(el, markup::HISTORY_ITEM_CLASS))
            .and_then(|item| {
                doc.find_descendant(item, |el| doc.has_attr(el, markup::HISTORY_REVISION))
            })
        else {
            return Vec::new();
        };
        let value = doc.text(revision).to_owned();

        let copy = vec![
            ExtensionAction::SetContent { element, value },
            ExtensionAction::RequestState {
                element,
                state: EditState::Editing,
            },
        ];
        match action.as_str() {
            ACTION_COPY => copy,
            ACTION_REVERT => {
                let mut actions = copy;
                actions.push(ExtensionAction::RequestState {
                    element,
                    state: EditState::Saving,
                });
                actions
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{Editor, InputEvent};

    /// Heading bound to a template with a history panel holding one revision.
    fn fixture() -> (Document, NodeId, NodeId, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let heading = doc.append_child(doc.root(), "h2");
        doc.set_attr(heading, markup::EDITABLE, "");
        doc.set_text(heading, "Current title");

        let wrapper = doc.append_child(doc.root(), "div");
        let form = doc.append_child(wrapper, "form");
        doc.set_attr(form, markup::TEMPLATE, "");
        doc.add_class(form, "hidden");
        let field = doc.append_child(form, "input");
        doc.set_attr(field, markup::CONTENT, "");

        let panel = doc.append_child(wrapper, "aside");
        doc.set_attr(panel, markup::HISTORY, "");
        doc.add_class(panel, "hidden");
        let item = doc.append_child(panel, "li");
        doc.add_class(item, markup::HISTORY_ITEM_CLASS);
        let revision = doc.append_child(item, "span");
        doc.set_attr(revision, markup::HISTORY_REVISION, "");
        doc.set_text(revision, "Older title");
        let revert_link = doc.append_child(item, "a");
        doc.set_attr(revert_link, markup::HISTORY_ACTION, "revert");

        (doc, heading, form, panel, field, revert_link)
    }

    fn editor_with_history() -> Editor {
        let mut editor = Editor::new();
        editor.register_extension(HistoryExtension::new());
        editor
    }

    #[test]
    fn test_panel_resolved_as_template_sibling() {
        let (mut doc, heading, _form, panel, _field, _link) = fixture();
        let mut editor = editor_with_history();
        assert!(editor.edit(&mut doc, heading).unwrap());
        // the lookup prefers the sibling even though a document-wide search
        // would find the same element
        assert!(!doc.has_class(panel, "hidden"));
    }

    #[test]
    fn test_editing_shows_panel_and_idle_hides_it() {
        let (mut doc, heading, _form, panel, _field, _link) = fixture();
        let mut editor = editor_with_history();
        editor.edit(&mut doc, heading).unwrap();
        assert!(!doc.has_class(panel, "hidden"));

        editor.request_state(&mut doc, heading, EditState::Idle);
        assert!(doc.has_class(panel, "hidden"));
    }

    #[test]
    fn test_back_reference_follows_the_lifecycle() {
        let (mut doc, heading, _form, panel, _field, _link) = fixture();
        let mut extension = HistoryExtension::new();

        // drive the hooks directly to observe the back-reference
        let binding = crate::editor::Binding::new(
            &mut doc,
            heading,
            crate::options::EditOptions::default(),
        )
        .unwrap();
        extension.on_editing(&mut doc, &binding);
        assert_eq!(extension.panel_for(heading), Some(panel));
        assert_eq!(extension.bound_binding(panel), Some(heading));

        extension.on_idle(&mut doc, &binding);
        assert_eq!(extension.bound_binding(panel), None);
        assert!(doc.has_class(panel, "hidden"));
    }

    #[test]
    fn test_revert_pastes_revision_and_saves() {
        let (mut doc, heading, _form, _panel, field, revert_link) = fixture();
        let mut editor = editor_with_history();
        editor.edit(&mut doc, heading).unwrap();
        assert_eq!(doc.value(field), "Current title");

        let outcome = editor.dispatch(&mut doc, InputEvent::Click(revert_link));
        assert!(outcome.handled);
        let binding = editor.binding(heading).unwrap();
        assert_eq!(binding.state(), EditState::Saving);
        assert_eq!(binding.value(), "Older title");
        assert_eq!(binding.old_value(), "Current title");
    }

    #[test]
    fn test_click_inside_the_action_link_still_reverts() {
        let (mut doc, heading, _form, _panel, _field, revert_link) = fixture();
        // hosts often render an icon inside the link
        let icon = doc.append_child(revert_link, "i");
        let mut editor = editor_with_history();
        editor.edit(&mut doc, heading).unwrap();

        let outcome = editor.dispatch(&mut doc, InputEvent::Click(icon));
        assert!(outcome.handled);
        let binding = editor.binding(heading).unwrap();
        assert_eq!(binding.state(), EditState::Saving);
        assert_eq!(binding.value(), "Older title");
    }

    #[test]
    fn test_copy_pastes_revision_without_saving() {
        let (mut doc, heading, _form, _panel, field, revert_link) = fixture();
        doc.set_attr(revert_link, markup::HISTORY_ACTION, "copy");
        let mut editor = editor_with_history();
        editor.edit(&mut doc, heading).unwrap();

        editor.dispatch(&mut doc, InputEvent::Click(revert_link));
        let binding = editor.binding(heading).unwrap();
        assert_eq!(binding.state(), EditState::Editing);
        assert_eq!(doc.value(field), "Older title");
    }

    #[test]
    fn test_unbound_panel_declines_clicks() {
        let (mut doc, heading, _form, _panel, field, revert_link) = fixture();
        let mut editor = editor_with_history();
        editor.edit(&mut doc, heading).unwrap();
        editor.request_state(&mut doc, heading, EditState::Idle);

        // panel is hidden and unbound; the click falls through
        let outcome = editor.dispatch(&mut doc, InputEvent::Click(revert_link));
        assert!(!outcome.handled);
        assert_eq!(doc.value(field), "");
    }

    #[test]
    fn test_missing_panel_degrades_gracefully() {
        let mut doc = Document::new();
        let heading = doc.append_child(doc.root(), "h2");
        doc.set_attr(heading, markup::EDITABLE, "");
        doc.set_text(heading, "No panel here");
        let form = doc.append_child(doc.root(), "form");
        doc.set_attr(form, markup::TEMPLATE, "");
        let field = doc.append_child(form, "input");
        doc.set_attr(field, markup::CONTENT, "");

        let mut editor = editor_with_history();
        assert!(editor.edit(&mut doc, heading).unwrap());
        assert_eq!(editor.binding(heading).unwrap().state(), EditState::Editing);
    }
}
