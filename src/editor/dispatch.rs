//! Delegated input events.
//!
//! The host toolkit feeds raw clicks and form submissions here; matching
//! walks the target-to-root chain the way document-level delegation does, so
//! elements added after wiring are covered without re-registration.

use crate::dom::{Document, NodeId};
use crate::{markup, resolve};

use super::{EditState, Editor};

/// A raw input event from the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer click on an element.
    Click(NodeId),
    /// Submission of a form element.
    Submit(NodeId),
}

/// What the dispatcher did with an event, and whether the host should
/// suppress the browser-native default action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// An editable interaction consumed the event.
    pub handled: bool,
    /// The host should suppress the native default action.
    pub prevent_default: bool,
}

impl Editor {
    /// Route a raw input event to the binding it concerns.
    ///
    /// Events that resolve to nothing editable (or to a template with no
    /// active binding) are reported unhandled rather than failing.
    pub fn dispatch(&mut self, doc: &mut Document, event: InputEvent) -> DispatchOutcome {
        match event {
            InputEvent::Click(target) => self.dispatch_click(doc, target),
            InputEvent::Submit(target) => self.dispatch_submit(doc, target),
        }
    }

    fn dispatch_click(&mut self, doc: &mut Document, target: NodeId) -> DispatchOutcome {
        if !doc.contains(target) {
            return DispatchOutcome::default();
        }
        let chain: Vec<NodeId> = doc.self_and_ancestors(target).collect();

        // Edit trigger. Anchors follow the per-tag suppression policy;
        // other trigger tags have no meaningful default and are suppressed.
        if let Some(&trigger) = chain
            .iter()
            .find(|&&el| doc.has_attr(el, markup::EDITABLE))
        {
            let prevent = if doc.tag(trigger) == "a" {
                self.options().prevent_default.anchor
            } else {
                true
            };
            let handled = self.edit(doc, trigger).unwrap_or(false);
            return DispatchOutcome {
                handled,
                prevent_default: prevent,
            };
        }

        // Submit control inside a template.
        if let Some(&control) = chain
            .iter()
            .find(|&&el| doc.attr(el, "type") == Some("submit"))
            && let Some(outcome) = self.form_action(doc, control, EditState::Saving)
        {
            return outcome;
        }

        // Cancel control inside a template.
        if let Some(&control) = chain
            .iter()
            .find(|&&el| doc.attr(el, markup::TOGGLE) == Some(markup::TOGGLE_CANCEL))
            && let Some(outcome) = self.form_action(doc, control, EditState::Idle)
        {
            return outcome;
        }

        if self.offer_click_to_extensions(doc, target) {
            return DispatchOutcome {
                handled: true,
                prevent_default: self.options().prevent_default.anchor,
            };
        }

        tracing::trace!(?target, "click matched no editable selector");
        DispatchOutcome::default()
    }

    fn dispatch_submit(&mut self, doc: &mut Document, target: NodeId) -> DispatchOutcome {
        if !doc.contains(target) {
            return DispatchOutcome::default();
        }
        self.form_action(doc, target, EditState::Saving)
            .unwrap_or_default()
    }

    /// Resolve the template a form control belongs to and request a state on
    /// the binding currently claiming it.
    fn form_action(
        &mut self,
        doc: &mut Document,
        control: NodeId,
        to: EditState,
    ) -> Option<DispatchOutcome> {
        let template = resolve::context_source(doc, control)?;
        let owner = self.template_owner(template)?;
        // The occupant binding's own option snapshot decides suppression.
        let policy = self
            .binding(owner)
            .map_or(self.options().prevent_default, |bound| {
                bound.options().prevent_default
            });
        let prevent = match to {
            EditState::Saving => policy.form,
            _ => policy.anchor,
        };
        let handled = self.request_state(doc, owner, to);
        Some(DispatchOutcome {
            handled,
            prevent_default: prevent,
        })
    }
}
