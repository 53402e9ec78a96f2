//! Binding orchestration: side-tables, the transition protocol, and
//! delegated input dispatch.
//!
//! The [`Editor`] owns everything explicitly instead of scattering state
//! across the document:
//! - bindings live in a side-table keyed by content element,
//! - the template-owner table tracks which binding currently claims each
//!   template form,
//! - extensions and observers register explicitly and are notified
//!   synchronously, general audience before the state entry action, the
//!   state-specific audience after it, all before any visual marker
//!   mutation.

mod binding;
mod dispatch;

pub use binding::{Binding, EditState};
pub use dispatch::{DispatchOutcome, InputEvent};

use std::collections::HashMap;

use crate::dom::{Document, NodeId};
use crate::extension::{Extension, ExtensionAction};
use crate::options::EditOptions;
use crate::{Error, resolve};

/// Record of one accepted transition, delivered to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Content element keying the binding that transitioned.
    pub element: NodeId,
    /// State before the transition.
    pub from: EditState,
    /// State after the transition.
    pub to: EditState,
}

type Observer = Box<dyn FnMut(&Binding, Transition)>;

/// Owns every binding and runs the transition protocol.
pub struct Editor {
    options: EditOptions,
    bindings: HashMap<NodeId, Binding>,
    template_owner: HashMap<NodeId, NodeId>,
    extensions: Vec<Box<dyn Extension>>,
    observers: Vec<(Option<EditState>, Observer)>,
}

impl Editor {
    /// Editor with default options.
    pub fn new() -> Self {
        Self::with_options(EditOptions::default())
    }

    /// Editor whose future bindings snapshot `options`.
    pub fn with_options(options: EditOptions) -> Self {
        Self {
            options,
            bindings: HashMap::new(),
            template_owner: HashMap::new(),
            extensions: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Options applied to bindings created from now on.
    pub const fn options(&self) -> &EditOptions {
        &self.options
    }

    /// Register an extension. Extensions observe every accepted transition
    /// of every binding, in registration order.
    pub fn register_extension(&mut self, extension: impl Extension + 'static) {
        tracing::debug!(name = extension.name(), "extension registered");
        self.extensions.push(Box::new(extension));
    }

    /// Observe every accepted transition. General observers run before
    /// state-specific ones.
    pub fn observe_any(&mut self, observer: impl FnMut(&Binding, Transition) + 'static) {
        self.observers.push((None, Box::new(observer)));
    }

    /// Observe transitions into one target state.
    pub fn observe(
        &mut self,
        state: EditState,
        observer: impl FnMut(&Binding, Transition) + 'static,
    ) {
        self.observers.push((Some(state), Box::new(observer)));
    }

    /// The binding keyed by a content element, if one was created.
    pub fn binding(&self, element: NodeId) -> Option<&Binding> {
        self.bindings.get(&element)
    }

    /// The content element of the binding currently claiming `template`.
    pub fn template_owner(&self, template: NodeId) -> Option<NodeId> {
        self.template_owner.get(&template).copied()
    }

    /// Handle an edit request originating at `source`.
    ///
    /// Resolves the content element the request delegates to, lazily creates
    /// its binding (one binding per content element, cached), and requests
    /// the editing state. Returns `Ok(false)` when the request was rejected,
    /// e.g. because no template is available.
    ///
    /// # Errors
    ///
    /// [`Error::DetachedElement`] when `source` does not belong to `doc`.
    pub fn edit(&mut self, doc: &mut Document, source: NodeId) -> Result<bool, Error> {
        let target = resolve::content_element(doc, source)?;
        if !self.bindings.contains_key(&target) {
            let created = Binding::new(doc, target, self.options.clone())?;
            self.bindings.insert(target, created);
        }
        if let Some(existing) = self.bindings.get_mut(&target) {
            existing.set_source(source);
        }
        Ok(self.request_state(doc, target, EditState::Editing))
    }

    /// Write `value` into a binding's edit form through its content setter.
    /// Returns `false` for unbound elements.
    pub fn set_content(&mut self, doc: &mut Document, element: NodeId, value: &str) -> bool {
        match self.bindings.get_mut(&element) {
            Some(bound) => {
                bound.set_content(doc, value);
                true
            }
            None => false,
        }
    }

    /// Request a state transition on the binding keyed by `element`.
    ///
    /// On acceptance the protocol runs in a fixed order: state shift,
    /// general notifications (any-observers, then extensions), the state
    /// entry action, state-specific observers, and finally the visual marker
    /// swap. State-specific observers therefore see the entry action already
    /// applied, which makes a saving observer the persistence seam: it reads
    /// the committed value. Rejected requests return `false` with no
    /// mutation and no notification.
    ///
    /// Entering editing re-resolves the binding's element references first;
    /// a binding with no resolvable template is inert and the request is
    /// rejected. When another binding still claims the same template, that
    /// binding is cancelled before this one proceeds, so a template never
    /// has two active occupants.
    pub fn request_state(&mut self, doc: &mut Document, element: NodeId, to: EditState) -> bool {
        if !self.bindings.contains_key(&element) {
            tracing::trace!(?element, "state request for unbound element");
            return false;
        }

        if to == EditState::Editing && !self.prepare_editing(doc, element) {
            return false;
        }

        let Self {
            bindings,
            template_owner,
            extensions,
            observers,
            ..
        } = self;
        let Some(bound) = bindings.get_mut(&element) else {
            return false;
        };
        if !bound.transition(to) {
            tracing::trace!(
                ?element,
                state = bound.state().as_str(),
                "same-state request rejected"
            );
            return false;
        }
        let event = Transition {
            element,
            from: bound.previous_state(),
            to,
        };
        tracing::debug!(
            ?element,
            from = event.from.as_str(),
            to = to.as_str(),
            "transition accepted"
        );

        // General audience: any-observers first, then the extension registry.
        for (_, observer) in observers.iter_mut().filter(|(state, _)| state.is_none()) {
            observer(bound, event);
        }
        for extension in extensions.iter_mut() {
            match to {
                EditState::Idle => extension.on_idle(doc, bound),
                EditState::Editing => extension.on_editing(doc, bound),
                EditState::Saving => extension.on_saving(doc, bound),
            }
        }
        // Entry action next, so state-specific observers see its outcome:
        // a saving observer reads the committed value, an editing observer a
        // populated form.
        match to {
            EditState::Editing => {
                bound.start_edit(doc);
                if let Some(template) = bound.template_element() {
                    template_owner.insert(template, element);
                }
            }
            EditState::Saving => bound.capture_save(doc),
            EditState::Idle => {
                bound.end_edit(doc);
                if let Some(template) = bound.template_element()
                    && template_owner.get(&template) == Some(&element)
                {
                    template_owner.remove(&template);
                }
            }
        }

        // State-specific audience, then the visual markers.
        for (_, observer) in observers
            .iter_mut()
            .filter(|(state, _)| *state == Some(to))
        {
            observer(bound, event);
        }
        bound.toggle_state_classes(doc);
        true
    }

    /// Re-resolve before an editing entry and clear the way: reject when no
    /// template is available, cancel a previous occupant of the same
    /// template.
    fn prepare_editing(&mut self, doc: &mut Document, element: NodeId) -> bool {
        let template = {
            let Some(bound) = self.bindings.get_mut(&element) else {
                return false;
            };
            if bound.resolve(doc).is_err() {
                return false;
            }
            match bound.template_element() {
                Some(template) => template,
                None => {
                    tracing::warn!(?element, "no template available, edit request ignored");
                    return false;
                }
            }
        };
        if let Some(owner) = self.template_owner.get(&template).copied()
            && owner != element
            && self
                .bindings
                .get(&owner)
                .is_some_and(|prior| prior.state() != EditState::Idle)
        {
            tracing::debug!(?owner, ?element, "cancelling previous template occupant");
            self.request_state(doc, owner, EditState::Idle);
        }
        true
    }

    /// Execute actions returned by an extension, in order.
    fn run_actions(&mut self, doc: &mut Document, actions: Vec<ExtensionAction>) {
        for action in actions {
            match action {
                ExtensionAction::SetContent { element, value } => {
                    self.set_content(doc, element, &value);
                }
                ExtensionAction::RequestState { element, state } => {
                    self.request_state(doc, element, state);
                }
            }
        }
    }

    /// Offer a click no core selector claimed to the extensions; the first
    /// one returning actions wins.
    pub(crate) fn offer_click_to_extensions(
        &mut self,
        doc: &mut Document,
        target: NodeId,
    ) -> bool {
        let mut claimed = Vec::new();
        for extension in &mut self.extensions {
            let actions = extension.on_click(doc, target);
            if !actions.is_empty() {
                tracing::trace!(name = extension.name(), ?target, "extension claimed click");
                claimed = actions;
                break;
            }
        }
        if claimed.is_empty() {
            return false;
        }
        self.run_actions(doc, claimed);
        true
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
