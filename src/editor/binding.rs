//! One editable binding: the state machine instance tied to a content
//! element, its resolved template, and its accepted value.

use std::collections::BTreeMap;

use crate::dom::{Document, NodeId};
use crate::options::EditOptions;
use crate::{Error, markup, resolve};

/// Lifecycle phase of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditState {
    /// Read-only display; initial and terminal-per-cycle state.
    Idle,
    /// The template form is visible and accepting input.
    Editing,
    /// A submit captured the pending value; external collaborators react.
    Saving,
}

impl EditState {
    /// All states, in lifecycle order.
    pub const ALL: [Self; 3] = [Self::Idle, Self::Editing, Self::Saving];

    /// Lowercase state name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Editing => "editing",
            Self::Saving => "saving",
        }
    }

    /// CSS class marking an element as being in this state.
    pub const fn marker_class(self) -> &'static str {
        match self {
            Self::Idle => "editable-idle",
            Self::Editing => "editable-editing",
            Self::Saving => "editable-saving",
        }
    }
}

/// State machine bound to one editable content element.
///
/// A binding owns its lifecycle state and value history; the elements it
/// references belong to the host document. References are resolved at
/// construction and re-resolved before every editing entry, because the
/// document may have mutated between interactions.
#[derive(Debug)]
pub struct Binding {
    state: EditState,
    previous_state: EditState,
    source: NodeId,
    content: NodeId,
    context: Option<NodeId>,
    template: Option<NodeId>,
    value: String,
    old_value: String,
    options: EditOptions,
}

impl Binding {
    /// Bind `element` as editable content.
    ///
    /// When the element is not yet flagged editable it is auto-flagged, and
    /// the configured identifier (if any) is written as its template key.
    ///
    /// # Errors
    ///
    /// [`Error::DetachedElement`] when `element` does not belong to `doc` —
    /// a binding without a backing element has no meaningful lifecycle.
    pub fn new(doc: &mut Document, element: NodeId, options: EditOptions) -> Result<Self, Error> {
        if !doc.contains(element) {
            return Err(Error::DetachedElement);
        }
        if !doc.has_attr(element, markup::EDITABLE) {
            doc.set_attr(element, markup::EDITABLE, "");
            if !options.identifier.is_empty() {
                doc.set_attr(element, markup::TEMPLATE, &options.identifier);
            }
        }
        let mut binding = Self {
            state: EditState::Idle,
            previous_state: EditState::Idle,
            source: element,
            content: element,
            context: None,
            template: None,
            value: String::new(),
            old_value: String::new(),
            options,
        };
        binding.resolve(doc)?;
        Ok(binding)
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> EditState {
        self.state
    }

    /// State immediately before the last accepted transition.
    pub const fn previous_state(&self) -> EditState {
        self.previous_state
    }

    /// Element that originated the most recent edit request.
    pub const fn source_element(&self) -> NodeId {
        self.source
    }

    /// Element whose content is being edited.
    pub const fn content_element(&self) -> NodeId {
        self.content
    }

    /// Ancestor grouping several editable fields, when present.
    pub const fn context_element(&self) -> Option<NodeId> {
        self.context
    }

    /// Resolved template form, `None` when the element is not wired to one.
    pub const fn template_element(&self) -> Option<NodeId> {
        self.template
    }

    /// Latest accepted content value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Value before the most recent change.
    pub fn old_value(&self) -> &str {
        &self.old_value
    }

    /// Configuration snapshot taken at construction.
    pub const fn options(&self) -> &EditOptions {
        &self.options
    }

    /// Identifier of the resolved template (empty for the default template).
    pub fn template_key(&self, doc: &Document) -> String {
        self.template
            .and_then(|template| doc.attr(template, markup::TEMPLATE))
            .unwrap_or("")
            .to_owned()
    }

    pub(super) const fn set_source(&mut self, source: NodeId) {
        self.source = source;
    }

    /// Re-resolve content, context and template references.
    ///
    /// The context lookup starts from the resolved content element, so a
    /// remote anchor trigger pointing into a grouping ancestor still edits
    /// the whole group.
    pub(super) fn resolve(&mut self, doc: &Document) -> Result<(), Error> {
        self.content = resolve::content_element(doc, self.source)?;
        self.context = resolve::context_element(doc, self.content);
        self.template = resolve::template_element(doc, self.context.unwrap_or(self.content));
        Ok(())
    }

    /// Shift into `to`, recording the prior state. A request for the current
    /// state is rejected without mutation.
    pub(super) fn transition(&mut self, to: EditState) -> bool {
        if self.state == to {
            return false;
        }
        self.previous_state = self.state;
        self.state = to;
        true
    }

    /// The form control inside the template holding the value for `key`.
    fn content_field(&self, doc: &Document, key: &str) -> Option<NodeId> {
        let template = self.template?;
        doc.find_descendant(template, |el| doc.attr(el, markup::CONTENT) == Some(key))
    }

    /// The read-only mirror element inside the template.
    fn mirror_element(&self, doc: &Document) -> Option<NodeId> {
        let template = self.template?;
        doc.find_descendant(template, |el| {
            doc.has_class(el, markup::ORIGINAL_CONTENT_CLASS)
        })
    }

    /// Read the current value of the template's default content field.
    pub fn content(&self, doc: &Document) -> Option<String> {
        self.content_field(doc, "")
            .map(|field| doc.value(field).to_owned())
    }

    /// Filter `value` and write it into the default content field, shifting
    /// the value history. The value is not saved yet; the user may still
    /// alter it before submitting.
    pub fn set_content(&mut self, doc: &mut Document, value: &str) {
        let values = BTreeMap::from([(String::new(), value.to_owned())]);
        self.write_fields(doc, &values, true);
    }

    /// Collect the content to edit, keyed by field.
    ///
    /// With a context ancestor, every editable descendant contributes under
    /// its own key; otherwise the single content element contributes under
    /// its key (usually the empty default).
    pub(super) fn source_values(&self, doc: &Document) -> BTreeMap<String, String> {
        let mut values = BTreeMap::new();
        if let Some(context) = self.context {
            for el in doc.descendants(context) {
                if let Some(key) = doc.attr(el, markup::EDITABLE) {
                    values.insert(key.to_owned(), doc.text(el).to_owned());
                }
            }
        } else {
            let key = doc.attr(self.content, markup::EDITABLE).unwrap_or("");
            values.insert(key.to_owned(), doc.text(self.content).to_owned());
        }
        values
    }

    /// Write filtered values into the matching content fields. Without
    /// `overwrite`, only empty fields are filled. Writes under the default
    /// key shift the value history.
    fn write_fields(&mut self, doc: &mut Document, values: &BTreeMap<String, String>, overwrite: bool) {
        for (key, raw) in values {
            let Some(field) = self.content_field(doc, key) else {
                continue;
            };
            if !overwrite && !doc.value(field).is_empty() {
                continue;
            }
            let filtered = self.options.input_filters.apply(raw);
            doc.set_value(field, &filtered);
            if key.is_empty() {
                self.old_value = std::mem::replace(&mut self.value, filtered);
            }
        }
    }

    /// Editing entry action: populate the template and reveal it.
    ///
    /// Inert when no template resolved; the caller detects that through
    /// [`Binding::template_element`].
    pub(super) fn start_edit(&mut self, doc: &mut Document) {
        let Some(template) = self.template else {
            return;
        };
        let values = self.source_values(doc);
        let overwrite = self.options.overwrite_default_content;
        self.write_fields(doc, &values, overwrite);
        if let Some(mirror) = self.mirror_element(doc) {
            doc.set_text(mirror, values.get("").map_or("", String::as_str));
        }
        doc.remove_class(template, &self.options.visibility_toggling_class);
    }

    /// Idle entry action: clear the template's fields and hide it again.
    pub(super) fn end_edit(&mut self, doc: &mut Document) {
        let Some(template) = self.template else {
            return;
        };
        let fields: Vec<NodeId> = doc
            .descendants(template)
            .filter(|&el| doc.has_attr(el, markup::CONTENT))
            .collect();
        for field in fields {
            doc.set_value(field, "");
        }
        if let Some(mirror) = self.mirror_element(doc) {
            doc.set_text(mirror, "");
        }
        doc.add_class(template, &self.options.visibility_toggling_class);
    }

    /// Saving entry action: commit the pending form value.
    ///
    /// The only place a save actually commits; persistence is an external
    /// collaborator's job, triggered by observing the saving state.
    pub(super) fn capture_save(&mut self, doc: &Document) {
        let Some(captured) = self.content(doc) else {
            return;
        };
        if captured != self.value {
            self.old_value = std::mem::replace(&mut self.value, captured);
        }
    }

    /// Swap the visual marker classes keyed by the previous and current
    /// state, on the source, content and template elements.
    pub(super) fn toggle_state_classes(&self, doc: &mut Document) {
        let previous = self.previous_state.marker_class();
        let current = self.state.marker_class();
        let mut targets = vec![self.source];
        if self.content != self.source {
            targets.push(self.content);
        }
        if let Some(template) = self.template {
            targets.push(template);
        }
        for el in targets {
            doc.remove_class(el, previous);
            doc.add_class(el, current);
        }
    }
}
