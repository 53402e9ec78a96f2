//! Attribute and class vocabulary shared with host markup.
//!
//! These names are the wire format between the markup a host renders and the
//! editing core: the host annotates its elements with them, the core resolves
//! and mutates through them.

/// Marks an element as editable. Its value is the field key used for
/// multi-field contexts; the empty string is the default key.
pub const EDITABLE: &str = "data-editable";

/// Template identifier, present on both the trigger and the template form.
pub const TEMPLATE: &str = "data-editable-template";

/// Marks the form control inside a template that holds an editable value,
/// keyed like [`EDITABLE`].
pub const CONTENT: &str = "data-editable-content";

/// Marks an ancestor grouping several editable fields behind one template.
pub const CONTEXT: &str = "data-editable-context";

/// Explicit edit-target override: the `id` of the element to edit instead of
/// the trigger itself. Same-document `href="#..."` anchors work too.
pub const TARGET: &str = "data-editable-target";

/// Generic toggle attribute; the cancel control carries [`TOGGLE_CANCEL`].
pub const TOGGLE: &str = "data-toggle";

/// [`TOGGLE`] value identifying a template's cancel control.
pub const TOGGLE_CANCEL: &str = "cancel";

/// History panel marker, valued with the template identifier it belongs to.
pub const HISTORY: &str = "data-editable-history";

/// Revision action on a link inside the panel: `copy` or `revert`.
pub const HISTORY_ACTION: &str = "data-editable-history-action";

/// Marks the element inside a revision row that stores the revision content.
pub const HISTORY_REVISION: &str = "data-editable-history-revision";

/// Class of the read-only mirror element inside a template.
pub const ORIGINAL_CONTENT_CLASS: &str = "original-content";

/// Class of one revision row inside the history panel.
pub const HISTORY_ITEM_CLASS: &str = "editable-history-item";
