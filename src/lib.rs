//! # inedit
//!
//! In-place content editing: a lifecycle state machine with pluggable
//! extensions.
//!
//! A trigger element (a heading, a link) is bound to a hidden form template;
//! an edit request reveals the form pre-populated with the element's current
//! content, and submit or cancel transitions the binding back to a read-only
//! display. The lifecycle of one binding is `idle → editing → saving → idle`.
//!
//! Rendering, styling and persistence are the host toolkit's job. The host
//! mirrors the relevant elements into a [`dom::Document`], feeds raw input
//! through [`editor::Editor::dispatch`], and reacts to the `saving` state
//! (e.g. with a network call) via a transition observer.
//!
//! ## Architecture
//!
//! - [`dom`]: element side-model (arena of nodes, attributes, classes)
//! - [`markup`]: the attribute vocabulary shared with host markup
//! - [`resolve`]: which element a trigger edits, which template hosts it
//! - [`options`] / [`filters`]: configuration and input text transforms
//! - [`editor`]: bindings, the transition protocol, delegated dispatch
//! - [`extension`] / [`history`]: the typed observer seam and the
//!   revision-history extension built on it
//!
//! ## Example
//!
//! ```
//! use inedit::prelude::*;
//!
//! let mut doc = Document::new();
//! let heading = doc.append_child(doc.root(), "h2");
//! doc.set_attr(heading, "data-editable", "");
//! doc.set_text(heading, "Hello");
//!
//! let form = doc.append_child(doc.root(), "form");
//! doc.set_attr(form, "data-editable-template", "");
//! doc.add_class(form, "hidden");
//! let field = doc.append_child(form, "input");
//! doc.set_attr(field, "data-editable-content", "");
//!
//! let mut editor = Editor::new();
//! editor.dispatch(&mut doc, InputEvent::Click(heading));
//!
//! assert!(!doc.has_class(form, "hidden"));
//! assert_eq!(doc.value(field), "Hello");
//! ```

pub mod dom;
pub mod editor;
pub mod extension;
pub mod filters;
pub mod history;
pub mod markup;
pub mod options;
pub mod resolve;

/// Errors surfaced by binding construction and element resolution.
///
/// Most failure modes are deliberately not errors: rejected transitions
/// report `false`, missing templates make a binding inert, and lookups that
/// find nothing return `None`. Only an element that does not belong to the
/// document is a hard error, because a binding without a backing element has
/// no meaningful lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The element id does not belong to the document it was used with.
    #[error("element is not attached to this document")]
    DetachedElement,
}

/// Re-export of the commonly used types.
pub mod prelude {
    pub use crate::Error;
    pub use crate::dom::{Document, NodeId};
    pub use crate::editor::{
        Binding, DispatchOutcome, EditState, Editor, InputEvent, Transition,
    };
    pub use crate::extension::{Extension, ExtensionAction};
    pub use crate::filters::FilterChain;
    pub use crate::history::HistoryExtension;
    pub use crate::options::{EditOptions, PreventDefault};
}
