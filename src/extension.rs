//! Typed extension registry.
//!
//! Extensions register explicitly on an [`Editor`](crate::editor::Editor)
//! and observe every accepted transition of every binding through the
//! per-state hooks. An extension never mutates a binding directly: anything
//! it wants done on a binding is returned from [`Extension::on_click`] as
//! [`ExtensionAction`]s that the editor executes on its behalf.

use crate::dom::{Document, NodeId};
use crate::editor::{Binding, EditState};

/// An operation an extension asks the editor to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionAction {
    /// Write a value into a binding's edit form via the binding's content
    /// setter (filters apply).
    SetContent {
        /// Content element keying the binding.
        element: NodeId,
        /// Raw value to filter and write.
        value: String,
    },
    /// Request a state transition on a binding.
    RequestState {
        /// Content element keying the binding.
        element: NodeId,
        /// Target state; same-state requests are no-ops.
        state: EditState,
    },
}

/// A state observer attachable to an editor.
///
/// All hooks default to no-ops so an extension only implements the states it
/// cares about. Hooks run synchronously during the transition protocol,
/// after the general observers and before the binding's own entry action and
/// visual marker update.
pub trait Extension {
    /// Stable name of the extension, used for diagnostics.
    fn name(&self) -> &'static str;

    /// A binding entered the idle state.
    fn on_idle(&mut self, _doc: &mut Document, _binding: &Binding) {}

    /// A binding entered the editing state.
    fn on_editing(&mut self, _doc: &mut Document, _binding: &Binding) {}

    /// A binding entered the saving state.
    fn on_saving(&mut self, _doc: &mut Document, _binding: &Binding) {}

    /// Offer the extension a click no core selector claimed. Returns the
    /// actions the editor should execute, or an empty list to decline.
    fn on_click(&mut self, _doc: &mut Document, _target: NodeId) -> Vec<ExtensionAction> {
        Vec::new()
    }
}
