//! Binding configuration.
//!
//! Every recognized option is an explicit field; overrides are applied
//! field-by-field through the `with_*` builders rather than by merging an
//! untyped bag of settings.

use crate::filters::FilterChain;

/// Per-trigger-kind default-action suppression policy.
///
/// Deliberately asymmetric: cancel links suppress navigation, form submission
/// is allowed to proceed so a host page can keep its native save round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreventDefault {
    /// Suppress the default action of anchor-like triggers (edit and cancel
    /// links).
    pub anchor: bool,
    /// Suppress native submission of the template form.
    pub form: bool,
}

impl Default for PreventDefault {
    fn default() -> Self {
        Self {
            anchor: true,
            form: false,
        }
    }
}

/// Configuration snapshot for a binding, immutable after construction.
#[derive(Debug, Clone)]
pub struct EditOptions {
    /// Template-matching key written onto auto-flagged editable elements.
    pub identifier: String,
    /// Transforms applied to content before it is placed into the edit form.
    pub input_filters: FilterChain,
    /// Whether entering the editing state always overwrites the template
    /// field, or only fills it when currently empty.
    pub overwrite_default_content: bool,
    /// Default-action suppression policy per trigger kind.
    pub prevent_default: PreventDefault,
    /// CSS class marking a template (or panel) as not visible.
    pub visibility_toggling_class: String,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            identifier: String::new(),
            input_filters: FilterChain::standard(),
            overwrite_default_content: false,
            prevent_default: PreventDefault::default(),
            visibility_toggling_class: "hidden".to_owned(),
        }
    }
}

impl EditOptions {
    /// Set the template identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Replace the input filter chain wholesale.
    pub fn with_input_filters(mut self, filters: FilterChain) -> Self {
        self.input_filters = filters;
        self
    }

    /// Set whether editing overwrites non-empty template fields.
    pub const fn with_overwrite_default_content(mut self, overwrite: bool) -> Self {
        self.overwrite_default_content = overwrite;
        self
    }

    /// Replace the default-action suppression policy.
    pub const fn with_prevent_default(mut self, policy: PreventDefault) -> Self {
        self.prevent_default = policy;
        self
    }

    /// Set the visibility-toggling CSS class.
    pub fn with_visibility_toggling_class(mut self, class: impl Into<String>) -> Self {
        self.visibility_toggling_class = class.into();
        self
    }
}
