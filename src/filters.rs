//! Ordered text transforms applied to content before it enters an edit form.

use std::fmt;
use std::sync::Arc;

/// One pure text transform in a [`FilterChain`].
pub type InputFilter = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Ordered sequence of text transforms.
///
/// Filters run strictly in order, each receiving the previous output. The
/// chain is configuration, not behavior: callers may replace it wholesale
/// through [`EditOptions::with_input_filters`](crate::options::EditOptions::with_input_filters).
#[derive(Clone)]
pub struct FilterChain {
    filters: Vec<InputFilter>,
}

impl FilterChain {
    /// A chain that passes text through unchanged.
    pub const fn empty() -> Self {
        Self { filters: Vec::new() }
    }

    /// A chain holding a single transform.
    pub fn single(filter: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::empty().with(filter)
    }

    /// The standard chain: trim surrounding whitespace, then decode literal
    /// `&gt;`/`&lt;` entities back to `>`/`<`.
    pub fn standard() -> Self {
        Self::empty()
            .with(|text| text.trim().to_owned())
            .with(decode_angle_entities)
    }

    /// Append a transform to the end of the chain.
    pub fn with(mut self, filter: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Run the chain over `text`.
    pub fn apply(&self, text: &str) -> String {
        self.filters
            .iter()
            .fold(text.to_owned(), |acc, filter| filter(&acc))
    }

    /// Number of transforms in the chain.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the chain holds no transforms.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("len", &self.filters.len())
            .finish()
    }
}

/// Decode the two angle-bracket HTML entities. Only literal `&gt;`/`&lt;`
/// sequences present in the input are reversed; nothing is re-encoded.
pub fn decode_angle_entities(text: &str) -> String {
    text.replace("&gt;", ">").replace("&lt;", "<")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain_passes_through() {
        let chain = FilterChain::empty();
        assert_eq!(chain.apply("  raw  "), "  raw  ");
        assert!(chain.is_empty());
    }

    #[test]
    fn test_filters_apply_in_order() {
        let chain = FilterChain::empty()
            .with(|text| format!("{text}b"))
            .with(|text| format!("{text}c"));
        assert_eq!(chain.apply("a"), "abc");
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_standard_chain_trims_then_decodes() {
        let chain = FilterChain::standard();
        assert_eq!(chain.apply("  &lt;x&gt;  "), "<x>");
        assert_eq!(chain.apply("plain"), "plain");
    }

    #[test]
    fn test_decode_only_reverses_present_entities() {
        assert_eq!(decode_angle_entities("a &gt; b &lt; c"), "a > b < c");
        assert_eq!(decode_angle_entities("<already>"), "<already>");
        assert_eq!(decode_angle_entities("&amp;"), "&amp;");
    }

    #[test]
    fn test_single_wraps_one_transform() {
        let chain = FilterChain::single(str::to_uppercase);
        assert_eq!(chain.apply("abc"), "ABC");
        assert_eq!(chain.len(), 1);
    }
}
