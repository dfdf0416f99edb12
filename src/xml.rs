//! Streaming XML fragment builder.
//!
//! A stack-based accumulator that concatenates XML documents or fragments
//! from a sequence of open/close/element calls.
//!
//! Use `init` to start a document, `open`/`close` to manage nesting,
//! `single` and `element` for leaf elements, and `append` for raw fragments
//! rendered elsewhere. `take_output` drains the retained buffer.
//!
//! # Example
//!
//! ```ignore
//! let mut xml = XmlBuilder::new();
//! xml.init("1.0", "UTF-8");
//! xml.open("urlset", &Attrs::new().set("xmlns", NS));
//! xml.element("loc", "https://example.com/");
//! xml.close_all();
//! let document = xml.take_output();
//! ```
//!
//! The builder is deliberately non-validating: tag names and attribute
//! values are trusted as given, and escaping is the caller's responsibility.

// ============================================================================
// Attributes
// ============================================================================

/// An insertion-ordered XML attribute list.
///
/// Values are emitted verbatim; callers escape them first.
#[derive(Debug, Clone, Default)]
pub struct Attrs(Vec<Attr>);

#[derive(Debug, Clone)]
enum Attr {
    /// `name="value"`
    Pair(String, String),
    /// A bare valueless token (e.g. `novalidate`).
    Flag(String),
}

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `name="value"` attribute.
    #[must_use]
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push(Attr::Pair(name.into(), value.into()));
        self
    }

    /// Add a `name="value"` attribute, or nothing when `value` is `None`.
    #[must_use]
    pub fn set_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    /// Add a bare valueless attribute token.
    #[must_use]
    pub fn flag(mut self, value: impl Into<String>) -> Self {
        self.0.push(Attr::Flag(value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render all attributes in insertion order, each preceded by a space.
    fn render_into(&self, out: &mut String) {
        for attr in &self.0 {
            out.push(' ');
            match attr {
                Attr::Pair(name, value) => {
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(value);
                    out.push('"');
                }
                Attr::Flag(value) => out.push_str(value),
            }
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Stateful XML accumulator with an open-tag stack.
///
/// Every rendering call returns the fragment it produced. In capture mode
/// (the default) the fragment is also appended to a retained buffer, so the
/// builder accumulates a whole document; with capture off only the fragments
/// are returned, while the open-tag stack is still tracked so `close` keeps
/// producing correctly nested closing tags.
#[derive(Debug)]
pub struct XmlBuilder {
    output: String,
    stack: Vec<String>,
    capture: bool,
}

impl Default for XmlBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlBuilder {
    /// Create a capturing builder.
    pub fn new() -> Self {
        Self::with_capture(true)
    }

    /// Create a builder with explicit capture behavior.
    pub fn with_capture(capture: bool) -> Self {
        Self {
            output: String::new(),
            stack: Vec::new(),
            capture,
        }
    }

    /// Emit the XML declaration.
    ///
    /// Call this first, at most once per document; the builder does not
    /// enforce it.
    pub fn init(&mut self, version: &str, encoding: &str) -> String {
        let fragment = format!("<?xml version=\"{version}\" encoding=\"{encoding}\"?>");
        self.push_fragment(fragment)
    }

    /// Render an opening tag and push it onto the stack.
    pub fn open(&mut self, tag: &str, attrs: &Attrs) -> String {
        let fragment = Self::render_tag(tag, attrs, false);
        self.stack.push(tag.to_owned());
        self.push_fragment(fragment)
    }

    /// Render a self-closing element. The stack is untouched.
    pub fn single(&mut self, tag: &str, attrs: &Attrs) -> String {
        let fragment = Self::render_tag(tag, attrs, true);
        self.push_fragment(fragment)
    }

    /// Render a complete `<tag>content</tag>` element. The stack is untouched.
    pub fn element(&mut self, tag: &str, content: &str) -> String {
        self.element_with_attrs(tag, &Attrs::new(), content)
    }

    /// Render a complete element carrying attributes. The stack is untouched.
    pub fn element_with_attrs(&mut self, tag: &str, attrs: &Attrs, content: &str) -> String {
        let mut fragment = Self::render_tag(tag, attrs, false);
        fragment.push_str(content);
        fragment.push_str("</");
        fragment.push_str(tag);
        fragment.push('>');
        self.push_fragment(fragment)
    }

    /// Pop up to `amount` open tags, emitting closing tags most recently
    /// opened first. Popping an empty stack is a no-op.
    pub fn close(&mut self, amount: usize) -> String {
        let mut fragment = String::new();
        for _ in 0..amount.min(self.stack.len()) {
            if let Some(tag) = self.stack.pop() {
                fragment.push_str("</");
                fragment.push_str(&tag);
                fragment.push('>');
            }
        }
        self.push_fragment(fragment)
    }

    /// Close every element currently open.
    pub fn close_all(&mut self) -> String {
        let depth = self.stack.len();
        self.close(depth)
    }

    /// Append pre-built markup directly to the buffer, bypassing the stack.
    pub fn append(&mut self, raw: &str) {
        if self.capture {
            self.output.push_str(raw);
        }
    }

    /// Drain the retained buffer: returns everything accumulated since the
    /// prior drain and clears it.
    ///
    /// Open elements are not closed here; a non-empty stack at document
    /// completion is a caller error (check with [`depth`](Self::depth)).
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }

    /// Number of elements currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn render_tag(tag: &str, attrs: &Attrs, self_closing: bool) -> String {
        let mut out = String::with_capacity(tag.len() + 2);
        out.push('<');
        out.push_str(tag);
        attrs.render_into(&mut out);
        out.push_str(if self_closing { " />" } else { ">" });
        out
    }

    fn push_fragment(&mut self, fragment: String) -> String {
        if self.capture {
            self.output.push_str(&fragment);
        }
        fragment
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        let mut xml = XmlBuilder::new();
        assert_eq!(
            xml.init("1.0", "UTF-8"),
            r#"<?xml version="1.0" encoding="UTF-8"?>"#
        );
    }

    #[test]
    fn test_open_close_well_nested() {
        let mut xml = XmlBuilder::new();
        xml.open("a", &Attrs::new());
        xml.open("b", &Attrs::new());
        xml.open("c", &Attrs::new());

        // Closing tags come out in reverse-open order.
        assert_eq!(xml.close(2), "</c></b>");
        assert_eq!(xml.depth(), 1);
        assert_eq!(xml.close(1), "</a>");
        assert_eq!(xml.depth(), 0);
    }

    #[test]
    fn test_close_all_empties_stack() {
        let mut xml = XmlBuilder::new();
        xml.open("a", &Attrs::new());
        xml.open("b", &Attrs::new());
        xml.open("c", &Attrs::new());

        assert_eq!(xml.close_all(), "</c></b></a>");
        assert_eq!(xml.depth(), 0);
    }

    #[test]
    fn test_close_empty_stack_is_noop() {
        let mut xml = XmlBuilder::new();
        assert_eq!(xml.close(3), "");
        assert_eq!(xml.close_all(), "");
    }

    #[test]
    fn test_close_more_than_open() {
        let mut xml = XmlBuilder::new();
        xml.open("a", &Attrs::new());
        assert_eq!(xml.close(10), "</a>");
        assert_eq!(xml.depth(), 0);
    }

    #[test]
    fn test_single() {
        let mut xml = XmlBuilder::new();
        assert_eq!(xml.single("br", &Attrs::new()), "<br />");
        assert_eq!(xml.depth(), 0);
    }

    #[test]
    fn test_element() {
        let mut xml = XmlBuilder::new();
        assert_eq!(xml.element("loc", "https://example.com/"), "<loc>https://example.com/</loc>");
        assert_eq!(xml.element("empty", ""), "<empty></empty>");
        assert_eq!(xml.depth(), 0);
    }

    #[test]
    fn test_element_with_attrs() {
        let mut xml = XmlBuilder::new();
        let attrs = Attrs::new().set("id", "x");
        assert_eq!(
            xml.element_with_attrs("p", &attrs, "hi"),
            r#"<p id="x">hi</p>"#
        );
    }

    #[test]
    fn test_attrs_insertion_order() {
        let mut xml = XmlBuilder::new();
        let attrs = Attrs::new()
            .set("b", "2")
            .set("a", "1")
            .set("c", "3");
        assert_eq!(
            xml.open("tag", &attrs),
            r#"<tag b="2" a="1" c="3">"#
        );
    }

    #[test]
    fn test_attrs_set_opt() {
        let attrs = Attrs::new()
            .set_opt("present", Some("yes"))
            .set_opt("absent", None::<&str>);
        let mut xml = XmlBuilder::new();
        assert_eq!(xml.single("tag", &attrs), r#"<tag present="yes" />"#);
    }

    #[test]
    fn test_attrs_flag() {
        let attrs = Attrs::new()
            .set("method", "POST")
            .flag("novalidate");
        let mut xml = XmlBuilder::new();
        assert_eq!(xml.open("form", &attrs), r#"<form method="POST" novalidate>"#);
    }

    #[test]
    fn test_capture_accumulates() {
        let mut xml = XmlBuilder::new();
        xml.init("1.0", "UTF-8");
        xml.open("root", &Attrs::new());
        xml.element("item", "1");
        xml.close_all();

        assert_eq!(
            xml.take_output(),
            r#"<?xml version="1.0" encoding="UTF-8"?><root><item>1</item></root>"#
        );
    }

    #[test]
    fn test_take_output_drains() {
        let mut xml = XmlBuilder::new();
        xml.element("a", "1");
        assert_eq!(xml.take_output(), "<a>1</a>");
        // Second drain with no operations between returns nothing.
        assert_eq!(xml.take_output(), "");

        xml.element("b", "2");
        assert_eq!(xml.take_output(), "<b>2</b>");
    }

    #[test]
    fn test_capture_disabled_returns_fragments_only() {
        let mut xml = XmlBuilder::with_capture(false);
        assert_eq!(xml.open("a", &Attrs::new()), "<a>");
        assert_eq!(xml.element("b", "x"), "<b>x</b>");
        xml.append("<raw />");

        // Stack is still tracked so closing logic stays meaningful.
        assert_eq!(xml.depth(), 1);
        assert_eq!(xml.close_all(), "</a>");
        assert_eq!(xml.take_output(), "");
    }

    #[test]
    fn test_append_raw() {
        let mut xml = XmlBuilder::new();
        xml.open("root", &Attrs::new());

        // Fragment rendered by a nested non-capturing builder.
        let mut inner = XmlBuilder::with_capture(false);
        let fragment = inner.element("nested", "x");
        xml.append(&fragment);

        xml.close_all();
        assert_eq!(xml.take_output(), "<root><nested>x</nested></root>");
    }

    #[test]
    fn test_interleaved_open_close_sequence() {
        let mut xml = XmlBuilder::new();
        xml.open("a", &Attrs::new());
        xml.open("b", &Attrs::new());
        xml.close(1);
        xml.open("c", &Attrs::new());
        xml.close_all();

        assert_eq!(xml.take_output(), "<a><b></b><c></c></a>");
        assert_eq!(xml.depth(), 0);
    }
}
