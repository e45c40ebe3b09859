//! Arena-backed element tree standing in for the host page.
//!
//! Elements are addressed by [`ElementId`] handles into the arena, so
//! queries can return handles while mutation goes through the document.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Handle to an element inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub(super) usize);

/// Leaf content of an element.
///
/// `Markup` is raw HTML written through the sanitizer; `Text` is escaped on
/// serialization. Setting either replaces any child elements' visibility in
/// serialization order (children render after content).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Content {
    /// No own content.
    #[default]
    Empty,
    /// Plain text, escaped when serialized.
    Text(String),
    /// Pre-sanitized markup, serialized verbatim.
    Markup(String),
}

/// One element: tag, identity, attributes, content, children.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Tag name, lowercase.
    tag: String,
    /// The `id` attribute.
    id: Option<String>,
    /// Class list in insertion order.
    classes: Vec<String>,
    /// Remaining attributes, sorted for stable serialization.
    attrs: BTreeMap<String, String>,
    /// Own content.
    content: Content,
    /// Child elements in document order.
    children: Vec<ElementId>,
}

impl ElementData {
    /// Fresh element with a tag and nothing else.
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attrs: BTreeMap::new(),
            content: Content::Empty,
            children: Vec::new(),
        }
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The `id` attribute, if set.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Whether the class list contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// An attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Own content.
    #[must_use]
    pub fn content(&self) -> &Content {
        &self.content
    }
}

/// The page's element tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// Arena; index 0 is the root.
    nodes: Vec<ElementData>,
}

impl Document {
    /// New document with a single root element.
    #[must_use]
    pub fn new(root_tag: &str) -> Self {
        Self { nodes: vec![ElementData::new(root_tag)] }
    }

    /// The root element.
    #[must_use]
    pub fn root(&self) -> ElementId {
        ElementId(0)
    }

    /// Look up an element by handle.
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&ElementData> {
        self.nodes.get(id.0)
    }

    /// Append a new child element under `parent` and return its handle.
    ///
    /// A stale parent handle is logged and the element is created detached
    /// so the returned handle stays usable.
    pub fn append_child(&mut self, parent: ElementId, tag: &str) -> ElementId {
        let id = ElementId(self.nodes.len());
        self.nodes.push(ElementData::new(tag));
        if let Some(parent_data) = self.nodes.get_mut(parent.0) {
            parent_data.children.push(id);
        } else {
            tracing::error!(?parent, tag, "append_child with stale parent handle");
        }
        id
    }

    /// Set the `id` attribute. Returns false for a stale handle.
    pub fn set_id(&mut self, id: ElementId, value: &str) -> bool {
        self.with_mut(id, |el| el.id = Some(value.to_string()))
    }

    /// Add a class if not already present. Returns false for a stale handle.
    pub fn add_class(&mut self, id: ElementId, class: &str) -> bool {
        self.with_mut(id, |el| {
            if !el.has_class(class) {
                el.classes.push(class.to_string());
            }
        })
    }

    /// Set an attribute. Returns false for a stale handle.
    pub fn set_attr(&mut self, id: ElementId, name: &str, value: &str) -> bool {
        self.with_mut(id, |el| {
            el.attrs.insert(name.to_string(), value.to_string());
        })
    }

    /// Replace own content with plain text.
    pub(super) fn set_text(&mut self, id: ElementId, text: &str) -> bool {
        self.with_mut(id, |el| el.content = Content::Text(text.to_string()))
    }

    /// Replace own content with already-sanitized markup.
    pub(super) fn set_markup(&mut self, id: ElementId, html: &str) -> bool {
        self.with_mut(id, |el| el.content = Content::Markup(html.to_string()))
    }

    /// Apply a mutation to an element if the handle is live.
    fn with_mut(&mut self, id: ElementId, f: impl FnOnce(&mut ElementData)) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(el) => {
                f(el);
                true
            }
            None => false,
        }
    }

    /// All elements in document (depth-first, pre-) order.
    #[must_use]
    pub fn all_elements(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![ElementId(0)];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(el) = self.nodes.get(id.0) {
                for child in el.children.iter().rev() {
                    stack.push(*child);
                }
            }
        }
        order
    }

    /// Serialize the tree to HTML.
    ///
    /// `Text` content is escaped, `Markup` content is emitted verbatim
    /// (it has already passed the sanitizer on its way in).
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_element(ElementId(0), 0, &mut out);
        out
    }

    /// Recursive serializer step.
    fn write_element(&self, id: ElementId, depth: usize, out: &mut String) {
        let Some(el) = self.nodes.get(id.0) else {
            return;
        };

        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", el.tag);
        if let Some(el_id) = &el.id {
            let _ = write!(out, " id=\"{}\"", escape_attr(el_id));
        }
        if !el.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&el.classes.join(" ")));
        }
        for (name, value) in &el.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape_attr(value));
        }
        out.push('>');

        match &el.content {
            Content::Empty => {}
            Content::Text(text) => out.push_str(&escape_text(text)),
            Content::Markup(html) => out.push_str(html),
        }

        if el.children.is_empty() {
            let _ = writeln!(out, "</{}>", el.tag);
        } else {
            out.push('\n');
            for child in &el.children {
                self.write_element(*child, depth + 1, out);
            }
            let _ = writeln!(out, "{indent}</{}>", el.tag);
        }
    }
}

/// Escape text content.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape a double-quoted attribute value.
fn escape_attr(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}
