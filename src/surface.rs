//! Rendering port between the page behaviors and a display surface.
//!
//! Components never touch a concrete document. They address elements by id
//! through [`Surface`], which a browser binding or the in-memory
//! [`MemorySurface`] implements. Operations on ids that do not exist are
//! silent no-ops.

use std::collections::{BTreeMap, BTreeSet};

/// Events a component can listen for on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DomEvent {
    /// Activation (mouse click, Enter/Space on a button)
    Click,
    /// Pointer enters the element
    PointerEnter,
    /// Element receives keyboard focus
    Focus,
}

/// A listener registration as recorded by a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Listener {
    /// Event kind
    pub event: DomEvent,
    /// Whether the listener is removed after its first delivery
    pub once: bool,
}

/// Viewport-intersection observer settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ProximityOptions {
    /// Margin added around the viewport (CSS shorthand, e.g. "200px 0px")
    pub root_margin: String,
    /// Minimum visible fraction (0.0-1.0) that counts as "in view"
    pub threshold: f64,
}

impl Default for ProximityOptions {
    fn default() -> Self {
        Self {
            root_margin: "200px 0px".to_string(),
            threshold: 0.25,
        }
    }
}

/// The runtime refused to start playback (e.g. autoplay policy).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("playback rejected: {0}")]
pub struct PlaybackRejected(pub String);

/// A detached element tree used to replace an element's children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    /// Tag name (e.g. "li")
    pub tag: String,
    /// CSS classes in insertion order
    pub classes: Vec<String>,
    /// Attributes other than `class`
    pub attributes: BTreeMap<String, String>,
    /// Trusted inner HTML, rendered before children
    pub html: String,
    /// Child nodes
    pub children: Vec<Node>,
}

impl Node {
    /// Creates an empty element.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    /// Adds a class.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    /// Sets the inner HTML.
    #[must_use]
    pub fn html(mut self, html: &str) -> Self {
        self.html = html.to_string();
        self
    }

    /// Sets the inner text, escaping markup.
    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.html = escape(text);
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Whether the node carries a class.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Serializes the node as HTML.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        if !self.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&self.classes.join(" "))));
        }
        for (name, value) in &self.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        out.push('>');
        out.push_str(&self.html);
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str(&format!("</{}>", self.tag));
    }
}

/// Escapes text for HTML element content and attribute values.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Capability set of a display surface.
pub trait Surface {
    /// Sets a custom property on the root element's style.
    fn set_style_variable(&mut self, name: &str, value: &str);

    /// Sets an attribute on the root element.
    fn set_root_attribute(&mut self, name: &str, value: &str);

    /// Whether an element with this id exists.
    fn contains(&self, id: &str) -> bool;

    /// Reads an element attribute.
    fn attribute(&self, id: &str, name: &str) -> Option<String>;

    /// Sets an element attribute.
    fn set_attribute(&mut self, id: &str, name: &str, value: &str);

    /// Removes an element attribute.
    fn remove_attribute(&mut self, id: &str, name: &str);

    /// Reads an inline style property.
    fn inline_style(&self, id: &str, property: &str) -> Option<String>;

    /// Sets (`Some`) or clears (`None`) an inline style property.
    fn set_inline_style(&mut self, id: &str, property: &str, value: Option<&str>);

    /// Replaces the element's text content.
    fn set_text(&mut self, id: &str, text: &str);

    /// Replaces all children of the element.
    fn replace_children(&mut self, id: &str, children: Vec<Node>);

    /// Ids of all elements carrying the attribute, in document order.
    fn elements_with_attribute(&self, name: &str) -> Vec<String>;

    /// Registers interest in an event on an element. The host delivers
    /// matching events back to the page.
    fn listen(&mut self, id: &str, listener: Listener);

    /// Whether viewport-intersection observation is available.
    fn supports_proximity(&self) -> bool;

    /// Starts observing an element's intersection with the viewport.
    fn observe_proximity(&mut self, id: &str, options: &ProximityOptions);

    /// Stops observing an element.
    fn unobserve_proximity(&mut self, id: &str);

    /// Asks a media element to reload its resource.
    fn reload_media(&mut self, id: &str);

    /// Attempts to start playback of a media element.
    fn play_media(&mut self, id: &str) -> Result<(), PlaybackRejected>;
}

/// State of one element in a [`MemorySurface`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementState {
    /// Attributes
    pub attributes: BTreeMap<String, String>,
    /// Inline style properties
    pub style: BTreeMap<String, String>,
    /// Text content, if set
    pub text: Option<String>,
    /// Rendered children
    pub children: Vec<Node>,
    /// Registered listeners
    pub listeners: BTreeSet<Listener>,
    /// Whether the element is being observed for proximity
    pub observed: bool,
    /// Number of media reload requests
    pub reloads: usize,
    /// Number of playback attempts
    pub play_attempts: usize,
}

/// In-memory document used by tests and the CLI preview.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    root_attributes: BTreeMap<String, String>,
    style_variables: BTreeMap<String, String>,
    order: Vec<String>,
    elements: BTreeMap<String, ElementState>,
    proximity: bool,
    autoplay_blocked: bool,
}

impl MemorySurface {
    /// Creates an empty document with proximity observation available.
    #[must_use]
    pub fn new() -> Self {
        Self {
            proximity: true,
            ..Self::default()
        }
    }

    /// Creates a document containing the standard homepage controls.
    #[must_use]
    pub fn homepage() -> Self {
        let mut surface = Self::new();
        for id in ["theme-toggle", "news-list", "news-actions", "news-toggle"] {
            surface.add_element(id);
        }
        surface
    }

    /// Adds an element (no-op if it already exists).
    pub fn add_element(&mut self, id: &str) -> &mut Self {
        if !self.elements.contains_key(id) {
            self.order.push(id.to_string());
            self.elements.insert(id.to_string(), ElementState::default());
        }
        self
    }

    /// Adds an element with initial attributes.
    pub fn add_element_with(&mut self, id: &str, attributes: &[(&str, &str)]) -> &mut Self {
        self.add_element(id);
        for (name, value) in attributes {
            self.set_attribute(id, name, value);
        }
        self
    }

    /// Enables or disables viewport-intersection support.
    pub fn set_proximity_support(&mut self, supported: bool) -> &mut Self {
        self.proximity = supported;
        self
    }

    /// Makes every playback attempt fail.
    pub fn set_autoplay_blocked(&mut self, blocked: bool) -> &mut Self {
        self.autoplay_blocked = blocked;
        self
    }

    /// Reads a root style variable.
    #[must_use]
    pub fn style_variable(&self, name: &str) -> Option<&str> {
        self.style_variables.get(name).map(String::as_str)
    }

    /// All root style variables, sorted by name.
    #[must_use]
    pub fn style_variables(&self) -> &BTreeMap<String, String> {
        &self.style_variables
    }

    /// Reads a root attribute.
    #[must_use]
    pub fn root_attribute(&self, name: &str) -> Option<&str> {
        self.root_attributes.get(name).map(String::as_str)
    }

    /// All root attributes, sorted by name.
    #[must_use]
    pub fn root_attributes(&self) -> &BTreeMap<String, String> {
        &self.root_attributes
    }

    /// Full state of an element.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&ElementState> {
        self.elements.get(id)
    }

    /// Rendered children of an element (empty if absent).
    #[must_use]
    pub fn children(&self, id: &str) -> &[Node] {
        self.elements.get(id).map_or(&[], |e| e.children.as_slice())
    }

    /// Text content of an element.
    #[must_use]
    pub fn text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.text.as_deref())
    }

    /// Whether a listener is registered on an element.
    #[must_use]
    pub fn has_listener(&self, id: &str, event: DomEvent) -> bool {
        self.elements
            .get(id)
            .is_some_and(|e| e.listeners.iter().any(|l| l.event == event))
    }
}

impl Surface for MemorySurface {
    fn set_style_variable(&mut self, name: &str, value: &str) {
        self.style_variables
            .insert(name.to_string(), value.to_string());
    }

    fn set_root_attribute(&mut self, name: &str, value: &str) {
        self.root_attributes
            .insert(name.to_string(), value.to_string());
    }

    fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.elements.get(id)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element
                .attributes
                .insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, id: &str, name: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.attributes.remove(name);
        }
    }

    fn inline_style(&self, id: &str, property: &str) -> Option<String> {
        self.elements.get(id)?.style.get(property).cloned()
    }

    fn set_inline_style(&mut self, id: &str, property: &str, value: Option<&str>) {
        if let Some(element) = self.elements.get_mut(id) {
            match value {
                Some(value) => {
                    element
                        .style
                        .insert(property.to_string(), value.to_string());
                }
                None => {
                    element.style.remove(property);
                }
            }
        }
    }

    fn set_text(&mut self, id: &str, text: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = Some(text.to_string());
        }
    }

    fn replace_children(&mut self, id: &str, children: Vec<Node>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.children = children;
        }
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| {
                self.elements
                    .get(id.as_str())
                    .is_some_and(|e| e.attributes.contains_key(name))
            })
            .cloned()
            .collect()
    }

    fn listen(&mut self, id: &str, listener: Listener) {
        if let Some(element) = self.elements.get_mut(id) {
            element.listeners.insert(listener);
        }
    }

    fn supports_proximity(&self) -> bool {
        self.proximity
    }

    fn observe_proximity(&mut self, id: &str, _options: &ProximityOptions) {
        if let Some(element) = self.elements.get_mut(id) {
            element.observed = true;
        }
    }

    fn unobserve_proximity(&mut self, id: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.observed = false;
        }
    }

    fn reload_media(&mut self, id: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.reloads += 1;
        }
    }

    fn play_media(&mut self, id: &str) -> Result<(), PlaybackRejected> {
        let Some(element) = self.elements.get_mut(id) else {
            return Err(PlaybackRejected(format!("no media element '{id}'")));
        };
        element.play_attempts += 1;
        if self.autoplay_blocked {
            return Err(PlaybackRejected("autoplay policy".to_string()));
        }
        Ok(())
    }
}
