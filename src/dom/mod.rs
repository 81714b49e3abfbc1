//! Document model adapter
//!
//! Parses an HTML string once with `scraper` and snapshots every element into
//! an owned, index-addressed tree. Everything downstream (extraction, context
//! index, validation) reads the snapshot through the methods below and never
//! touches the parser directly.

pub mod context;
pub mod extractor;

pub use context::DocumentContextIndex;
pub use extractor::{extract, ElementRecord, TagUniverse};

use scraper::{ElementRef, Html};

/// Identity of an element inside one [`Document`], assigned in document order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub usize);

#[derive(Debug, Clone)]
struct DomNode {
    tag: String,
    /// Sorted by attribute name so iteration order never depends on the parser.
    attributes: Vec<(String, String)>,
    /// Whitespace-collapsed text of all descendants.
    text: String,
    /// Direct child text nodes, each normalized, empties dropped.
    own_texts: Vec<String>,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
}

/// Read-only element tree of one parsed document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<DomNode>,
}

impl Document {
    /// Parse an HTML document. Malformed markup is recovered by the parser;
    /// this never fails.
    pub fn parse(source: &str) -> Self {
        let html = Html::parse_document(source);
        let mut nodes: Vec<DomNode> = Vec::new();
        let mut stack: Vec<(ElementRef, Option<NodeKey>)> = vec![(html.root_element(), None)];

        while let Some((element, parent)) = stack.pop() {
            let key = NodeKey(nodes.len());
            if let Some(parent_key) = parent {
                nodes[parent_key.0].children.push(key);
            }
            nodes.push(snapshot(element, parent));

            let children: Vec<ElementRef> = element.children().filter_map(ElementRef::wrap).collect();
            for child in children.into_iter().rev() {
                stack.push((child, Some(key)));
            }
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All elements with the given (lower-case) tag, in document order.
    pub fn find_all_by_tag<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = NodeKey> + 'a {
        self.nodes
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.tag == tag)
            .map(|(index, _)| NodeKey(index))
    }

    /// Every element key in document order.
    pub fn keys(&self) -> impl Iterator<Item = NodeKey> {
        (0..self.nodes.len()).map(NodeKey)
    }

    pub fn tag(&self, key: NodeKey) -> &str {
        self.nodes.get(key.0).map(|n| n.tag.as_str()).unwrap_or("")
    }

    pub fn attributes(&self, key: NodeKey) -> &[(String, String)] {
        self.nodes
            .get(key.0)
            .map(|n| n.attributes.as_slice())
            .unwrap_or(&[])
    }

    pub fn attribute(&self, key: NodeKey, name: &str) -> Option<&str> {
        self.attributes(key)
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Normalized text content of the element and its descendants.
    pub fn text(&self, key: NodeKey) -> &str {
        self.nodes.get(key.0).map(|n| n.text.as_str()).unwrap_or("")
    }

    /// Normalized direct text children, the nodes an XPath `text()` step sees.
    pub fn own_texts(&self, key: NodeKey) -> &[String] {
        self.nodes
            .get(key.0)
            .map(|n| n.own_texts.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, key: NodeKey) -> Option<NodeKey> {
        self.nodes.get(key.0).and_then(|n| n.parent)
    }

    /// Children of this element's parent that share its tag, in document
    /// order, including the element itself.
    pub fn siblings_by_tag(&self, key: NodeKey) -> Vec<NodeKey> {
        let tag = self.tag(key);
        match self.parent(key) {
            Some(parent) => self.nodes[parent.0]
                .children
                .iter()
                .copied()
                .filter(|child| self.tag(*child) == tag)
                .collect(),
            None => vec![key],
        }
    }

    /// First `label[for=id]` in document order.
    pub fn find_label_for_id(&self, id: &str) -> Option<NodeKey> {
        self.find_all_by_tag("label")
            .find(|label| self.attribute(*label, "for") == Some(id))
    }

    /// Nearest ancestor with the given tag.
    pub fn enclosing(&self, key: NodeKey, tag: &str) -> Option<NodeKey> {
        let mut current = self.parent(key);
        while let Some(ancestor) = current {
            if self.tag(ancestor) == tag {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }
}

fn snapshot(element: ElementRef, parent: Option<NodeKey>) -> DomNode {
    let value = element.value();

    let mut attributes: Vec<(String, String)> = value
        .attrs()
        .map(|(k, v)| (k.to_lowercase(), v.to_string()))
        .collect();
    attributes.sort_by(|a, b| a.0.cmp(&b.0));
    attributes.dedup_by(|a, b| a.0 == b.0);

    let text = normalize_text(&element.text().collect::<Vec<_>>().join(" "));

    let own_texts = element
        .children()
        .filter_map(|child| child.value().as_text().map(|t| normalize_text(t)))
        .filter(|t| !t.is_empty())
        .collect();

    DomNode {
        tag: value.name().to_lowercase(),
        attributes,
        text,
        own_texts,
        parent,
        children: Vec::new(),
    }
}

/// Collapse whitespace runs to a single space and trim.
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <form id="login">
            <label for="user">User   name</label>
            <input id="user" name="user">
            <label>Password <input id="pass" type="password"></label>
            <button>Sign
                in</button>
        </form>
        <ul><li>One</li><li>Two</li><li>Three</li></ul>
    </body></html>"#;

    #[test]
    fn test_find_all_by_tag_document_order() {
        let doc = Document::parse(PAGE);
        let inputs: Vec<_> = doc.find_all_by_tag("input").collect();
        assert_eq!(inputs.len(), 2);
        assert_eq!(doc.attribute(inputs[0], "id"), Some("user"));
        assert_eq!(doc.attribute(inputs[1], "id"), Some("pass"));
    }

    #[test]
    fn test_text_is_normalized() {
        let doc = Document::parse(PAGE);
        let button = doc.find_all_by_tag("button").next().unwrap();
        assert_eq!(doc.text(button), "Sign in");
        let label = doc.find_label_for_id("user").unwrap();
        assert_eq!(doc.text(label), "User name");
    }

    #[test]
    fn test_enclosing_label() {
        let doc = Document::parse(PAGE);
        let pass = doc.find_all_by_tag("input").nth(1).unwrap();
        let label = doc.enclosing(pass, "label").unwrap();
        assert_eq!(doc.text(label), "Password");
        assert_eq!(doc.own_texts(label), &["Password".to_string()]);
    }

    #[test]
    fn test_siblings_by_tag() {
        let doc = Document::parse(PAGE);
        let items: Vec<_> = doc.find_all_by_tag("li").collect();
        let siblings = doc.siblings_by_tag(items[2]);
        assert_eq!(siblings, items);
        assert_eq!(doc.tag(doc.parent(items[0]).unwrap()), "ul");
    }

    #[test]
    fn test_missing_attribute_is_none() {
        let doc = Document::parse("<a>x</a>");
        let link = doc.find_all_by_tag("a").next().unwrap();
        assert_eq!(doc.attribute(link, "href"), None);
        assert_eq!(doc.find_label_for_id("nothing"), None);
    }
}
