//! Element extraction
//!
//! Walks a [`Document`] and produces one [`ElementRecord`] per element of the
//! configured tag universe. Tags are processed in a fixed order, elements in
//! document order within each tag, so identical input always yields the same
//! sequence.

use super::{normalize_text, Document, NodeKey};
use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Interactive controls, in processing order.
pub const INTERACTIVE_TAGS: &[&str] = &["a", "button", "input", "select", "textarea"];

/// Structural and semantic elements, in processing order.
pub const ALL_TAGS: &[&str] = &[
    "div", "span", "p", "h1", "h2", "h3", "h4", "h5", "h6", "button", "input", "select",
    "textarea", "a", "form", "label", "img", "nav", "header", "footer", "main", "section",
    "article", "ul", "ol", "li", "table", "tr", "td", "th", "thead", "tbody", "iframe", "video",
    "audio", "canvas", "svg", "path", "g", "meta", "link", "script", "style", "title", "head",
    "body",
];

const FORM_CONTROLS: &[&str] = &["input", "select", "textarea"];

/// Which tags the extractor visits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagUniverse {
    #[default]
    Interactive,
    All,
}

impl TagUniverse {
    pub fn tags(&self) -> &'static [&'static str] {
        match self {
            TagUniverse::Interactive => INTERACTIVE_TAGS,
            TagUniverse::All => ALL_TAGS,
        }
    }
}

impl FromStr for TagUniverse {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "interactive" => Ok(TagUniverse::Interactive),
            "all" => Ok(TagUniverse::All),
            other => Err(ParseError::TagUniverse(other.to_string())),
        }
    }
}

impl fmt::Display for TagUniverse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagUniverse::Interactive => write!(f, "interactive"),
            TagUniverse::All => write!(f, "all"),
        }
    }
}

/// One extracted DOM element.
///
/// Every optional field is `None` (and omitted from JSON) when the source had
/// no usable value. An empty attribute counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    /// Node this record was taken from. Not serialized.
    #[serde(skip)]
    pub node: NodeKey,
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data_attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_text: Option<String>,
    /// `id` of the parent element. Not serialized.
    #[serde(skip)]
    pub parent_id: Option<String>,
    /// Every non-empty attribute, sorted by name. Not serialized.
    #[serde(skip)]
    pub attributes: Vec<(String, String)>,
}

impl ElementRecord {
    /// Class tokens joined with single spaces, as they appear in markup.
    pub fn class_string(&self) -> Option<String> {
        if self.classes.is_empty() {
            None
        } else {
            Some(self.classes.join(" "))
        }
    }

    pub fn first_class(&self) -> Option<&str> {
        self.classes.first().map(String::as_str)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn has_data_attributes(&self) -> bool {
        !self.data_attributes.is_empty()
    }

    /// ARIA label if present, otherwise visible text.
    pub fn accessible_name(&self) -> Option<&str> {
        self.aria_label.as_deref().or(self.text.as_deref())
    }
}

/// Extract records for every element of `universe`, first-seen order, each
/// node at most once.
pub fn extract(document: &Document, universe: TagUniverse) -> Vec<ElementRecord> {
    let mut seen: HashSet<NodeKey> = HashSet::new();
    let mut records = Vec::new();

    for tag in universe.tags() {
        for key in document.find_all_by_tag(tag) {
            if seen.insert(key) {
                records.push(to_record(document, key));
            }
        }
    }

    log::debug!(
        "Extracted {} {} elements from {} nodes",
        records.len(),
        universe,
        document.len()
    );
    records
}

fn to_record(document: &Document, key: NodeKey) -> ElementRecord {
    let tag = document.tag(key).to_string();
    let attr = |name: &str| non_empty(document.attribute(key, name).unwrap_or(""));

    let classes: Vec<String> = document
        .attribute(key, "class")
        .map(|c| c.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    // Inputs have no content; their visible text is the value.
    let text = if tag == "input" {
        attr("value").map(|v| normalize_text(&v)).and_then(|v| non_empty(&v))
    } else {
        non_empty(document.text(key))
    };

    let data_attributes: BTreeMap<String, String> = document
        .attributes(key)
        .iter()
        .filter(|(k, v)| k.starts_with("data-") && !v.is_empty())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    let attributes: Vec<(String, String)> = document
        .attributes(key)
        .iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .cloned()
        .collect();

    let parent_id = document
        .parent(key)
        .and_then(|parent| document.attribute(parent, "id"))
        .and_then(non_empty);

    let is_form_control = FORM_CONTROLS.contains(&tag.as_str());
    let label_text = if is_form_control {
        resolve_label(document, key)
    } else {
        None
    };

    ElementRecord {
        node: key,
        id: attr("id"),
        name: attr("name"),
        classes,
        text,
        aria_label: attr("aria-label"),
        role: attr("role"),
        href: if tag == "a" { attr("href") } else { None },
        input_type: if tag == "input" { attr("type") } else { None },
        value: if tag == "input" { attr("value") } else { None },
        placeholder: if is_form_control {
            attr("placeholder")
        } else {
            None
        },
        data_attributes,
        label_text,
        parent_id,
        attributes,
        tag,
    }
}

/// `label[for=id]` first, then the nearest enclosing `label`.
fn resolve_label(document: &Document, key: NodeKey) -> Option<String> {
    let by_for = document
        .attribute(key, "id")
        .filter(|id| !id.is_empty())
        .and_then(|id| document.find_label_for_id(id))
        .and_then(|label| non_empty(document.text(label)));

    by_for.or_else(|| {
        document
            .enclosing(key, "label")
            .and_then(|label| non_empty(document.text(label)))
    })
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(html: &str, universe: TagUniverse) -> Vec<ElementRecord> {
        extract(&Document::parse(html), universe)
    }

    #[test]
    fn test_interactive_order_is_by_tag_then_document() {
        let html = r#"<input id="q"><a href="/a">A</a><button>Go</button><a href="/b">B</a>"#;
        let recs = records(html, TagUniverse::Interactive);
        let tags: Vec<&str> = recs.iter().map(|r| r.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "a", "button", "input"]);
        assert_eq!(recs[0].href.as_deref(), Some("/a"));
        assert_eq!(recs[1].href.as_deref(), Some("/b"));
    }

    #[test]
    fn test_absent_fields_are_none() {
        let recs = records(r#"<button id="" class="">Save</button>"#, TagUniverse::Interactive);
        assert_eq!(recs.len(), 1);
        let b = &recs[0];
        assert_eq!(b.id, None);
        assert!(b.classes.is_empty());
        assert_eq!(b.text(), Some("Save"));
        assert_eq!(b.href, None);

        let json = serde_json::to_string(b).unwrap();
        assert_eq!(json, r#"{"tag":"button","text":"Save"}"#);
    }

    #[test]
    fn test_form_control_fields_and_label() {
        let html = r#"
            <label for="email">E-mail address</label>
            <input id="email" type="email" placeholder="you@example.com" data-test="email" data-x="">
            <label>Notes <textarea placeholder="Anything else?"></textarea></label>
        "#;
        let recs = records(html, TagUniverse::Interactive);
        let input = recs.iter().find(|r| r.tag == "input").unwrap();
        assert_eq!(input.input_type.as_deref(), Some("email"));
        assert_eq!(input.placeholder.as_deref(), Some("you@example.com"));
        assert_eq!(input.label_text.as_deref(), Some("E-mail address"));
        assert_eq!(input.data_attributes.len(), 1);
        assert_eq!(input.data_attributes["data-test"], "email");

        let textarea = recs.iter().find(|r| r.tag == "textarea").unwrap();
        assert_eq!(textarea.label_text.as_deref(), Some("Notes"));
        assert_eq!(textarea.input_type, None);
    }

    #[test]
    fn test_input_text_comes_from_value() {
        let recs = records(r#"<input type="submit" value="  Send   now ">"#, TagUniverse::Interactive);
        assert_eq!(recs[0].text(), Some("Send now"));
        assert_eq!(recs[0].value.as_deref(), Some("Send   now"));
    }

    #[test]
    fn test_classes_keep_source_order() {
        let recs = records(r#"<a class="zeta alpha  mid">x</a>"#, TagUniverse::Interactive);
        assert_eq!(recs[0].classes, vec!["zeta", "alpha", "mid"]);
        assert_eq!(recs[0].class_string().as_deref(), Some("zeta alpha mid"));
    }

    #[test]
    fn test_all_universe_dedupes_nodes() {
        let html = r#"<div id="card"><span>Hi</span></div><div id="card"></div>"#;
        let recs = records(html, TagUniverse::All);
        let divs = recs.iter().filter(|r| r.tag == "div").count();
        assert_eq!(divs, 2);
        let mut keys: Vec<_> = recs.iter().map(|r| r.node).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), before);
        assert!(recs.iter().any(|r| r.tag == "body"));
    }

    #[test]
    fn test_parent_id_and_raw_attributes() {
        let html = r#"<form id="checkout"><button type="submit" class="primary" title="">Pay</button></form>"#;
        let recs = records(html, TagUniverse::Interactive);
        assert_eq!(recs[0].parent_id.as_deref(), Some("checkout"));
        assert_eq!(
            recs[0].attributes,
            vec![
                ("class".to_string(), "primary".to_string()),
                ("type".to_string(), "submit".to_string()),
            ]
        );
        let json = serde_json::to_string(&recs[0]).unwrap();
        assert!(!json.contains("checkout"));
    }

    #[test]
    fn test_tag_universe_from_str() {
        assert_eq!("ALL".parse::<TagUniverse>(), Ok(TagUniverse::All));
        assert!("everything".parse::<TagUniverse>().is_err());
    }
}
