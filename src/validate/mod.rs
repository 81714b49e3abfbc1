//! Locator validation
//!
//! A [`MatchCounter`] reports how many elements a locator matches. A locator
//! is validated when it matches exactly one.

use crate::dom::{Document, DocumentContextIndex, ElementRecord, NodeKey};
use crate::locator::builders::infer_role;
use crate::locator::descriptor::{parse_role, parse_text};
use crate::locator::{LocatorCandidate, LocatorType};
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;

static TEXT_XPATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//([a-zA-Z][a-zA-Z0-9-]*)\[text\(\)='([^']*)'\]$").unwrap());
static POSITIONAL_XPATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^//([a-zA-Z][a-zA-Z0-9-]*|\*)\[(\d+)\]$").unwrap());
static CONTAINS_TEXT_XPATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^//([a-zA-Z][a-zA-Z0-9-]*)\[contains\(text\(\), '([^']*)'\)\]$").unwrap()
});
static CONTAINS_ATTRIBUTE_XPATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^//([a-zA-Z][a-zA-Z0-9-]*)\[contains\(@([^,\s]+), '([^']*)'\)\]$").unwrap()
});
static PARENT_CONTEXT_XPATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^//\*\[@id='([^']*)'\]//([a-zA-Z][a-zA-Z0-9-]*)$").unwrap()
});

pub trait MatchCounter {
    fn count(&self, candidate: &LocatorCandidate) -> Result<usize, String>;
}

/// Set `validated`, `matchCount` and `validationError` on every candidate.
/// Counter failures are recorded on the candidate, never raised.
pub fn apply_validation(candidates: &mut [LocatorCandidate], counter: &dyn MatchCounter) {
    let mut unique = 0usize;
    for candidate in candidates.iter_mut() {
        match counter.count(candidate) {
            Ok(count) => {
                candidate.validated = Some(count == 1);
                candidate.match_count = Some(count);
                candidate.validation_error = None;
                if count == 1 {
                    unique += 1;
                }
            }
            Err(e) => {
                log::debug!("Cannot validate {}: {}", candidate.locator_value, e);
                candidate.validated = Some(false);
                candidate.match_count = Some(0);
                candidate.validation_error = Some(e);
            }
        }
    }
    log::info!(
        "{} of {} locators match exactly one element",
        unique,
        candidates.len()
    );
}

/// Counts matches against the static markup, without running scripts.
pub struct StaticMatchCounter {
    html: Html,
    document: Document,
    context: DocumentContextIndex,
}

impl StaticMatchCounter {
    pub fn new(source: &str) -> Self {
        let document = Document::parse(source);
        let context = DocumentContextIndex::build(&document, &[]);
        Self {
            html: Html::parse_document(source),
            document,
            context,
        }
    }

    fn count_css(&self, selector: &str) -> Result<usize, String> {
        let selector =
            Selector::parse(selector).map_err(|e| format!("invalid CSS selector: {:?}", e))?;
        Ok(self.html.select(&selector).count())
    }

    fn count_xpath(&self, xpath: &str) -> Result<usize, String> {
        if xpath == "//*" {
            return Ok(self.document.len());
        }
        if let Some(caps) = TEXT_XPATH.captures(xpath) {
            let (tag, text) = (&caps[1], &caps[2]);
            return Ok(self
                .document
                .find_all_by_tag(tag)
                .filter(|key| self.document.own_texts(*key).iter().any(|t| t == text))
                .count());
        }
        if let Some(caps) = POSITIONAL_XPATH.captures(xpath) {
            let tag = &caps[1];
            let position: usize = caps[2]
                .parse()
                .map_err(|_| format!("bad position in {}", xpath))?;
            return Ok(self
                .document
                .keys()
                .filter(|key| tag == "*" || self.document.tag(*key) == tag)
                .filter(|key| self.sibling_position(*key) == Some(position))
                .count());
        }
        if let Some(caps) = CONTAINS_TEXT_XPATH.captures(xpath) {
            let (tag, part) = (&caps[1], &caps[2]);
            // contains(text(), ..) looks at the first text node only.
            return Ok(self
                .document
                .find_all_by_tag(tag)
                .filter(|key| {
                    self.document
                        .own_texts(*key)
                        .first()
                        .is_some_and(|t| t.contains(part))
                })
                .count());
        }
        if let Some(caps) = CONTAINS_ATTRIBUTE_XPATH.captures(xpath) {
            let (tag, attr, part) = (&caps[1], &caps[2], &caps[3]);
            return Ok(self
                .document
                .find_all_by_tag(tag)
                .filter(|key| {
                    self.document
                        .attribute(*key, attr)
                        .is_some_and(|v| v.contains(part))
                })
                .count());
        }
        if let Some(caps) = PARENT_CONTEXT_XPATH.captures(xpath) {
            let (id, tag) = (&caps[1], &caps[2]);
            return Ok(self
                .document
                .find_all_by_tag(tag)
                .filter(|key| self.has_ancestor_with_id(*key, id))
                .count());
        }
        Err(format!("unsupported XPath: {}", xpath))
    }

    fn has_ancestor_with_id(&self, key: NodeKey, id: &str) -> bool {
        let mut current = self.document.parent(key);
        while let Some(ancestor) = current {
            if self.document.attribute(ancestor, "id") == Some(id) {
                return true;
            }
            current = self.document.parent(ancestor);
        }
        false
    }

    fn sibling_position(&self, key: NodeKey) -> Option<usize> {
        self.context.sibling_position(key)
    }

    /// Role and accessible name as the role builder would infer them.
    fn role_and_name(&self, key: NodeKey) -> (Option<String>, Option<String>) {
        let doc = &self.document;
        let attr = |name: &str| {
            doc.attribute(key, name)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let tag = doc.tag(key).to_string();
        let text = if tag == "input" {
            attr("value")
        } else {
            Some(doc.text(key).to_string()).filter(|t| !t.is_empty())
        };
        let record = ElementRecord {
            role: attr("role"),
            input_type: if tag == "input" { attr("type") } else { None },
            aria_label: attr("aria-label"),
            text,
            tag,
            ..Default::default()
        };
        let name = record.accessible_name().map(str::to_string);
        (infer_role(&record), name)
    }

    fn count_role(&self, descriptor: &str) -> Result<usize, String> {
        let (role, name) =
            parse_role(descriptor).ok_or_else(|| format!("unparseable role selector: {}", descriptor))?;
        Ok(self
            .document
            .keys()
            .filter(|key| {
                let (r, n) = self.role_and_name(*key);
                r.as_deref() == Some(role.as_str()) && n.as_deref() == Some(name.as_str())
            })
            .count())
    }

    /// Innermost elements whose whole text equals `text`.
    fn count_text(&self, descriptor: &str) -> Result<usize, String> {
        let text =
            parse_text(descriptor).ok_or_else(|| format!("unparseable text selector: {}", descriptor))?;
        let matching: Vec<NodeKey> = self
            .document
            .keys()
            .filter(|key| self.document.text(*key) == text)
            .collect();
        let containers: HashSet<NodeKey> = matching
            .iter()
            .filter_map(|key| self.document.parent(*key))
            .collect();
        Ok(matching.iter().filter(|key| !containers.contains(key)).count())
    }
}

impl MatchCounter for StaticMatchCounter {
    fn count(&self, candidate: &LocatorCandidate) -> Result<usize, String> {
        let value = candidate.locator_value.as_str();
        match candidate.locator_type {
            LocatorType::Css => self.count_css(value),
            LocatorType::XPath => self.count_xpath(value),
            LocatorType::Role => self.count_role(value),
            LocatorType::Text => self.count_text(value),
        }
    }
}
