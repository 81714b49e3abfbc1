//! Dynamic-value and duplicate detection.
//!
//! Tokens are checked against a small ordered set of patterns typical of
//! generated values: UUIDs, long digit runs, date stamps and framework hashes.

use crate::dom::{DocumentContextIndex, ElementRecord};
use regex::Regex;
use std::sync::LazyLock;

static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .unwrap()
});
static LONG_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{5,}").unwrap());
static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20\d{2}[\-_/]?\d{2}[\-_/]?\d{2}").unwrap());
static GENERATED_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+\d+[A-Za-z\d]{3,}").unwrap());

pub const DUPLICATE_ID: &str = "Duplicate id detected";
pub const DUPLICATE_NAME: &str = "Duplicate name detected";
pub const DYNAMIC_ID: &str = "id appears dynamic (contains UUID/long digits/timestamp)";
pub const DYNAMIC_CLASS: &str = "class token appears dynamic";
pub const DYNAMIC_NAME: &str = "name appears dynamic";

type Predicate = fn(&str) -> bool;

const PATTERNS: &[Predicate] = &[is_uuid, has_long_digits, has_timestamp, has_generated_hash];

fn is_uuid(v: &str) -> bool {
    UUID.is_match(v)
}

fn has_long_digits(v: &str) -> bool {
    LONG_DIGITS.is_match(v)
}

fn has_timestamp(v: &str) -> bool {
    TIMESTAMP.is_match(v)
}

fn has_generated_hash(v: &str) -> bool {
    GENERATED_HASH.is_match(v)
}

/// True if the trimmed token matches any generated-value pattern.
pub fn looks_dynamic(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && PATTERNS.iter().any(|matches| matches(value))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicAnalysis {
    pub is_dynamic: bool,
    pub is_duplicate: bool,
    pub warnings: Vec<String>,
}

impl DynamicAnalysis {
    fn duplicate(&mut self, warning: &str) {
        self.is_duplicate = true;
        self.warnings.push(warning.to_string());
    }

    fn dynamic(&mut self, warning: &str) {
        self.is_dynamic = true;
        self.warnings.push(warning.to_string());
    }
}

/// Warnings are appended in a fixed order: duplicate id, duplicate name,
/// dynamic id, dynamic class token, dynamic name.
pub fn analyze(element: &ElementRecord, context: &DocumentContextIndex) -> DynamicAnalysis {
    let mut analysis = DynamicAnalysis::default();

    if let Some(id) = &element.id {
        if context.id_count(id) > 1 {
            analysis.duplicate(DUPLICATE_ID);
        }
    }
    if let Some(name) = &element.name {
        if context.name_count(name) > 1 {
            analysis.duplicate(DUPLICATE_NAME);
        }
    }

    if element.id.as_deref().is_some_and(looks_dynamic) {
        analysis.dynamic(DYNAMIC_ID);
    }
    // One warning however many tokens match.
    if element.classes.iter().any(|c| looks_dynamic(c)) {
        analysis.dynamic(DYNAMIC_CLASS);
    }
    if element.name.as_deref().is_some_and(looks_dynamic) {
        analysis.dynamic(DYNAMIC_NAME);
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_dynamic_patterns() {
        assert!(looks_dynamic("3f2504e0-4f89-11d3-9a0c-0305e82c3301"));
        assert!(looks_dynamic("order-123456"));
        assert!(looks_dynamic("banner_2024-05-17"));
        assert!(looks_dynamic("css1x9k2a"));
        assert!(looks_dynamic("field-8f14e45fceea167a5a36dedd4bea2543"));

        assert!(!looks_dynamic("login-btn"));
        assert!(!looks_dynamic("h1"));
        assert!(!looks_dynamic("col-12"));
        assert!(!looks_dynamic("   "));
    }

    #[test]
    fn test_dynamic_id_warning() {
        let element = ElementRecord {
            tag: "input".to_string(),
            id: Some("field-8f14e45fceea167a5a36dedd4bea2543".to_string()),
            ..Default::default()
        };
        let context = DocumentContextIndex::from_elements(std::slice::from_ref(&element));
        let analysis = analyze(&element, &context);
        assert!(analysis.is_dynamic);
        assert!(!analysis.is_duplicate);
        assert_eq!(analysis.warnings, vec![DYNAMIC_ID]);
    }

    #[test]
    fn test_warning_order_accumulates() {
        let element = ElementRecord {
            tag: "input".to_string(),
            id: Some("user20240101".to_string()),
            name: Some("q99999".to_string()),
            classes: vec!["sc-a1b2c3".to_string(), "jsx12345".to_string()],
            ..Default::default()
        };
        let records = vec![element.clone(), element.clone()];
        let context = DocumentContextIndex::from_elements(&records);
        let analysis = analyze(&element, &context);
        assert!(analysis.is_dynamic);
        assert!(analysis.is_duplicate);
        assert_eq!(
            analysis.warnings,
            vec![DUPLICATE_ID, DUPLICATE_NAME, DYNAMIC_ID, DYNAMIC_CLASS, DYNAMIC_NAME]
        );
    }

    #[test]
    fn test_clean_element_has_no_warnings() {
        let element = ElementRecord {
            tag: "button".to_string(),
            id: Some("save".to_string()),
            classes: vec!["btn".to_string(), "btn-primary".to_string()],
            ..Default::default()
        };
        let context = DocumentContextIndex::from_elements(std::slice::from_ref(&element));
        assert_eq!(analyze(&element, &context), DynamicAnalysis::default());
    }
}
