//! Stability scoring
//!
//! Scores a locator 1-10 for how likely it is to survive routine UI changes.
//! The score is computed independently of whatever hint the builder gave.
//!
//! Scoring starts at a neutral 5. Rules are checked top to bottom and the
//! first that applies sets the score:
//! 1. `#id` CSS with a unique id: 10
//! 2. CSS on a test-id attribute: 9
//! 3. Role selector on an explicit role with an accessible name: 9
//! 4. XPath: 6 with a text predicate, else 5; positional `//tag[N]` is capped at 2
//! 5. Partial-class CSS, or CSS on a class-only element: 6
//! 6. Bare tag or `*` CSS: 3
//! 7. Text selector: 6
//!
//! Elements with no semantic hook at all lose one point.

use super::LocatorType;
use crate::dom::{DocumentContextIndex, ElementRecord};
use crate::utils::ScanConfig;
use regex::Regex;
use std::sync::LazyLock;

const NEUTRAL: u8 = 5;

static POSITIONAL_XPATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//[a-zA-Z][a-zA-Z0-9-]*\[\d+\]").unwrap());

pub struct ScoreInput<'a> {
    pub element: &'a ElementRecord,
    pub locator_type: LocatorType,
    pub value: &'a str,
    pub context: &'a DocumentContextIndex,
    pub config: &'a ScanConfig,
}

type Rule = fn(&ScoreInput) -> Option<u8>;

const RULES: &[Rule] = &[
    unique_id_css,
    test_id_css,
    named_role,
    xpath,
    class_css,
    bare_tag_css,
    text_selector,
];

fn unique_id_css(input: &ScoreInput) -> Option<u8> {
    let id = input.element.id.as_deref()?;
    let applies = input.locator_type == LocatorType::Css
        && input.value.strip_prefix('#') == Some(id)
        && input.context.is_unique_id(id);
    applies.then_some(10)
}

fn test_id_css(input: &ScoreInput) -> Option<u8> {
    if input.locator_type != LocatorType::Css {
        return None;
    }
    let applies = input.element.data_attributes.keys().any(|attr| {
        input.config.is_test_id_attribute(attr) && input.value.starts_with(&format!("[{}='", attr))
    });
    applies.then_some(9)
}

fn named_role(input: &ScoreInput) -> Option<u8> {
    let applies = input.locator_type == LocatorType::Role
        && input.element.role.is_some()
        && input.element.accessible_name().is_some();
    applies.then_some(9)
}

fn xpath(input: &ScoreInput) -> Option<u8> {
    if input.locator_type != LocatorType::XPath {
        return None;
    }
    let score = if input.value.contains("text()=") { 6 } else { NEUTRAL };
    if POSITIONAL_XPATH.is_match(input.value) {
        Some(score.min(2))
    } else {
        Some(score)
    }
}

fn class_css(input: &ScoreInput) -> Option<u8> {
    let element = input.element;
    let applies = input.locator_type == LocatorType::Css
        && (input.value.starts_with("[class*")
            || (!element.classes.is_empty()
                && element.id.is_none()
                && !element.has_data_attributes()));
    applies.then_some(6)
}

fn bare_tag_css(input: &ScoreInput) -> Option<u8> {
    let applies = input.locator_type == LocatorType::Css
        && (input.value == input.element.tag || input.value == "*");
    applies.then_some(3)
}

fn text_selector(input: &ScoreInput) -> Option<u8> {
    (input.locator_type == LocatorType::Text).then_some(6)
}

fn has_semantic_hook(element: &ElementRecord) -> bool {
    element.id.is_some()
        || element.has_data_attributes()
        || element.role.is_some()
        || element.name.is_some()
        || element.aria_label.is_some()
        || element.text.is_some()
}

pub fn score(input: &ScoreInput) -> u8 {
    let mut score = RULES
        .iter()
        .find_map(|rule| rule(input))
        .unwrap_or(NEUTRAL);

    if !has_semantic_hook(input.element) {
        score = score.saturating_sub(1).max(1);
    }

    score.clamp(1, 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_of(element: &ElementRecord, locator_type: LocatorType, value: &str) -> u8 {
        let context = DocumentContextIndex::from_elements(std::slice::from_ref(element));
        let config = ScanConfig::default();
        score(&ScoreInput {
            element,
            locator_type,
            value,
            context: &context,
            config: &config,
        })
    }

    fn button() -> ElementRecord {
        ElementRecord {
            tag: "button".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unique_id_scores_ten() {
        let mut e = button();
        e.id = Some("login-btn".to_string());
        e.text = Some("Login".to_string());
        assert_eq!(score_of(&e, LocatorType::Css, "#login-btn"), 10);
    }

    #[test]
    fn test_duplicate_id_is_not_ten() {
        let mut e = button();
        e.id = Some("card".to_string());
        e.text = Some("Card".to_string());
        let records = vec![e.clone(), e.clone()];
        let context = DocumentContextIndex::from_elements(&records);
        let config = ScanConfig::default();
        let s = score(&ScoreInput {
            element: &e,
            locator_type: LocatorType::Css,
            value: "#card",
            context: &context,
            config: &config,
        });
        assert_eq!(s, NEUTRAL);
    }

    #[test]
    fn test_test_id_scores_nine() {
        let mut e = button();
        e.data_attributes
            .insert("data-testid".to_string(), "buy".to_string());
        assert_eq!(score_of(&e, LocatorType::Css, "[data-testid='buy']"), 9);
        // Unrecognized data attributes are not test hooks.
        let mut other = button();
        other
            .data_attributes
            .insert("data-track".to_string(), "buy".to_string());
        assert_eq!(score_of(&other, LocatorType::Css, "[data-track='buy']"), NEUTRAL);
    }

    #[test]
    fn test_role_needs_explicit_role() {
        let mut e = button();
        e.text = Some("Save".to_string());
        let value = "page.getByRole('button', { name: 'Save' })";
        assert_eq!(score_of(&e, LocatorType::Role, value), NEUTRAL);
        e.role = Some("button".to_string());
        assert_eq!(score_of(&e, LocatorType::Role, value), 9);
    }

    #[test]
    fn test_xpath_scores() {
        let mut link = ElementRecord {
            tag: "a".to_string(),
            text: Some("Contact Us".to_string()),
            ..Default::default()
        };
        assert_eq!(score_of(&link, LocatorType::XPath, "//a[text()='Contact Us']"), 6);
        assert_eq!(score_of(&link, LocatorType::XPath, "//a[3]"), 2);
        link.text = None;
        assert_eq!(score_of(&link, LocatorType::XPath, "//a[3]"), 1);
        assert_eq!(score_of(&link, LocatorType::XPath, "//h2[1]"), 1);
    }

    #[test]
    fn test_class_and_tag_css() {
        let mut e = ElementRecord {
            tag: "div".to_string(),
            classes: vec!["card".to_string()],
            ..Default::default()
        };
        // No hook at all: one point off.
        assert_eq!(score_of(&e, LocatorType::Css, "[class*='card']"), 5);
        e.classes.clear();
        assert_eq!(score_of(&e, LocatorType::Css, "div"), 2);
        e.name = Some("main".to_string());
        assert_eq!(score_of(&e, LocatorType::Css, "div"), 3);
        assert_eq!(score_of(&e, LocatorType::Css, "*"), 3);
    }

    #[test]
    fn test_text_selector_scores_six() {
        let mut e = button();
        e.text = Some("Go".to_string());
        assert_eq!(score_of(&e, LocatorType::Text, "page.getByText('Go')"), 6);
    }

    #[test]
    fn test_score_is_floored_at_one() {
        let e = ElementRecord {
            tag: "span".to_string(),
            ..Default::default()
        };
        assert_eq!(score_of(&e, LocatorType::XPath, "//span[1]"), 1);
    }
}
