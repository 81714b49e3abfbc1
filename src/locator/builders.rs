//! Locator candidate builders.
//!
//! Each builder is an ordered rule list evaluated top to bottom; the first
//! rule that applies produces the seed. The stability carried by a seed is
//! only a hint, the scorer always overrides it.

use super::descriptor::{escape_single_quotes, role_descriptor, text_descriptor};
use super::{LocatorType, StabilityLabel};
use crate::dom::{DocumentContextIndex, ElementRecord};
use crate::utils::ScanConfig;

/// Builder output before naming, scoring and code generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorSeed {
    pub locator_type: LocatorType,
    pub value: String,
    pub stability_hint: StabilityLabel,
}

impl LocatorSeed {
    fn new(locator_type: LocatorType, value: String, stability_hint: StabilityLabel) -> Self {
        Self {
            locator_type,
            value,
            stability_hint,
        }
    }
}

/// Inputs shared by every rule.
pub struct BuildInput<'a> {
    pub element: &'a ElementRecord,
    pub context: &'a DocumentContextIndex,
    pub config: &'a ScanConfig,
}

type Rule = fn(&BuildInput) -> Option<LocatorSeed>;

// --- CSS ---

const CSS_RULES: &[Rule] = &[css_unique_id, css_test_id, css_partial_class, css_tag];

fn css_unique_id(input: &BuildInput) -> Option<LocatorSeed> {
    let id = input.element.id.as_deref()?;
    // A repeated id is no hook at all; fall through to the next rule.
    input.context.is_unique_id(id).then(|| {
        LocatorSeed::new(LocatorType::Css, format!("#{}", id), StabilityLabel::High)
    })
}

fn css_test_id(input: &BuildInput) -> Option<LocatorSeed> {
    let (attr, value) = input.config.test_id_of(input.element)?;
    Some(LocatorSeed::new(
        LocatorType::Css,
        format!("[{}='{}']", attr, escape_single_quotes(value)),
        StabilityLabel::High,
    ))
}

fn css_partial_class(input: &BuildInput) -> Option<LocatorSeed> {
    let class = input.element.first_class()?;
    Some(LocatorSeed::new(
        LocatorType::Css,
        format!("[class*='{}']", escape_single_quotes(class)),
        StabilityLabel::Medium,
    ))
}

fn css_tag(input: &BuildInput) -> Option<LocatorSeed> {
    let tag = if input.element.tag.is_empty() {
        "*".to_string()
    } else {
        input.element.tag.clone()
    };
    Some(LocatorSeed::new(LocatorType::Css, tag, StabilityLabel::Low))
}

pub fn build_css(input: &BuildInput) -> LocatorSeed {
    CSS_RULES
        .iter()
        .find_map(|rule| rule(input))
        .unwrap_or_else(|| LocatorSeed::new(LocatorType::Css, "*".to_string(), StabilityLabel::Low))
}

// --- XPath ---

const XPATH_RULES: &[Rule] = &[xpath_exact_text, xpath_positional];

fn xpath_exact_text(input: &BuildInput) -> Option<LocatorSeed> {
    let text = input.element.text()?;
    let usable = text.chars().count() <= input.config.max_text_xpath_len
        && !text.contains('\n')
        && !text.contains('\'');
    usable.then(|| {
        LocatorSeed::new(
            LocatorType::XPath,
            format!("//{}[text()='{}']", input.element.tag, text),
            StabilityLabel::Medium,
        )
    })
}

fn xpath_positional(input: &BuildInput) -> Option<LocatorSeed> {
    let index = input.context.occurrence_index(input.element);
    Some(LocatorSeed::new(
        LocatorType::XPath,
        format!("//{}[{}]", input.element.tag, index),
        StabilityLabel::Low,
    ))
}

pub fn build_xpath(input: &BuildInput) -> LocatorSeed {
    XPATH_RULES
        .iter()
        .find_map(|rule| rule(input))
        .unwrap_or_else(|| LocatorSeed::new(LocatorType::XPath, "//*".to_string(), StabilityLabel::Low))
}

// --- Role / text ---

/// Explicit `role` attribute, else the implicit role of links, buttons and
/// text-like inputs.
pub fn infer_role(element: &ElementRecord) -> Option<String> {
    if let Some(role) = &element.role {
        return Some(role.clone());
    }
    match element.tag.as_str() {
        "a" => Some("link".to_string()),
        "button" => Some("button".to_string()),
        "input" => match element.input_type.as_deref() {
            None | Some("text") | Some("search") | Some("email") | Some("password") => {
                Some("textbox".to_string())
            }
            Some(_) => None,
        },
        _ => None,
    }
}

const ROLE_RULES: &[Rule] = &[role_with_name, text_of_control];

fn role_with_name(input: &BuildInput) -> Option<LocatorSeed> {
    let role = infer_role(input.element)?;
    let name = input.element.accessible_name()?;
    Some(LocatorSeed::new(
        LocatorType::Role,
        role_descriptor(&role, name),
        StabilityLabel::High,
    ))
}

fn text_of_control(input: &BuildInput) -> Option<LocatorSeed> {
    if !matches!(input.element.tag.as_str(), "a" | "button") {
        return None;
    }
    let text = input.element.text()?;
    Some(LocatorSeed::new(
        LocatorType::Text,
        text_descriptor(text),
        StabilityLabel::Medium,
    ))
}

pub fn build_role(input: &BuildInput) -> Option<LocatorSeed> {
    ROLE_RULES.iter().find_map(|rule| rule(input))
}

// --- Dynamic-content XPath ---

const CONTAINS_TEXT_CHARS: usize = 20;
const CONTAINS_ATTRIBUTE_CHARS: usize = 10;

/// Unlike the rules above, every one of these fires independently.
type VariantRule = fn(&BuildInput) -> Vec<LocatorSeed>;

const DYNAMIC_XPATH_RULES: &[VariantRule] = &[
    xpath_contains_text,
    xpath_contains_attribute,
    xpath_parent_context,
];

fn head(value: &str, chars: usize) -> String {
    value.chars().take(chars).collect()
}

fn partial_xpath(value: String) -> LocatorSeed {
    LocatorSeed::new(LocatorType::XPath, value, StabilityLabel::Medium)
}

/// `//tag[contains(text(), '...')]` on the first 20 chars of text longer
/// than 3. Inputs have no text nodes and are skipped.
fn xpath_contains_text(input: &BuildInput) -> Vec<LocatorSeed> {
    let element = input.element;
    let Some(text) = element.text() else {
        return Vec::new();
    };
    if element.tag == "input" || text.chars().count() <= 3 {
        return Vec::new();
    }
    let prefix = head(text, CONTAINS_TEXT_CHARS);
    if prefix.contains('\'') {
        return Vec::new();
    }
    vec![partial_xpath(format!(
        "//{}[contains(text(), '{}')]",
        element.tag, prefix
    ))]
}

/// `//tag[contains(@attr, '...')]` on the first 10 chars of every attribute
/// value longer than 5. `class` is a token list, not a value.
fn xpath_contains_attribute(input: &BuildInput) -> Vec<LocatorSeed> {
    let element = input.element;
    element
        .attributes
        .iter()
        .filter(|(attr, value)| attr != "class" && value.chars().count() > 5)
        .map(|(attr, value)| (attr, head(value, CONTAINS_ATTRIBUTE_CHARS)))
        .filter(|(_, prefix)| !prefix.contains('\''))
        .map(|(attr, prefix)| {
            partial_xpath(format!(
                "//{}[contains(@{}, '{}')]",
                element.tag, attr, prefix
            ))
        })
        .collect()
}

/// `//*[@id='parent']//tag` when the parent element has an id.
fn xpath_parent_context(input: &BuildInput) -> Vec<LocatorSeed> {
    match input.element.parent_id.as_deref() {
        Some(parent) if !parent.contains('\'') => vec![partial_xpath(format!(
            "//*[@id='{}']//{}",
            parent, input.element.tag
        ))],
        _ => Vec::new(),
    }
}

/// Partial-match and parent-anchored XPath variants for content that
/// changes between renders.
pub fn build_dynamic_xpaths(input: &BuildInput) -> Vec<LocatorSeed> {
    DYNAMIC_XPATH_RULES
        .iter()
        .flat_map(|rule| rule(input))
        .collect()
}
