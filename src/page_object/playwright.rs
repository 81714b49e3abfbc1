//! Playwright (Python `sync_api`) Page Object.

use super::to_snake_case;
use crate::locator::descriptor::{parse_role, parse_text};
use crate::locator::snippets::escape_double_quoted;
use crate::locator::{LocatorCandidate, LocatorType};
use std::collections::BTreeMap;

/// Locator expression for one winner, relative to a `page` variable.
pub fn locator_expression(candidate: &LocatorCandidate) -> String {
    let value = candidate.locator_value.as_str();
    match candidate.locator_type {
        LocatorType::Role => match parse_role(value) {
            Some((role, name)) => format!(
                "page.get_by_role(\"{}\", name=\"{}\")",
                escape_double_quoted(&role),
                escape_double_quoted(&name)
            ),
            None => css_locator(value),
        },
        LocatorType::Text => match parse_text(value) {
            Some(text) => format!("page.get_by_text(\"{}\")", escape_double_quoted(&text)),
            None => css_locator(value),
        },
        LocatorType::Css => css_locator(value),
        LocatorType::XPath => format!("page.locator(\"xpath={}\")", escape_double_quoted(value)),
    }
}

fn css_locator(value: &str) -> String {
    format!("page.locator(\"{}\")", escape_double_quoted(value))
}

pub fn render(best: &BTreeMap<String, LocatorCandidate>, class_name: &str) -> String {
    let mut lines = vec![
        "from playwright.sync_api import Page".to_string(),
        String::new(),
        String::new(),
        format!("class {}:", class_name),
        "    def __init__(self, page: Page):".to_string(),
        "        self.page = page".to_string(),
    ];
    for (name, candidate) in best {
        lines.push(format!(
            "        self.{} = {}",
            to_snake_case(name),
            locator_expression(candidate)
        ));
    }
    lines.join("\n") + "\n"
}
