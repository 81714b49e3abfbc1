//! Ready-to-paste Python statements for each compatible framework.

use super::{AutomationTool, Framework, LocatorType};
use std::collections::BTreeMap;

/// Escape for a double-quoted Python string literal.
pub fn escape_double_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn playwright_statement(locator_type: LocatorType, value: &str) -> String {
    match locator_type {
        // Role and text values are already Playwright expressions.
        LocatorType::Role | LocatorType::Text => format!("{}.click()", value),
        LocatorType::Css => format!("page.locator(\"{}\").click()", escape_double_quoted(value)),
        LocatorType::XPath => {
            format!("page.locator(\"xpath={}\").click()", escape_double_quoted(value))
        }
    }
}

fn selenium_statement(locator_type: LocatorType, value: &str) -> Option<String> {
    let by = match locator_type {
        LocatorType::Css => "By.CSS_SELECTOR",
        LocatorType::XPath => "By.XPATH",
        LocatorType::Role | LocatorType::Text => return None,
    };
    Some(format!(
        "driver.find_element({}, \"{}\").click()",
        by,
        escape_double_quoted(value)
    ))
}

/// Keyed by framework name; only frameworks the tool supports get an entry.
pub fn code_snippets(
    locator_type: LocatorType,
    value: &str,
    tool: AutomationTool,
) -> BTreeMap<String, String> {
    let mut snippets = BTreeMap::new();
    if tool.supports(Framework::Playwright) {
        snippets.insert(
            Framework::Playwright.as_str().to_string(),
            playwright_statement(locator_type, value),
        );
    }
    if tool.supports(Framework::Selenium) {
        if let Some(statement) = selenium_statement(locator_type, value) {
            snippets.insert(Framework::Selenium.as_str().to_string(), statement);
        }
    }
    snippets
}
