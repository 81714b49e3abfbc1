//! Playwright role/text locator descriptors.
//!
//! Role and text locators are stored as the Playwright expression itself,
//! e.g. `page.getByRole('button', { name: 'Add to Cart' })`, so they can be
//! pasted as-is. Page Object generation and validation parse them back.

use regex::Regex;
use std::sync::LazyLock;

static ROLE_DESCRIPTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"getByRole\('\s*((?:[^'\\]|\\.)+?)\s*'\s*,\s*\{\s*name:\s*'((?:[^'\\]|\\.)*)'\s*\}\)")
        .unwrap()
});

static TEXT_DESCRIPTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"getByText\('((?:[^'\\]|\\.)*)'\)").unwrap());

/// Escape single quotes for a single-quoted selector or JS string.
pub fn escape_single_quotes(value: &str) -> String {
    value.replace('\'', "\\'")
}

fn unescape_single_quotes(value: &str) -> String {
    value.replace("\\'", "'")
}

pub fn role_descriptor(role: &str, name: &str) -> String {
    format!(
        "page.getByRole('{}', {{ name: '{}' }})",
        escape_single_quotes(role),
        escape_single_quotes(name)
    )
}

pub fn text_descriptor(text: &str) -> String {
    format!("page.getByText('{}')", escape_single_quotes(text))
}

/// `(role, name)` from a role descriptor.
pub fn parse_role(descriptor: &str) -> Option<(String, String)> {
    let caps = ROLE_DESCRIPTOR.captures(descriptor)?;
    Some((
        unescape_single_quotes(&caps[1]),
        unescape_single_quotes(&caps[2]),
    ))
}

pub fn parse_text(descriptor: &str) -> Option<String> {
    let caps = TEXT_DESCRIPTOR.captures(descriptor)?;
    Some(unescape_single_quotes(&caps[1]))
}
