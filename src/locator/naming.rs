//! Human-readable element names, e.g. `LoginButton`, `EmailInput`.
//!
//! Signals are tried in order and the first that yields a non-empty token
//! wins:
//! 1. visible text (links and buttons)
//! 2. resolved label text
//! 3. ARIA label
//! 4. placeholder (inputs and textareas)
//! 5. test-id attribute
//! 6. id
//! 7. first non-generic class token
//! 8. tag name

use crate::dom::ElementRecord;
use crate::utils::ScanConfig;

type NameSignal = for<'a> fn(&'a ElementRecord, &'a ScanConfig) -> Option<&'a str>;

const SIGNALS: &[NameSignal] = &[
    visible_text,
    label_text,
    aria_label,
    placeholder,
    test_id,
    element_id,
    meaningful_class,
    tag_name,
];

fn visible_text<'a>(e: &'a ElementRecord, _: &'a ScanConfig) -> Option<&'a str> {
    matches!(e.tag.as_str(), "a" | "button")
        .then(|| e.text())
        .flatten()
}

fn label_text<'a>(e: &'a ElementRecord, _: &'a ScanConfig) -> Option<&'a str> {
    e.label_text.as_deref()
}

fn aria_label<'a>(e: &'a ElementRecord, _: &'a ScanConfig) -> Option<&'a str> {
    e.aria_label.as_deref()
}

fn placeholder<'a>(e: &'a ElementRecord, _: &'a ScanConfig) -> Option<&'a str> {
    matches!(e.tag.as_str(), "input" | "textarea")
        .then(|| e.placeholder.as_deref())
        .flatten()
}

fn test_id<'a>(e: &'a ElementRecord, config: &'a ScanConfig) -> Option<&'a str> {
    config.test_id_of(e).map(|(_, value)| value)
}

fn element_id<'a>(e: &'a ElementRecord, _: &'a ScanConfig) -> Option<&'a str> {
    e.id.as_deref()
}

fn meaningful_class<'a>(e: &'a ElementRecord, config: &'a ScanConfig) -> Option<&'a str> {
    e.classes
        .iter()
        .map(String::as_str)
        .find(|c| !config.is_generic_class(c))
}

fn tag_name<'a>(e: &'a ElementRecord, _: &'a ScanConfig) -> Option<&'a str> {
    Some(e.tag.as_str())
}

/// Suffix appended to the name token for a tag.
pub fn tag_suffix(tag: &str) -> &'static str {
    match tag {
        "a" => "Link",
        "button" => "Button",
        "input" => "Input",
        "select" => "Select",
        "textarea" => "Textarea",
        _ => "Element",
    }
}

/// Derive the display name of an element. Never empty.
pub fn name(element: &ElementRecord, config: &ScanConfig) -> String {
    let base = SIGNALS
        .iter()
        .filter_map(|signal| signal(element, config))
        .map(to_camel_case)
        .find(|token| !token.is_empty())
        .unwrap_or_default();

    with_suffix(&base, tag_suffix(&element.tag))
}

/// Append `suffix` unless the token already ends with it (case-insensitive),
/// in which case only the suffix casing is normalized.
fn with_suffix(base: &str, suffix: &str) -> String {
    let lower = base.to_ascii_lowercase();
    if lower.ends_with(&suffix.to_ascii_lowercase()) {
        format!("{}{}", &base[..base.len() - suffix.len()], suffix)
    } else {
        format!("{}{}", base, suffix)
    }
}

/// `"sign-in now"` -> `"SignInNow"`. Keeps ASCII alphanumerics only and
/// preserves the casing after each word's first letter.
pub fn to_camel_case(s: &str) -> String {
    s.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}
