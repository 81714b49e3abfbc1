//! Page Object generation
//!
//! Picks one locator per element name for a framework and renders it as a
//! Python Page Object class.

pub mod playwright;
pub mod selenium;

use crate::locator::{Framework, LocatorCandidate, LocatorType};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").unwrap());
static CAMEL_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap());

/// Lower is preferred when scores tie.
pub fn type_preference(framework: Framework, locator_type: LocatorType) -> u8 {
    match (framework, locator_type) {
        (Framework::Playwright, LocatorType::Role) => 0,
        (Framework::Playwright, LocatorType::Css) => 1,
        (Framework::Playwright, LocatorType::Text) => 2,
        (Framework::Playwright, LocatorType::XPath) => 3,
        (Framework::Selenium, LocatorType::Css) => 0,
        (Framework::Selenium, LocatorType::XPath) => 1,
        _ => 9,
    }
}

/// Winner per element name: highest score among framework-compatible
/// candidates, ties going to the preferred locator type, then to the first
/// seen. Winners are copies; the input is left untouched.
pub fn select_best(
    candidates: &[LocatorCandidate],
    framework: Framework,
) -> BTreeMap<String, LocatorCandidate> {
    let mut best: BTreeMap<String, &LocatorCandidate> = BTreeMap::new();

    for candidate in candidates
        .iter()
        .filter(|c| c.automation_tool.supports(framework))
    {
        let replace = best
            .get(&candidate.custom_name)
            .map_or(true, |current| beats(candidate, current, framework));
        if replace {
            best.insert(candidate.custom_name.clone(), candidate);
        }
    }

    best.into_iter()
        .map(|(name, winner)| (name, winner.clone()))
        .collect()
}

fn beats(challenger: &LocatorCandidate, current: &LocatorCandidate, framework: Framework) -> bool {
    if challenger.stability_score != current.stability_score {
        return challenger.stability_score > current.stability_score;
    }
    type_preference(framework, challenger.locator_type)
        < type_preference(framework, current.locator_type)
}

/// `"LoginButton"` -> `"login_button"`. Never empty, never starts with a digit.
pub fn to_snake_case(name: &str) -> String {
    let underscored = NON_ALNUM.replace_all(name, "_");
    let split = CAMEL_BOUNDARY.replace_all(&underscored, "${1}_${2}");
    let snake = split.to_lowercase().trim_matches('_').to_string();

    if snake.is_empty() {
        return "element".to_string();
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("e_{}", snake);
    }
    snake
}

/// Render the Page Object source for one framework.
pub fn render(candidates: &[LocatorCandidate], framework: Framework, class_name: &str) -> String {
    let best = select_best(candidates, framework);
    match framework {
        Framework::Playwright => playwright::render(&best, class_name),
        Framework::Selenium => selenium::render(&best, class_name),
    }
}

pub fn file_name(class_name: &str, framework: Framework) -> String {
    match framework {
        Framework::Playwright => format!("{}_Playwright.py", class_name),
        Framework::Selenium => format!("{}_Selenium.py", class_name),
    }
}

/// Write one Page Object per framework into `dir`. With a single framework
/// the same source is also written to `page.py`.
pub fn write_page_objects(
    candidates: &[LocatorCandidate],
    frameworks: &[Framework],
    class_name: &str,
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written = Vec::new();
    for framework in frameworks {
        let source = render(candidates, *framework, class_name);
        let path = dir.join(file_name(class_name, *framework));
        write_file(&path, &source)?;
        written.push(path);

        if frameworks.len() == 1 {
            let page_py = dir.join("page.py");
            write_file(&page_py, &source)?;
            written.push(page_py);
        }
    }
    Ok(written)
}

/// Render one framework's Page Object to `path`.
pub fn write_page_object(
    candidates: &[LocatorCandidate],
    framework: Framework,
    class_name: &str,
    path: &Path,
) -> Result<()> {
    let source = render(candidates, framework, class_name);
    std::fs::write(path, source)
        .with_context(|| format!("Failed to write Page Object {}", path.display()))
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
