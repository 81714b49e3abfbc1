//! Selenium (Python) Page Object.

use super::to_snake_case;
use crate::locator::snippets::escape_double_quoted;
use crate::locator::{LocatorCandidate, LocatorType};
use std::collections::BTreeMap;

fn find_element(candidate: &LocatorCandidate) -> String {
    let by = match candidate.locator_type {
        LocatorType::XPath => "By.XPATH",
        _ => "By.CSS_SELECTOR",
    };
    format!(
        "driver.find_element({}, \"{}\")",
        by,
        escape_double_quoted(&candidate.locator_value)
    )
}

pub fn render(best: &BTreeMap<String, LocatorCandidate>, class_name: &str) -> String {
    let mut lines = vec![
        "from selenium.webdriver.common.by import By".to_string(),
        String::new(),
        String::new(),
        format!("class {}:", class_name),
        "    def __init__(self, driver):".to_string(),
        "        self.driver = driver".to_string(),
    ];
    for (name, candidate) in best {
        lines.push(format!(
            "        self.{} = {}",
            to_snake_case(name),
            find_element(candidate)
        ));
    }
    lines.join("\n") + "\n"
}
