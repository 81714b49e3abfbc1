//! Locator synthesis and stability scoring
//!
//! For every extracted element this module:
//! - derives a human-readable name
//! - builds CSS, XPath and Playwright role/text candidates
//! - flags dynamic-looking and duplicate attributes
//! - scores each candidate 1-10 and labels it High/Medium/Low
//! - attaches ready-to-paste code for Playwright and Selenium
//!
//! Stability bands:
//! - **High**: 8-10 (unique id, test-id attribute, explicit role + name)
//! - **Medium**: 5-7 (partial class, exact-text XPath, text selector)
//! - **Low**: 1-4 (bare tag, positional XPath, no semantic attributes)

pub mod assembler;
pub mod builders;
pub mod descriptor;
pub mod dynamic;
pub mod naming;
pub mod scorer;
pub mod snippets;

pub use assembler::{assemble, filter_min_stability, generate_locators, Generation};

use crate::error::ParseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LocatorType {
    #[serde(rename = "CSS Selector")]
    Css,
    #[serde(rename = "XPath")]
    XPath,
    #[serde(rename = "Role Selector")]
    Role,
    #[serde(rename = "Text Selector")]
    Text,
}

impl LocatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocatorType::Css => "CSS Selector",
            LocatorType::XPath => "XPath",
            LocatorType::Role => "Role Selector",
            LocatorType::Text => "Text Selector",
        }
    }

    /// Which tool can consume a locator of this type.
    pub fn automation_tool(&self) -> AutomationTool {
        match self {
            LocatorType::Css => AutomationTool::Both,
            LocatorType::XPath => AutomationTool::Selenium,
            LocatorType::Role | LocatorType::Text => AutomationTool::Playwright,
        }
    }
}

impl fmt::Display for LocatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Qualitative stability band. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StabilityLabel {
    Low,
    Medium,
    High,
}

impl StabilityLabel {
    pub fn from_score(score: u8) -> Self {
        match score {
            8.. => StabilityLabel::High,
            5..=7 => StabilityLabel::Medium,
            _ => StabilityLabel::Low,
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            StabilityLabel::Low => 1,
            StabilityLabel::Medium => 2,
            StabilityLabel::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StabilityLabel::Low => "Low",
            StabilityLabel::Medium => "Medium",
            StabilityLabel::High => "High",
        }
    }
}

impl FromStr for StabilityLabel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(StabilityLabel::High),
            "medium" => Ok(StabilityLabel::Medium),
            "low" => Ok(StabilityLabel::Low),
            other => Err(ParseError::Stability(other.to_string())),
        }
    }
}

impl fmt::Display for StabilityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomationTool {
    Playwright,
    Selenium,
    Both,
}

impl AutomationTool {
    pub fn supports(&self, framework: Framework) -> bool {
        matches!(
            (self, framework),
            (AutomationTool::Both, _)
                | (AutomationTool::Playwright, Framework::Playwright)
                | (AutomationTool::Selenium, Framework::Selenium)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AutomationTool::Playwright => "Playwright",
            AutomationTool::Selenium => "Selenium",
            AutomationTool::Both => "Both",
        }
    }
}

impl fmt::Display for AutomationTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target test framework for code snippets and Page Objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Playwright,
    Selenium,
}

impl Framework {
    pub const ALL: [Framework; 2] = [Framework::Playwright, Framework::Selenium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Playwright => "playwright",
            Framework::Selenium => "selenium",
        }
    }

    /// Parse "playwright", "selenium" or "both".
    pub fn parse_list(s: &str) -> Result<Vec<Framework>, ParseError> {
        let mut frameworks = Vec::new();
        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            if part.eq_ignore_ascii_case("both") {
                frameworks.extend(Framework::ALL);
            } else {
                frameworks.push(part.parse()?);
            }
        }
        frameworks.sort();
        frameworks.dedup();
        if frameworks.is_empty() {
            return Err(ParseError::Framework(s.to_string()));
        }
        Ok(frameworks)
    }
}

impl FromStr for Framework {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "playwright" => Ok(Framework::Playwright),
            "selenium" => Ok(Framework::Selenium),
            other => Err(ParseError::Framework(other.to_string())),
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One locator for one element.
///
/// `stability_label` is always `StabilityLabel::from_score(stability_score)`
/// and `automation_tool` is always `locator_type.automation_tool()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorCandidate {
    pub custom_name: String,
    pub locator_type: LocatorType,
    pub locator_value: String,
    pub stability_label: StabilityLabel,
    pub stability_score: u8,
    pub automation_tool: AutomationTool,
    pub is_dynamic: bool,
    pub is_duplicate: bool,
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Framework name ("playwright" / "selenium") to statement.
    #[serde(default)]
    pub code_snippets: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validated: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_score_bands() {
        for score in 1..=10u8 {
            let label = StabilityLabel::from_score(score);
            match score {
                8..=10 => assert_eq!(label, StabilityLabel::High),
                5..=7 => assert_eq!(label, StabilityLabel::Medium),
                _ => assert_eq!(label, StabilityLabel::Low),
            }
        }
    }

    #[test]
    fn test_automation_tool_by_type() {
        assert_eq!(LocatorType::Css.automation_tool(), AutomationTool::Both);
        assert_eq!(LocatorType::XPath.automation_tool(), AutomationTool::Selenium);
        assert_eq!(LocatorType::Role.automation_tool(), AutomationTool::Playwright);
        assert_eq!(LocatorType::Text.automation_tool(), AutomationTool::Playwright);
        assert!(AutomationTool::Both.supports(Framework::Selenium));
        assert!(!AutomationTool::Selenium.supports(Framework::Playwright));
    }

    #[test]
    fn test_framework_parse_list() {
        assert_eq!(
            Framework::parse_list("both").unwrap(),
            vec![Framework::Playwright, Framework::Selenium]
        );
        assert_eq!(
            Framework::parse_list("Selenium, playwright,selenium").unwrap(),
            vec![Framework::Playwright, Framework::Selenium]
        );
        assert_eq!(
            Framework::parse_list("cypress"),
            Err(ParseError::Framework("cypress".to_string()))
        );
        assert!(Framework::parse_list("").is_err());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(
            serde_json::to_string(&LocatorType::Css).unwrap(),
            "\"CSS Selector\""
        );
        assert_eq!(
            serde_json::from_str::<LocatorType>("\"Role Selector\"").unwrap(),
            LocatorType::Role
        );
        assert_eq!(serde_json::to_string(&StabilityLabel::Medium).unwrap(), "\"Medium\"");
    }
}
