use crate::dom::{ElementRecord, TagUniverse};
use crate::locator::StabilityLabel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scan and generation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScanConfig {
    /// Which elements to extract
    pub tag_universe: TagUniverse,

    /// `data-*` attributes treated as test hooks, in preference order
    pub test_id_attributes: Vec<String>,

    /// Class tokens too generic to name an element after
    pub generic_classes: Vec<String>,

    /// Longest visible text still used for a text-match XPath
    pub max_text_xpath_len: usize,

    /// Emit Playwright role/text selectors
    pub include_role_selectors: bool,

    /// Emit partial-match and parent-anchored XPath variants
    pub include_dynamic_xpaths: bool,

    /// Drop candidates below this label
    pub min_stability: Option<StabilityLabel>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tag_universe: TagUniverse::Interactive,
            test_id_attributes: vec!["data-test".to_string(), "data-testid".to_string()],
            generic_classes: ["btn", "form-control", "container", "row", "col"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            max_text_xpath_len: 60,
            include_role_selectors: true,
            include_dynamic_xpaths: false,
            min_stability: None,
        }
    }
}

impl ScanConfig {
    /// Load from a YAML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn is_test_id_attribute(&self, key: &str) -> bool {
        self.test_id_attributes.iter().any(|a| a == key)
    }

    /// First recognized test-id attribute the element carries.
    pub fn test_id_of<'a>(&'a self, element: &'a ElementRecord) -> Option<(&'a str, &'a str)> {
        self.test_id_attributes.iter().find_map(|attr| {
            element
                .data_attributes
                .get(attr)
                .map(|value| (attr.as_str(), value.as_str()))
        })
    }

    pub fn is_generic_class(&self, class: &str) -> bool {
        self.generic_classes.iter().any(|c| c == class)
    }
}
