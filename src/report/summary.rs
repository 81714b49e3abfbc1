use crate::locator::{AutomationTool, LocatorCandidate, LocatorType, StabilityLabel};
use serde::{Deserialize, Serialize};

/// Aggregate counts over one candidate set. Every exporter renders this as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_elements: usize,
    pub locator_distribution: LocatorDistribution,
    pub framework_split: FrameworkSplit,
    pub stability: StabilitySplit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorDistribution {
    pub css: usize,
    pub xpath: usize,
    /// Role and text selectors together.
    pub role: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkSplit {
    pub playwright: usize,
    pub selenium: usize,
    pub both: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilitySplit {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub fn compute_summary(candidates: &[LocatorCandidate], total_elements: usize) -> Summary {
    let mut summary = Summary {
        total_elements,
        ..Default::default()
    };

    for candidate in candidates {
        let kind = &mut summary.locator_distribution;
        match candidate.locator_type {
            LocatorType::Css => kind.css += 1,
            LocatorType::XPath => kind.xpath += 1,
            LocatorType::Role | LocatorType::Text => kind.role += 1,
        }

        let split = &mut summary.framework_split;
        match candidate.automation_tool {
            AutomationTool::Playwright => split.playwright += 1,
            AutomationTool::Selenium => split.selenium += 1,
            AutomationTool::Both => split.both += 1,
        }

        let bands = &mut summary.stability;
        match candidate.stability_label {
            StabilityLabel::High => bands.high += 1,
            StabilityLabel::Medium => bands.medium += 1,
            StabilityLabel::Low => bands.low += 1,
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::generate_locators;
    use crate::utils::ScanConfig;

    #[test]
    fn test_counts() {
        let html = r#"
            <button id="go">Go</button>
            <a href="/help">Help</a>
            <input type="checkbox">
        "#;
        let generation = generate_locators(html, &ScanConfig::default());
        let summary = compute_summary(&generation.locators, generation.elements.len());

        assert_eq!(summary.total_elements, 3);
        assert_eq!(summary.locator_distribution.css, 3);
        assert_eq!(summary.locator_distribution.xpath, 3);
        assert_eq!(summary.locator_distribution.role, 2);
        assert_eq!(summary.framework_split.both, 3);
        assert_eq!(summary.framework_split.selenium, 3);
        assert_eq!(summary.framework_split.playwright, 2);

        let bands = &summary.stability;
        assert_eq!(bands.high + bands.medium + bands.low, generation.locators.len());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(compute_summary(&[], 0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalElements": 0,
                "locatorDistribution": {"css": 0, "xpath": 0, "role": 0},
                "frameworkSplit": {"playwright": 0, "selenium": 0, "both": 0},
                "stability": {"high": 0, "medium": 0, "low": 0}
            })
        );
    }
}
