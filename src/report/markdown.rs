use super::summary::Summary;
use crate::advisor::AiEnrichment;
use crate::dom::ElementRecord;
use crate::locator::LocatorCandidate;
use serde_json::{Map, Value};

const TEXT_CELL_CHARS: usize = 120;

const ANALYSIS_SECTIONS: &[(&str, &str)] = &[
    ("page_type", "Page Type"),
    ("element_quality_score", "Element Quality Score"),
    ("best_strategies", "Best Strategies"),
    ("potential_issues", "Potential Issues"),
    ("best_practices_compliance", "Best Practices Compliance"),
    ("maintenance_risk_score", "Maintenance Risk Score"),
    ("overall_recommendations", "Overall Recommendations"),
];

const CODE_SECTIONS: &[(&str, &str, &str)] = &[
    ("selenium", "Selenium Code", "python"),
    ("playwright", "Playwright Code", "python"),
    ("cypress", "Cypress Code", "javascript"),
];

fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(format!("| {} |", headers.join(" | ")));
    out.push(format!(
        "|{}|",
        headers
            .iter()
            .map(|h| "-".repeat(h.len() + 2))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| cell(c)).collect();
        out.push(format!("| {} |", cells.join(" | ")));
    }
    out.join("\n") + "\n"
}

pub fn locator_table(candidates: &[LocatorCandidate]) -> String {
    if candidates.is_empty() {
        return String::new();
    }
    let rows = candidates
        .iter()
        .map(|c| {
            vec![
                c.custom_name.clone(),
                c.locator_type.to_string(),
                c.locator_value.clone(),
                c.stability_label.to_string(),
                c.automation_tool.to_string(),
            ]
        })
        .collect();
    table(
        &["Custom Name", "Locator Type", "Locator Value", "Stability", "Automation Tool"],
        rows,
    )
}

pub fn element_table(elements: &[ElementRecord]) -> String {
    if elements.is_empty() {
        return String::new();
    }
    let rows = elements
        .iter()
        .map(|e| {
            vec![
                e.tag.clone(),
                e.id.clone().unwrap_or_default(),
                e.name.clone().unwrap_or_default(),
                e.class_string().unwrap_or_default(),
                e.text
                    .as_deref()
                    .map(|t| t.chars().take(TEXT_CELL_CHARS).collect())
                    .unwrap_or_default(),
                e.role.clone().unwrap_or_default(),
            ]
        })
        .collect();
    table(&["Tag", "Id", "Name", "Class", "Text", "Role"], rows)
}

fn display(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "N/A".to_string(),
    }
}

fn analysis_section(analysis: &Map<String, Value>) -> String {
    let mut out = String::from("## AI Analysis\n\n");
    for (key, title) in ANALYSIS_SECTIONS {
        out.push_str(&format!("### {}\n{}\n\n", title, display(analysis.get(*key))));
    }
    out
}

fn code_section(code: &Map<String, Value>) -> String {
    let mut out = String::from("## Generated Code\n\n");
    for (key, title, lang) in CODE_SECTIONS {
        let body = match code.get(*key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "Code not available".to_string(),
        };
        out.push_str(&format!("### {}\n```{}\n{}\n```\n\n", title, lang, body));
    }
    out
}

/// Full `report.md`.
pub fn render_report(
    title: &str,
    summary: &Summary,
    candidates: &[LocatorCandidate],
    enrichment: Option<&AiEnrichment>,
) -> String {
    let summary_json = serde_json::to_string_pretty(summary).unwrap_or_default();
    let mut out = format!("# {}\n\n## Summary\n\n```json\n{}\n```\n\n", title, summary_json);

    if let Some(enrichment) = enrichment {
        if !enrichment.analysis.is_empty() {
            out.push_str(&analysis_section(&enrichment.analysis));
        }
        if !enrichment.code.is_empty() {
            out.push_str(&code_section(&enrichment.code));
        }
    }

    out.push_str("## Locators\n\n");
    if candidates.is_empty() {
        out.push_str("No locators generated.\n");
    } else {
        out.push_str(&locator_table(candidates));
    }
    out
}
