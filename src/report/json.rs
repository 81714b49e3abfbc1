use super::summary::Summary;
use crate::advisor::AiEnrichment;
use crate::locator::{Framework, LocatorCandidate, StabilityLabel};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub generated_at: String,
    pub source: String,
    pub total_elements: usize,
    pub total_locators: usize,
    pub frameworks: Vec<Framework>,
    pub min_stability: Option<StabilityLabel>,
    pub validated: bool,
    pub ai_enriched: bool,
    pub class_name: String,
}

/// Contents of `locators.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocatorExport {
    pub metadata: ExportMetadata,
    pub summary: Summary,
    pub locators: Vec<LocatorCandidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_enrichment: Option<AiEnrichment>,
}

/// Either a full export or a bare candidate array.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocatorFile {
    Export(Box<LocatorExport>),
    Bare(Vec<LocatorCandidate>),
}

pub fn now() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

/// Write JSON export
pub fn write(export: &LocatorExport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(export)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn parse_locators(content: &str) -> Result<Vec<LocatorCandidate>> {
    let file: LocatorFile =
        serde_json::from_str(content).context("Not a locator export or locator array")?;
    Ok(match file {
        LocatorFile::Export(export) => export.locators,
        LocatorFile::Bare(locators) => locators,
    })
}

pub fn read_locators(path: &Path) -> Result<Vec<LocatorCandidate>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_locators(&content).with_context(|| format!("Invalid locator file {}", path.display()))
}
