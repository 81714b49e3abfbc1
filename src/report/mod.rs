pub mod csv;
pub mod json;
pub mod markdown;
pub mod summary;

pub use json::{ExportMetadata, LocatorExport};
pub use summary::{compute_summary, Summary};

use crate::advisor::AiEnrichment;
use crate::dom::ElementRecord;
use crate::locator::{Framework, LocatorCandidate, StabilityLabel};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Run-level facts recorded in the export metadata.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub source: String,
    pub frameworks: Vec<Framework>,
    pub min_stability: Option<StabilityLabel>,
    pub validated: bool,
    pub class_name: String,
}

pub fn build_export(
    elements: &[ElementRecord],
    locators: Vec<LocatorCandidate>,
    options: &ExportOptions,
    enrichment: Option<AiEnrichment>,
) -> LocatorExport {
    LocatorExport {
        metadata: ExportMetadata {
            generated_at: json::now(),
            source: options.source.clone(),
            total_elements: elements.len(),
            total_locators: locators.len(),
            frameworks: options.frameworks.clone(),
            min_stability: options.min_stability,
            validated: options.validated,
            ai_enriched: enrichment.is_some(),
            class_name: options.class_name.clone(),
        },
        summary: compute_summary(&locators, elements.len()),
        locators,
        ai_enrichment: enrichment,
    }
}

/// Write `locators.json`, `report.md` and `locators.csv` into `dir`.
pub fn write_exports(export: &LocatorExport, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let json_path = dir.join("locators.json");
    json::write(export, &json_path)?;

    let md_path = dir.join("report.md");
    let title = format!("{} Locator Report", export.metadata.class_name);
    let report = markdown::render_report(
        &title,
        &export.summary,
        &export.locators,
        export.ai_enrichment.as_ref(),
    );
    std::fs::write(&md_path, report)
        .with_context(|| format!("Failed to write {}", md_path.display()))?;

    let csv_path = dir.join("locators.csv");
    csv::write(&export.locators, &csv_path)?;

    Ok(vec![json_path, md_path, csv_path])
}
