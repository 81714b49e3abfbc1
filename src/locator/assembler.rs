//! Candidate assembly: the full per-document locator pipeline.

use super::builders::{
    build_css, build_dynamic_xpaths, build_role, build_xpath, BuildInput, LocatorSeed,
};
use super::dynamic::analyze;
use super::naming;
use super::scorer::{score, ScoreInput};
use super::snippets::code_snippets;
use super::{LocatorCandidate, StabilityLabel};
use crate::dom::{extract, Document, DocumentContextIndex, ElementRecord};
use crate::utils::ScanConfig;
use std::collections::HashSet;

/// Everything one scan of a document produces.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    pub elements: Vec<ElementRecord>,
    pub locators: Vec<LocatorCandidate>,
}

/// Parse `html`, extract the configured element universe and build every
/// locator candidate for it.
pub fn generate_locators(html: &str, config: &ScanConfig) -> Generation {
    let document = Document::parse(html);
    let elements = extract(&document, config.tag_universe);
    let context = DocumentContextIndex::build(&document, &elements);
    let locators = assemble(&elements, &context, config);
    Generation { elements, locators }
}

/// Candidates for `elements` in element order: CSS, XPath, role/text, then
/// the dynamic XPath variants when enabled.
///
/// A (name, type, value) triple is emitted once across the whole document;
/// later repeats are dropped. An element whose name and locators all repeat
/// an earlier element's therefore contributes no candidates at all.
pub fn assemble(
    elements: &[ElementRecord],
    context: &DocumentContextIndex,
    config: &ScanConfig,
) -> Vec<LocatorCandidate> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let mut dropped = 0usize;

    for element in elements {
        let input = BuildInput {
            element,
            context,
            config,
        };
        let custom_name = naming::name(element, config);
        let analysis = analyze(element, context);

        let mut seeds: Vec<LocatorSeed> = vec![build_css(&input), build_xpath(&input)];
        if config.include_role_selectors {
            seeds.extend(build_role(&input));
        }
        if config.include_dynamic_xpaths {
            seeds.extend(build_dynamic_xpaths(&input));
        }

        for seed in seeds {
            let key = (custom_name.clone(), seed.locator_type, seed.value.clone());
            if !seen.insert(key) {
                dropped += 1;
                continue;
            }

            let stability_score = score(&ScoreInput {
                element,
                locator_type: seed.locator_type,
                value: &seed.value,
                context,
                config,
            });
            let automation_tool = seed.locator_type.automation_tool();

            candidates.push(LocatorCandidate {
                custom_name: custom_name.clone(),
                locator_type: seed.locator_type,
                stability_label: StabilityLabel::from_score(stability_score),
                stability_score,
                automation_tool,
                is_dynamic: analysis.is_dynamic,
                is_duplicate: analysis.is_duplicate,
                warnings: analysis.warnings.clone(),
                code_snippets: code_snippets(seed.locator_type, &seed.value, automation_tool),
                locator_value: seed.value,
                validated: None,
                match_count: None,
                validation_error: None,
            });
        }
    }

    if dropped > 0 {
        log::debug!("Dropped {} repeated locator candidates", dropped);
    }
    log::info!(
        "Generated {} locators for {} elements",
        candidates.len(),
        elements.len()
    );
    candidates
}

/// Keep candidates labelled `min` or better.
pub fn filter_min_stability(
    candidates: Vec<LocatorCandidate>,
    min: StabilityLabel,
) -> Vec<LocatorCandidate> {
    candidates
        .into_iter()
        .filter(|c| c.stability_label.rank() >= min.rank())
        .collect()
}
