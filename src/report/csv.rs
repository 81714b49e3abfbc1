use crate::locator::LocatorCandidate;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct Row<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    locator_type: &'a str,
    value: &'a str,
    stability: &'a str,
    score: u8,
    tool: &'a str,
    dynamic: bool,
    duplicate: bool,
    warnings: String,
}

impl<'a> From<&'a LocatorCandidate> for Row<'a> {
    fn from(c: &'a LocatorCandidate) -> Self {
        Self {
            name: &c.custom_name,
            locator_type: c.locator_type.as_str(),
            value: &c.locator_value,
            stability: c.stability_label.as_str(),
            score: c.stability_score,
            tool: c.automation_tool.as_str(),
            dynamic: c.is_dynamic,
            duplicate: c.is_duplicate,
            warnings: c.warnings.join("; "),
        }
    }
}

pub fn write_to<W: Write>(candidates: &[LocatorCandidate], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for candidate in candidates {
        csv_writer.serialize(Row::from(candidate))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write CSV export
pub fn write(candidates: &[LocatorCandidate], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_to(candidates, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::generate_locators;
    use crate::utils::ScanConfig;

    #[test]
    fn test_rows() {
        let html = r#"<input id="q" name="q"><input id="q" name="q">"#;
        let generation = generate_locators(html, &ScanConfig::default());
        let mut buffer = Vec::new();
        write_to(&generation.locators, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("name,type,value,stability,score,tool,dynamic,duplicate,warnings")
        );
        assert_eq!(
            lines.next(),
            Some("QInput,CSS Selector,input,Low,3,Both,false,true,Duplicate id detected; Duplicate name detected")
        );
    }
}
