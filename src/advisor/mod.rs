//! Optional advisory enrichment
//!
//! An [`Advisor`] turns a text prompt into a text response. Responses are
//! commentary attached to the export; locator generation never depends on
//! them and an advisor failure never fails a run.

use crate::locator::LocatorCandidate;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const HTML_SAMPLE_CHARS: usize = 2000;
const MAX_LOCATOR_LINES: usize = 50;
const CODE_FALLBACK_CHARS: usize = 1200;

#[async_trait]
pub trait Advisor: Send + Sync {
    async fn advise(&self, prompt: &str) -> Result<String>;
}

/// Runs a shell command, writes the prompt to its stdin and returns stdout.
#[derive(Debug, Clone)]
pub struct CommandAdvisor {
    command: String,
}

impl CommandAdvisor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

#[async_trait]
impl Advisor for CommandAdvisor {
    async fn advise(&self, prompt: &str) -> Result<String> {
        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start advisor command: {}", self.command))?;

        // stdin is fed from its own task while stdout is drained.
        let writer = child.stdin.take().map(|mut stdin| {
            let prompt = prompt.to_string();
            tokio::spawn(async move { stdin.write_all(prompt.as_bytes()).await })
        });

        let output = child
            .wait_with_output()
            .await
            .context("Failed to wait for advisor command")?;

        if let Some(writer) = writer {
            match writer.await.context("Advisor stdin task panicked")? {
                Ok(()) => {}
                // The command exited without reading everything.
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                    log::debug!("Advisor command closed stdin early");
                }
                Err(e) => return Err(e).context("Failed to write prompt to advisor"),
            }
        }

        if !output.status.success() {
            anyhow::bail!(
                "Advisor command failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Parsed advisor output attached to an export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiEnrichment {
    pub analysis: Map<String, Value>,
    pub code: Map<String, Value>,
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn locator_summary(candidates: &[LocatorCandidate]) -> String {
    candidates
        .iter()
        .take(MAX_LOCATOR_LINES)
        .map(|c| format!("{} | {} | {}", c.custom_name, c.locator_type, c.locator_value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn analysis_prompt(html: &str, candidates: &[LocatorCandidate]) -> String {
    format!(
        "Analyze the following page HTML and locator summary for test automation quality.

HTML (truncated):
{}

Locators:
{}

Return STRICT JSON with keys:
- page_type (string)
- element_quality_score (1-10)
- best_strategies (string[])
- potential_issues (string[])
- best_practices_compliance (1-10)
- maintenance_risk_score (1-10)
- overall_recommendations (string[])
",
        truncate_chars(html, HTML_SAMPLE_CHARS),
        locator_summary(candidates)
    )
}

pub fn code_prompt(candidates: &[LocatorCandidate]) -> String {
    format!(
        "Generate production-ready test automation code for these locators.

Provide JSON with keys 'selenium', 'playwright', 'cypress'.
Write idiomatic Page Object methods, waits, and clear names.

Locators:
{}
",
        locator_summary(candidates)
    )
}

/// A response that is a JSON object, as-is.
fn json_object(response: &str) -> Option<Map<String, Value>> {
    let trimmed = response.trim();
    if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

pub fn parse_analysis(response: &str) -> Map<String, Value> {
    json_object(response).unwrap_or_else(|| {
        let mut map = Map::new();
        map.insert(
            "overall_recommendations".to_string(),
            json!([response.trim()]),
        );
        map
    })
}

pub fn parse_code(response: &str) -> Map<String, Value> {
    json_object(response).unwrap_or_else(|| {
        let head = truncate_chars(response.trim(), CODE_FALLBACK_CHARS);
        ["selenium", "playwright", "cypress"]
            .iter()
            .map(|key| (key.to_string(), Value::String(head.clone())))
            .collect()
    })
}

/// Ask the advisor for an analysis and for sample code. Each part is empty
/// when its request fails.
pub async fn enrich(
    advisor: &dyn Advisor,
    html: &str,
    candidates: &[LocatorCandidate],
) -> AiEnrichment {
    let analysis = match advisor.advise(&analysis_prompt(html, candidates)).await {
        Ok(response) => parse_analysis(&response),
        Err(e) => {
            log::warn!("Advisor analysis failed: {:#}", e);
            Map::new()
        }
    };
    let code = match advisor.advise(&code_prompt(candidates)).await {
        Ok(response) => parse_code(&response),
        Err(e) => {
            log::warn!("Advisor code generation failed: {:#}", e);
            Map::new()
        }
    };
    AiEnrichment { analysis, code }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::generate_locators;
    use crate::utils::ScanConfig;
    use std::sync::Mutex;

    /// Replies with canned responses in order and records prompts.
    struct ScriptedAdvisor {
        replies: Mutex<Vec<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedAdvisor {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Advisor for ScriptedAdvisor {
        async fn advise(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok(String::new()))
        }
    }

    #[test]
    fn test_parse_analysis() {
        let map = parse_analysis(r#" {"page_type": "login", "element_quality_score": 7} "#);
        assert_eq!(map["page_type"], "login");
        let map = parse_analysis("Use more test ids.");
        assert_eq!(map["overall_recommendations"], json!(["Use more test ids."]));
        // Brace-wrapped but not JSON is treated as text.
        let map = parse_analysis("{not json}");
        assert_eq!(map["overall_recommendations"], json!(["{not json}"]));
    }

    #[test]
    fn test_parse_code_fallback_truncates() {
        let long = "x".repeat(1500);
        let map = parse_code(&long);
        assert_eq!(map.len(), 3);
        assert_eq!(map["cypress"].as_str().unwrap().len(), CODE_FALLBACK_CHARS);
    }

    #[test]
    fn test_prompts_are_bounded() {
        let html: String = (0..100).map(|i| format!("<button id=\"b{}\">B{}</button>", i, i)).collect();
        let generation = generate_locators(&html, &ScanConfig::default());
        assert!(generation.locators.len() > MAX_LOCATOR_LINES);

        let prompt = code_prompt(&generation.locators);
        let lines = prompt.lines().filter(|l| l.contains(" | ")).count();
        assert_eq!(lines, MAX_LOCATOR_LINES);

        let analysis = analysis_prompt(&html, &generation.locators);
        assert!(analysis.contains(&html[..HTML_SAMPLE_CHARS]));
        assert!(!analysis.contains(&html[..HTML_SAMPLE_CHARS + 1]));
    }

    #[tokio::test]
    async fn test_enrich_survives_errors() {
        let advisor = ScriptedAdvisor::new(vec![
            Ok(r#"{"page_type": "shop"}"#.to_string()),
            Err(anyhow::anyhow!("quota exceeded")),
        ]);
        let enrichment = enrich(&advisor, "<a>x</a>", &[]).await;
        assert_eq!(enrichment.analysis["page_type"], "shop");
        assert!(enrichment.code.is_empty());

        let prompts = advisor.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 2);
        assert!(prompts[0].contains("<a>x</a>"));
        assert!(prompts[1].contains("'selenium', 'playwright', 'cypress'"));
    }

    #[tokio::test]
    async fn test_command_advisor_pipes_stdin() {
        let advisor = CommandAdvisor::new("tr a-z A-Z");
        assert_eq!(advisor.advise("hello").await.unwrap(), "HELLO");

        let failing = CommandAdvisor::new("exit 3");
        assert!(failing.advise("hello").await.is_err());
    }

    #[tokio::test]
    async fn test_command_advisor_echoes_large_prompt() {
        let prompt = "locator line\n".repeat(20_000);
        let advisor = CommandAdvisor::new("cat");
        let response = advisor.advise(&prompt).await.unwrap();
        assert_eq!(response, prompt.trim());
    }
}
