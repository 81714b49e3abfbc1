//! Where the HTML comes from: inline markup, a local file or a URL.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Inline(String),
    File(PathBuf),
    Url(String),
}

impl DocumentSource {
    /// URL if it starts with `http://` or `https://`, a file if the path
    /// exists, inline HTML otherwise.
    pub fn detect(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            return DocumentSource::Url(trimmed.to_string());
        }
        let path = Path::new(trimmed);
        if !trimmed.is_empty() && !trimmed.contains('<') && path.is_file() {
            return DocumentSource::File(path.to_path_buf());
        }
        DocumentSource::Inline(input.to_string())
    }

    pub fn is_url(&self) -> bool {
        matches!(self, DocumentSource::Url(_))
    }

    /// Label recorded in export metadata.
    pub fn describe(&self) -> String {
        match self {
            DocumentSource::Inline(_) => "html_content".to_string(),
            DocumentSource::File(path) => path.display().to_string(),
            DocumentSource::Url(url) => url.clone(),
        }
    }

    pub async fn load(&self) -> Result<String> {
        match self {
            DocumentSource::Inline(html) => Ok(html.clone()),
            DocumentSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read HTML file {}", path.display())),
            DocumentSource::Url(url) => fetch(url).await,
        }
    }
}

async fn fetch(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")?;

    log::debug!("GET {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Server rejected request for {}", url))?;

    response
        .text()
        .await
        .with_context(|| format!("Failed to read response body from {}", url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            DocumentSource::detect("https://example.com/shop"),
            DocumentSource::Url("https://example.com/shop".to_string())
        );
        assert_eq!(
            DocumentSource::detect("<button>Go</button>"),
            DocumentSource::Inline("<button>Go</button>".to_string())
        );
        assert_eq!(
            DocumentSource::detect("no/such/file.html"),
            DocumentSource::Inline("no/such/file.html".to_string())
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(DocumentSource::Inline("<a>".into()).describe(), "html_content");
        assert_eq!(DocumentSource::Url("http://x".into()).describe(), "http://x");
        assert!(DocumentSource::Url("http://x".into()).is_url());
    }

    #[tokio::test]
    async fn test_load_file_and_inline() {
        let path = std::env::temp_dir().join(format!("lumi-locator-src-{}.html", std::process::id()));
        std::fs::write(&path, "<a href=\"/\">Home</a>").unwrap();

        let source = DocumentSource::detect(path.to_str().unwrap());
        assert_eq!(source, DocumentSource::File(path.clone()));
        assert_eq!(source.load().await.unwrap(), "<a href=\"/\">Home</a>");

        let inline = DocumentSource::Inline("<p>x</p>".to_string());
        assert_eq!(inline.load().await.unwrap(), "<p>x</p>");
        std::fs::remove_file(&path).ok();
    }

    #[tokio::test]
    async fn test_missing_file_is_error() {
        let source = DocumentSource::File(PathBuf::from("/definitely/not/here.html"));
        assert!(source.load().await.is_err());
    }
}
