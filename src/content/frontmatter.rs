//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Where the body of a page comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageSource {
    /// Body lives in the local Markdown file
    #[default]
    Cms,
    /// Body is unused, the renderer embeds the Google Doc instead
    GoogleDocEmbed,
    /// Body is fetched from the Google Docs export endpoint at read time
    GoogleDocFetch,
}

impl PageSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageSource::Cms => "cms",
            PageSource::GoogleDocEmbed => "google-doc-embed",
            PageSource::GoogleDocFetch => "google-doc-fetch",
        }
    }

    fn from_value(value: &str) -> Option<Self> {
        match value.trim() {
            "" | "cms" => Some(PageSource::Cms),
            "google-doc-embed" => Some(PageSource::GoogleDocEmbed),
            "google-doc-fetch" => Some(PageSource::GoogleDocFetch),
            _ => None,
        }
    }
}

impl fmt::Display for PageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown `source` values fall back to `cms` instead of rejecting the
/// whole front-matter block
fn lenient_source<'de, D>(deserializer: D) -> Result<PageSource, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    let Some(value) = value else {
        return Ok(PageSource::Cms);
    };

    Ok(PageSource::from_value(&value).unwrap_or_else(|| {
        tracing::warn!("Unknown page source {:?}, using cms", value);
        PageSource::Cms
    }))
}

/// Front-matter data from a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageFrontmatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(deserialize_with = "lenient_source")]
    pub source: PageSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_doc_id: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl PageFrontmatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    ///
    /// Never fails: a missing, unterminated or malformed block yields the
    /// default front-matter and the whole text as body.
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        if !trimmed.starts_with("---") {
            return (Self::default(), content);
        }

        let rest = trimmed[3..].trim_start_matches([' ', '\t']);
        let Some(rest) = strip_line_break(rest) else {
            // `----` or `--- text` is not an opening delimiter
            return (Self::default(), content);
        };

        let Some((yaml, body)) = split_closing_delimiter(rest) else {
            return (Self::default(), content);
        };

        if yaml.trim().is_empty() {
            return (Self::default(), body);
        }

        if !looks_like_yaml(yaml) {
            return (Self::default(), content);
        }

        match serde_yaml::from_str::<PageFrontmatter>(yaml) {
            Ok(fm) => (fm, body),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (Self::default(), content)
            }
        }
    }

    /// The trimmed Google Doc id, if one is set and non-empty
    pub fn google_doc_id(&self) -> Option<&str> {
        self.google_doc_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// The title, or `default` when the page declares none
    pub fn title_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(default)
    }
}

fn strip_line_break(s: &str) -> Option<&str> {
    s.strip_prefix("\r\n").or_else(|| s.strip_prefix('\n'))
}

/// Split at the first line consisting of `---`, returning (yaml, body)
fn split_closing_delimiter(rest: &str) -> Option<(&str, &str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        if line.trim_end() == "---" {
            let yaml = &rest[..start];
            let body = rest[offset..].trim_start_matches(['\n', '\r']);
            return Some((yaml, body));
        }
    }

    None
}

/// Front-matter must hold at least one `key: value` line; anything else
/// between two `---` rules is Markdown
fn looks_like_yaml(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after = &trimmed[colon_pos + 1..];
        is_valid_key && (after.is_empty() || after.starts_with(' '))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_frontmatter() {
        let content = r#"---
title: Teaching
slug: teaching
heroImage: /assets/teaching.jpg
---

Courses I teach.
"#;

        let (fm, body) = PageFrontmatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Teaching"));
        assert_eq!(fm.slug.as_deref(), Some("teaching"));
        assert_eq!(fm.hero_image.as_deref(), Some("/assets/teaching.jpg"));
        assert_eq!(fm.source, PageSource::Cms);
        assert_eq!(body, "Courses I teach.\n");
    }

    #[test]
    fn test_parse_google_doc_source() {
        let content = "---\ntitle: CV\nsource: google-doc-fetch\ngoogleDocId: 1AbC_d-9\n---\nLocal CV\n";

        let (fm, body) = PageFrontmatter::parse(content);
        assert_eq!(fm.source, PageSource::GoogleDocFetch);
        assert_eq!(fm.google_doc_id(), Some("1AbC_d-9"));
        assert_eq!(body, "Local CV\n");
    }

    #[test]
    fn test_unknown_source_falls_back_to_cms() {
        let content = "---\ntitle: About\nsource: notion\n---\nBody\n";

        let (fm, body) = PageFrontmatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("About"));
        assert_eq!(fm.source, PageSource::Cms);
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_blank_google_doc_id() {
        let fm = PageFrontmatter {
            google_doc_id: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(fm.google_doc_id(), None);
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, body) = PageFrontmatter::parse("# Just Markdown\n");
        assert_eq!(fm, PageFrontmatter::default());
        assert_eq!(body, "# Just Markdown\n");
    }

    #[test]
    fn test_empty_frontmatter() {
        let (fm, body) = PageFrontmatter::parse("---\n---\nHello\n");
        assert_eq!(fm.title, None);
        assert_eq!(body, "Hello\n");
    }

    #[test]
    fn test_empty_frontmatter_with_trailing_spaces() {
        let (fm, body) = PageFrontmatter::parse("---\n--- \nBody\n");
        assert_eq!(fm, PageFrontmatter::default());
        assert_eq!(body, "Body\n");

        let (_, body) = PageFrontmatter::parse("---\r\n---\t\r\nBody");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let content = "---\ntitle: Oops\nNo closing rule\n";
        let (fm, body) = PageFrontmatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_malformed_yaml_is_body() {
        let content = "---\ntitle: [unclosed\n---\nText\n";
        let (fm, body) = PageFrontmatter::parse(content);
        assert_eq!(fm.title, None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_markdown_rules_not_yaml() {
        let content = "---\n\nCheck out https://example.com\n\n---\nMore.\n";
        let (fm, body) = PageFrontmatter::parse(content);
        assert_eq!(fm.title, None);
        assert!(body.contains("https://example.com"));
    }

    #[test]
    fn test_extra_fields_kept() {
        let content = "---\ntitle: Home\nsubtitle: Scholar\n---\n";
        let (fm, body) = PageFrontmatter::parse(content);
        assert_eq!(
            fm.extra.get("subtitle").and_then(|v| v.as_str()),
            Some("Scholar")
        );
        assert_eq!(body, "");
    }

    #[test]
    fn test_title_or_default() {
        let fm = PageFrontmatter::default();
        assert_eq!(fm.title_or("Research"), "Research");
    }
}
