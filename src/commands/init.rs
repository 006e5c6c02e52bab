//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::content::PageSlug;

const CONFIG_TEMPLATE: &str = r#"# Portfolio configuration

# Site
title: Academic Portfolio
author: ''

# Public base URL; the URL environment variable overrides it
url: http://localhost:8888

# Directory
content_dir: content/pages
static_dir: public

# Google Docs pages (source: google-doc-fetch / google-doc-embed)
google_docs:
  export_url: https://docs.google.com/document/d/{id}/export?format=txt
  embed_url: https://docs.google.com/document/d/{id}/preview
  timeout_secs: 10

# CMS login; credentials come from the environment only
oauth:
  provider: github
  scope: repo,user
  function_path: /.netlify/functions/auth
  client_id_env: GITHUB_CLIENT_ID
  client_secret_env: GITHUB_CLIENT_SECRET
  base_url_env: URL
  timeout_secs: 10
"#;

/// Initialize a new site in the given directory
///
/// Existing files are left untouched.
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config = SiteConfig::default();
    let content_dir = target_dir.join(&config.content_dir);

    fs::create_dir_all(&content_dir)?;
    fs::create_dir_all(target_dir.join(&config.static_dir))?;

    write_new(&target_dir.join("_config.yml"), CONFIG_TEMPLATE)?;

    for page in PageSlug::ALL {
        let stub = format!(
            "---\ntitle: {}\nslug: {}\n---\n\n# {}\n",
            page.default_title(),
            page,
            page.default_title()
        );
        write_new(&content_dir.join(page.file_name()), &stub)?;
    }

    Ok(())
}

fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Skipping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PageFrontmatter, PageIndex};

    #[test]
    fn test_init_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();

        let config = SiteConfig::load(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config.content_dir, "content/pages");

        let index = PageIndex::build(dir.path().join("content/pages"));
        assert_eq!(index.len(), PageSlug::ALL.len());

        let raw = fs::read_to_string(dir.path().join("content/pages/cv.md")).unwrap();
        let (fm, body) = PageFrontmatter::parse(&raw);
        assert_eq!(fm.title.as_deref(), Some("Curriculum Vitae"));
        assert_eq!(fm.slug.as_deref(), Some("cv"));
        assert!(body.contains("# Curriculum Vitae"));
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("content/pages")).unwrap();
        fs::write(dir.path().join("content/pages/about.md"), "Mine").unwrap();

        init_site(dir.path()).unwrap();

        let about = fs::read_to_string(dir.path().join("content/pages/about.md")).unwrap();
        assert_eq!(about, "Mine");
    }
}
