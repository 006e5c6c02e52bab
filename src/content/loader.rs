//! Page loader - resolves a slug to a page document

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use super::{
    BodySource, GoogleDocsClient, LoadedPage, PageDocument, PageFrontmatter, PageIndex, PageSlug,
    PageSource,
};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Loads pages from the content index
///
/// Nothing is cached: every call re-reads the file and, for
/// `google-doc-fetch` pages, re-fetches the remote document.
#[derive(Debug, Clone)]
pub struct PageLoader {
    index: PageIndex,
    docs: GoogleDocsClient,
}

impl PageLoader {
    pub fn new(index: PageIndex, docs: GoogleDocsClient) -> Self {
        Self { index, docs }
    }

    pub fn index(&self) -> &PageIndex {
        &self.index
    }

    /// Resolve a slug string; unknown slugs are `Ok(None)`
    pub async fn load_page(&self, slug: &str) -> Result<Option<LoadedPage>, ContentError> {
        match slug.parse::<PageSlug>() {
            Ok(page) => self.load(page).await,
            Err(e) => {
                tracing::debug!("{}", e);
                Ok(None)
            }
        }
    }

    /// Resolve a known page; a page without a backing file is `Ok(None)`
    pub async fn load(&self, page: PageSlug) -> Result<Option<LoadedPage>, ContentError> {
        let Some(path) = self.index.lookup(page) else {
            tracing::debug!("No content for page {}", page);
            return Ok(None);
        };

        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!("Content for page {} was removed: {:?}", page, path);
                return Ok(None);
            }
            Err(source) => {
                return Err(ContentError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let (mut frontmatter, local_body) = PageFrontmatter::parse(&raw);
        canonicalize_slug(&mut frontmatter, page);

        let (body, body_source) = self.resolve_body(page, &frontmatter, local_body).await;

        Ok(Some(LoadedPage {
            document: PageDocument { frontmatter, body },
            body_source,
        }))
    }

    async fn resolve_body(
        &self,
        page: PageSlug,
        frontmatter: &PageFrontmatter,
        local_body: &str,
    ) -> (String, BodySource) {
        if frontmatter.source != PageSource::GoogleDocFetch {
            return (local_body.to_string(), BodySource::Local);
        }

        let Some(doc_id) = frontmatter.google_doc_id() else {
            tracing::warn!(
                "Page {} uses google-doc-fetch without a googleDocId, using local body",
                page
            );
            return (local_body.to_string(), BodySource::Local);
        };

        match self.docs.fetch_text(doc_id).await {
            Ok(text) => (text, BodySource::Remote),
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch Google Doc {} for page {}, using local body: {}",
                    doc_id,
                    page,
                    e
                );
                (
                    local_body.to_string(),
                    BodySource::RemoteFailed {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }
}

/// The file name is the lookup key, so it wins over a declared slug
fn canonicalize_slug(frontmatter: &mut PageFrontmatter, page: PageSlug) {
    match frontmatter.slug.as_deref() {
        Some(declared) if declared == page.as_str() => {}
        Some(declared) => {
            tracing::warn!(
                "Page {} declares slug {:?}, using {}",
                page,
                declared,
                page
            );
            frontmatter.slug = Some(page.as_str().to_string());
        }
        None => frontmatter.slug = Some(page.as_str().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_missing_slug() {
        let mut fm = PageFrontmatter::default();
        canonicalize_slug(&mut fm, PageSlug::Service);
        assert_eq!(fm.slug.as_deref(), Some("service"));
    }

    #[test]
    fn test_canonicalize_mismatched_slug() {
        let mut fm = PageFrontmatter {
            slug: Some("old-cv".to_string()),
            ..Default::default()
        };
        canonicalize_slug(&mut fm, PageSlug::Cv);
        assert_eq!(fm.slug.as_deref(), Some("cv"));
    }
}
