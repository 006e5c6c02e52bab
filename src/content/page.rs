//! Page document models

use serde::{Deserialize, Serialize};

use super::PageFrontmatter;

/// A resolved page handed to a renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub frontmatter: PageFrontmatter,
    pub body: String,
}

/// Which path produced the body of a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodySource {
    /// Body parsed from the local file
    Local,
    /// Body fetched from the remote export endpoint
    Remote,
    /// Remote fetch failed, body parsed from the local file
    RemoteFailed { reason: String },
}

/// A page together with how its body was obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedPage {
    #[serde(flatten)]
    pub document: PageDocument,
    pub body_source: BodySource,
}
