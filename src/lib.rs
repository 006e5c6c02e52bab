//! portfolio-rs: content resolver and CMS login service for an academic
//! portfolio site
//!
//! Pages are Markdown files with YAML front-matter, one per known slug.
//! A page may declare a Google Doc as its body source. The CMS login
//! pop-up is served by a stateless GitHub OAuth exchange handler.

pub mod auth;
pub mod commands;
pub mod config;
pub mod content;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{GoogleDocsClient, PageIndex, PageLoader};

/// The main application
#[derive(Debug, Clone)]
pub struct Portfolio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding `<slug>.md` pages
    pub content_dir: PathBuf,
    /// Static assets directory
    pub static_dir: PathBuf,
}

impl Portfolio {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Self {
            config,
            base_dir,
            content_dir,
            static_dir,
        }
    }

    /// Build the page loader; scans the content directory once
    pub fn page_loader(&self) -> Result<PageLoader> {
        let index = PageIndex::build(&self.content_dir);
        let docs = GoogleDocsClient::new(&self.config.google_docs)?;
        Ok(PageLoader::new(index, docs))
    }
}
