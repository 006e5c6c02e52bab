//! The closed set of pages the site knows about

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown page slug: {0}")]
pub struct UnknownSlug(pub String);

/// A page identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSlug {
    Home,
    About,
    Cv,
    Contact,
    Projects,
    Publications,
    Research,
    Service,
    Teaching,
}

impl PageSlug {
    /// Every known page, in navigation order
    pub const ALL: [PageSlug; 9] = [
        PageSlug::Home,
        PageSlug::About,
        PageSlug::Research,
        PageSlug::Publications,
        PageSlug::Projects,
        PageSlug::Teaching,
        PageSlug::Service,
        PageSlug::Cv,
        PageSlug::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageSlug::Home => "home",
            PageSlug::About => "about",
            PageSlug::Cv => "cv",
            PageSlug::Contact => "contact",
            PageSlug::Projects => "projects",
            PageSlug::Publications => "publications",
            PageSlug::Research => "research",
            PageSlug::Service => "service",
            PageSlug::Teaching => "teaching",
        }
    }

    /// File name of the backing Markdown resource
    pub fn file_name(&self) -> String {
        format!("{}.md", self.as_str())
    }

    /// Title used when the page front-matter declares none
    pub fn default_title(&self) -> &'static str {
        match self {
            PageSlug::Home => "Home",
            PageSlug::About => "About",
            PageSlug::Cv => "Curriculum Vitae",
            PageSlug::Contact => "Contact",
            PageSlug::Projects => "Projects",
            PageSlug::Publications => "Publications",
            PageSlug::Research => "Research",
            PageSlug::Service => "Service",
            PageSlug::Teaching => "Teaching",
        }
    }
}

impl fmt::Display for PageSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageSlug {
    type Err = UnknownSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = ::slug::slugify(s);
        PageSlug::ALL
            .into_iter()
            .find(|page| page.as_str() == normalized)
            .ok_or_else(|| UnknownSlug(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_slugs() {
        for page in PageSlug::ALL {
            assert_eq!(page.as_str().parse::<PageSlug>(), Ok(page));
        }
    }

    #[test]
    fn test_parse_normalizes() {
        assert_eq!("CV".parse::<PageSlug>(), Ok(PageSlug::Cv));
        assert_eq!(" Teaching ".parse::<PageSlug>(), Ok(PageSlug::Teaching));
    }

    #[test]
    fn test_unknown_slug() {
        assert_eq!(
            "blog".parse::<PageSlug>(),
            Err(UnknownSlug("blog".to_string()))
        );
        assert!("".parse::<PageSlug>().is_err());
        assert!("cv/old".parse::<PageSlug>().is_err());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(PageSlug::Publications.file_name(), "publications.md");
    }
}
