//! Page index - maps each known slug to its Markdown file

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::PageSlug;

/// Slug to resource map, built once at startup and read-only afterwards
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    pages: BTreeMap<PageSlug, PathBuf>,
}

impl PageIndex {
    /// Scan `content_dir` for `<slug>.md` files
    pub fn build<P: AsRef<Path>>(content_dir: P) -> Self {
        let root = content_dir.as_ref();
        let mut pages = BTreeMap::new();

        if !root.is_dir() {
            tracing::warn!("Content directory {:?} does not exist", root);
            return Self { pages };
        }

        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            // Exact match only: the file name is the lookup key
            match PageSlug::ALL.into_iter().find(|page| page.as_str() == stem) {
                Some(page) => {
                    tracing::debug!("Indexed {} -> {:?}", page, path);
                    pages.insert(page, path.to_path_buf());
                }
                None => {
                    tracing::debug!("Ignoring {:?}: not a known page", path);
                }
            }
        }

        tracing::info!("Indexed {} pages from {:?}", pages.len(), root);
        Self { pages }
    }

    /// Path of the resource backing `page`, if any
    pub fn lookup(&self, page: PageSlug) -> Option<&Path> {
        self.pages.get(&page).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_build_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("about.md"), "About").unwrap();
        fs::write(dir.path().join("cv.md"), "CV").unwrap();
        fs::write(dir.path().join("blog.md"), "Unknown").unwrap();
        fs::write(dir.path().join("teaching.txt"), "Wrong extension").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/service.md"), "Too deep").unwrap();

        let index = PageIndex::build(dir.path());
        assert_eq!(index.len(), 2);
        assert_eq!(
            index.lookup(PageSlug::About),
            Some(dir.path().join("about.md").as_path())
        );
        assert!(index.lookup(PageSlug::Cv).is_some());
        assert!(index.lookup(PageSlug::Teaching).is_none());
        assert!(index.lookup(PageSlug::Service).is_none());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let index = PageIndex::build(dir.path().join("nope"));
        assert!(index.is_empty());
    }
}
