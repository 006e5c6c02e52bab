//! List site pages

use anyhow::Result;

use crate::content::{PageFrontmatter, PageSlug};
use crate::Portfolio;

/// List every known page, its backing file and declared source
pub fn run(portfolio: &Portfolio) -> Result<()> {
    let loader = portfolio.page_loader()?;
    let index = loader.index();

    println!("Pages ({} of {}):", index.len(), PageSlug::ALL.len());
    for page in PageSlug::ALL {
        match index.lookup(page) {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let (fm, _) = PageFrontmatter::parse(&raw);
                println!(
                    "  {:<13} {} [{}] ({})",
                    page.as_str(),
                    fm.title_or(page.default_title()),
                    fm.source,
                    path.display()
                );
            }
            None => println!("  {:<13} (no content)", page.as_str()),
        }
    }

    Ok(())
}
