//! Resolve and print a single page

use anyhow::Result;

use crate::content::{MarkdownRenderer, PageSlug};
use crate::Portfolio;

/// Load a page the way the server does and print it
///
/// Prints the JSON document, or the rendered body with `html`.
pub async fn run(portfolio: &Portfolio, slug: &str, html: bool) -> Result<()> {
    let page: PageSlug = slug.parse()?;
    let loader = portfolio.page_loader()?;

    let Some(loaded) = loader.load(page).await? else {
        anyhow::bail!("No content for page {} in {:?}", page, portfolio.content_dir);
    };

    tracing::debug!("Loaded {} ({:?})", page, loaded.body_source);

    if html {
        println!("{}", MarkdownRenderer::new().render_page(&loaded));
    } else {
        println!("{}", serde_json::to_string_pretty(&loaded)?);
    }

    Ok(())
}
