//! Content module - resolves page slugs to Markdown documents

mod frontmatter;
mod gdocs;
mod index;
pub mod loader;
mod markdown;
mod page;
mod page_slug;

pub use frontmatter::{PageFrontmatter, PageSource};
pub use gdocs::{document_url, FetchError, GoogleDocsClient};
pub use index::PageIndex;
pub use loader::{ContentError, PageLoader};
pub use markdown::MarkdownRenderer;
pub use page::{BodySource, LoadedPage, PageDocument};
pub use page_slug::{PageSlug, UnknownSlug};
