//! Markdown rendering

use pulldown_cmark::{html, Event, Options, Parser};

use super::{BodySource, LoadedPage};

/// Markdown renderer for page bodies
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        // Front-matter is stripped by PageFrontmatter::parse, so no
        // metadata block option here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;
        Self { options }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }

    /// Render markdown from an untrusted source; raw HTML is shown as text
    pub fn render_untrusted(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options).map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        html_output
    }

    /// Render the body of a loaded page
    ///
    /// Bodies fetched from a Google Doc are not authored through the CMS,
    /// so their raw HTML is escaped.
    pub fn render_page(&self, page: &LoadedPage) -> String {
        match page.body_source {
            BodySource::Remote => self.render_untrusted(&page.document.body),
            BodySource::Local | BodySource::RemoteFailed { .. } => {
                self.render(&page.document.body)
            }
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
