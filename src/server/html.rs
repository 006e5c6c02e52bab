//! HTML page rendering

use crate::config::SiteConfig;
use crate::content::{document_url, LoadedPage, MarkdownRenderer, PageSlug, PageSource};

/// Simple HTML escaping
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Navigation bar linking every known page
fn nav(current: PageSlug) -> String {
    let mut out = String::from("<nav>");
    for page in PageSlug::ALL {
        let href = if page == PageSlug::Home {
            "/".to_string()
        } else {
            format!("/{}", page)
        };
        let class = if page == current {
            r#" class="active""#
        } else {
            ""
        };
        out.push_str(&format!(
            r#"<a href="{}"{}>{}</a>"#,
            href,
            class,
            page.default_title()
        ));
    }
    out.push_str("</nav>");
    out
}

fn layout(config: &SiteConfig, current: PageSlug, title: &str, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {site}</title>
</head>
<body>
<header>{nav}</header>
<main>
{main}
</main>
</body>
</html>
"#,
        title = escape(title),
        site = escape(&config.title),
        nav = nav(current),
        main = main,
    )
}

/// Render a resolved page
///
/// Whether to embed the Google Doc or render the Markdown body is decided
/// here, from `frontmatter.source`.
pub fn render_page(
    config: &SiteConfig,
    renderer: &MarkdownRenderer,
    page: PageSlug,
    loaded: &LoadedPage,
) -> String {
    let fm = &loaded.document.frontmatter;
    let title = fm.title_or(page.default_title());

    let mut main = String::new();
    if let Some(hero) = fm.hero_image.as_deref().filter(|h| !h.is_empty()) {
        main.push_str(&format!(
            r#"<img class="hero" src="{}" alt="{}">"#,
            escape(hero),
            escape(title)
        ));
        main.push('\n');
    }
    main.push_str(&format!("<h1>{}</h1>\n", escape(title)));

    let embed = match (fm.source, fm.google_doc_id()) {
        (PageSource::GoogleDocEmbed, Some(id)) => {
            document_url(&config.google_docs.embed_url, id).ok()
        }
        _ => None,
    };

    match embed {
        Some(src) => main.push_str(&format!(
            r#"<iframe class="google-doc" src="{}" title="{}" loading="lazy"></iframe>"#,
            escape(&src),
            escape(title)
        )),
        None => main.push_str(&renderer.render_page(loaded)),
    }

    layout(config, page, title, &main)
}

/// Placeholder for a known page without content
pub fn render_missing(config: &SiteConfig, page: PageSlug) -> String {
    let main = format!(
        "<h1>{}</h1>\n<p>This page has no content yet.</p>",
        escape(page.default_title())
    );
    layout(config, page, page.default_title(), &main)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BodySource, PageDocument, PageFrontmatter};

    fn doc(fm: PageFrontmatter, body: &str) -> LoadedPage {
        LoadedPage {
            document: PageDocument {
                frontmatter: fm,
                body: body.to_string(),
            },
            body_source: BodySource::Local,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_render_markdown_page() {
        let config = SiteConfig::default();
        let html = render_page(
            &config,
            &MarkdownRenderer::new(),
            PageSlug::Teaching,
            &doc(PageFrontmatter::default(), "Courses **taught**"),
        );
        assert!(html.contains("<h1>Teaching</h1>"));
        assert!(html.contains("<strong>taught</strong>"));
        assert!(html.contains(r#"<a href="/teaching" class="active">"#));
    }

    #[test]
    fn test_render_embed_page() {
        let config = SiteConfig::default();
        let fm = PageFrontmatter {
            title: Some("CV".to_string()),
            source: PageSource::GoogleDocEmbed,
            google_doc_id: Some("abc_123".to_string()),
            ..Default::default()
        };
        let html = render_page(
            &config,
            &MarkdownRenderer::new(),
            PageSlug::Cv,
            &doc(fm, "ignored body"),
        );
        assert!(html.contains("https://docs.google.com/document/d/abc_123/preview"));
        assert!(!html.contains("ignored body"));
    }

    #[test]
    fn test_render_escapes_title() {
        let config = SiteConfig::default();
        let fm = PageFrontmatter {
            title: Some("<script>".to_string()),
            hero_image: Some("/assets/me.jpg".to_string()),
            ..Default::default()
        };
        let html = render_page(&config, &MarkdownRenderer::new(), PageSlug::About, &doc(fm, ""));
        assert!(html.contains("<h1>&lt;script&gt;</h1>"));
        assert!(html.contains(r#"src="/assets/me.jpg""#));
    }

    #[test]
    fn test_render_fetched_page_escapes_html() {
        let config = SiteConfig::default();
        let mut page = doc(PageFrontmatter::default(), "Bio <img src=x onerror=alert(1)>");
        page.body_source = BodySource::Remote;

        let html = render_page(&config, &MarkdownRenderer::new(), PageSlug::Cv, &page);
        assert!(!html.contains("<img src=x"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
    }
}
