//! Built-in portal templates using the Tera template engine
//!
//! All templates are embedded directly in the binary.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::PortalConfig;
use crate::content::{Article, ArticleMeta};
use crate::toc::{TocEntry, SCROLLSPY_SCRIPT, SCROLL_LOOKAHEAD};

/// Portal stylesheet, served at /assets/style.css
pub const STYLESHEET: &str = include_str!("portal/style.css");

/// Template renderer with the embedded portal theme
pub struct TemplateRenderer {
    tera: Tera,
}

/// One article card on the listing page
#[derive(Debug, Clone, Serialize)]
pub struct CardData {
    #[serde(flatten)]
    pub meta: ArticleMeta,
    /// Pre-computed searchable text, mirrored by the client-side filter
    pub haystack: String,
}

impl CardData {
    pub fn new(meta: &ArticleMeta) -> Self {
        Self {
            meta: meta.clone(),
            haystack: meta.haystack(),
        }
    }
}

impl TemplateRenderer {
    /// Create a new renderer with all portal templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("portal/layout.html")),
            ("index.html", include_str!("portal/index.html")),
            ("article.html", include_str!("portal/article.html")),
            ("not_found.html", include_str!("portal/not_found.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }

    /// Render the listing page
    pub fn render_index(
        &self,
        config: &PortalConfig,
        articles: &[&ArticleMeta],
        query: &str,
    ) -> Result<String> {
        let cards: Vec<CardData> = articles.iter().map(|m| CardData::new(m)).collect();

        let mut context = Context::new();
        context.insert("site", config);
        context.insert("cards", &cards);
        context.insert("query", query);
        context.insert("total", &cards.len());
        self.render("index.html", &context)
    }

    /// Render an article page with its table of contents
    pub fn render_article(
        &self,
        config: &PortalConfig,
        article: &Article,
        content_html: &str,
        toc: &[TocEntry],
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", config);
        context.insert("article", &article.meta);
        context.insert(
            "canonical",
            &format!(
                "{}{}article/{}",
                config.url.trim_end_matches('/'),
                config.root,
                article.meta.slug
            ),
        );
        context.insert("content", content_html);
        context.insert("toc", toc);
        context.insert("lookahead", &(SCROLL_LOOKAHEAD as u32));
        context.insert("scrollspy_script", SCROLLSPY_SCRIPT);
        self.render("article.html", &context)
    }

    /// Render the not-found page for an unknown slug
    pub fn render_not_found(&self, config: &PortalConfig, slug: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", config);
        context.insert("slug", slug);
        self.render("not_found.html", &context)
    }
}

/// Tera filter: format an RFC 3339 date string for display
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "%b %d, %Y".to_string(),
    };

    match chrono::DateTime::parse_from_rfc3339(&s) {
        Ok(date) => Ok(tera::Value::String(date.format(&format).to_string())),
        Err(_) => Ok(tera::Value::String(s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::extract_headings;
    use crate::toc;
    use chrono::{Local, TimeZone};

    fn meta() -> ArticleMeta {
        ArticleMeta {
            slug: "troubleshoot-login-failures".to_string(),
            title: "Troubleshoot login failures".to_string(),
            description: "What to check first".to_string(),
            date: Local.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
            tags: vec!["sso".to_string()],
            category: Some("Troubleshooting".to_string()),
            thumbnail: None,
            keywords: vec!["saml".to_string()],
        }
    }

    #[test]
    fn test_render_index_lists_cards() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = PortalConfig::default();
        let meta = meta();
        let html = renderer.render_index(&config, &[&meta], "").unwrap();

        assert!(html.contains("Troubleshoot login failures"));
        assert!(html.contains("/article/troubleshoot-login-failures"));
        assert!(html.contains("data-haystack="));
        assert!(html.contains("Jun 01, 2024"));
    }

    #[test]
    fn test_render_index_keeps_query_in_search_box() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = PortalConfig::default();
        let html = renderer.render_index(&config, &[], "login").unwrap();
        assert!(html.contains("value=\"login\""));
        assert!(html.contains("No articles match"));
    }

    #[test]
    fn test_render_article_with_toc() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = PortalConfig::default();
        let body = "# Overview\n\n## Details\n";
        let headings = extract_headings(body);
        let entries = toc::entries(&headings);
        let article = Article {
            meta: meta(),
            body: body.to_string(),
        };

        let html = renderer
            .render_article(&config, &article, "<h1 id=\"overview\">Overview</h1>", &entries)
            .unwrap();

        assert!(html.contains("href=\"#overview\""));
        assert!(html.contains("data-heading=\"overview\""));
        // server-rendered initial state marks the first entry active
        assert!(html.contains("toc-level-1 active"));
        assert!(html.contains("data-lookahead=\"120\""));
        assert!(html.contains("requestAnimationFrame"));
        assert!(html
            .contains("rel=\"canonical\" href=\"http://example.com/article/troubleshoot-login-failures\""));
    }

    #[test]
    fn test_render_article_without_headings_shows_hint() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = PortalConfig::default();
        let article = Article {
            meta: meta(),
            body: "no headings here".to_string(),
        };
        let html = renderer
            .render_article(&config, &article, "<p>no headings here</p>", &[])
            .unwrap();
        assert!(html.contains("to see a table of contents"));
    }

    #[test]
    fn test_render_not_found_names_slug() {
        let renderer = TemplateRenderer::new().unwrap();
        let config = PortalConfig::default();
        let html = renderer.render_not_found(&config, "gone").unwrap();
        assert!(html.contains("Article not found"));
        assert!(html.contains("gone"));
    }
}
