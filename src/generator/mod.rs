//! Static export - writes the whole portal into the public directory
//!
//! The exported tree mirrors the server's routing surface: the listing at
//! `index.html`, one directory per article, the search index JSON, the
//! stylesheet, and the user's static assets.

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::ArticleMeta;
use crate::markdown::{extract_headings, MarkdownRenderer};
use crate::templates::{TemplateRenderer, STYLESHEET};
use crate::toc;
use crate::Portal;

/// Static portal generator
pub struct Generator<'a> {
    portal: &'a Portal,
    templates: TemplateRenderer,
    markdown: MarkdownRenderer,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(portal: &'a Portal) -> Result<Self> {
        Ok(Self {
            portal,
            templates: TemplateRenderer::new()?,
            markdown: MarkdownRenderer::with_options(
                &portal.config.highlight.theme,
                portal.config.highlight.enable,
            ),
        })
    }

    /// Generate the entire portal. Returns the number of article pages written.
    pub fn generate(&self) -> Result<usize> {
        let public_dir = &self.portal.public_dir;
        fs::create_dir_all(public_dir)?;

        let index = self.portal.store().index()?;

        // Listing page (unfiltered; the embedded script filters live)
        let refs: Vec<&ArticleMeta> = index.iter().collect();
        let listing = self
            .templates
            .render_index(&self.portal.config, &refs, "")?;
        fs::write(public_dir.join("index.html"), listing)?;

        // Search index
        let json = serde_json::to_string_pretty(&index)?;
        fs::write(public_dir.join("search.json"), json)?;

        // Stylesheet
        fs::create_dir_all(public_dir.join("assets"))?;
        fs::write(public_dir.join("assets/style.css"), STYLESHEET)?;

        // Not-found page for hosts that serve 404.html
        let not_found = self.templates.render_not_found(&self.portal.config, "")?;
        fs::write(public_dir.join("404.html"), not_found)?;

        // Article pages
        let mut written = 0;
        for meta in &index {
            match self.portal.store().find(&meta.slug)? {
                Some(article) => {
                    let content = self.markdown.render(&article.body)?;
                    let headings = extract_headings(&article.body);
                    let entries = toc::entries(&headings);
                    let html = self.templates.render_article(
                        &self.portal.config,
                        &article,
                        &content,
                        &entries,
                    )?;

                    let dir = public_dir.join("article").join(&meta.slug);
                    fs::create_dir_all(&dir)?;
                    fs::write(dir.join("index.html"), html)?;
                    written += 1;
                }
                None => {
                    tracing::warn!("Article disappeared during generation: {}", meta.slug);
                }
            }
        }

        // User assets (thumbnails, images)
        if self.portal.static_dir.exists() {
            copy_dir(&self.portal.static_dir, &public_dir.join("static"))?;
        }

        Ok(written)
    }
}

/// Recursively copy a directory
fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    for entry in WalkDir::new(from).into_iter().filter_map(|e| e.ok()) {
        let rel = entry.path().strip_prefix(from)?;
        let target = to.join(rel);
        if entry.path().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
