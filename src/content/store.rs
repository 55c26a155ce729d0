//! Content store - reads articles from the content directory
//!
//! The store is the source of truth: every call re-reads the filesystem, so
//! a file dropped into the directory shows up on the next request and a
//! deleted file disappears. A missing directory is an empty store, not an
//! error.

use anyhow::Result;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Article, ArticleMeta, FrontMatter};

/// Extensions recognized as article files, in lookup preference order
/// (the richer extension wins when both exist for one slug).
const EXTENSIONS: [&str; 2] = ["mdx", "md"];

/// Reads articles from a flat content directory
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    /// Create a store over the given directory
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Load the metadata index: every article in the store, bodies excluded,
    /// sorted by publication date descending. Ties keep enumeration order.
    pub fn index(&self) -> Result<Vec<ArticleMeta>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut articles = Vec::new();

        for entry in WalkDir::new(&self.dir)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_article_file(path) {
                match self.load_meta(path) {
                    Ok(meta) => articles.push(meta),
                    Err(e) => {
                        tracing::warn!("Failed to load article {:?}: {}", path, e);
                    }
                }
            }
        }

        // Sort by date descending (newest first); the sort is stable so
        // equal dates keep their enumeration order
        articles.sort_by(|a, b| b.date.cmp(&a.date));

        Ok(articles)
    }

    /// Look up a single article by slug, loading its body.
    ///
    /// The candidate slug is sanitized (path separators stripped, trimmed)
    /// before probing. A miss is `Ok(None)`, never an error.
    pub fn find(&self, slug: &str) -> Result<Option<Article>> {
        let Some(slug) = sanitize_slug(slug) else {
            return Ok(None);
        };

        for ext in EXTENSIONS {
            let path = self.dir.join(format!("{}.{}", slug, ext));
            if path.exists() {
                return Ok(Some(self.load_article(&path, &slug)?));
            }
        }

        tracing::warn!("No article file for slug: {}", slug);
        Ok(None)
    }

    /// Load metadata only (the body is parsed off and dropped)
    fn load_meta(&self, path: &Path) -> Result<ArticleMeta> {
        let content = fs::read_to_string(path)?;
        let (fm, _body) = FrontMatter::parse(&content);
        Ok(meta_from_parts(path, fm))
    }

    fn load_article(&self, path: &Path, slug: &str) -> Result<Article> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content);
        let mut meta = meta_from_parts(path, fm);
        meta.slug = slug.to_string();
        Ok(Article {
            meta,
            body: body.to_string(),
        })
    }
}

/// Build article metadata from a file path and its front-matter,
/// substituting the documented defaults for absent fields
fn meta_from_parts(path: &Path, fm: FrontMatter) -> ArticleMeta {
    let slug = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string();

    let title = fm.title.clone().unwrap_or_else(|| slug.clone());
    let date = fm.parse_date().unwrap_or_else(Local::now);

    ArticleMeta {
        slug,
        title,
        description: fm.description.unwrap_or_default(),
        date,
        tags: fm.tags,
        category: fm.category,
        thumbnail: fm.thumbnail,
        keywords: fm.keywords,
    }
}

/// Strip path separators and surrounding whitespace from a candidate slug.
/// Returns None when nothing remains.
fn sanitize_slug(slug: &str) -> Option<String> {
    let cleaned: String = slug.chars().filter(|c| *c != '/' && *c != '\\').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Check if a file is an article file
fn is_article_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| EXTENSIONS.contains(&e))
        .unwrap_or(false)
}
