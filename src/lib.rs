//! supportal: a markdown knowledge base and support portal
//!
//! This crate turns a flat directory of front-mattered markdown files into a
//! searchable article listing plus per-article pages with a generated table
//! of contents. It can serve the portal live or export it as static files.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod markdown;
pub mod server;
pub mod templates;
pub mod toc;

use anyhow::Result;
use std::path::Path;

/// The main portal application
#[derive(Clone)]
pub struct Portal {
    /// Site configuration
    pub config: config::PortalConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content directory (the article store)
    pub content_dir: std::path::PathBuf,
    /// Public (output) directory for static export
    pub public_dir: std::path::PathBuf,
    /// Static assets directory (thumbnails, images)
    pub static_dir: std::path::PathBuf,
}

impl Portal {
    /// Create a new portal instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::PortalConfig::load(&config_path)?
        } else {
            config::PortalConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let static_dir = base_dir.join(&config.static_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            static_dir,
        })
    }

    /// Open the content store
    pub fn store(&self) -> content::ContentStore {
        content::ContentStore::new(&self.content_dir)
    }

    /// Generate the static portal
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
