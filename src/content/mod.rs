//! Content module - the article store and everything read out of it

mod article;
mod frontmatter;
pub mod search;
mod store;

pub use article::{Article, ArticleMeta};
pub use frontmatter::FrontMatter;
pub use store::ContentStore;
