//! Article models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Metadata for one article in the store.
///
/// This is everything the listing and the search index need; the markdown
/// body is deliberately not part of it and is only loaded when a single
/// article is fetched by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleMeta {
    /// Identifier derived from the filename, unique within the store
    pub slug: String,

    /// Article title
    pub title: String,

    /// Short description shown on cards and under the article title
    pub description: String,

    /// Publication date, used for sort ordering and display
    pub date: DateTime<Local>,

    /// Display tags (order matters)
    pub tags: Vec<String>,

    /// Category label
    pub category: Option<String>,

    /// Thumbnail image path
    pub thumbnail: Option<String>,

    /// Search-only keywords, never displayed
    pub keywords: Vec<String>,
}

/// A full article: metadata plus the raw markdown body
#[derive(Debug, Clone)]
pub struct Article {
    pub meta: ArticleMeta,
    /// Raw markdown body
    pub body: String,
}

impl ArticleMeta {
    /// Concatenated searchable text, case-normalized.
    /// Covers title, description, category, tags and keywords.
    pub fn haystack(&self) -> String {
        let mut fields: Vec<&str> = vec![&self.title, &self.description];
        if let Some(category) = &self.category {
            fields.push(category);
        }
        fields.extend(self.tags.iter().map(String::as_str));
        fields.extend(self.keywords.iter().map(String::as_str));
        fields.join(" ").to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> ArticleMeta {
        ArticleMeta {
            slug: "reset-mfa".to_string(),
            title: "Reset MFA".to_string(),
            description: "Clearing a stuck authenticator".to_string(),
            date: Local::now(),
            tags: vec!["MFA".to_string()],
            category: Some("Account".to_string()),
            thumbnail: None,
            keywords: vec!["totp".to_string()],
        }
    }

    #[test]
    fn test_haystack_covers_all_search_fields() {
        let haystack = meta().haystack();
        assert!(haystack.contains("reset mfa"));
        assert!(haystack.contains("stuck authenticator"));
        assert!(haystack.contains("account"));
        assert!(haystack.contains("mfa"));
        assert!(haystack.contains("totp"));
    }
}
