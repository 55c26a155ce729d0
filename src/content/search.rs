//! Search filter over the article index
//!
//! Pure substring containment, case-insensitive, over the concatenation of
//! title, description, category, tags and keywords. No ranking, no
//! tokenization.

use super::ArticleMeta;

/// Filter the listing by a query string.
///
/// An empty or whitespace-only query returns the full listing unfiltered,
/// in the same order.
pub fn filter<'a>(query: &str, articles: &'a [ArticleMeta]) -> Vec<&'a ArticleMeta> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return articles.iter().collect();
    }

    articles
        .iter()
        .filter(|meta| meta.haystack().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn meta(title: &str, tags: &[&str], keywords: &[&str]) -> ArticleMeta {
        ArticleMeta {
            slug: slug::slugify(title),
            title: title.to_string(),
            description: format!("{} description", title),
            date: Local::now(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            category: Some("General".to_string()),
            thumbnail: None,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn listing() -> Vec<ArticleMeta> {
        vec![
            meta("Troubleshoot login failure", &["sso"], &["saml"]),
            meta("Provisioning delays", &["scim"], &["sync"]),
            meta("Billing exports", &[], &["invoice"]),
        ]
    }

    #[test]
    fn test_empty_query_returns_everything_in_order() {
        let articles = listing();
        for query in ["", "   ", "\t"] {
            let result = filter(query, &articles);
            assert_eq!(result.len(), articles.len());
            let titles: Vec<&str> = result.iter().map(|m| m.title.as_str()).collect();
            assert_eq!(
                titles,
                vec![
                    "Troubleshoot login failure",
                    "Provisioning delays",
                    "Billing exports"
                ]
            );
        }
    }

    #[test]
    fn test_title_substring_case_insensitive() {
        let articles = listing();
        let result = filter("LOGIN", &articles);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Troubleshoot login failure");
    }

    #[test]
    fn test_matches_tags_and_keywords() {
        let articles = listing();
        assert_eq!(filter("scim", &articles).len(), 1);
        assert_eq!(filter("invoice", &articles).len(), 1);
    }

    #[test]
    fn test_no_match_is_empty() {
        let articles = listing();
        assert!(filter("kubernetes", &articles).is_empty());
    }
}
