//! List portal content

use anyhow::Result;

use crate::Portal;

/// List articles, tags or categories
pub fn run(portal: &Portal, content_type: &str) -> Result<()> {
    let index = portal.store().index()?;

    match content_type {
        "article" | "articles" => {
            println!("Articles ({}):", index.len());
            for meta in index {
                println!(
                    "  {} - {} [{}]",
                    meta.date.format("%Y-%m-%d"),
                    meta.title,
                    meta.slug
                );
            }
        }
        "tag" | "tags" => {
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for meta in &index {
                for tag in &meta.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "category" | "categories" => {
            let mut categories: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for meta in &index {
                if let Some(cat) = &meta.category {
                    *categories.entry(cat.clone()).or_insert(0) += 1;
                }
            }
            println!("Categories ({}):", categories.len());
            let mut categories: Vec<_> = categories.into_iter().collect();
            categories.sort_by(|a, b| b.1.cmp(&a.1));
            for (cat, count) in categories {
                println!("  {} ({})", cat, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: article, tag, category",
                content_type
            );
        }
    }

    Ok(())
}
