//! Create a new article

use anyhow::Result;
use std::fs;

use crate::Portal;

/// Create a new article file in the content directory
pub fn run(portal: &Portal, title: &str) -> Result<()> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Title produces an empty slug: {:?}", title);
    }

    fs::create_dir_all(&portal.content_dir)?;
    let file_path = portal.content_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        r#"---
title: {}
description: ""
date: {}
tags: []
category:
keywords: []
---

# {}
"#,
        title,
        now.format("%Y-%m-%d %H:%M:%S"),
        title
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_article_appears_in_index() {
        let tmp = tempfile::tempdir().unwrap();
        let portal = Portal::new(tmp.path()).unwrap();
        run(&portal, "Rotate API keys safely").unwrap();

        let index = portal.store().index().unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].slug, "rotate-api-keys-safely");
        assert_eq!(index[0].title, "Rotate API keys safely");
    }

    #[test]
    fn test_new_refuses_duplicate() {
        let tmp = tempfile::tempdir().unwrap();
        let portal = Portal::new(tmp.path()).unwrap();
        run(&portal, "Duplicate").unwrap();
        assert!(run(&portal, "Duplicate").is_err());
    }
}
