//! Initialize a new portal site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default configuration written by init
const DEFAULT_CONFIG: &str = r#"# Portal configuration

# Site
title: Support Portal
description: Search how-tos, troubleshooting guides, and runbooks
language: en

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public
static_dir: static

# Display
date_format: "%b %d, %Y"

# Code highlighting
highlight:
  enable: true
  theme: base16-ocean.dark
"#;

/// Sample article so a fresh site renders something useful
const SAMPLE_ARTICLE: &str = r#"---
title: Welcome to your support portal
description: How articles, search, and the table of contents fit together
date: 2024-01-01
tags:
  - getting-started
category: General
keywords:
  - onboarding
---

# How this portal works

Drop markdown files into the `content/` directory. Each file becomes an
article; the filename becomes its URL slug.

## Front matter

Articles start with a YAML block carrying the title, description, date,
tags, category, and search keywords. Every field is optional.

## Headings and navigation

Level 1-3 headings show up in the table of contents on the right, and the
active section is highlighted while you scroll.

### Code blocks

```sh
# headings inside fences are ignored
supportal serve
```

Use the copy button in the corner of any code block.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content"))?;
    fs::create_dir_all(target_dir.join("static"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Already initialized: {:?} exists", config_path);
    }
    fs::write(config_path, DEFAULT_CONFIG)?;
    fs::write(
        target_dir.join("content/welcome-to-your-support-portal.md"),
        SAMPLE_ARTICLE,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Portal;

    #[test]
    fn test_init_creates_loadable_site() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();

        let portal = Portal::new(tmp.path()).unwrap();
        let index = portal.store().index().unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index[0].slug, "welcome-to-your-support-portal");
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let tmp = tempfile::tempdir().unwrap();
        init_site(tmp.path()).unwrap();
        assert!(init_site(tmp.path()).is_err());
    }
}
