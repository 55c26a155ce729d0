//! Search the article index from the command line

use anyhow::Result;

use crate::content::search;
use crate::Portal;

/// Run the search filter against the current index and print matches
pub fn run(portal: &Portal, query: &str) -> Result<()> {
    let index = portal.store().index()?;
    let matches = search::filter(query, &index);

    println!("{} match(es) for {:?}:", matches.len(), query.trim());
    for meta in matches {
        println!(
            "  {} - {} [{}]",
            meta.date.format("%Y-%m-%d"),
            meta.title,
            meta.slug
        );
    }

    Ok(())
}
