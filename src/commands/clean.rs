//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Portal;

/// Clean the public directory
pub fn run(portal: &Portal) -> Result<()> {
    if portal.public_dir.exists() {
        fs::remove_dir_all(&portal.public_dir)?;
        tracing::info!("Deleted: {:?}", portal.public_dir);
    }

    Ok(())
}
