//! Generate the static portal

use anyhow::Result;

use crate::generator::Generator;
use crate::Portal;

/// Generate the static portal into the public directory
pub fn run(portal: &Portal) -> Result<()> {
    let start = std::time::Instant::now();

    let generator = Generator::new(portal)?;
    let written = generator.generate()?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} article page(s) in {:.2}s",
        written,
        duration.as_secs_f64()
    );

    Ok(())
}
