//! Preview command: show the header that would be synthesized for a file

use crate::config::Config;
use crate::error::Result;
use crate::metadata::MetadataSynthesizer;

/// Print the rendered header cell for the given file name
pub fn run_preview(config: &Config, file: &str) -> Result<()> {
    let synthesizer = MetadataSynthesizer::new(&config.header);
    let metadata = synthesizer.synthesize(file);

    tracing::debug!(file, slug = %metadata.slug, "Synthesized metadata");
    println!("{}", metadata.render());

    Ok(())
}
