//! The back-ends that turn a [`crate::project_model::Build`] into the documents
//! consumed by the external tools

pub mod compile_commands;
pub mod ninja;

use std::io::Write;
use std::path::Path;

use color_eyre::{eyre::Context, Result};

use crate::utils;

/// A back-end that writes one output document for a whole build.
///
/// Generators only read the build they're created for, so they may share it
/// with other generators running on other threads
pub trait Generator: Sync {
    fn write(&self, output: &mut dyn Write) -> Result<()>;
}

/// Writes the document of `generator` to `path`. The file is only created, or
/// replaced, when the generation succeeds
pub fn generate_to_file(generator: &dyn Generator, path: &Path) -> Result<()> {
    log::debug!("Generating: {path:?}");

    utils::fs::write_atomically(path, |output| generator.write(output))
        .with_context(|| format!("Could not generate {path:?}"))?;

    log::info!("Generated: {path:?}");
    Ok(())
}
