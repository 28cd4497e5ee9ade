use std::{
    fs::DirBuilder,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use color_eyre::{eyre::Context, eyre::ContextCompat, Result};
use tempfile::NamedTempFile;

pub fn create_directory(path_create: &Path) -> Result<()> {
    DirBuilder::new()
        .recursive(true)
        .create(path_create)
        .with_context(|| format!("Could not create directory {path_create:?}"))
}

/// Gets the absolute route for an element in the system given a path P,
/// without the extended path prefix on Windows
pub fn get_project_root_absolute_path(project_root: &Path) -> Result<PathBuf> {
    let canonical = project_root
        .canonicalize()
        .with_context(|| format!("Could not resolve the absolute path of {project_root:?}"))?;

    if cfg!(target_os = "windows") {
        let display = canonical.display().to_string();
        return Ok(PathBuf::from(
            display.strip_prefix(r"\\?\").unwrap_or(&display),
        ));
    }

    Ok(canonical)
}

/// Writes the file at `path` through a staging file created on the same directory,
/// which only replaces the destination once `write` succeeds. If anything fails,
/// the staging file is removed and the destination is left as it was
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let file_name = path
        .file_name()
        .with_context(|| format!("The output path {path:?} does not name a file"))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    create_directory(parent)?;

    let staging = tempfile::Builder::new()
        .prefix(&format!(".{}.", file_name.to_string_lossy()))
        .tempfile_in(parent)
        .with_context(|| format!("Could not create a staging file for {path:?}"))?;

    let staging = write_staging(staging, write)?;
    staging
        .persist(path)
        .with_context(|| format!("Could not move the staging file into {path:?}"))?;

    Ok(())
}

fn write_staging<F>(staging: NamedTempFile, write: F) -> Result<NamedTempFile>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    let mut writer = BufWriter::new(staging);
    write(&mut writer)?;
    writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| "Could not flush the staging file")
}
