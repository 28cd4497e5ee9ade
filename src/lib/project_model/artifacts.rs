//! Naming of the files produced by the compile and link steps.
//!
//! Every artifact lives under the build directory, referenced through the
//! `$builddir` variable of the recipe file, so the same names are valid no matter
//! where the build directory is configured

use std::path::Path;

use crate::utils::constants::{
    BUILDDIR_VAR, EXECUTABLE_EXTENSION, OBJECT_EXTENSION, PCH_DIR_EXTENSION, PCH_EXTENSION,
};

use super::target::{PrecompiledHeader, Target};

/// The object file for a source, mirroring its relative path. The name is taken
/// from the file name component, so trailing separators don't leak into it
///
/// ```rust
/// use buildgen::project_model::artifacts::object_file;
///
/// assert_eq!(object_file("src/main.cpp"), "$builddir/src/main.obj");
/// assert_eq!(object_file("vendor/gtest-all.cc"), "$builddir/vendor/gtest-all.obj");
/// ```
pub fn object_file(source: &str) -> String {
    let path = Path::new(source);
    let Some(stem) = path.file_stem() else {
        return format!("{BUILDDIR_VAR}/{source}.{OBJECT_EXTENSION}");
    };
    let stem = stem.to_string_lossy();

    match path
        .parent()
        .map(Path::to_string_lossy)
        .filter(|dir| !dir.is_empty())
    {
        Some(dir) => format!("{BUILDDIR_VAR}/{dir}/{stem}.{OBJECT_EXTENSION}"),
        None => format!("{BUILDDIR_VAR}/{stem}.{OBJECT_EXTENSION}"),
    }
}

/// The object files for the regular compile steps of a target
pub fn object_files(target: &Target<'_>) -> Vec<String> {
    target
        .compiled_sources()
        .into_iter()
        .map(object_file)
        .collect()
}

/// The precompiled header artifact of a target
///
/// ```rust
/// use buildgen::project_model::artifacts::pch_file;
/// use buildgen::project_model::target::PrecompiledHeader;
///
/// let pch = PrecompiledHeader { header: "include/pch.h".into(), source: "src/pch.cpp".into() };
/// assert_eq!(pch_file("app", &pch), "$builddir/app.pch/pch.pch");
/// ```
pub fn pch_file(target_name: &str, pch: &PrecompiledHeader<'_>) -> String {
    format!(
        "{BUILDDIR_VAR}/{target_name}.{PCH_DIR_EXTENSION}/{}.{PCH_EXTENSION}",
        file_stem(&pch.header)
    )
}

/// The object file emitted alongside the precompiled header of a target
pub fn pch_object_file(target_name: &str, pch: &PrecompiledHeader<'_>) -> String {
    format!(
        "{BUILDDIR_VAR}/{target_name}.{PCH_DIR_EXTENSION}/{}.{OBJECT_EXTENSION}",
        file_stem(&pch.source)
    )
}

pub fn executable_file(target_name: &str) -> String {
    format!("{BUILDDIR_VAR}/{target_name}.{EXECUTABLE_EXTENSION}")
}

fn file_stem(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(path)
}
