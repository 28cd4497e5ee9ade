use std::borrow::Cow;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    DEFAULT_BUILD_DIR, DEFAULT_COMPILE_COMMANDS_FILE, DEFAULT_COMPILE_COMMANDS_PROGRAM,
    DEFAULT_CPP_STANDARD, DEFAULT_NINJA_FILE,
};

/// The settings that apply to the whole build, regardless of the target
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BuildSettings<'a> {
    pub builddir: Cow<'a, str>,
    pub cppflags: Vec<Cow<'a, str>>,
    pub cppstd: Cow<'a, str>,
    pub linkflags: Vec<Cow<'a, str>>,
    pub project_root: PathBuf,
    pub dependency_expansion: DependencyExpansion,
}

impl Default for BuildSettings<'_> {
    fn default() -> Self {
        Self {
            builddir: Cow::Borrowed(DEFAULT_BUILD_DIR),
            cppflags: Vec::default(),
            cppstd: Cow::Borrowed(DEFAULT_CPP_STANDARD),
            linkflags: Vec::default(),
            project_root: PathBuf::from("."),
            dependency_expansion: DependencyExpansion::default(),
        }
    }
}

/// How far the dependencies of an executable are followed when its link inputs
/// are collected
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum DependencyExpansion {
    /// Only the objects of the direct dependencies are linked
    Direct,
    /// Every target reachable through the dependency edges is linked
    #[default]
    Transitive,
}

/// Where the generated files are written, and the compiler that the compilation
/// database entries are spelled with
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct OutputSettings<'a> {
    pub ninja_file: PathBuf,
    pub compile_commands_file: PathBuf,
    pub compile_commands_program: Cow<'a, str>,
}

impl Default for OutputSettings<'_> {
    fn default() -> Self {
        Self {
            ninja_file: PathBuf::from(DEFAULT_NINJA_FILE),
            compile_commands_file: PathBuf::from(DEFAULT_COMPILE_COMMANDS_FILE),
            compile_commands_program: Cow::Borrowed(DEFAULT_COMPILE_COMMANDS_PROGRAM),
        }
    }
}
