//! Type for holds the Targets build details

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// [`TargetAttribute`] - The type for holding the build details of every
/// user defined target
/// * `name` - The unique identifier of the target, which other targets name on
/// their `dependencies`
/// * `kind` - Whether the target only compiles its sources (`source_set`) or
/// also links them into a binary (`executable`)
/// * `sources` - The sources to compile, relative to the project root. Entries
/// with glob wildcards are expanded
/// * `precompiled_header` / `precompiled_source` - The header to precompile and
/// the source that includes it. Both or none of them must be declared
/// * `cppflags`, `defines`, `include_dirs` - Compile settings of the target
/// * `dependencies` - The names of the targets whose objects are linked along
/// with the ones of this target
/// * `linkflags`, `libs` - Link settings. Only allowed on executables
///
/// ```rust
/// use buildgen::config_file::target::{TargetAttribute, TargetKindAttribute};
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     name = 'procdraw'
///     kind = 'executable'
///     sources = [ 'src/*.cpp' ]
///     precompiled_header = 'pch.h'
///     precompiled_source = 'src/pch.cpp'
///     defines = [ 'UNICODE', '_UNICODE' ]
///     dependencies = [ 'lua', 'glad' ]
///     libs = [ 'opengl32.lib' ]
/// "#;
///
/// let config: TargetAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the buildgen toml file");
///
/// assert_eq!(config.name, "procdraw");
/// assert_eq!(config.kind, TargetKindAttribute::Executable);
/// assert_eq!(config.sources, vec!["src/*.cpp"]);
/// assert_eq!(config.precompiled_header.as_deref(), Some("pch.h"));
/// assert_eq!(config.precompiled_source.as_deref(), Some("src/pch.cpp"));
/// assert_eq!(config.defines, Some(vec!["UNICODE".into(), "_UNICODE".into()]));
/// assert_eq!(config.dependencies, vec!["lua", "glad"]);
/// assert_eq!(config.libs, Some(vec!["opengl32.lib".into()]));
/// assert!(config.cppflags.is_none());
/// assert!(config.include_dirs.is_none());
/// assert!(config.linkflags.is_none());
/// ```
#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TargetAttribute<'a> {
    #[serde(borrow)]
    pub name: Cow<'a, str>,
    pub kind: TargetKindAttribute,
    #[serde(borrow, default)]
    pub sources: Vec<Cow<'a, str>>,
    #[serde(borrow)]
    pub precompiled_header: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub precompiled_source: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub cppflags: Option<Vec<Cow<'a, str>>>,
    #[serde(borrow)]
    pub defines: Option<Vec<Cow<'a, str>>>,
    #[serde(borrow)]
    pub include_dirs: Option<Vec<Cow<'a, str>>>,
    #[serde(borrow, default)]
    pub dependencies: Vec<Cow<'a, str>>,
    #[serde(borrow)]
    pub linkflags: Option<Vec<Cow<'a, str>>>,
    #[serde(borrow)]
    pub libs: Option<Vec<Cow<'a, str>>>,
}

/// The kind of a declared target
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Copy, Clone)]
pub enum TargetKindAttribute {
    #[serde(alias = "source_set", alias = "sourceset", alias = "source-set")]
    SourceSet,
    #[serde(alias = "executable", alias = "exe")]
    Executable,
}
