//! root file for the crate where the datastructures that holds the TOML
//! parsed data lives.
pub mod build;
pub mod target;

use serde::Deserialize;

use self::{build::BuildAttribute, target::TargetAttribute};

/// ```rust
/// use buildgen::config_file::{
///     BuildgenConfigFile,
///     target::{TargetAttribute, TargetKindAttribute},
/// };
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     [build]
///     builddir = 'out'
///     cppstd = 'c++20'
///
///     [[targets]]
///     name = 'core'
///     kind = 'source_set'
///     sources = [ 'src/color.cpp', 'src/graph.cpp' ]
///     include_dirs = [ 'include' ]
///
///     [[targets]]
///     name = 'app'
///     kind = 'executable'
///     sources = [ 'app/main.cpp' ]
///     dependencies = [ 'core' ]
///     libs = [ 'user32.lib' ]
/// "#;
///
/// let config: BuildgenConfigFile = toml::from_str(CONFIG_FILE_MOCK)
///     .expect("A failure happened parsing the buildgen toml file");
///
/// let build_attribute = config.build.as_ref().expect("The [build] table is declared");
/// assert_eq!(build_attribute.builddir.as_deref(), Some("out"));
/// assert_eq!(build_attribute.cppstd.as_deref(), Some("c++20"));
///
/// let targets: &[TargetAttribute<'_>] = &config.targets;
/// assert_eq!(targets.len(), 2);
///
/// let core = &targets[0];
/// assert_eq!(core.name, "core");
/// assert_eq!(core.kind, TargetKindAttribute::SourceSet);
/// assert!(core.sources.contains(&"src/graph.cpp".into()));
/// assert!(core.libs.is_none());
///
/// let app = &targets[1];
/// assert_eq!(app.name, "app");
/// assert_eq!(app.kind, TargetKindAttribute::Executable);
/// assert_eq!(app.dependencies, vec!["core"]);
/// assert!(app.defines.is_none());
/// ```
/// The [`BuildgenConfigFile`] is the type that holds
/// the whole hierarchy of the build description attributes.
///
/// Targets are declared as an array of tables, so their declaration
/// order is the one in which they appear on the file
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct BuildgenConfigFile<'a> {
    #[serde(borrow)]
    pub build: Option<BuildAttribute<'a>>,
    #[serde(borrow, default)]
    pub targets: Vec<TargetAttribute<'a>>,
}

pub fn buildgen_cfg_from_file(cfg: &'_ str) -> Result<BuildgenConfigFile<'_>, toml::de::Error> {
    <BuildgenConfigFile>::deserialize(&mut toml::Deserializer::new(cfg))
}
