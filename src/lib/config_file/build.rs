//! file that contains the configuration options that apply
//! to the whole build, regardless of the target
use std::borrow::Cow;

use serde::*;

use crate::project_model::build::DependencyExpansion;

/// [`BuildAttribute`] - Stores the global configuration of the build
///
/// * `builddir` - The directory, relative to the place where the recipe is
/// executed, where every artifact is dumped. Defaults to `build`
///
/// * `cppflags` - Compiler flags applied to every compile step, unless a target
/// overrides them with its own
///
/// * `cppstd` - The C++ language standard. Defaults to `c++17`
///
/// * `linkflags` - Linker flags applied to every link step, unless an executable
/// overrides them with its own
///
/// * `project_root` - The directory, relative to the root, which the sources are
/// declared against and which the compilation database entries point to
///
/// * `dependency_expansion` - Whether the link step of an executable receives the
/// objects of its direct dependencies only (`direct`) or of every reachable
/// dependency (`transitive`, the default)
///
/// * `compile_commands_program` - The compiler named on the compilation database
/// entries. Defaults to `clang++`
///
/// * `ninja_file` / `compile_commands_file` - Names of the generated files,
/// relative to the root
///
/// ```rust
/// use buildgen::config_file::build::BuildAttribute;
/// use buildgen::project_model::build::DependencyExpansion;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[build]
///     builddir = 'out'
///     cppflags = [ '/nologo', '/EHsc' ]
///     dependency_expansion = 'direct'
///"#;
///
/// let config: BuildAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the buildgen toml file");
///
/// assert_eq!(config.builddir.as_deref(), Some("out"));
/// assert_eq!(config.cppflags, Some(vec!["/nologo".into(), "/EHsc".into()]));
/// assert_eq!(config.dependency_expansion, Some(DependencyExpansion::Direct));
/// assert!(config.cppstd.is_none());
/// assert!(config.ninja_file.is_none());
/// ```
#[derive(Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BuildAttribute<'a> {
    #[serde(borrow)]
    pub builddir: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub cppflags: Option<Vec<Cow<'a, str>>>,
    #[serde(borrow)]
    pub cppstd: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub linkflags: Option<Vec<Cow<'a, str>>>,
    #[serde(borrow)]
    pub project_root: Option<Cow<'a, str>>,
    pub dependency_expansion: Option<DependencyExpansion>,
    #[serde(borrow)]
    pub compile_commands_program: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub ninja_file: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub compile_commands_file: Option<Cow<'a, str>>,
}
