//! The declared build units and the properties used to declare them

use std::borrow::{Borrow, Cow};
use std::fmt;

/// Strong type for storing the target unique identifier, which instead of being
/// composite within the [`Target`] struct, is externalized in this wrapped type, so
/// we can use a strong type as the key of the targets index of a [`super::Build`]
#[derive(Debug, PartialEq, Eq, Default, Hash, Clone)]
pub struct TargetIdentifier<'a>(pub Cow<'a, str>);

impl<'a> From<&'a str> for TargetIdentifier<'a> {
    fn from(value: &'a str) -> Self {
        Self(Cow::Borrowed(value))
    }
}

impl<'a> From<Cow<'a, str>> for TargetIdentifier<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Self(value)
    }
}

impl<'a> TargetIdentifier<'a> {
    pub fn name(&self) -> &str {
        self.0.as_ref()
    }
}

impl Borrow<str> for TargetIdentifier<'_> {
    fn borrow(&self) -> &str {
        self.name()
    }
}

impl fmt::Display for TargetIdentifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One compilable (and maybe linkable) unit of the build.
///
/// Targets are immutable once they are added to a [`super::Build`]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Target<'a> {
    pub kind: TargetKind<'a>,
    pub sources: Vec<Cow<'a, str>>,
    pub precompiled_header: Option<PrecompiledHeader<'a>>,
    pub compile_flags: Option<Vec<Cow<'a, str>>>,
    pub defines: Option<Vec<Cow<'a, str>>>,
    pub include_dirs: Option<Vec<Cow<'a, str>>>,
    pub dependencies: Vec<TargetIdentifier<'a>>,
}

impl<'a> Target<'a> {
    pub fn is_executable(&self) -> bool {
        matches!(self.kind, TargetKind::Executable(_))
    }

    /// The declared sources that get their own compile step. The precompiled source
    /// is left out, since it's only compiled through the precompiled header step
    pub fn compiled_sources(&self) -> Vec<&str> {
        let pch_source: Option<&str> = self
            .precompiled_header
            .as_ref()
            .map(|pch| &*pch.source);

        self.sources
            .iter()
            .map(|source| &**source)
            .filter(|source| Some(*source) != pch_source)
            .collect()
    }

    /// The defines for this target, or an empty slice if they aren't configured
    pub fn defines(&self) -> &[Cow<'a, str>] {
        self.defines.as_deref().unwrap_or_default()
    }

    /// The include directories for this target, or an empty slice if they aren't configured
    pub fn include_dirs(&self) -> &[Cow<'a, str>] {
        self.include_dirs.as_deref().unwrap_or_default()
    }
}

/// The different types of final products. Only the executables carry the
/// attributes that are meaningful for a link step
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TargetKind<'a> {
    SourceSet,
    Executable(LinkSettings<'a>),
}

impl fmt::Display for TargetKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::SourceSet => write!(f, "source set"),
            TargetKind::Executable(_) => write!(f, "executable"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct LinkSettings<'a> {
    pub link_flags: Option<Vec<Cow<'a, str>>>,
    pub libs: Option<Vec<Cow<'a, str>>>,
}

impl<'a> LinkSettings<'a> {
    pub fn libs(&self) -> &[Cow<'a, str>] {
        self.libs.as_deref().unwrap_or_default()
    }
}

/// The header shared by the sources of a target and the source file that gets
/// compiled once to produce its precompiled form
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct PrecompiledHeader<'a> {
    pub header: Cow<'a, str>,
    pub source: Cow<'a, str>,
}

/// The user-facing description of a target, before being validated and
/// added to a [`super::Build`].
///
/// ```rust
/// use buildgen::project_model::target::TargetProperties;
///
/// let properties = TargetProperties::default()
///     .sources(["src/main.cpp", "src/app.cpp"])
///     .precompiled_header("pch.h")
///     .precompiled_source("src/pch.cpp")
///     .defines(["UNICODE"])
///     .dependencies(["core"]);
///
/// assert_eq!(properties.sources.len(), 2);
/// assert_eq!(properties.precompiled_header.as_deref(), Some("pch.h"));
/// assert!(properties.include_dirs.is_none());
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct TargetProperties<'a> {
    pub sources: Vec<Cow<'a, str>>,
    pub precompiled_header: Option<Cow<'a, str>>,
    pub precompiled_source: Option<Cow<'a, str>>,
    pub compile_flags: Option<Vec<Cow<'a, str>>>,
    pub defines: Option<Vec<Cow<'a, str>>>,
    pub include_dirs: Option<Vec<Cow<'a, str>>>,
    pub link_flags: Option<Vec<Cow<'a, str>>>,
    pub libs: Option<Vec<Cow<'a, str>>>,
    pub dependencies: Vec<Cow<'a, str>>,
}

fn collect_cows<'a, I, S>(values: I) -> Vec<Cow<'a, str>>
where
    I: IntoIterator<Item = S>,
    S: Into<Cow<'a, str>>,
{
    values.into_iter().map(Into::into).collect()
}

impl<'a> TargetProperties<'a> {
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        self.sources = collect_cows(sources);
        self
    }

    pub fn precompiled_header(mut self, header: impl Into<Cow<'a, str>>) -> Self {
        self.precompiled_header = Some(header.into());
        self
    }

    pub fn precompiled_source(mut self, source: impl Into<Cow<'a, str>>) -> Self {
        self.precompiled_source = Some(source.into());
        self
    }

    pub fn compile_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        self.compile_flags = Some(collect_cows(flags));
        self
    }

    pub fn defines<I, S>(mut self, defines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        self.defines = Some(collect_cows(defines));
        self
    }

    pub fn include_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        self.include_dirs = Some(collect_cows(dirs));
        self
    }

    pub fn link_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        self.link_flags = Some(collect_cows(flags));
        self
    }

    pub fn libs<I, S>(mut self, libs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        self.libs = Some(collect_cows(libs));
        self
    }

    pub fn dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'a, str>>,
    {
        self.dependencies = collect_cows(dependencies);
        self
    }
}
