//! The in-memory representation of a build description.
//!
//! A [`Build`] is populated once, appending targets in declaration order, and
//! after that it's only read by the generators. There's no way of removing or
//! mutating a target once it's added, so the generators are free to walk the same
//! [`Build`] from different threads

pub mod artifacts;
pub mod build;
pub mod error;
pub mod target;

use indexmap::IndexMap;

use self::{
    build::{BuildSettings, OutputSettings},
    error::BuildError,
    target::{LinkSettings, PrecompiledHeader, Target, TargetIdentifier, TargetKind, TargetProperties},
};
use std::borrow::Cow;

/// Everything that a run of the generators needs, mapped from the
/// build description file
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct BuildgenModel<'a> {
    pub build: Build<'a>,
    pub outputs: OutputSettings<'a>,
}

#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Build<'a> {
    pub settings: BuildSettings<'a>,
    targets: IndexMap<TargetIdentifier<'a>, Target<'a>>,
}

impl<'a> Build<'a> {
    pub fn new(settings: BuildSettings<'a>) -> Self {
        Self {
            settings,
            targets: IndexMap::new(),
        }
    }

    /// Declares a new target that only produces object files
    pub fn add_source_set(
        &mut self,
        name: impl Into<Cow<'a, str>>,
        properties: TargetProperties<'a>,
    ) -> Result<(), BuildError> {
        let name = name.into();
        if properties.libs.is_some() {
            return Err(BuildError::invalid_target(
                &name,
                "libs",
                "only executables are linked against libraries",
            ));
        }
        if properties.link_flags.is_some() {
            return Err(BuildError::invalid_target(
                &name,
                "link_flags",
                "only executables have a link step",
            ));
        }

        self.add_target(name, TargetKind::SourceSet, properties)
    }

    /// Declares a new target that produces object files and links them, along
    /// with the ones of its dependencies, into a binary
    pub fn add_executable(
        &mut self,
        name: impl Into<Cow<'a, str>>,
        mut properties: TargetProperties<'a>,
    ) -> Result<(), BuildError> {
        let link_settings = LinkSettings {
            link_flags: properties.link_flags.take(),
            libs: properties.libs.take(),
        };

        self.add_target(
            name.into(),
            TargetKind::Executable(link_settings),
            properties,
        )
    }

    fn add_target(
        &mut self,
        name: Cow<'a, str>,
        kind: TargetKind<'a>,
        properties: TargetProperties<'a>,
    ) -> Result<(), BuildError> {
        if name.trim().is_empty() {
            return Err(BuildError::invalid_target(
                &name,
                "name",
                "target names can't be empty",
            ));
        }
        if self.targets.contains_key(&*name) {
            return Err(BuildError::DuplicateName {
                name: name.into_owned(),
            });
        }

        let precompiled_header = match (properties.precompiled_header, properties.precompiled_source)
        {
            (Some(header), Some(source)) => Some(PrecompiledHeader { header, source }),
            (None, None) => None,
            (Some(_), None) => {
                return Err(BuildError::invalid_target(
                    &name,
                    "precompiled_source",
                    "a precompiled header needs the source file that precompiles it",
                ))
            }
            (None, Some(_)) => {
                return Err(BuildError::invalid_target(
                    &name,
                    "precompiled_header",
                    "a precompiled source needs the header that it precompiles",
                ))
            }
        };

        if properties.dependencies.iter().any(|dep| dep == &name) {
            return Err(BuildError::invalid_target(
                &name,
                "dependencies",
                "a target can't depend on itself",
            ));
        }

        log::debug!("Adding the {kind} target: {name}");

        let target = Target {
            kind,
            sources: properties.sources,
            precompiled_header,
            compile_flags: properties.compile_flags,
            defines: properties.defines,
            include_dirs: properties.include_dirs,
            dependencies: properties
                .dependencies
                .into_iter()
                .map(TargetIdentifier::from)
                .collect(),
        };
        self.targets.insert(TargetIdentifier(name), target);

        Ok(())
    }

    pub fn get_target(&self, name: &str) -> Result<&Target<'a>, BuildError> {
        self.targets
            .get(name)
            .ok_or_else(|| BuildError::not_found(name, None))
    }

    /// The declared targets, in declaration order
    pub fn targets(&self) -> impl Iterator<Item = (&TargetIdentifier<'a>, &Target<'a>)> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Position of a target in the declaration order
    pub(crate) fn index_of(&self, name: &str, referenced_by: &str) -> Result<usize, BuildError> {
        self.targets
            .get_index_of(name)
            .ok_or_else(|| BuildError::not_found(name, Some(referenced_by)))
    }

    pub(crate) fn get_index(&self, index: usize) -> Option<(&TargetIdentifier<'a>, &Target<'a>)> {
        self.targets.get_index(index)
    }

    /// Checks the relations between the declared targets, which can't be done while
    /// they are being declared since the dependencies are allowed to be forward
    /// references.
    ///
    /// Every dependency must name a declared target, and the dependency graph
    /// must be acyclic
    pub fn validate(&self) -> Result<(), BuildError> {
        let mut marks = vec![Mark::Unvisited; self.targets.len()];
        let mut path = Vec::new();

        for index in 0..self.targets.len() {
            self.visit(index, &mut marks, &mut path)?;
        }

        Ok(())
    }

    fn visit(
        &self,
        index: usize,
        marks: &mut [Mark],
        path: &mut Vec<usize>,
    ) -> Result<(), BuildError> {
        match marks[index] {
            Mark::Done => return Ok(()),
            Mark::InProgress => return Err(self.cycle_error(index, path)),
            Mark::Unvisited => {}
        }

        marks[index] = Mark::InProgress;
        path.push(index);

        let Some((identifier, target)) = self.targets.get_index(index) else {
            return Ok(());
        };
        for dependency in &target.dependencies {
            let dep_index = self.index_of(dependency.name(), identifier.name())?;
            self.visit(dep_index, marks, path)?;
        }

        path.pop();
        marks[index] = Mark::Done;

        Ok(())
    }

    pub(crate) fn cycle_error(&self, repeated: usize, path: &[usize]) -> BuildError {
        let start = path.iter().position(|i| *i == repeated).unwrap_or_default();
        let cycle = path[start..]
            .iter()
            .chain(std::iter::once(&repeated))
            .filter_map(|i| self.targets.get_index(*i))
            .map(|(identifier, _)| identifier.name())
            .collect::<Vec<_>>()
            .join(" -> ");

        BuildError::CyclicDependency { cycle }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}
