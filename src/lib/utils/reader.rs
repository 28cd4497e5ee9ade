use std::borrow::Cow;
use std::path::{Path, PathBuf};

use color_eyre::{eyre::Context, Result};

use crate::{
    config_file::{
        build::BuildAttribute,
        target::{TargetAttribute, TargetKindAttribute},
        BuildgenConfigFile,
    },
    project_model::{
        build::{BuildSettings, OutputSettings},
        target::TargetProperties,
        Build, BuildgenModel,
    },
    utils::constants::{
        DEFAULT_BUILD_DIR, DEFAULT_COMPILE_COMMANDS_FILE, DEFAULT_COMPILE_COMMANDS_PROGRAM,
        DEFAULT_CPP_STANDARD, DEFAULT_NINJA_FILE,
    },
};

/// Maps the parsed build description into the model consumed by the generators.
///
/// The targets are declared on the [`Build`] in the same order that they appear
/// on the file, so any declaration error is reported for the first offending target
pub fn build_model<'a>(
    config: BuildgenConfigFile<'a>,
    absolute_project_root: &Path,
) -> Result<BuildgenModel<'a>> {
    let (settings, outputs) = assemble_build_settings(config.build, absolute_project_root);
    let mut build = Build::new(settings);

    for target in config.targets {
        assemble_target(&mut build, target)?;
    }

    Ok(BuildgenModel { build, outputs })
}

fn assemble_build_settings<'a>(
    config: Option<BuildAttribute<'a>>,
    root: &Path,
) -> (BuildSettings<'a>, OutputSettings<'a>) {
    let config = config.unwrap_or_default();

    let project_root = config
        .project_root
        .as_deref()
        .map(|dir| dir.strip_prefix("./").unwrap_or(dir))
        .filter(|dir| !dir.is_empty() && *dir != ".")
        .map_or_else(|| root.to_path_buf(), |dir| root.join(dir));

    let settings = BuildSettings {
        builddir: config
            .builddir
            .unwrap_or(Cow::Borrowed(DEFAULT_BUILD_DIR)),
        cppflags: config.cppflags.unwrap_or_default(),
        cppstd: config
            .cppstd
            .unwrap_or(Cow::Borrowed(DEFAULT_CPP_STANDARD)),
        linkflags: config.linkflags.unwrap_or_default(),
        project_root,
        dependency_expansion: config.dependency_expansion.unwrap_or_default(),
    };

    let outputs = OutputSettings {
        ninja_file: output_path(root, config.ninja_file.as_deref(), DEFAULT_NINJA_FILE),
        compile_commands_file: output_path(
            root,
            config.compile_commands_file.as_deref(),
            DEFAULT_COMPILE_COMMANDS_FILE,
        ),
        compile_commands_program: config
            .compile_commands_program
            .unwrap_or(Cow::Borrowed(DEFAULT_COMPILE_COMMANDS_PROGRAM)),
    };

    (settings, outputs)
}

fn output_path(root: &Path, configured: Option<&str>, default: &str) -> PathBuf {
    root.join(configured.unwrap_or(default))
}

fn assemble_target<'a>(build: &mut Build<'a>, config: TargetAttribute<'a>) -> Result<()> {
    let sources = expand_sources(config.sources, &build.settings.project_root)?;

    let properties = TargetProperties {
        sources,
        precompiled_header: config.precompiled_header,
        precompiled_source: config.precompiled_source,
        compile_flags: config.cppflags,
        defines: config.defines,
        include_dirs: config.include_dirs,
        link_flags: config.linkflags,
        libs: config.libs,
        dependencies: config.dependencies,
    };

    match config.kind {
        TargetKindAttribute::SourceSet => build.add_source_set(config.name, properties)?,
        TargetKindAttribute::Executable => build.add_executable(config.name, properties)?,
    }

    Ok(())
}

/// Replaces every source declared as a glob pattern by the files that it matches,
/// sorted and relative to the project root. The rest of the sources are kept as
/// they were declared, even if they don't exist yet
fn expand_sources<'a>(
    sources: Vec<Cow<'a, str>>,
    project_root: &Path,
) -> Result<Vec<Cow<'a, str>>> {
    let mut expanded = Vec::with_capacity(sources.len());

    for source in sources {
        if is_glob_pattern(&source) {
            expanded.extend(expand_glob(&source, project_root)?.into_iter().map(Cow::Owned));
        } else {
            expanded.push(source);
        }
    }

    Ok(expanded)
}

fn is_glob_pattern(source: &str) -> bool {
    source.contains(['*', '?', '['])
}

fn expand_glob(pattern: &str, project_root: &Path) -> Result<Vec<String>> {
    let escaped_root = glob::Pattern::escape(&project_root.to_string_lossy());
    let full_pattern = format!("{escaped_root}/{pattern}");

    let paths = glob::glob(&full_pattern)
        .with_context(|| format!("Invalid glob pattern on the declared sources: {pattern}"))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Could not read the paths matched by {pattern}"))?;

    let mut matches = paths
        .iter()
        .filter(|path| path.is_file())
        .map(|path| {
            path.strip_prefix(project_root)
                .unwrap_or(path)
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect::<Vec<String>>();
    matches.sort();

    if matches.is_empty() {
        log::warn!("The source pattern '{pattern}' doesn't match any file");
    } else {
        log::debug!("The source pattern '{pattern}' expanded to {matches:?}");
    }

    Ok(matches)
}
