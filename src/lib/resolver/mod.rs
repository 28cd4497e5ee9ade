//! Flattens the dependencies of a target into the inputs that its link step consumes

use std::collections::HashSet;

use crate::project_model::{
    artifacts,
    build::DependencyExpansion,
    error::BuildError,
    target::{Target, TargetIdentifier},
    Build,
};

/// Everything that a link step needs from a target and its dependencies
#[derive(Debug, PartialEq, Eq, Default, Clone)]
pub struct LinkInputs {
    /// The objects of the regular compile steps, in link order
    pub objects: Vec<String>,
    /// The objects emitted alongside the precompiled headers. They're linked too,
    /// but they don't come from a regular compile step
    pub pch_objects: Vec<String>,
    /// The precompiled header artifacts that must exist before linking
    pub pch_artifacts: Vec<String>,
}

/// Collects the link inputs for the target named `name`: its own objects, followed by
/// the objects of its dependencies in declaration order.
///
/// How deep the dependencies are followed is decided by the
/// [`DependencyExpansion`] of the build settings. Either way, a target
/// contributes its objects only once
pub fn resolve_object_inputs(build: &Build<'_>, name: &str) -> Result<LinkInputs, BuildError> {
    build.get_target(name)?;

    let link_order = match build.settings.dependency_expansion {
        DependencyExpansion::Direct => direct_link_order(build, name)?,
        DependencyExpansion::Transitive => transitive_link_order(build, name)?,
    };

    let mut inputs = LinkInputs::default();
    for (identifier, target) in link_order {
        inputs.objects.extend(artifacts::object_files(target));

        if let Some(pch) = &target.precompiled_header {
            inputs
                .pch_objects
                .push(artifacts::pch_object_file(identifier.name(), pch));
            inputs
                .pch_artifacts
                .push(artifacts::pch_file(identifier.name(), pch));
        }
    }

    log::debug!(
        "Resolved {} objects and {} precompiled header objects for: {name}",
        inputs.objects.len(),
        inputs.pch_objects.len()
    );

    Ok(inputs)
}

type LinkOrder<'b, 'a> = Vec<(&'b TargetIdentifier<'a>, &'b Target<'a>)>;

fn direct_link_order<'b, 'a>(
    build: &'b Build<'a>,
    name: &str,
) -> Result<LinkOrder<'b, 'a>, BuildError> {
    let root = build.index_of(name, name)?;
    let mut visited = HashSet::from([root]);
    let mut order = Vec::new();
    order.extend(build.get_index(root));

    if let Some((_, target)) = build.get_index(root) {
        for dependency in &target.dependencies {
            let index = build.index_of(dependency.name(), name)?;
            if visited.insert(index) {
                order.extend(build.get_index(index));
            }
        }
    }

    Ok(order)
}

fn transitive_link_order<'b, 'a>(
    build: &'b Build<'a>,
    name: &str,
) -> Result<LinkOrder<'b, 'a>, BuildError> {
    let root = build.index_of(name, name)?;
    let mut visited = HashSet::new();
    let mut path = Vec::new();
    let mut order = Vec::new();

    walk(build, root, &mut visited, &mut path, &mut order)?;

    Ok(order)
}

/// Pre-order walk, so every target precedes the targets it depends on
fn walk<'b, 'a>(
    build: &'b Build<'a>,
    index: usize,
    visited: &mut HashSet<usize>,
    path: &mut Vec<usize>,
    order: &mut LinkOrder<'b, 'a>,
) -> Result<(), BuildError> {
    if path.contains(&index) {
        return Err(build.cycle_error(index, path));
    }
    if !visited.insert(index) {
        return Ok(());
    }

    let Some(entry @ (identifier, target)) = build.get_index(index) else {
        return Ok(());
    };
    order.push(entry);
    path.push(index);

    for dependency in &target.dependencies {
        let dep_index = build.index_of(dependency.name(), identifier.name())?;
        walk(build, dep_index, visited, path, order)?;
    }

    path.pop();

    Ok(())
}

#[cfg(test)]
mod tests {
    use color_eyre::Result;

    use super::*;
    use crate::project_model::{
        build::{BuildSettings, DependencyExpansion},
        target::TargetProperties,
    };

    fn layered_build(expansion: DependencyExpansion) -> Result<Build<'static>> {
        let mut build = Build::new(BuildSettings {
            dependency_expansion: expansion,
            ..Default::default()
        });
        build.add_source_set(
            "base",
            TargetProperties::default().sources(["base/a.cpp", "base/b.cpp"]),
        )?;
        build.add_source_set(
            "middle",
            TargetProperties::default()
                .sources(["middle/m.cpp"])
                .dependencies(["base"]),
        )?;
        build.add_executable(
            "app",
            TargetProperties::default()
                .sources(["app/main.cpp"])
                .dependencies(["middle"]),
        )?;
        Ok(build)
    }

    #[test]
    fn test_own_objects_come_before_the_dependencies_ones() -> Result<()> {
        let mut build = Build::default();
        build.add_source_set(
            "lib",
            TargetProperties::default().sources(["lib/one.cpp", "lib/two.cpp"]),
        )?;
        build.add_executable(
            "exe",
            TargetProperties::default()
                .sources(["main.cpp"])
                .dependencies(["lib"]),
        )?;

        let inputs = resolve_object_inputs(&build, "exe")?;

        assert_eq!(
            inputs.objects,
            vec![
                "$builddir/main.obj",
                "$builddir/lib/one.obj",
                "$builddir/lib/two.obj"
            ]
        );
        assert!(inputs.pch_objects.is_empty());
        assert!(inputs.pch_artifacts.is_empty());

        // Same build in, same inputs out
        assert_eq!(inputs, resolve_object_inputs(&build, "exe")?);
        Ok(())
    }

    #[test]
    fn test_direct_expansion_ignores_the_grand_dependencies() -> Result<()> {
        let build = layered_build(DependencyExpansion::Direct)?;
        let inputs = resolve_object_inputs(&build, "app")?;

        assert_eq!(
            inputs.objects,
            vec!["$builddir/app/main.obj", "$builddir/middle/m.obj"]
        );
        Ok(())
    }

    #[test]
    fn test_transitive_expansion_follows_every_dependency() -> Result<()> {
        let build = layered_build(DependencyExpansion::Transitive)?;
        let inputs = resolve_object_inputs(&build, "app")?;

        assert_eq!(
            inputs.objects,
            vec![
                "$builddir/app/main.obj",
                "$builddir/middle/m.obj",
                "$builddir/base/a.obj",
                "$builddir/base/b.obj"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_shared_dependencies_are_linked_once() -> Result<()> {
        let mut build = Build::default();
        build.add_source_set("common", TargetProperties::default().sources(["common.cpp"]))?;
        build.add_source_set(
            "left",
            TargetProperties::default()
                .sources(["left.cpp"])
                .dependencies(["common"]),
        )?;
        build.add_source_set(
            "right",
            TargetProperties::default()
                .sources(["right.cpp"])
                .dependencies(["common"]),
        )?;
        build.add_executable(
            "app",
            TargetProperties::default()
                .sources(["main.cpp"])
                .dependencies(["left", "right", "left"]),
        )?;

        let inputs = resolve_object_inputs(&build, "app")?;
        assert_eq!(
            inputs.objects,
            vec![
                "$builddir/main.obj",
                "$builddir/left.obj",
                "$builddir/common.obj",
                "$builddir/right.obj"
            ]
        );
        Ok(())
    }

    #[test]
    fn test_pch_objects_are_collected_apart() -> Result<()> {
        let mut build = Build::default();
        build.add_source_set(
            "core",
            TargetProperties::default()
                .sources(["src/core.cpp", "src/pch.cpp"])
                .precompiled_header("pch.h")
                .precompiled_source("src/pch.cpp"),
        )?;
        build.add_executable(
            "app",
            TargetProperties::default()
                .sources(["src/main.cpp"])
                .precompiled_header("pch.h")
                .precompiled_source("src/app_pch.cpp")
                .dependencies(["core"]),
        )?;

        let inputs = resolve_object_inputs(&build, "app")?;

        assert_eq!(
            inputs.objects,
            vec!["$builddir/src/main.obj", "$builddir/src/core.obj"]
        );
        assert_eq!(
            inputs.pch_objects,
            vec!["$builddir/app.pch/app_pch.obj", "$builddir/core.pch/pch.obj"]
        );
        assert_eq!(
            inputs.pch_artifacts,
            vec!["$builddir/app.pch/pch.pch", "$builddir/core.pch/pch.pch"]
        );
        Ok(())
    }

    #[test]
    fn test_unknown_dependencies_are_reported() -> Result<()> {
        let mut build = Build::default();
        build.add_executable(
            "app",
            TargetProperties::default()
                .sources(["main.cpp"])
                .dependencies(["missing"]),
        )?;

        for expansion in [DependencyExpansion::Direct, DependencyExpansion::Transitive] {
            build.settings.dependency_expansion = expansion;
            assert_eq!(
                resolve_object_inputs(&build, "app"),
                Err(BuildError::NotFound {
                    name: "missing".to_string(),
                    referenced_by: Some("app".to_string())
                })
            );
        }

        assert_eq!(
            resolve_object_inputs(&build, "nope"),
            Err(BuildError::NotFound {
                name: "nope".to_string(),
                referenced_by: None
            })
        );
        Ok(())
    }

    #[test]
    fn test_cycles_are_reported_while_resolving() -> Result<()> {
        let mut build = Build::default();
        build.add_source_set(
            "a",
            TargetProperties::default().sources(["a.cpp"]).dependencies(["b"]),
        )?;
        build.add_source_set(
            "b",
            TargetProperties::default().sources(["b.cpp"]).dependencies(["a"]),
        )?;
        build.add_executable(
            "app",
            TargetProperties::default().sources(["main.cpp"]).dependencies(["a"]),
        )?;

        assert_eq!(
            resolve_object_inputs(&build, "app"),
            Err(BuildError::CyclicDependency {
                cycle: "a -> b -> a".to_string()
            })
        );
        Ok(())
    }
}
