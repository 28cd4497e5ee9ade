use std::path::PathBuf;

use color_eyre::Result;

use super::*;
use crate::project_model::{build::BuildSettings, error::BuildError, target::TargetProperties};

const WIDE: usize = 1000;

fn sample_build() -> Result<Build<'static>> {
    let mut build = Build::new(BuildSettings {
        cppflags: vec!["/nologo".into(), "/EHsc".into()],
        project_root: PathBuf::from("/work/procdraw"),
        ..Default::default()
    });

    build.add_source_set(
        "core",
        TargetProperties::default()
            .sources(["src/color.cpp", "src/pch.cpp"])
            .precompiled_header("pch.h")
            .precompiled_source("src/pch.cpp")
            .defines(["UNICODE"])
            .include_dirs(["include"]),
    )?;
    build.add_executable(
        "app",
        TargetProperties::default()
            .sources(["app/main.cpp"])
            .dependencies(["core"])
            .libs(["user32.lib", "opengl32.lib"]),
    )?;

    Ok(build)
}

fn recipe(build: &Build<'_>, width: usize) -> Result<String> {
    let mut output = Vec::new();
    NinjaGenerator::new(build)
        .with_line_width(width)
        .write_to(&mut output)?;
    Ok(String::from_utf8(output)?)
}

/// The recipe lines with the `$` continuations joined back
fn logical_lines(recipe: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut continued = false;

    for line in recipe.lines() {
        let (text, continues) = match line.strip_suffix(" $") {
            Some(text) => (text, true),
            None => (line, false),
        };

        match lines.last_mut() {
            Some(last) if continued => {
                last.push(' ');
                last.push_str(text.trim_start());
            }
            _ => lines.push(text.to_string()),
        }
        continued = continues;
    }

    lines
}

fn build_lines(recipe: &str) -> Vec<String> {
    logical_lines(recipe)
        .into_iter()
        .filter(|line| line.starts_with("build "))
        .collect()
}

#[test]
fn test_empty_build_writes_the_header_and_rules_only() -> Result<()> {
    let build = Build::default();
    let lines = logical_lines(&recipe(&build, syntax::DEFAULT_LINE_WIDTH)?);

    assert_eq!(
        lines,
        vec![
            "builddir = build".to_string(),
            "cppflags = ".to_string(),
            "cppstd = c++17".to_string(),
            "linkflags = ".to_string(),
            String::new(),
            "rule cpp".to_string(),
            format!("  command = {}", rules::CPP_COMMAND),
            "  deps = msvc".to_string(),
            String::new(),
            "rule cpp_pch".to_string(),
            format!("  command = {}", rules::CPP_PCH_COMMAND),
            "  deps = msvc".to_string(),
            String::new(),
            "rule link".to_string(),
            format!("  command = {}", rules::LINK_COMMAND),
            String::new(),
        ]
    );
    Ok(())
}

#[test]
fn test_header_carries_the_global_settings() -> Result<()> {
    let build = Build::new(BuildSettings {
        builddir: "out".into(),
        cppflags: vec!["/nologo".into(), "/EHsc".into()],
        cppstd: "c++20".into(),
        linkflags: vec!["/nologo".into()],
        ..Default::default()
    });

    let text = recipe(&build, WIDE)?;

    assert!(text.starts_with(
        "builddir = out\ncppflags = /nologo /EHsc\ncppstd = c++20\nlinkflags = /nologo\n\n"
    ));
    Ok(())
}

#[test]
fn test_precompiled_header_step_is_written_once_before_the_compile_steps() -> Result<()> {
    let build = sample_build()?;
    let text = recipe(&build, WIDE)?;

    let pch_step = "build $builddir/core.pch/pch.pch | $builddir/core.pch/pch.obj: cpp_pch src/pch.cpp\n\
        \x20 defines = /DUNICODE\n\
        \x20 include_dirs = /Iinclude\n\
        \x20 pch_header = pch.h\n\
        \x20 pch_pch = $builddir/core.pch/pch.pch\n\
        \x20 pch_obj = $builddir/core.pch/pch.obj\n";

    assert_eq!(text.matches(pch_step).count(), 1);
    assert_eq!(text.matches(": cpp_pch ").count(), 1);

    let pch_position = text.find(pch_step).unwrap_or(usize::MAX);
    let first_compile = text.find(": cpp ").unwrap_or_default();
    assert!(pch_position < first_compile);
    Ok(())
}

#[test]
fn test_compile_steps_wait_for_the_precompiled_header() -> Result<()> {
    let build = sample_build()?;
    let text = recipe(&build, WIDE)?;

    let compile_step = "build $builddir/src/color.obj: cpp src/color.cpp | $builddir/core.pch/pch.pch\n\
        \x20 defines = /DUNICODE\n\
        \x20 include_dirs = /Iinclude\n\
        \x20 pchflags = /Yupch.h /Fp$builddir/core.pch/pch.pch\n";
    assert!(text.contains(compile_step));

    // The source that precompiles the header has no regular compile step
    assert!(!text.contains("$builddir/src/pch.obj"));
    Ok(())
}

#[test]
fn test_compile_steps_follow_the_declaration_order() -> Result<()> {
    let build = sample_build()?;
    let lines = build_lines(&recipe(&build, WIDE)?);

    let outputs = lines
        .iter()
        .filter_map(|line| line.strip_prefix("build "))
        .filter_map(|line| line.split(':').next())
        .collect::<Vec<_>>();

    assert_eq!(
        outputs,
        vec![
            "$builddir/core.pch/pch.pch | $builddir/core.pch/pch.obj",
            "$builddir/src/color.obj",
            "$builddir/app/main.obj",
            "$builddir/app.exe",
        ]
    );
    Ok(())
}

#[test]
fn test_link_step_consumes_the_objects_of_the_dependencies() -> Result<()> {
    let build = sample_build()?;
    let text = recipe(&build, WIDE)?;

    let link_step = "build $builddir/app.exe: link $builddir/app/main.obj $builddir/src/color.obj | $builddir/core.pch/pch.pch\n\
        \x20 libs = user32.lib opengl32.lib\n\
        \x20 pch_objs = $builddir/core.pch/pch.obj\n";
    assert!(text.contains(link_step));

    // A source set has no link step
    assert!(!text.contains("$builddir/core.exe"));
    Ok(())
}

#[test]
fn test_link_step_waits_for_the_own_precompiled_header() -> Result<()> {
    let mut build = sample_build()?;
    build.add_executable(
        "viewer",
        TargetProperties::default()
            .sources(["viewer/main.cpp", "viewer/stdafx.cpp"])
            .precompiled_header("stdafx.h")
            .precompiled_source("viewer/stdafx.cpp")
            .dependencies(["core"]),
    )?;

    let text = recipe(&build, WIDE)?;

    assert!(text.contains(
        "build $builddir/viewer.pch/stdafx.pch | $builddir/viewer.pch/stdafx.obj: cpp_pch viewer/stdafx.cpp\n"
    ));
    assert!(text.contains(
        "build $builddir/viewer/main.obj: cpp viewer/main.cpp | $builddir/viewer.pch/stdafx.pch\n"
    ));

    let link_step = "build $builddir/viewer.exe: link $builddir/viewer/main.obj $builddir/src/color.obj | $builddir/viewer.pch/stdafx.pch $builddir/core.pch/pch.pch\n\
        \x20 libs = \n\
        \x20 pch_objs = $builddir/viewer.pch/stdafx.obj $builddir/core.pch/pch.obj\n";
    assert!(text.contains(link_step));
    Ok(())
}

#[test]
fn test_configured_target_flags_override_the_global_ones() -> Result<()> {
    let mut build = Build::default();
    build.add_executable(
        "tool",
        TargetProperties::default()
            .sources(["tool.cpp"])
            .compile_flags(Vec::<&str>::new())
            .link_flags(["/DEBUG", "/SUBSYSTEM:CONSOLE"]),
    )?;
    build.add_source_set("inherit", TargetProperties::default().sources(["inherit.cpp"]))?;

    let text = recipe(&build, WIDE)?;

    assert!(text.contains("build $builddir/tool.obj: cpp tool.cpp\n  cppflags = \n"));
    assert!(text.contains("  linkflags = /DEBUG /SUBSYSTEM:CONSOLE\n"));
    assert!(text.contains("build $builddir/inherit.obj: cpp inherit.cpp\n\n"));
    Ok(())
}

#[test]
fn test_paths_on_build_lines_are_escaped() -> Result<()> {
    let mut build = Build::default();
    build.add_source_set("spaces", TargetProperties::default().sources(["my src/a.cpp"]))?;

    let text = recipe(&build, WIDE)?;

    assert!(text.contains("build $builddir/my$ src/a.obj: cpp my$ src/a.cpp\n"));
    Ok(())
}

#[test]
fn test_long_lines_are_wrapped_within_the_width() -> Result<()> {
    let build = sample_build()?;
    let text = recipe(&build, syntax::DEFAULT_LINE_WIDTH)?;

    assert!(text
        .lines()
        .all(|line| line.len() <= syntax::DEFAULT_LINE_WIDTH));
    assert_eq!(
        build_lines(&text),
        build_lines(&recipe(&build, WIDE)?)
    );
    Ok(())
}

#[test]
fn test_unknown_dependency_writes_nothing() -> Result<()> {
    let mut build = Build::default();
    build.add_executable(
        "app",
        TargetProperties::default()
            .sources(["main.cpp"])
            .dependencies(["lua"]),
    )?;

    let mut output = Vec::new();
    let error = NinjaGenerator::new(&build)
        .write_to(&mut output)
        .expect_err("'lua' isn't declared on the build");

    assert_eq!(
        error.downcast_ref::<BuildError>(),
        Some(&BuildError::NotFound {
            name: "lua".to_string(),
            referenced_by: Some("app".to_string()),
        })
    );
    assert!(output.is_empty());
    Ok(())
}

#[test]
fn test_output_is_identical_across_runs() -> Result<()> {
    let build = sample_build()?;

    assert_eq!(recipe(&build, WIDE)?, recipe(&build, WIDE)?);
    assert_eq!(
        recipe(&build, syntax::DEFAULT_LINE_WIDTH)?,
        recipe(&sample_build()?, syntax::DEFAULT_LINE_WIDTH)?
    );
    Ok(())
}
