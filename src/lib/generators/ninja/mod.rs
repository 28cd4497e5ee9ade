//! Generation of the Ninja recipe that compiles and links the targets of a [`Build`]
//! with the MSVC toolchain

pub mod syntax;

use std::io::Write;

use color_eyre::{eyre::Context, Result};

use crate::project_model::{
    artifacts,
    target::{LinkSettings, Target, TargetIdentifier, TargetKind},
    Build,
};
use crate::resolver;
use crate::utils::constants::error_messages;

use self::syntax::{BuildStatement, NinjaWriter};
use super::Generator;

pub mod rules {
    pub const CPP: &str = "cpp";
    pub const CPP_PCH: &str = "cpp_pch";
    pub const LINK: &str = "link";

    pub const CPP_COMMAND: &str =
        "cl /c /showIncludes $cppflags /std:$cppstd $defines $include_dirs $pchflags /Fo$out $in";
    pub const CPP_PCH_COMMAND: &str = "cl /c /showIncludes $cppflags /std:$cppstd $defines \
        $include_dirs /Yc$pch_header /Fp$pch_pch /Fo$pch_obj $in";
    pub const LINK_COMMAND: &str = "link $linkflags /out:$out $in $pch_objs $libs";

    pub const MSVC_DEPS: &str = "msvc";
}

pub struct NinjaGenerator<'b, 'a> {
    build: &'b Build<'a>,
    line_width: usize,
}

impl<'b, 'a> NinjaGenerator<'b, 'a> {
    pub fn new(build: &'b Build<'a>) -> Self {
        Self {
            build,
            line_width: syntax::DEFAULT_LINE_WIDTH,
        }
    }

    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Writes the whole recipe. The build is validated first, so an invalid
    /// description doesn't write a single byte
    pub fn write_to<W: Write>(&self, output: W) -> Result<()> {
        self.build.validate()?;

        let mut n = NinjaWriter::with_width(output, self.line_width);
        self.write_header(&mut n)
            .with_context(|| error_messages::FAILURE_WRITING_RECIPE)?;

        for (identifier, target) in self.build.targets() {
            log::debug!("Writing the build steps for the target: {identifier}");
            self.write_target(identifier, target, &mut n)?;
        }

        Ok(())
    }

    fn write_header<W: Write>(&self, n: &mut NinjaWriter<W>) -> std::io::Result<()> {
        let settings = &self.build.settings;

        n.variable("builddir", Some(&*settings.builddir), 0)?;
        n.variable("cppflags", Some(settings.cppflags.join(" ").as_str()), 0)?;
        n.variable("cppstd", Some(&*settings.cppstd), 0)?;
        n.variable("linkflags", Some(settings.linkflags.join(" ").as_str()), 0)?;
        n.newline()?;

        n.rule(rules::CPP, rules::CPP_COMMAND, Some(rules::MSVC_DEPS))?;
        n.newline()?;
        n.rule(rules::CPP_PCH, rules::CPP_PCH_COMMAND, Some(rules::MSVC_DEPS))?;
        n.newline()?;
        n.rule(rules::LINK, rules::LINK_COMMAND, None)?;
        n.newline()
    }

    fn write_target<W: Write>(
        &self,
        identifier: &TargetIdentifier<'_>,
        target: &Target<'_>,
        n: &mut NinjaWriter<W>,
    ) -> Result<()> {
        let name = identifier.name();

        if let Some(statement) = pch_statement(name, target) {
            n.build(&statement)
                .with_context(|| format!("{}: {name}", error_messages::FAILURE_WRITING_RECIPE))?;
            n.newline()?;
        }

        for statement in compile_statements(name, target) {
            n.build(&statement)
                .with_context(|| format!("{}: {name}", error_messages::FAILURE_WRITING_RECIPE))?;
            n.newline()?;
        }

        match &target.kind {
            TargetKind::SourceSet => {}
            TargetKind::Executable(link_settings) => {
                let statement = self.link_statement(name, link_settings)?;
                n.build(&statement)
                    .with_context(|| format!("{}: {name}", error_messages::FAILURE_WRITING_RECIPE))?;
                n.newline()?;
            }
        }

        Ok(())
    }

    /// The link step consumes the objects of the target and its dependencies, and
    /// waits for every precompiled header involved even if they aren't linked
    fn link_statement(
        &self,
        name: &str,
        link_settings: &LinkSettings<'_>,
    ) -> Result<BuildStatement<'static>> {
        let link_inputs = resolver::resolve_object_inputs(self.build, name)?;

        Ok(BuildStatement {
            outputs: vec![artifacts::executable_file(name)],
            rule: rules::LINK,
            inputs: link_inputs.objects,
            implicit: link_inputs.pch_artifacts,
            variables: vec![
                ("linkflags", link_settings.link_flags.as_ref().map(|f| f.join(" "))),
                ("libs", Some(link_settings.libs().join(" "))),
                ("pch_objs", Some(link_inputs.pch_objects.join(" "))),
            ],
            ..Default::default()
        })
    }
}

impl Generator for NinjaGenerator<'_, '_> {
    fn write(&self, output: &mut dyn Write) -> Result<()> {
        self.write_to(output)
    }
}

/// The variables shared by the compile steps of a target. The unconfigured
/// ones are left out so the global binding applies
fn compile_variables(target: &Target<'_>) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("cppflags", target.compile_flags.as_ref().map(|f| f.join(" "))),
        ("defines", prefixed_list("/D", target.defines())),
        ("include_dirs", prefixed_list("/I", target.include_dirs())),
    ]
}

fn prefixed_list<S: AsRef<str>>(prefix: &str, values: &[S]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(
            values
                .iter()
                .map(|value| format!("{prefix}{}", value.as_ref()))
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

fn pch_statement(name: &str, target: &Target<'_>) -> Option<BuildStatement<'static>> {
    let pch = target.precompiled_header.as_ref()?;
    let pch_file = artifacts::pch_file(name, pch);
    let pch_object = artifacts::pch_object_file(name, pch);

    let mut variables = compile_variables(target);
    variables.push(("pch_header", Some(pch.header.to_string())));
    variables.push(("pch_pch", Some(pch_file.clone())));
    variables.push(("pch_obj", Some(pch_object.clone())));

    Some(BuildStatement {
        outputs: vec![pch_file],
        implicit_outputs: vec![pch_object],
        rule: rules::CPP_PCH,
        inputs: vec![pch.source.to_string()],
        variables,
        ..Default::default()
    })
}

fn compile_statements(name: &str, target: &Target<'_>) -> Vec<BuildStatement<'static>> {
    let mut variables = compile_variables(target);
    let mut implicit = Vec::new();

    if let Some(pch) = &target.precompiled_header {
        let pch_file = artifacts::pch_file(name, pch);
        variables.push((
            "pchflags",
            Some(format!("/Yu{} /Fp{pch_file}", pch.header)),
        ));
        implicit.push(pch_file);
    }

    target
        .compiled_sources()
        .into_iter()
        .map(|source| BuildStatement {
            outputs: vec![artifacts::object_file(source)],
            rule: rules::CPP,
            inputs: vec![source.to_string()],
            implicit: implicit.clone(),
            variables: variables.clone(),
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests;
