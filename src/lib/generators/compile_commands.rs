use std::borrow::Cow;
use std::io::Write;
use std::path::Path;

use color_eyre::{eyre::Context, Result};
use serde::Serialize;

use crate::project_model::{target::Target, Build};
use crate::utils::constants::{error_messages, DEFAULT_COMPILE_COMMANDS_PROGRAM};

use super::Generator;

pub type CompileCommands<'b> = Vec<CompileCommand<'b>>;

/// Data model for serialize the data that will be outputted
/// to the `compile_commands.json` compilation database file
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct CompileCommand<'b> {
    pub directory: &'b Path,
    pub command: String,
    pub file: &'b str,
}

/// Generates the `compile_commands.json` file, that acts as a compilation database
/// for some static analysis external tools, like `clang-tidy`, with one entry for
/// every declared source of every target
pub struct CompilationDatabaseGenerator<'b, 'a> {
    build: &'b Build<'a>,
    command_program: Cow<'b, str>,
}

impl<'b, 'a> CompilationDatabaseGenerator<'b, 'a> {
    pub fn new(build: &'b Build<'a>) -> Self {
        Self {
            build,
            command_program: Cow::Borrowed(DEFAULT_COMPILE_COMMANDS_PROGRAM),
        }
    }

    pub fn with_command_program(mut self, program: impl Into<Cow<'b, str>>) -> Self {
        self.command_program = program.into();
        self
    }

    /// The entries of the database, following the declaration order of the targets
    /// and their sources. Sources shared by several targets appear once per target
    pub fn compile_commands(&self) -> CompileCommands<'b> {
        let build: &'b Build<'a> = self.build;

        build
            .targets()
            .flat_map(|(_, target)| {
                target.sources.iter().map(move |source| CompileCommand {
                    directory: &build.settings.project_root,
                    command: self.command_line(target, source),
                    file: source,
                })
            })
            .collect()
    }

    fn command_line(&self, target: &Target<'_>, source: &str) -> String {
        let mut arguments: Vec<Cow<'_, str>> = Vec::with_capacity(
            3 + target.defines().len() + target.include_dirs().len(),
        );
        arguments.push(Cow::Borrowed(&*self.command_program));
        arguments.push(Cow::Owned(format!("-std={}", self.build.settings.cppstd)));
        arguments.extend(
            target
                .defines()
                .iter()
                .map(|define| Cow::Owned(format!("-D{define}"))),
        );
        arguments.extend(
            target
                .include_dirs()
                .iter()
                .map(|dir| Cow::Owned(format!("-I{dir}"))),
        );
        arguments.push(Cow::Borrowed(source));

        join_arguments(&arguments)
    }

    pub fn write_to<W: Write>(&self, mut output: W) -> Result<()> {
        let compile_commands = self.compile_commands();
        log::debug!(
            "Writing {} entries to the compilation database",
            compile_commands.len()
        );

        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut output, formatter);
        compile_commands
            .serialize(&mut serializer)
            .with_context(|| error_messages::FAILURE_WRITING_COMPILATION_DATABASE)?;

        writeln!(output).with_context(|| error_messages::FAILURE_WRITING_COMPILATION_DATABASE)
    }
}

impl Generator for CompilationDatabaseGenerator<'_, '_> {
    fn write(&self, output: &mut dyn Write) -> Result<()> {
        self.write_to(output)
    }
}

/// Joins the arguments of a command line so that a POSIX shell, or the tools
/// that split the database commands the same way, get the exact arguments back.
///
/// Arguments made only of characters without a meaning for the shell are written
/// as they are. The rest are single quoted, with their own single quotes spelled
/// as `'"'"'`
///
/// ```rust
/// use buildgen::generators::compile_commands::join_arguments;
///
/// assert_eq!(join_arguments(&["clang++", "-DNAME=a b", "main.cpp"]), "clang++ '-DNAME=a b' main.cpp");
/// assert_eq!(join_arguments(&[r#"-DDIR=\"data\""#]), r#"'-DDIR=\"data\"'"#);
/// assert_eq!(join_arguments(&["it's", ""]), r#"'it'"'"'s' ''"#);
/// ```
pub fn join_arguments<S: AsRef<str>>(arguments: &[S]) -> String {
    arguments
        .iter()
        .map(|argument| quote_argument(argument.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_argument(argument: &str) -> Cow<'_, str> {
    if !argument.is_empty() && argument.chars().all(is_shell_safe) {
        Cow::Borrowed(argument)
    } else {
        Cow::Owned(format!("'{}'", argument.replace('\'', r#"'"'"'"#)))
    }
}

fn is_shell_safe(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}
