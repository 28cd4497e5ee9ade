//! A writer for the Ninja build file syntax.
//!
//! It knows nothing about targets or toolchains, only how variables, rules and
//! build statements are spelled, how paths must be escaped and how long lines
//! are wrapped

use std::io::{self, Write};

pub const DEFAULT_LINE_WIDTH: usize = 78;

const INDENT: &str = "  ";

/// A build statement, made of the rule that produces its outputs and every kind of
/// edge that Ninja understands
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStatement<'s> {
    pub outputs: Vec<String>,
    pub implicit_outputs: Vec<String>,
    pub rule: &'s str,
    pub inputs: Vec<String>,
    pub implicit: Vec<String>,
    pub order_only: Vec<String>,
    pub variables: Vec<(&'s str, Option<String>)>,
}

pub struct NinjaWriter<W: Write> {
    output: W,
    width: usize,
}

impl<W: Write> NinjaWriter<W> {
    pub fn new(output: W) -> Self {
        Self::with_width(output, DEFAULT_LINE_WIDTH)
    }

    pub fn with_width(output: W, width: usize) -> Self {
        Self { output, width }
    }

    pub fn newline(&mut self) -> io::Result<()> {
        writeln!(self.output)
    }

    pub fn comment(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            writeln!(self.output, "# {line}")?;
        }
        Ok(())
    }

    /// Writes a `key = value` binding. Absent values aren't written at all, so
    /// the binding of an outer scope stays in effect
    pub fn variable(&mut self, key: &str, value: Option<&str>, indent: usize) -> io::Result<()> {
        match value {
            Some(value) => self.line(&format!("{key} = {value}"), indent),
            None => Ok(()),
        }
    }

    pub fn rule(&mut self, name: &str, command: &str, deps: Option<&str>) -> io::Result<()> {
        self.line(&format!("rule {name}"), 0)?;
        self.variable("command", Some(command), 1)?;
        self.variable("deps", deps, 1)
    }

    pub fn build(&mut self, statement: &BuildStatement<'_>) -> io::Result<()> {
        let mut outputs = escape_all(&statement.outputs);
        if !statement.implicit_outputs.is_empty() {
            outputs.push("|".to_string());
            outputs.extend(escape_all(&statement.implicit_outputs));
        }

        let mut inputs = vec![statement.rule.to_string()];
        inputs.extend(escape_all(&statement.inputs));
        if !statement.implicit.is_empty() {
            inputs.push("|".to_string());
            inputs.extend(escape_all(&statement.implicit));
        }
        if !statement.order_only.is_empty() {
            inputs.push("||".to_string());
            inputs.extend(escape_all(&statement.order_only));
        }

        self.line(
            &format!("build {}: {}", outputs.join(" "), inputs.join(" ")),
            0,
        )?;

        for (key, value) in &statement.variables {
            self.variable(key, value.as_deref(), 1)?;
        }

        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.output
    }

    /// Writes a line, wrapping it on unescaped spaces with a `$` continuation when
    /// it doesn't fit in the configured width. Words longer than the width are
    /// left whole
    fn line(&mut self, text: &str, indent: usize) -> io::Result<()> {
        let mut leading_space = INDENT.repeat(indent);
        let mut text = text;

        while leading_space.len() + text.len() > self.width {
            let available = self
                .width
                .saturating_sub(leading_space.len() + " $".len());
            let bytes = text.as_bytes();
            let breakable = |i: &usize| bytes[*i] == b' ' && dollars_before(bytes, *i) % 2 == 0;

            let split = (0..available.min(bytes.len()))
                .rev()
                .find(breakable)
                .or_else(|| (available..bytes.len()).find(breakable));

            let Some(split) = split else {
                break;
            };

            writeln!(self.output, "{leading_space}{} $", &text[..split])?;
            text = &text[split + 1..];
            leading_space = INDENT.repeat(indent + 2);
        }

        writeln!(self.output, "{leading_space}{text}")
    }
}

/// The number of consecutive `$` right before `index`
fn dollars_before(bytes: &[u8], index: usize) -> usize {
    bytes[..index]
        .iter()
        .rev()
        .take_while(|byte| **byte == b'$')
        .count()
}

/// Escapes a path for the `build` lines, where spaces and colons are meaningful
///
/// ```rust
/// use buildgen::generators::ninja::syntax::escape_path;
///
/// assert_eq!(escape_path("C:/My Sources/main.cpp"), "C$:/My$ Sources/main.cpp");
/// assert_eq!(escape_path("$builddir/main.obj"), "$builddir/main.obj");
/// ```
pub fn escape_path(path: &str) -> String {
    path.replace("$ ", "$$ ")
        .replace(' ', "$ ")
        .replace(':', "$:")
}

fn escape_all(paths: &[String]) -> Vec<String> {
    paths.iter().map(|path| escape_path(path)).collect()
}
