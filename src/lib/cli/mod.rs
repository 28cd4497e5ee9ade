use clap::{Parser, Subcommand};

/// [`CliArgs`] is the command line arguments parser
///
/// #Test
/// ```rust
/// use clap::Parser;
/// use buildgen::cli::{CliArgs, Command};
///
/// let parser = CliArgs::parse_from(["", "-v", "all"]);
/// assert_eq!(1, parser.verbose);
/// assert_eq!(parser.command, Command::All);
///
/// let parser = CliArgs::parse_from(["", "compdb"]);
/// assert_eq!(parser.command, Command::CompileCommands);
///
/// let parser = CliArgs::parse_from(["", "--root", "procdraw", "--config", "win.toml", "ninja"]);
/// assert_eq!(parser.root.as_deref(), Some("procdraw"));
/// assert_eq!(parser.config.as_deref(), Some("win.toml"));
/// assert_eq!(parser.command, Command::Ninja);
/// ```
#[derive(Parser, Debug)]
#[command(name = "buildgen")]
#[command(version = "0.3.0")]
#[command(
    about = "buildgen turns a C++ build description into a Ninja recipe and a compilation database",
    long_about = "buildgen reads the targets declared on a TOML build description and generates \
    the Ninja recipe that compiles and links them with the MSVC toolchain, along with the \
    compile_commands.json compilation database for the static analysis tools"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, help = "buildgen maximum allowed verbosity level is: '-v'")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        help = "The path where the project root lives. Defaults to the current directory"
    )]
    pub root: Option<String>,

    #[arg(
        short,
        long,
        help = "The build description file, relative to the project root. Defaults to 'buildgen.toml'"
    )]
    pub config: Option<String>,
}

/// [`Command`] -  The core enum commands
#[derive(Subcommand, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    /// Generates the Ninja recipe
    Ninja,
    /// Generates the compile_commands.json compilation database
    #[command(alias = "compdb")]
    CompileCommands,
    /// Generates both the Ninja recipe and the compilation database
    All,
}
