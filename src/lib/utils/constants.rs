//! Constant value definitions to use across the whole program

pub const BUILDGEN: &str = "buildgen";

pub const CONFIG_FILE_NAME: &str = "buildgen.toml";
pub const DEFAULT_NINJA_FILE: &str = "build.ninja";
pub const DEFAULT_COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DEFAULT_CPP_STANDARD: &str = "c++17";
pub const DEFAULT_COMPILE_COMMANDS_PROGRAM: &str = "clang++";

/// The recipe variable that every artifact path is rooted on
pub const BUILDDIR_VAR: &str = "$builddir";

pub const OBJECT_EXTENSION: &str = "obj";
pub const PCH_EXTENSION: &str = "pch";
pub const PCH_DIR_EXTENSION: &str = "pch";
pub const EXECUTABLE_EXTENSION: &str = "exe";

pub mod error_messages {
    pub const READ_CFG_FILE: &str = "Could not read the build description file";
    pub const PARSE_CFG_FILE: &str = "Could not parse the build description file";
    pub const PROJECT_MODEL_MAPPING: &str = "Error building the project model";
    pub const FAILURE_GATHERING_PROJECT_ROOT_ABS_PATH: &str =
        "An unexpected error happened while resolving the absolute path to the current project root";
    pub const FAILURE_WRITING_RECIPE: &str = "Failed to write the build steps of the Ninja recipe";
    pub const FAILURE_WRITING_COMPILATION_DATABASE: &str =
        "Failed to write the compilation database";
    pub const FAILURE_GENERATING_OUTPUTS: &str = "Failed to generate the outputs for the build";
    pub const GENERATOR_THREAD_PANICKED: &str = "A generator thread panicked";
}
