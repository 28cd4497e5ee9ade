pub mod cli;
pub mod config_file;
pub mod generators;
pub mod project_model;
pub mod resolver;
pub mod utils;

/// The entry point for the execution of the program.
///
/// This module existence is motivated to let us run
/// integration tests for the whole operations of the program
/// without having to do fancy work about checking the
/// data sent to stdout/stderr
pub mod worker {
    use std::path::{Path, PathBuf};
    use std::thread::ScopedJoinHandle;
    use std::{fs, time::Instant};

    use color_eyre::{
        eyre::{eyre, Context},
        Result,
    };

    use crate::config_file::{self, BuildgenConfigFile};
    use crate::generators::{
        compile_commands::CompilationDatabaseGenerator, generate_to_file, ninja::NinjaGenerator,
    };
    use crate::utils::constants::{error_messages, CONFIG_FILE_NAME};
    use crate::{
        cli::{CliArgs, Command},
        project_model::BuildgenModel,
        utils,
    };

    /// The main work of the project. Runs the tasks
    /// inputted in the CLI
    pub fn run_buildgen(cli_args: &CliArgs, working_dir: &Path) -> Result<()> {
        let abs_project_root = determine_absolute_path_of_the_project_root(cli_args, working_dir)?;

        let cfg_path = abs_project_root.join(cli_args.config.as_deref().unwrap_or(CONFIG_FILE_NAME));
        log::debug!("Launching a buildgen work event for the build description: {cfg_path:?}");

        let raw_file = fs::read_to_string(&cfg_path)
            .with_context(|| format!("{}: {:?}", error_messages::READ_CFG_FILE, cfg_path))?;

        let config: BuildgenConfigFile<'_> = config_file::buildgen_cfg_from_file(&raw_file)
            .with_context(|| format!("{}: {:?}", error_messages::PARSE_CFG_FILE, cfg_path))?;

        let model = {
            // The model is only mutated while the targets are declared. After this
            // block it's read-only data, shared by the generators
            let model: BuildgenModel<'_> =
                utils::reader::build_model(config, &abs_project_root)
                    .with_context(|| error_messages::PROJECT_MODEL_MAPPING)?;
            model.build.validate()?;

            model
        };

        let generation_ts = Instant::now();
        generate_outputs(cli_args.command, &model)
            .with_context(|| error_messages::FAILURE_GENERATING_OUTPUTS)?;

        log::debug!(
            "buildgen took a total of {:?} ms on generating the outputs for {} targets",
            generation_ts.elapsed().as_millis(),
            model.build.len()
        );

        Ok(())
    }

    fn generate_outputs(command: Command, model: &BuildgenModel<'_>) -> Result<()> {
        let outputs = &model.outputs;
        let ninja = NinjaGenerator::new(&model.build);
        let compile_commands = CompilationDatabaseGenerator::new(&model.build)
            .with_command_program(&*outputs.compile_commands_program);

        match command {
            Command::Ninja => generate_to_file(&ninja, &outputs.ninja_file),
            Command::CompileCommands => {
                generate_to_file(&compile_commands, &outputs.compile_commands_file)
            }
            Command::All => std::thread::scope(|scope| {
                let ninja_job = scope.spawn(|| generate_to_file(&ninja, &outputs.ninja_file));
                let compile_commands_job = scope.spawn(|| {
                    generate_to_file(&compile_commands, &outputs.compile_commands_file)
                });

                let ninja_result = join_generator(ninja_job);
                join_generator(compile_commands_job).and(ninja_result)
            }),
        }
    }

    fn join_generator(job: ScopedJoinHandle<'_, Result<()>>) -> Result<()> {
        job.join()
            .map_err(|_| eyre!(error_messages::GENERATOR_THREAD_PANICKED))?
    }

    /// Resolves the full path of the location of the project's root on the fs. If the `--root`
    /// [`CliArgs`] arg is present, it will be used as the project root path, otherwise, we will
    /// assume that the project root is exactly in the same directory from where the *buildgen*
    /// binary was invoked by the user
    fn determine_absolute_path_of_the_project_root(
        cli_args: &CliArgs,
        working_dir: &Path,
    ) -> Result<PathBuf> {
        let project_root = cli_args
            .root
            .as_deref()
            .map_or_else(|| working_dir.to_path_buf(), |root| working_dir.join(root));

        utils::fs::get_project_root_absolute_path(&project_root)
            .with_context(|| error_messages::FAILURE_GATHERING_PROJECT_ROOT_ABS_PATH)
    }

}
