use color_eyre::{
    eyre::{bail, Context},
    Result,
};
use env_logger::{Builder, Target};
use log::LevelFilter;

/// Sets up `env_logger` as the backend of the `log` facade for the whole run.
///
/// Without `-v` only the progress messages are shown, while a single `-v` also
/// shows the debug traces of the model mapping and the generators
pub fn config_logger(verbose_level: u8, target: Target) -> Result<()> {
    let level = verbosity_filter(verbose_level)?;

    Builder::from_default_env()
        .target(target)
        .format_indent(Some(4))
        .format_module_path(false)
        .format_timestamp_millis()
        .filter(None, level)
        .try_init()
        .with_context(|| "The logger for buildgen could not be installed")
}

fn verbosity_filter(verbose_level: u8) -> Result<LevelFilter> {
    match verbose_level {
        0 => Ok(LevelFilter::Info),
        1 => Ok(LevelFilter::Debug),
        _ => bail!("buildgen accepts a single '-v' flag, but got {verbose_level}"),
    }
}
