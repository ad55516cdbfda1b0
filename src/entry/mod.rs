use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::HarnessArgs;
use crate::error::AppResult;

/// Default config filename checked when `--config` is not given.
const DEFAULT_CONFIG_FILES: [&str; 1] = ["drench.toml"];

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    apply_config_file(&mut args, &matches)?;
    args.validate()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(crate::runner::run_all(&args))
}

fn parse_args() -> AppResult<(HarnessArgs, ArgMatches)> {
    let cmd = HarnessArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    let matches = cmd.get_matches_from(raw_args);
    let args = HarnessArgs::from_arg_matches(&matches)?;

    Ok((args, matches))
}

fn apply_config_file(args: &mut HarnessArgs, matches: &ArgMatches) -> AppResult<()> {
    let path = args.config.clone().or_else(default_config_path);
    if let Some(path) = path {
        let config = crate::config::load(Path::new(&path))?;
        crate::config::apply(args, matches, config)?;
    }
    Ok(())
}

fn default_config_path() -> Option<String> {
    DEFAULT_CONFIG_FILES
        .iter()
        .find(|path| Path::new(path).exists())
        .map(|path| (*path).to_owned())
}
