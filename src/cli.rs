use crate::filewalker::Selection;
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

/// Default backup file name, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "code_backup.txt";

pub struct Config {
    pub output_path: PathBuf,
    pub project_root: PathBuf,
    pub selection: Selection,
    pub verbosity: u8,
    #[cfg(feature = "restore")]
    pub restore_input: Option<PathBuf>,
    #[cfg(feature = "restore")]
    pub restore_path: Option<PathBuf>,
}

impl Config {
    /// A backup of `project_root` into `output_path` using the built-in selection.
    pub fn new(project_root: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            project_root: project_root.into(),
            selection: Selection::default(),
            verbosity: 0,
            #[cfg(feature = "restore")]
            restore_input: None,
            #[cfg(feature = "restore")]
            restore_path: None,
        }
    }
}

fn build_command() -> Command {
    let cmd = Command::new("codebak")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Backs up a front-end project's source files into a single text file")
        .arg(
            Arg::new("root")
                .value_name("ROOT")
                .help("Project directory to scan")
                .default_value("."),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Sets the backup file path")
                .default_value(DEFAULT_OUTPUT),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log output (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        );

    #[cfg(feature = "restore")]
    let cmd = cmd
        .arg(
            Arg::new("restore")
                .long("restore")
                .value_name("FILE")
                .help("Restore files from a backup instead of creating one")
                .conflicts_with_all(["root", "output"]),
        )
        .arg(
            Arg::new("restore-path")
                .long("restore-path")
                .value_name("DIR")
                .help("Directory to restore into (defaults to the current directory)")
                .requires("restore"),
        );

    cmd
}

pub fn parse_args() -> Result<Config> {
    config_from_matches(build_command().get_matches())
}

/// Like [`parse_args`], but from an explicit argument list.
pub fn parse_from<I, T>(args: I) -> Result<Config>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    config_from_matches(build_command().try_get_matches_from(args)?)
}

fn config_from_matches(matches: clap::ArgMatches) -> Result<Config> {
    let project_root = matches
        .get_one::<String>("root")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let output_path = matches
        .get_one::<String>("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let mut config = Config::new(project_root, output_path);
    config.verbosity = matches.get_count("verbose");

    #[cfg(feature = "restore")]
    {
        config.restore_input = matches.get_one::<String>("restore").map(PathBuf::from);
        config.restore_path = matches.get_one::<String>("restore-path").map(PathBuf::from);
    }

    Ok(config)
}
