//! Command-line parsing for both front-ends.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};

/// Arguments recognised by `getpanfsacl`.
#[derive(Debug, Default)]
pub(crate) struct GetArgs {
    pub(crate) show_help: bool,
    pub(crate) recursive: bool,
    pub(crate) verbose: bool,
    pub(crate) debug: bool,
    pub(crate) files: Vec<PathBuf>,
}

/// Arguments recognised by `setpanfsacl`.
#[derive(Debug, Default)]
pub(crate) struct SetArgs {
    pub(crate) show_help: bool,
    pub(crate) recursive: bool,
    pub(crate) verbose: bool,
    pub(crate) debug: bool,
    pub(crate) dry_run: bool,
    pub(crate) remove_all: bool,
    pub(crate) inherit: bool,
    pub(crate) modify: Vec<String>,
    pub(crate) remove: Vec<String>,
    pub(crate) files: Vec<PathBuf>,
}

fn flag(id: &'static str, short: char, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .short(short)
        .help(help)
        .action(ArgAction::SetTrue)
}

fn files_arg() -> Arg {
    Arg::new("files")
        .action(ArgAction::Append)
        .value_parser(OsStringValueParser::new())
}

/// Builds the `clap` command used by `getpanfsacl`.
fn get_command() -> Command {
    Command::new("getpanfsacl")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(flag("help", 'h', "Show this help message and exit."))
        .arg(flag("recursive", 'R', "List ACLs of all files and directories recursively."))
        .arg(flag("verbose", 'v', "Print raw attribute values and ignored objects."))
        .arg(flag("debug", 'd', "Print debug diagnostics."))
        .arg(files_arg())
}

/// Builds the `clap` command used by `setpanfsacl`.
fn set_command() -> Command {
    Command::new("setpanfsacl")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(flag("help", 'h', "Show this help message and exit."))
        .arg(flag("recursive", 'R', "Apply changes recursively."))
        .arg(flag("verbose", 'v', "Print changes."))
        .arg(flag("debug", 'd', "Print debug diagnostics."))
        .arg(flag("dry-run", 'n', "Report changes without writing them."))
        .arg(flag("remove-all", 'b', "Remove all extended ACL entries."))
        .arg(flag("inherit", 'i', "Make directory entries inheritable."))
        .arg(
            Arg::new("modify")
                .long("modify")
                .short('m')
                .value_name("ACL")
                .help("Add or replace the entry for a user or group.")
                .allow_hyphen_values(true)
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("remove")
                .long("remove")
                .short('x')
                .value_name("ACL")
                .help("Remove the entries of a user or group.")
                .action(ArgAction::Append),
        )
        .arg(files_arg())
}

fn with_program_name<I, S>(arguments: I, program: &str) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();
    if args.is_empty() {
        args.push(OsString::from(program));
    }
    args
}

fn take_files(matches: &mut clap::ArgMatches) -> Vec<PathBuf> {
    matches
        .remove_many::<OsString>("files")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default()
}

fn take_strings(matches: &mut clap::ArgMatches, id: &str) -> Vec<String> {
    matches
        .remove_many::<String>(id)
        .map(Iterator::collect)
        .unwrap_or_default()
}

/// Parses `getpanfsacl` arguments, program name included.
pub(crate) fn parse_get_args<I, S>(arguments: I) -> Result<GetArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let args = with_program_name(arguments, "getpanfsacl");
    let mut matches = get_command().try_get_matches_from(args)?;

    Ok(GetArgs {
        show_help: matches.get_flag("help"),
        recursive: matches.get_flag("recursive"),
        verbose: matches.get_flag("verbose"),
        debug: matches.get_flag("debug"),
        files: take_files(&mut matches),
    })
}

/// Parses `setpanfsacl` arguments, program name included.
pub(crate) fn parse_set_args<I, S>(arguments: I) -> Result<SetArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let args = with_program_name(arguments, "setpanfsacl");
    let mut matches = set_command().try_get_matches_from(args)?;

    Ok(SetArgs {
        show_help: matches.get_flag("help"),
        recursive: matches.get_flag("recursive"),
        verbose: matches.get_flag("verbose"),
        debug: matches.get_flag("debug"),
        dry_run: matches.get_flag("dry-run"),
        remove_all: matches.get_flag("remove-all"),
        inherit: matches.get_flag("inherit"),
        modify: take_strings(&mut matches, "modify"),
        remove: take_strings(&mut matches, "remove"),
        files: take_files(&mut matches),
    })
}
