use clap::{ArgMatches, Command};

/// Parses `arg_vec` through a bare `motp` command holding only `subcommand`
/// and returns the subcommand's matches.
pub fn get_cmd_args(
    command_str: &str,
    subcommand: Command,
    arg_vec: &[&str],
) -> Result<ArgMatches, clap::Error> {
    let matches = Command::new("motp")
        .subcommand(subcommand)
        .try_get_matches_from(arg_vec)?;

    match matches.subcommand() {
        Some((cmd, cmd_args)) if cmd == command_str => Ok(cmd_args.clone()),
        _ => panic!("Expected {} subcommand", command_str),
    }
}
