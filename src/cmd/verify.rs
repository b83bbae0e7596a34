use clap::{arg, command, ArgMatches, Command};
use log::debug;

use super::{build_motp, generator_args, parse_opt, CmdError, CommandType};
use crate::config::Settings;
use crate::motp::{unix_seconds, GetTime};
use crate::utils::is_window;
use crate::writer::OutErr;

const DEFAULT_WINDOW: u64 = 3;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Verify.as_str())
        .about("Verify a one-time password against the current time")
        .args(generator_args())
        .args(&[
            arg!(-t --token <TOKEN> "One-time password to verify").required(true),
            arg!(-w --window [STEPS] "Time steps accepted on either side of now (default 3)")
                .validator(is_window),
        ])
}

pub fn run_verify<W>(
    verify_args: &ArgMatches,
    settings: &Settings,
    clock: &impl GetTime,
    writer: &mut W,
) -> Result<(), CmdError>
where
    W: OutErr,
{
    let motp = build_motp(verify_args, settings)?;
    let token = verify_args.value_of("token").unwrap_or_default();
    let window = parse_opt::<u64>(verify_args, "window")?.unwrap_or(DEFAULT_WINDOW);

    let now = unix_seconds(clock);
    debug!("Verifying {} at {} with window {}", token, now, window);

    if motp.verify(token, now, window)? {
        writer.writeln(&format!("{} valid", token));
        Ok(())
    } else {
        Err(CmdError::InvalidCode)
    }
}
