use clap::{arg, command, ArgMatches, Command};
use log::debug;

use super::{build_motp, generator_args, CmdError, CommandType};
use crate::config::Settings;
use crate::motp::{unix_seconds, GetTime};
use crate::writer::OutErr;

pub fn subcommand() -> Command<'static> {
    command!(CommandType::Get.as_str())
        .about("Get the one-time password for the current time")
        .args(generator_args())
        .arg(arg!(--ttl "Also print the seconds until the code rotates").required(false))
}

pub fn run_get<W>(
    get_args: &ArgMatches,
    settings: &Settings,
    clock: &impl GetTime,
    writer: &mut W,
) -> Result<(), CmdError>
where
    W: OutErr,
{
    let motp = build_motp(get_args, settings)?;
    let now = unix_seconds(clock);
    debug!("Generating code at {}", now);

    let otp = motp.generate(now)?;
    if get_args.is_present("ttl") {
        let ttl = motp.ttl(now)?;
        writer.writeln(&format!("{} ttl: {}", otp, ttl));
    } else {
        writer.writeln(&otp);
    }

    Ok(())
}
