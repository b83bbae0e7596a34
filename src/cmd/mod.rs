use clap::{arg, command, Arg, ArgMatches, Command};
use log::debug;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ConfigError, Settings};
use crate::error::MotpError;
use crate::motp::{GetTime, Motp};
use crate::utils::is_unsigned;
use crate::writer::OutErr;

pub mod get;
pub mod secret;
pub mod verify;

pub enum CommandType {
    Get,
    Verify,
    Secret,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Get => "get",
            CommandType::Verify => "verify",
            CommandType::Secret => "secret",
        }
    }
}

#[derive(Debug, Error)]
pub enum CmdError {
    #[error(transparent)]
    Motp(#[from] MotpError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Invalid code")]
    InvalidCode,
    #[error("invalid value '{value}' for --{name}")]
    InvalidArgument { name: String, value: String },
    #[error("Missing command, see --help")]
    MissingCommand,
}

pub fn app() -> Command<'static> {
    command!()
        .about("Generate one-time passwords using Mobile-OTP (mOTP)")
        .args(&[
            arg!(-c --config [FILE] "Settings file (defaults to ~/.motp/config.toml)")
                .global(true),
            arg!(-v --verbose "Print debug output").global(true),
        ])
        .subcommand(get::subcommand())
        .subcommand(verify::subcommand())
        .subcommand(secret::subcommand())
}

/// Flags shared by every subcommand that builds a generator.
pub fn generator_args() -> Vec<Arg<'static>> {
    vec![
        arg!(-s --secret <SECRET> "mOTP secret value (often hex digits)").required(true),
        arg!(-p --pin <PIN> "mOTP PIN").required(true),
        arg!(-d --duration [SECONDS] "Period in seconds for which a code is valid")
            .alias("period")
            .validator(is_unsigned),
        arg!(-l --length [LENGTH] "Number of hex characters in the code")
            .alias("digits")
            .validator(is_unsigned),
    ]
}

pub fn build_motp(args: &ArgMatches, settings: &Settings) -> Result<Motp, CmdError> {
    let secret = args.value_of("secret").unwrap_or_default();
    let pin = args.value_of("pin").unwrap_or_default();
    let period = parse_opt::<u64>(args, "duration")?;
    let digits = parse_opt::<usize>(args, "length")?;

    let options = settings.options(period, digits);
    debug!(
        "Building generator with period {:?}, digits {:?}",
        options.period, options.digits
    );

    Ok(Motp::new(secret, pin, options)?)
}

pub(crate) fn parse_opt<T>(args: &ArgMatches, name: &str) -> Result<Option<T>, CmdError>
where
    T: FromStr,
{
    args.value_of(name)
        .map(|value| {
            value.parse::<T>().map_err(|_| CmdError::InvalidArgument {
                name: String::from(name),
                value: String::from(value),
            })
        })
        .transpose()
}

pub fn run<W>(matches: &ArgMatches, clock: &impl GetTime, writer: &mut W) -> Result<(), CmdError>
where
    W: OutErr,
{
    let load_settings = |args: &ArgMatches| {
        let config = args.value_of("config").or_else(|| matches.value_of("config"));
        Settings::resolve(config.map(Path::new))
    };

    match matches.subcommand() {
        Some(("get", get_args)) => {
            get::run_get(get_args, &load_settings(get_args)?, clock, writer)
        }
        Some(("verify", verify_args)) => {
            verify::run_verify(verify_args, &load_settings(verify_args)?, clock, writer)
        }
        Some(("secret", _)) => {
            secret::run_secret(writer);
            Ok(())
        }
        _ => Err(CmdError::MissingCommand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::constants::*;
    use crate::tests::mocks::{MockClock, MockOtpWriter};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn run_app(arg_vec: &[&str], writer: &mut MockOtpWriter) -> Result<(), CmdError> {
        let matches = app().try_get_matches_from(arg_vec).unwrap();
        run(&matches, &MockClock::new(), writer)
    }

    #[test]
    fn dispatches_get_with_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"digits = 32\n").unwrap();
        let config = file.path().to_str().unwrap();
        let mut writer = MockOtpWriter::new();

        let arg_vec = ["motp", "-c", config, "get", "-s", SECRET, "-p", PIN];
        run_app(&arg_vec, &mut writer).unwrap();

        // md5("9testsecret1234")
        assert_eq!(writer.out_str(), "36ed47264534da55b2e8a0a1f313b04b\n");
    }

    #[test]
    fn flags_override_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"digits = 32\n").unwrap();
        let config = file.path().to_str().unwrap();
        let mut writer = MockOtpWriter::new();

        let arg_vec = ["motp", "get", "-s", SECRET, "-p", PIN, "-l", "6", "--config", config];
        run_app(&arg_vec, &mut writer).unwrap();

        assert_eq!(writer.out_str(), format!("{}\n", MOCK_CLOCK_CODE));
    }

    #[test]
    fn reports_bad_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"digits = \"six\"\n").unwrap();
        let config = file.path().to_str().unwrap();
        let mut writer = MockOtpWriter::new();

        let arg_vec = ["motp", "-c", config, "get", "-s", SECRET, "-p", PIN];
        let err = run_app(&arg_vec, &mut writer).unwrap_err();

        assert!(matches!(err, CmdError::Config(ConfigError::Parse { .. })));
        assert_eq!(writer.out, Vec::new());
    }

    #[test]
    fn requires_a_subcommand() {
        let mut writer = MockOtpWriter::new();

        let err = run_app(&["motp"], &mut writer).unwrap_err();

        assert!(matches!(err, CmdError::MissingCommand));
    }

    #[test]
    fn accepts_period_and_digits_aliases() {
        let arg_vec = vec![
            "motp", "get", "-s", SECRET, "-p", PIN, "--period", "30", "--digits", "8",
        ];
        let matches = app().try_get_matches_from(arg_vec).unwrap();
        let (_, get_args) = matches.subcommand().unwrap();

        let motp = build_motp(get_args, &Settings::default()).unwrap();

        assert_eq!(motp.period(), 30);
        assert_eq!(motp.digits(), 8);
    }

    #[test]
    fn reports_values_that_do_not_fit() {
        let arg_vec = vec!["motp", "get", "-s", SECRET, "-p", PIN, "-l", "300"];
        let matches = app().try_get_matches_from(arg_vec).unwrap();
        let (_, get_args) = matches.subcommand().unwrap();

        let err = parse_opt::<u8>(get_args, "length").unwrap_err();

        assert_eq!(err.to_string(), "invalid value '300' for --length");
        assert_eq!(parse_opt::<u8>(get_args, "duration").unwrap(), None);
    }

    #[test]
    fn rejects_non_numeric_duration() {
        let arg_vec = vec!["motp", "get", "-s", SECRET, "-p", PIN, "-d", "soon"];

        let err = app().try_get_matches_from(arg_vec).unwrap_err();

        assert!(err.to_string().contains("not a non-negative integer"), "{}", err);
    }
}
