use log::debug;
use std::process;

use motp::cmd::{app, run};
use motp::motp::Clock;
use motp::writer::{ConsoleWriter, OutErr};

fn main() {
    let matches = app().get_matches();

    let mut log_builder = env_logger::Builder::from_default_env();
    if matches.is_present("verbose") {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else {
        log_builder.filter(None, log::LevelFilter::Error);
    }
    log_builder.target(env_logger::Target::Stderr);
    log_builder.init();

    let mut writer = ConsoleWriter::new();

    if let Err(err) = run(&matches, &Clock::new(), &mut writer) {
        debug!("Command failed: {:?}", err);
        writer.writeln_err(&err.to_string());
        process::exit(1);
    }
}
