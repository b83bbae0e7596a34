use std::io::{self, Stderr, Stdout, Write};

/// Sink for command output, swapped for a buffer in tests.
pub trait OutErr {
    fn write_err(&mut self, s: &str);
    fn write(&mut self, s: &str);

    fn writeln(&mut self, s: &str) {
        self.write(&format!("{}\n", s));
    }

    fn writeln_err(&mut self, s: &str) {
        self.write_err(&format!("{}\n", s));
    }
}

pub struct ConsoleWriter {
    out: Stdout,
    err: Stderr,
}

impl ConsoleWriter {
    pub fn new() -> Self {
        ConsoleWriter {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        ConsoleWriter::new()
    }
}

impl OutErr for ConsoleWriter {
    fn write_err(&mut self, s: &str) {
        let mut err = self.err.lock();
        if let Err(e) = err.write_all(s.as_bytes()).and_then(|_| err.flush()) {
            log::warn!("Unable to write to stderr: {}", e);
        }
    }

    fn write(&mut self, s: &str) {
        let mut out = self.out.lock();
        if let Err(e) = out.write_all(s.as_bytes()).and_then(|_| out.flush()) {
            log::warn!("Unable to write to stdout: {}", e);
        }
    }
}
