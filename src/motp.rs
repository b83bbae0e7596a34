use data_encoding::HEXLOWER;
use md5::{Digest, Md5};
use std::time::SystemTime;
use subtle::{Choice, ConstantTimeEq};

use crate::error::{MotpError, Result};

// Mobile-OTP http://motp.sourceforge.net/

// time-based moving factor: unix seconds / period
// hash input: moving factor (decimal) ++ secret ++ pin, no separators
// code: first `digits` chars of the lowercase hex MD5 digest

pub const DEFAULT_PERIOD: u64 = 10;
pub const DEFAULT_DIGITS: usize = 6;
pub const MAX_DIGITS: usize = 32;
/// Largest number of steps `verify` accepts on either side of now.
pub const MAX_WINDOW: u64 = 100;

pub trait GetTime {
    fn get_now(&self) -> SystemTime;
}

pub struct Clock {}

impl Clock {
    pub fn new() -> Self {
        Clock {}
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::new()
    }
}

impl GetTime for Clock {
    fn get_now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Whole seconds since the Unix epoch, rounded down. Readings before the
/// epoch come out negative and are rejected by [`Motp::generate`].
pub fn unix_seconds(clock: &impl GetTime) -> i64 {
    match clock.get_now().duration_since(SystemTime::UNIX_EPOCH) {
        Ok(elapsed) => i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).unwrap_or(i64::MAX);
            -secs - i64::from(before.subsec_nanos() > 0)
        }
    }
}

/// Overrides applied on top of the defaults when building a [`Motp`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotpOptions {
    pub period: Option<u64>,
    pub digits: Option<usize>,
}

/// An immutable mOTP generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motp {
    secret: String,
    pin: String,
    period: u64,
    digits: usize,
}

impl Motp {
    /// Builds a generator, validating `period` (>= 1) and `digits` (1-32).
    /// The secret and pin are taken as given.
    pub fn new(secret: &str, pin: &str, options: MotpOptions) -> Result<Self> {
        let period = options.period.unwrap_or(DEFAULT_PERIOD);
        let digits = options.digits.unwrap_or(DEFAULT_DIGITS);

        if period < 1 {
            return Err(MotpError::InvalidConfiguration(String::from(
                "period must be positive",
            )));
        }
        if !(1..=MAX_DIGITS).contains(&digits) {
            return Err(MotpError::InvalidConfiguration(format!(
                "digits must be in the range 1-{}",
                MAX_DIGITS
            )));
        }

        Ok(Motp {
            secret: String::from(secret),
            pin: String::from(pin),
            period,
            digits,
        })
    }

    pub fn with_defaults(secret: &str, pin: &str) -> Result<Self> {
        Motp::new(secret, pin, MotpOptions::default())
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Code for the time step containing `unix_seconds`.
    pub fn generate(&self, unix_seconds: i64) -> Result<String> {
        let moving_factor = self.moving_factor(unix_seconds)?;
        Ok(self.code_for_step(moving_factor))
    }

    pub fn generate_current(&self) -> Result<String> {
        self.generate_at(&Clock::new())
    }

    pub fn generate_at(&self, clock: &impl GetTime) -> Result<String> {
        self.generate(unix_seconds(clock))
    }

    /// Seconds until the code for `unix_seconds` rotates, in `1..=period`.
    pub fn ttl(&self, unix_seconds: i64) -> Result<u64> {
        check_timestamp(unix_seconds)?;
        // non-negative after the check
        let elapsed = unix_seconds as u64 % self.period;
        Ok(self.period - elapsed)
    }

    /// Checks `code` against the steps within `window` (at most
    /// [`MAX_WINDOW`]) of the step holding `unix_seconds`. Steps before the
    /// epoch are skipped. Every step is compared in constant time.
    pub fn verify(&self, code: &str, unix_seconds: i64, window: u64) -> Result<bool> {
        if window > MAX_WINDOW {
            return Err(MotpError::InvalidConfiguration(format!(
                "window must be at most {}",
                MAX_WINDOW
            )));
        }
        let moving_factor = self.moving_factor(unix_seconds)?;
        if code.len() != self.digits {
            return Ok(false);
        }

        let code = code.to_ascii_lowercase();
        // bounded by MAX_WINDOW above
        let window = window as i64;
        let first = moving_factor.saturating_sub(window).max(0);
        let last = moving_factor.saturating_add(window);

        let matched = (first..=last).fold(Choice::from(0), |matched, mf| {
            matched | self.code_for_step(mf).as_bytes().ct_eq(code.as_bytes())
        });
        Ok(matched.into())
    }

    pub fn verify_current(&self, code: &str, window: u64) -> Result<bool> {
        self.verify_at(code, window, &Clock::new())
    }

    pub fn verify_at(&self, code: &str, window: u64, clock: &impl GetTime) -> Result<bool> {
        self.verify(code, unix_seconds(clock), window)
    }

    fn moving_factor(&self, unix_seconds: i64) -> Result<i64> {
        check_timestamp(unix_seconds)?;
        let period = i64::try_from(self.period).unwrap_or(i64::MAX);
        Ok(unix_seconds / period)
    }

    fn code_for_step(&self, moving_factor: i64) -> String {
        let mut hasher = Md5::new();
        hasher.update(format!("{}{}{}", moving_factor, self.secret, self.pin).as_bytes());
        let digest = hasher.finalize();

        let mut code = HEXLOWER.encode(&digest);
        code.truncate(self.digits);
        code
    }
}

fn check_timestamp(unix_seconds: i64) -> Result<()> {
    if unix_seconds < 0 {
        return Err(MotpError::InvalidTimestamp(unix_seconds));
    }
    Ok(())
}
