//! Mobile-OTP (mOTP) one-time password generation.
//!
//! ```
//! use motp::{Motp, MotpOptions};
//!
//! let motp = Motp::new("testsecret", "1234", MotpOptions::default()).unwrap();
//! assert_eq!(motp.generate(1625097600).unwrap(), "23fb79");
//! ```

pub mod cmd;
pub mod config;
pub mod error;
pub mod motp;
pub mod utils;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::error::MotpError;
pub use crate::motp::{Clock, GetTime, Motp, MotpOptions};
