use data_encoding::HEXLOWER;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::motp::MAX_WINDOW;

const SECRET_BYTES: usize = 8;

// Generate a 16 character lowercase hex secret
pub fn generate_secret() -> String {
    let mut dest = [0u8; SECRET_BYTES];
    OsRng.fill_bytes(&mut dest);
    HEXLOWER.encode(&dest)
}

// Validate a numeric argument before it reaches the generator
pub fn is_unsigned(value: &str) -> Result<(), String> {
    match value.parse::<u64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(format!("'{}' is not a non-negative integer", value)),
    }
}

// Validate a verification window, capped so verify stays cheap
pub fn is_window(value: &str) -> Result<(), String> {
    match value.parse::<u64>() {
        Ok(window) if window <= MAX_WINDOW => Ok(()),
        _ => Err(format!(
            "'{}' is not a window between 0 and {}",
            value, MAX_WINDOW
        )),
    }
}
