use crate::error::{FsError, Result};

/// Highest value `chmod` accepts: permission bits plus setuid/setgid/sticky
pub const MAX_MODE: u32 = 0o7777;

/// Parse a textual mode as base 8, e.g. `"755"` or `"0o644"`.
///
/// Decimal is never accepted: `"755"` is `0o755`, not 755.
pub fn parse_mode(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix("0o").unwrap_or(trimmed);

    let invalid = || FsError::InvalidMode {
        input: input.to_string(),
    };

    if digits.is_empty() {
        return Err(invalid());
    }
    let mode = u32::from_str_radix(digits, 8).map_err(|_| invalid())?;
    if mode > MAX_MODE {
        return Err(invalid());
    }
    Ok(mode)
}
