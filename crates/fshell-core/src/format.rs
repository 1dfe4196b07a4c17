use time::OffsetDateTime;

const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Human-readable byte count in 1024-based units, largest unit first.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, SIZE_UNITS[0])
    } else {
        // Ties round up (1280 -> 1.3 KB); `{:.1}` alone rounds half to even
        let rounded = (value * 10.0).round() / 10.0;
        format!("{:.1} {}", rounded, SIZE_UNITS[unit])
    }
}

/// Symbolic `rwxrwxrwx` rendering of the low nine permission bits.
/// Type and setuid/setgid/sticky bits are ignored.
pub fn format_permissions(mode: u32) -> String {
    const BITS: [(u32, char); 9] = [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ];
    BITS.iter()
        .map(|&(bit, c)| if mode & bit != 0 { c } else { '-' })
        .collect()
}

/// Calendar date (UTC) of a modification timestamp, `-` if unknown
pub fn format_modified(secs: Option<u64>) -> String {
    secs.and_then(|s| i64::try_from(s).ok())
        .and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok())
        .map(|dt| dt.date().to_string())
        .unwrap_or_else(|| "-".to_string())
}
