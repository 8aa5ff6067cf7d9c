//! Human-readable formatting helpers shared by notifications and reports

/// Format byte counts with decimal units (kB, MB, GB, ...)
///
/// # Examples
/// ```
/// use file_stats::utils::format::format_bytes;
///
/// assert_eq!(format_bytes(0), "0 Bytes");
/// assert_eq!(format_bytes(1), "1 Byte");
/// assert_eq!(format_bytes(1024), "1.0 kB");
/// assert_eq!(format_bytes(3_500_000), "3.5 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["kB", "MB", "GB", "TB", "PB", "EB"];
    const BASE: f64 = 1000.0;

    match bytes {
        1 => return "1 Byte".to_string(),
        b if (b as f64) < BASE => return format!("{} Bytes", b),
        _ => {}
    }

    let mut value = bytes as f64 / BASE;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < BASE {
            break;
        }
        value /= BASE;
        unit = next;
    }
    format!("{:.1} {}", value, unit)
}

/// `"{count} {singular}"` or `"{count} {plural}"`
pub fn pluralize(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
