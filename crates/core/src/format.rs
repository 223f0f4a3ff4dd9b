//! Display formatting for byte counts.
//!
//! Sizes are stored as numeric byte counts everywhere in the domain model;
//! this helper produces the dashboard-style human-readable form (`12.3 MB`)
//! at the presentation edge.

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count as a human-readable size.
///
/// Uses 1024-based units. Values below 1 KB print as whole bytes; larger
/// values print with one decimal place, dropping a trailing `.0`.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 10.0).round() / 10.0;
    if (rounded - rounded.trunc()).abs() < f64::EPSILON {
        format!("{} {}", rounded.trunc() as u64, UNITS[unit])
    } else {
        format!("{rounded:.1} {}", UNITS[unit])
    }
}
