//! Elapsed-time display formatting.

/// Formats a whole-second count as `HH:MM:SS`.
///
/// Each unit is zero-padded to two digits. The hour field widens past two
/// digits rather than wrapping, so very long-lived tasks stay readable.
#[must_use]
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
