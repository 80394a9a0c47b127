//! Human-readable durations for log fields.

const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

/// Render `secs` with its two most significant non-zero units, e.g. `1d 2h`
/// or `45s`. Zero renders as `0s`.
pub fn format_duration(secs: u64) -> String {
    let parts: Vec<String> = UNITS
        .iter()
        .scan(secs, |rest, &(size, unit)| {
            let count = *rest / size;
            *rest %= size;
            Some((count, unit))
        })
        .filter(|(count, _)| *count > 0)
        .take(2)
        .map(|(count, unit)| format!("{count}{unit}"))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}
