// Compact ages for list columns: "1h1s", "3d4h", "42s".

use chrono::{DateTime, Utc};

const UNITS: [(i64, char); 4] = [(86_400, 'd'), (3_600, 'h'), (60, 'm'), (1, 's')];

/// Formats a duration as its two most significant non-zero units.
///
/// Returns None below one second. Zero components are skipped rather than ending
/// the output, so `3_601_000` is `"1h1s"`; anything past the second unit is dropped,
/// so `86_461_000` is `"1d1m"`.
pub fn format_age(milliseconds: i64) -> Option<String> {
    if milliseconds < 1000 {
        return None;
    }
    let mut remaining = milliseconds / 1000;
    let mut age = String::new();
    let mut shown = 0;
    for (unit_secs, suffix) in UNITS {
        let count = remaining / unit_secs;
        remaining %= unit_secs;
        if count > 0 {
            age.push_str(&count.to_string());
            age.push(suffix);
            shown += 1;
            if shown == 2 {
                break;
            }
        }
    }
    Some(age)
}

/// Age of something created at `created`, as seen at `now`. None if `created` is in the future
/// or less than a second ago.
pub fn format_age_since(created: DateTime<Utc>, now: DateTime<Utc>) -> Option<String> {
    format_age((now - created).num_milliseconds())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_are_descending() {
        assert!(UNITS.windows(2).all(|w| w[0].0 > w[1].0));
    }
}
