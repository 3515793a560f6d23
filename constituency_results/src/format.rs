//! Number formatting for chart labels.

use crate::config::NumberFormat;

/// Formats a vote total with the grouping of the given format.
///
/// ```
/// use constituency_results::format::format_votes;
/// use constituency_results::NumberFormat;
///
/// assert_eq!(format_votes(1234567, NumberFormat::Indian), "12,34,567");
/// assert_eq!(format_votes(1234567, NumberFormat::Western), "1,234,567");
/// assert_eq!(format_votes(0, NumberFormat::Indian), "0");
/// ```
pub fn format_votes(value: u64, format: NumberFormat) -> String {
    let digits = value.to_string();
    match format {
        NumberFormat::Indian => group_digits(&digits, &[3, 2], ','),
        NumberFormat::Western => group_digits(&digits, &[3], ','),
        NumberFormat::Plain => digits,
    }
}

/// Formats an axis tick. Whole values are grouped like vote totals; values
/// too large for a vote total are written as is.
pub fn format_tick(value: f64, format: NumberFormat) -> String {
    if value.fract() == 0.0 && value >= 0.0 && value < u64::MAX as f64 {
        format_votes(value as u64, format)
    } else {
        format!("{}", value)
    }
}

/// Inserts separators into a string of digits, starting from the right.
///
/// `grouping` lists the sizes of the groups from the right; the last size
/// repeats for the remaining digits.
pub fn group_digits(digits: &str, grouping: &[usize], separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = chars.len();
    let mut group_idx = 0;
    while end > 0 {
        let size = match grouping.get(group_idx).or_else(|| grouping.last()) {
            Some(s) if *s > 0 => *s,
            _ => end,
        };
        let start = end.saturating_sub(size);
        groups.push(chars[start..end].iter().collect());
        end = start;
        group_idx += 1;
    }
    groups.reverse();
    groups.join(&separator.to_string())
}
