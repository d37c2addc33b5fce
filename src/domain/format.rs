/// Formats a price as Indonesian rupiah: rounded to whole rupiah, `.` as the
/// thousands separator, no decimals.
pub fn format_rupiah(value: f64) -> String {
    if !value.is_finite() {
        return format!("Rp {value}");
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let sign = if rounded < 0.0 { "-" } else { "" };

    format!("Rp {sign}{}", group_thousands(&digits, '.'))
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Rounds to a fixed number of decimal places for response payloads.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
