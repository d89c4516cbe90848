/// `1234567` -> `"1,234,567"`.
pub fn format_number(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Abbreviated score: `1.23B`, `4.56M`, `7.8K`, or the plain number below 1000.
pub fn format_score(score: i64) -> String {
    let s = score as f64;
    if score >= 1_000_000_000 {
        format!("{:.2}B", s / 1_000_000_000.0)
    } else if score >= 1_000_000 {
        format!("{:.2}M", s / 1_000_000.0)
    } else if score >= 1_000 {
        format!("{:.1}K", s / 1_000.0)
    } else {
        format_number(score)
    }
}

/// `0.5` -> `"30m"`, `5.25` -> `"5.3h"`, `50.0` -> `"2d 2h"`.
pub fn format_time(hours: f64) -> String {
    if hours < 1.0 {
        return format!("{}m", (hours * 60.0).round());
    }
    if hours < 24.0 {
        return format!("{hours:.1}h");
    }
    let days = (hours / 24.0).floor();
    let rest = hours % 24.0;
    format!("{days}d {rest:.0}h")
}

pub fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}
