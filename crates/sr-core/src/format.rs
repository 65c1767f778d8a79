//! Display helpers for counts, prices and timestamps.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Compact count: `15420` -> `"15.4K"`.
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000_000.0 {
        format!("{:.1}B", num / 1_000_000_000.0)
    } else if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Won amounts: large values are abbreviated, small ones digit-grouped.
pub fn format_krw(num: f64) -> String {
    if num >= 1_000_000_000_000.0 {
        format!("₩{:.2}T", num / 1_000_000_000_000.0)
    } else if num >= 1_000_000_000.0 {
        format!("₩{:.1}B", num / 1_000_000_000.0)
    } else if num >= 1_000_000.0 {
        format!("₩{:.1}M", num / 1_000_000.0)
    } else {
        format!("₩{}", group_thousands(num))
    }
}

fn group_thousands(num: f64) -> String {
    let fixed = format!("{:.3}", num.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if num < 0.0 { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

/// "just now", "5m ago", "3h ago", "2d ago", "4mo ago", "1y ago".
pub fn format_relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{minutes}m ago");
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours}h ago");
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{days}d ago");
    }
    let months = days / 30;
    if months < 12 {
        return format!("{months}mo ago");
    }
    format!("{}y ago", months / 12)
}

/// How a score is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn of(score: i64) -> Self {
        match score {
            s if s > 0 => Sentiment::Positive,
            s if s < 0 => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn compact_numbers() {
        assert_eq!(format_number(15420.0), "15.4K");
        assert_eq!(format_number(2_345_678.0), "2.3M");
        assert_eq!(format_number(432_500_000_000.0), "432.5B");
        assert_eq!(format_number(999.0), "999");
    }

    #[test]
    fn won_amounts() {
        assert_eq!(format_krw(432_500_000_000_000.0), "₩432.50T");
        assert_eq!(format_krw(72_500.0), "₩72,500");
        assert_eq!(format_krw(1_328.5), "₩1,328.5");
        assert_eq!(format_krw(999.0), "₩999");
    }

    #[test]
    fn relative_times() {
        let now = Utc::now();
        assert_eq!(format_relative_time(now - Duration::seconds(5), now), "just now");
        assert_eq!(format_relative_time(now - Duration::minutes(45), now), "45m ago");
        assert_eq!(format_relative_time(now - Duration::hours(5), now), "5h ago");
        assert_eq!(format_relative_time(now - Duration::days(3), now), "3d ago");
        assert_eq!(format_relative_time(now - Duration::days(90), now), "3mo ago");
        assert_eq!(format_relative_time(now - Duration::days(800), now), "2y ago");
    }

    #[test]
    fn sentiment_follows_sign() {
        assert_eq!(Sentiment::of(3), Sentiment::Positive);
        assert_eq!(Sentiment::of(-1), Sentiment::Negative);
        assert_eq!(Sentiment::of(0), Sentiment::Neutral);
    }
}
