//! Date and time primitives used by the formatters.
//!
//! Patterns use calendar-widget tokens rather than `strftime` directives:
//!
//! | Token | Meaning | Example |
//! |-------|---------|---------|
//! | `YYYYMMDD` | compact date | `20240105` |
//! | `YYYY` / `YY` | year, 4 or 2 digits | `2024` / `24` |
//! | `MM` / `M` | month, padded or not | `01` / `1` |
//! | `DD` / `D` | day of month, padded or not | `05` / `5` |
//! | `HH` / `H` | 24-hour clock hour | `09` / `9` |
//! | `hh` / `h` | 12-hour clock hour (12 for noon and midnight) | `09` / `9` |
//! | `mm` / `m` | minute | `07` / `7` |
//! | `ss` / `s` | second | `03` / `3` |
//! | `tt` | meridiem marker | `am` / `pm` |
//!
//! Everything else in a pattern is copied through.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
};

const MINUTES_PER_HOUR: u32 = 60;

// Offset-less layouts accepted by `parse_timestamp`, read as UTC.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DAY_NAMES: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

// Longest tokens first so `YYYY` wins over `YY`, `MM` over `M`, etc.
const TOKENS: [&str; 16] = [
    "YYYYMMDD", "YYYY", "YY", "MM", "M", "DD", "D", "HH", "H", "hh", "h", "mm", "m", "ss", "s",
    "tt",
];

/// Left-pads the magnitude of `value` with zeros to `width` digits.
///
/// A negative sign stays in front of the padded digits.
///
/// ```rust
/// use daybook::time::leading_zero;
///
/// assert_eq!(leading_zero(5, 2), "05");
/// assert_eq!(leading_zero(123, 2), "123");
/// assert_eq!(leading_zero(-5, 2), "-05");
/// ```
pub fn leading_zero(value: i64, width: usize) -> String {
    if value < 0 {
        format!("-{:0width$}", value.unsigned_abs(), width = width)
    } else {
        format!("{:0width$}", value, width = width)
    }
}

/// Formats a minute count as `HH:MM`, hours unbounded.
pub fn hours_minutes(minutes: u32) -> String {
    format!(
        "{}:{}",
        leading_zero(i64::from(minutes / MINUTES_PER_HOUR), 2),
        leading_zero(i64::from(minutes % MINUTES_PER_HOUR), 2)
    )
}

/// Formats a point in time with a token pattern (see the module docs).
///
/// ```rust
/// use chrono::{FixedOffset, TimeZone};
/// use daybook::time::to_format;
///
/// let dt = FixedOffset::east_opt(9 * 3600)
///     .unwrap()
///     .with_ymd_and_hms(2024, 1, 5, 13, 7, 0)
///     .unwrap();
/// assert_eq!(to_format(&dt, "YYYY.MM.DD hh:mm tt"), "2024.01.05 01:07 pm");
/// assert_eq!(to_format(&dt, "HH:mm"), "13:07");
/// ```
pub fn to_format<T>(dt: &T, pattern: &str) -> String
where
    T: Datelike + Timelike,
{
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;

    'scan: while !rest.is_empty() {
        for token in TOKENS {
            if let Some(after) = rest.strip_prefix(token) {
                out.push_str(&format_token(dt, token));
                rest = after;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }

    out
}

fn format_token<T>(dt: &T, token: &str) -> String
where
    T: Datelike + Timelike,
{
    let hour12 = match dt.hour() % 12 {
        0 => 12,
        h => h,
    };

    match token {
        "YYYYMMDD" => format!(
            "{}{}{}",
            leading_zero(i64::from(dt.year()), 4),
            leading_zero(i64::from(dt.month()), 2),
            leading_zero(i64::from(dt.day()), 2)
        ),
        "YYYY" => leading_zero(i64::from(dt.year()), 4),
        "YY" => leading_zero(i64::from(dt.year().rem_euclid(100)), 2),
        "MM" => leading_zero(i64::from(dt.month()), 2),
        "M" => dt.month().to_string(),
        "DD" => leading_zero(i64::from(dt.day()), 2),
        "D" => dt.day().to_string(),
        "HH" => leading_zero(i64::from(dt.hour()), 2),
        "H" => dt.hour().to_string(),
        "hh" => leading_zero(i64::from(hour12), 2),
        "h" => hour12.to_string(),
        "mm" => leading_zero(i64::from(dt.minute()), 2),
        "m" => dt.minute().to_string(),
        "ss" => leading_zero(i64::from(dt.second()), 2),
        "s" => dt.second().to_string(),
        "tt" => meridiem(dt.hour()).to_string(),
        other => other.to_string(),
    }
}

fn meridiem(hour: u32) -> &'static str {
    if hour < 12 {
        "am"
    } else {
        "pm"
    }
}

/// True when both points fall on the same calendar date, each read in its
/// own time zone.
pub fn is_same_date<A, B>(a: &A, b: &B) -> bool
where
    A: Datelike,
    B: Datelike,
{
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

/// Short lowercase weekday name for a Sunday-based index.
///
/// Indices past 6 wrap around.
pub fn day_name(index: u32) -> &'static str {
    DAY_NAMES[(index % 7) as usize]
}

/// Uppercases the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders a signed minute offset from UTC as `GMT±HH:MM`.
///
/// ```rust
/// use daybook::time::format_gmt_offset;
///
/// assert_eq!(format_gmt_offset(-330), "GMT-05:30");
/// assert_eq!(format_gmt_offset(90), "GMT+01:30");
/// assert_eq!(format_gmt_offset(0), "GMT+00:00");
/// ```
pub fn format_gmt_offset(offset_minutes: i32) -> String {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let magnitude = offset_minutes.unsigned_abs();
    format!("GMT{}{}", sign, hours_minutes(magnitude))
}

/// Offset of an IANA zone from UTC at `instant`, in minutes.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use daybook::time::offset_minutes;
///
/// let winter = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
/// let summer = Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap();
/// assert_eq!(offset_minutes(chrono_tz::America::New_York, winter), -300);
/// assert_eq!(offset_minutes(chrono_tz::America::New_York, summer), -240);
/// assert_eq!(offset_minutes(chrono_tz::Asia::Kolkata, winter), 330);
/// ```
pub fn offset_minutes(zone: chrono_tz::Tz, instant: DateTime<Utc>) -> i32 {
    zone.offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc()
        / 60
}

/// Parses a timestamp, with or without a UTC offset.
///
/// RFC 3339 input keeps its offset. Local date-times (`2024-01-01T09:00`,
/// `2024-01-01 09:00:30`) and bare dates are read as UTC.
///
/// ```rust
/// use daybook::time::{parse_timestamp, to_format};
///
/// let dt = parse_timestamp("2024-01-01T09:00").unwrap();
/// assert_eq!(to_format(&dt, "YYYY.MM.DD HH:mm"), "2024.01.01 09:00");
/// assert_eq!(dt.offset().local_minus_utc(), 0);
///
/// let dt = parse_timestamp("2024-01-01T09:00:00+09:00").unwrap();
/// assert_eq!(dt.offset().local_minus_utc(), 9 * 3600);
///
/// assert!(parse_timestamp("soon").is_none());
/// ```
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }
    let naive = NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })?;
    Some(FixedOffset::east_opt(0)?.from_utc_datetime(&naive))
}
