//! Command tokenizing and the pure range/datetime parsers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use nom::{bytes::complete::take_while1, character::complete::space1, multi::separated_list1, IResult};

/// A parsed command: uppercased name plus its raw argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub args: Vec<String>,
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.'
}

fn is_arg_char(c: char) -> bool {
    !c.is_whitespace()
}

fn parse_name(input: &str) -> IResult<&str, &str> {
    take_while1(is_name_char)(input)
}

fn parse_args(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(space1, take_while1(is_arg_char))(input)
}

/// Tokenizes a single command line into a name and argument list.
/// Returns `None` for a blank line or malformed input.
#[must_use]
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (rest, name) = parse_name(trimmed).ok()?;
    let rest = rest.trim_start();
    let args = if rest.is_empty() {
        Vec::new()
    } else {
        let (_, args) = parse_args(rest).ok()?;
        args.into_iter().map(str::to_string).collect()
    };
    Some(Command {
        name: name.to_uppercase(),
        args,
    })
}

/// A parsed article range, per spec.md §4.2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    /// `"N"` — a single article number.
    Single(u64),
    /// `"N-"` — open upper bound, resolved by the caller from `group.high`.
    Open(u64),
    /// `"N-M"` — a closed, inclusive range.
    Closed(u64, u64),
}

/// Parses an NNTP range argument: `"N"`, `"N-"`, or `"N-M"`.
/// Rejects empty components, extra dashes, and non-decimal text.
#[must_use]
pub fn parse_range(text: &str) -> Option<Range> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    match text.split_once('-') {
        None => text.parse().ok().map(Range::Single),
        Some((lo, hi)) => {
            if lo.is_empty() || lo.contains('-') {
                return None;
            }
            let lo: u64 = lo.parse().ok()?;
            if hi.is_empty() {
                Some(Range::Open(lo))
            } else if hi.contains('-') {
                None
            } else {
                let hi: u64 = hi.parse().ok()?;
                Some(Range::Closed(lo, hi))
            }
        }
    }
}

/// Parses an NNTP date+time pair (`YYYYMMDD`/`YYMMDD` + `HHMMSS`) into a
/// UTC instant, applying the legacy-century heuristic
/// (`year < 70 → +2000`, `70 ≤ year < 100 → +1900`).
///
/// When `time_str` is `None`, the last 6 characters of `date_str` are
/// split off and used as the time, with the remaining prefix as the date
/// (the shape `DATE`'s `111 YYYYMMDDHHMMSS` response is parsed back into).
pub fn parse_datetime(
    date_str: &str,
    time_str: Option<&str>,
) -> Result<DateTime<Utc>, &'static str> {
    let (date_str, time_str) = match time_str {
        Some(time_str) => (date_str, time_str),
        None => {
            if date_str.len() < 6 {
                return Err("invalid combined date/time");
            }
            let split = date_str.len() - 6;
            (&date_str[..split], &date_str[split..])
        }
    };

    if time_str.len() != 6 || !time_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err("invalid time component");
    }
    if !(date_str.len() == 6 || date_str.len() == 8)
        || !date_str.bytes().all(|b| b.is_ascii_digit())
    {
        return Err("invalid date component");
    }

    let (year, month, day) = if date_str.len() == 8 {
        let year: i32 = date_str[0..4].parse().map_err(|_| "invalid year")?;
        let month: u32 = date_str[4..6].parse().map_err(|_| "invalid month")?;
        let day: u32 = date_str[6..8].parse().map_err(|_| "invalid day")?;
        (year, month, day)
    } else {
        let yy: i32 = date_str[0..2].parse().map_err(|_| "invalid year")?;
        let month: u32 = date_str[2..4].parse().map_err(|_| "invalid month")?;
        let day: u32 = date_str[4..6].parse().map_err(|_| "invalid day")?;
        let year = if yy < 70 { yy + 2000 } else { yy + 1900 };
        (year, month, day)
    };

    let hour: u32 = time_str[0..2].parse().map_err(|_| "invalid hour")?;
    let minute: u32 = time_str[2..4].parse().map_err(|_| "invalid minute")?;
    let second: u32 = time_str[4..6].parse().map_err(|_| "invalid second")?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or("date out of range")?;
    let time = NaiveTime::from_hms_opt(hour, minute, second).ok_or("time out of range")?;
    let naive = NaiveDateTime::new(date, time);
    Ok(Utc.from_utc_datetime(&naive))
}

/// Inverts [`parse_datetime`]. `legacy = true` yields `YYMMDD`, otherwise
/// `YYYYMMDD`; the returned tuple is `(date, time)`.
#[must_use]
pub fn format_datetime(instant: DateTime<Utc>, legacy: bool) -> (String, String) {
    let date = if legacy {
        instant.format("%y%m%d").to_string()
    } else {
        instant.format("%Y%m%d").to_string()
    };
    let time = instant.format("%H%M%S").to_string();
    (date, time)
}
