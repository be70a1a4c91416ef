//! Fixed-width display strings for raw stat fields.
//!
//! Every function here is pure and total: any value a real filesystem can
//! report produces a string.

use std::fmt::Display;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, TimeZone, Utc};

/// Column width of [`human_file_size`] output.
pub const SIZE_WIDTH: usize = 10;

/// Column width of [`format_date`] output.
pub const DATE_WIDTH: usize = 16;

const S_IFMT: u32 = 0o170_000;
const S_IFDIR: u32 = 0o040_000;
const S_IFLNK: u32 = 0o120_000;

const SIZE_UNITS: [char; 4] = ['K', 'M', 'G', 'T'];

/// Renders mode bits as `drwxr-xr-x@`.
///
/// The trailing `@` is a constant extended-attribute placeholder; it is not
/// derived from the file's real extended attributes.
pub fn format_mode(mode: u32) -> String {
    let kind = match mode & S_IFMT {
        S_IFDIR => 'd',
        S_IFLNK => 'l',
        _ => '-',
    };

    let mut out = String::with_capacity(11);
    out.push(kind);
    for shift in [6u32, 3, 0] {
        let triple = (mode >> shift) & 0o7;
        out.push(if triple & 0o4 != 0 { 'r' } else { '-' });
        out.push(if triple & 0o2 != 0 { 'w' } else { '-' });
        out.push(if triple & 0o1 != 0 { 'x' } else { '-' });
    }
    out.push('@');
    out
}

/// Renders a byte count as `1023B`, `1.5K`, `3.2M`, left-padded to [`SIZE_WIDTH`].
pub fn human_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{:>width$}", format!("{bytes}B"), width = SIZE_WIDTH);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    value /= 1024.0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!(
        "{:>width$}",
        format!("{value:.1}{}", SIZE_UNITS[unit]),
        width = SIZE_WIDTH
    )
}

/// Renders a modification time as local `Mon DD HH:MM`, left-padded to [`DATE_WIDTH`].
pub fn format_date(time: SystemTime) -> String {
    let utc = match time.duration_since(UNIX_EPOCH) {
        Ok(d) => DateTime::<Utc>::from_timestamp(d.as_secs() as i64, d.subsec_nanos()),
        Err(e) => {
            let before = e.duration();
            DateTime::<Utc>::from_timestamp(-(before.as_secs() as i64), 0)
        }
    }
    .unwrap_or_default();

    format_datetime(&utc.with_timezone(&Local))
}

/// Formats an already-zoned timestamp. Split out so the layout is testable
/// without depending on the machine's timezone.
pub fn format_datetime<Tz>(dt: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!(
        "{:>width$}",
        dt.format("%b %d %H:%M").to_string(),
        width = DATE_WIDTH
    )
}
