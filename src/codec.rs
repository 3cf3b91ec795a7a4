use std::sync::LazyLock;

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use regex::Regex;

use crate::error::ArchiveError;
use crate::models::SnapshotId;

const PREFIX: &str = "news-data-";
const STEM_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";
const DISPLAY_FORMAT: &str = "%A, %B %-d, %Y at %H:%M:%S";
const MAX_YEAR: i32 = 9999;

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^news-data-(\d{4})-(\d{2})-(\d{2})-(\d{2})-(\d{2})-(\d{2})$")
        .expect("slug pattern is valid")
});

fn out_of_range(timestamp: &NaiveDateTime) -> ArchiveError {
    ArchiveError::InvalidTimestamp(timestamp.to_string())
}

impl SnapshotId {
    /// Only four-digit years fit the file name pattern.
    pub fn new(timestamp: NaiveDateTime) -> Result<Self, ArchiveError> {
        if (0..=MAX_YEAR).contains(&timestamp.year()) {
            Ok(SnapshotId { timestamp })
        } else {
            Err(out_of_range(&timestamp))
        }
    }

    /// Builds an id from raw components, rejecting anything that is not a real
    /// calendar date and wall-clock time.
    pub fn from_parts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, ArchiveError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                ArchiveError::InvalidTimestamp(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            })
            .and_then(SnapshotId::new)
    }

    pub fn slug(&self) -> String {
        format!("{PREFIX}{}", self.timestamp.format(STEM_FORMAT))
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.slug())
    }
}

/// The stem a writer gives a snapshot taken at `timestamp`.
#[allow(dead_code)]
pub fn encode(timestamp: &NaiveDateTime) -> Result<String, ArchiveError> {
    SnapshotId::new(*timestamp).map(|id| id.slug())
}

/// Decodes a bare route slug. `None` means "not a snapshot".
pub fn decode_slug(slug: &str) -> Option<SnapshotId> {
    let caps = SLUG_RE.captures(slug)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = i32::try_from(field(1)?).ok()?;
    SnapshotId::from_parts(year, field(2)?, field(3)?, field(4)?, field(5)?, field(6)?).ok()
}

/// Decodes a storage file name, which must carry the `.json` suffix.
pub fn decode_file_name(name: &str) -> Option<SnapshotId> {
    name.strip_suffix(".json").and_then(decode_slug)
}

/// Long human-readable form in the host's local zone. Falls back to the bare
/// wall-clock time when the timestamp does not exist locally (DST gap).
pub fn display_date(id: &SnapshotId) -> String {
    match Local.from_local_datetime(&id.timestamp).earliest() {
        Some(local) => format_long(&local),
        None => id.timestamp.format(DISPLAY_FORMAT).to_string(),
    }
}

/// Same long form for a zoned instant such as a payload's `lastUpdated`.
pub fn display_instant(at: &DateTime<FixedOffset>) -> String {
    format_long(&at.with_timezone(&Local))
}

fn format_long(local: &DateTime<Local>) -> String {
    format!("{} {}", local.format(DISPLAY_FORMAT), local.format("%:z"))
}
