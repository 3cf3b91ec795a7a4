use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use url::Url;

/// A snapshot named by its capture time, e.g. `news-data-2024-01-02-10-00-00`.
/// Local time, no zone stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId {
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRef {
    pub src: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewsItem {
    pub text: String,
    pub url: String,
    #[serde(default)]
    pub image: Option<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPayload {
    pub main_headline: NewsItem,
    #[serde(default)]
    pub top_stories: Vec<NewsItem>,
    #[serde(default)]
    pub left_column: Vec<NewsItem>,
    #[serde(default)]
    pub center_column: Vec<NewsItem>,
    #[serde(default)]
    pub right_column: Vec<NewsItem>,
    #[serde(default)]
    pub last_updated: String,
}

impl SnapshotPayload {
    pub fn last_updated_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.last_updated).ok()
    }
}

/// Snapshots sharing one calendar day, most recent first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveGroup {
    pub day: NaiveDate,
    pub entries: Vec<SnapshotId>,
}

/// One labeled row of the archive index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveEntry {
    pub slug: String,
    pub display_date: String,
    pub age: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveDay {
    pub day: NaiveDate,
    pub heading: String,
    pub entries: Vec<ArchiveEntry>,
}

/// An image whose file was found in the asset store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsableImage {
    pub url: String,
    pub alt: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedItem {
    pub text: String,
    pub url: String,
    pub image: Option<UsableImage>,
}

impl ResolvedItem {
    /// `None` when the stored URL is not absolute.
    pub fn link(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSnapshot {
    pub main_headline: ResolvedItem,
    pub top_stories: Vec<ResolvedItem>,
    pub left_column: Vec<ResolvedItem>,
    pub center_column: Vec<ResolvedItem>,
    pub right_column: Vec<ResolvedItem>,
    pub last_updated: String,
}
