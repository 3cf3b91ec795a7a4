use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use crate::codec::display_date;
use crate::models::{ArchiveDay, ArchiveEntry, ArchiveGroup, SnapshotId};

/// Partitions snapshots by calendar day. Days appear in the order they are
/// first seen and entries keep their input order, so a newest-first listing
/// stays newest-first.
pub fn group_by_day(ids: &[SnapshotId]) -> Vec<ArchiveGroup> {
    let mut groups: Vec<ArchiveGroup> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for id in ids {
        let day = id.timestamp.date();
        match index.get(&day) {
            Some(&i) => groups[i].entries.push(*id),
            None => {
                index.insert(day, groups.len());
                groups.push(ArchiveGroup {
                    day,
                    entries: vec![*id],
                });
            }
        }
    }

    groups
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

pub fn relative_age(timestamp: NaiveDateTime, now: NaiveDateTime) -> String {
    let hours = (now - timestamp).num_hours();
    if hours >= 24 {
        plural(hours / 24, "day")
    } else if hours >= 1 {
        plural(hours, "hour")
    } else {
        "Less than an hour ago".to_string()
    }
}

/// Day header, e.g. `Tue Jan 02 2024`.
pub fn day_heading(day: NaiveDate) -> String {
    day.format("%a %b %d %Y").to_string()
}

/// Link to one archived snapshot. Routes end with a slash as the static export
/// serves them as directories.
pub fn archive_href(base_path: &str, id: &SnapshotId) -> String {
    format!("{}/archive/{}/", base_path, id.slug())
}

/// The archive index: grouped by day, each entry dated, aged and linked.
pub fn build_index(ids: &[SnapshotId], now: NaiveDateTime, base_path: &str) -> Vec<ArchiveDay> {
    group_by_day(ids)
        .into_iter()
        .map(|group| ArchiveDay {
            day: group.day,
            heading: day_heading(group.day),
            entries: group
                .entries
                .iter()
                .map(|id| ArchiveEntry {
                    slug: id.slug(),
                    display_date: display_date(id),
                    age: relative_age(id.timestamp, now),
                    href: archive_href(base_path, id),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(y: i32, mo: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn groups_by_day_keeping_order() {
        let ids = [
            SnapshotId::new(at(2024, 1, 2, 10)).unwrap(),
            SnapshotId::new(at(2024, 1, 2, 4)).unwrap(),
            SnapshotId::new(at(2024, 1, 1, 23)).unwrap(),
        ];

        let groups = group_by_day(&ids);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].day, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(groups[0].entries, [ids[0], ids[1]]);
        assert_eq!(groups[1].day, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(groups[1].entries, [ids[2]]);
    }

    #[test]
    fn grouping_an_empty_archive_yields_nothing() {
        assert!(group_by_day(&[]).is_empty());
    }

    #[test]
    fn relative_age_buckets() {
        let t = at(2024, 1, 1, 0);
        assert_eq!(relative_age(t, t + Duration::minutes(90)), "1 hour ago");
        assert_eq!(relative_age(t, t + Duration::hours(50)), "2 days ago");
        assert_eq!(relative_age(t, t + Duration::minutes(10)), "Less than an hour ago");
        assert_eq!(relative_age(t, t + Duration::hours(5)), "5 hours ago");
        assert_eq!(relative_age(t, t + Duration::hours(24)), "1 day ago");
        assert_eq!(relative_age(t, t + Duration::minutes(1439)), "23 hours ago");
    }

    #[test]
    fn future_timestamps_read_as_fresh() {
        let t = at(2024, 1, 1, 12);
        assert_eq!(relative_age(t, t - Duration::hours(3)), "Less than an hour ago");
    }

    #[test]
    fn index_labels_and_links_every_entry() {
        let ids = [
            SnapshotId::new(at(2024, 1, 2, 10)).unwrap(),
            SnapshotId::new(at(2024, 1, 1, 23)).unwrap(),
        ];
        let now = at(2024, 1, 2, 12);

        let index = build_index(&ids, now, "/byte-report");
        assert_eq!(index.len(), 2);
        assert_eq!(index[0].heading, "Tue Jan 02 2024");
        let first = &index[0].entries[0];
        assert_eq!(first.slug, "news-data-2024-01-02-10-00-00");
        assert_eq!(first.age, "2 hours ago");
        assert_eq!(first.href, "/byte-report/archive/news-data-2024-01-02-10-00-00/");
        assert_eq!(index[1].entries[0].age, "13 hours ago");
    }
}
