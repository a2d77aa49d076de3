//! Ordering, totals, and display labels for the calorie log.
//!
//! The backend's stored order is not trusted; the client re-derives
//! newest-first ordering and daily totals from the timestamps on every
//! load.

use chrono::{NaiveDate, NaiveDateTime};

use crate::CalorieEntry;

/// Parses the backend timestamp, `utcnow().isoformat()` with or without
/// fractional seconds.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// Stable newest-first sort. Entries with unparseable timestamps sink to
/// the end; ties keep their fetched order.
pub fn sort_newest_first(entries: &mut [CalorieEntry]) {
    entries.sort_by_key(|entry| std::cmp::Reverse(parse_timestamp(&entry.timestamp)));
}

pub fn total_calories(entries: &[CalorieEntry]) -> f64 {
    entries.iter().map(|entry| entry.calories).sum()
}

/// Sum over entries whose timestamp falls on `today`. Order-independent.
pub fn same_day_total(entries: &[CalorieEntry], today: NaiveDate) -> f64 {
    entries
        .iter()
        .filter(|entry| parse_timestamp(&entry.timestamp).map(|ts| ts.date()) == Some(today))
        .map(|entry| entry.calories)
        .sum()
}

/// Contextual time label for one log row: same-day entries show only a
/// time, older entries show a short date as well.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimeLabel {
    Today { time: String },
    OnDate { date: String, time: String },
    Unknown { raw: String },
}

impl TimeLabel {
    pub fn for_entry(entry: &CalorieEntry, today: NaiveDate) -> Self {
        match parse_timestamp(&entry.timestamp) {
            Some(ts) if ts.date() == today => TimeLabel::Today {
                time: ts.format("%H:%M").to_string(),
            },
            Some(ts) => TimeLabel::OnDate {
                date: ts.format("%b %-d").to_string(),
                time: ts.format("%H:%M").to_string(),
            },
            None => TimeLabel::Unknown {
                raw: entry.timestamp.clone(),
            },
        }
    }
}

/// "450 kcal" for whole counts, one decimal otherwise.
pub fn format_kcal(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{} kcal", value.round() as i64)
    } else {
        format!("{value:.1} kcal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, calories: f64, timestamp: &str) -> CalorieEntry {
        CalorieEntry {
            id,
            description: format!("entry {id}"),
            calories,
            timestamp: timestamp.to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
    }

    #[test]
    fn parses_timestamps_with_and_without_fraction() {
        assert!(parse_timestamp("2026-08-07T09:30:00").is_some());
        assert!(parse_timestamp("2026-08-07T09:30:00.123456").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn sorts_newest_first() {
        let mut entries = vec![
            entry(1, 100.0, "2026-08-05T08:00:00"),
            entry(2, 200.0, "2026-08-07T09:30:00"),
            entry(3, 300.0, "2026-08-06T20:15:00"),
        ];
        sort_newest_first(&mut entries);
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn sort_is_stable_for_equal_timestamps_and_idempotent() {
        let mut entries = vec![
            entry(1, 100.0, "2026-08-07T12:00:00"),
            entry(2, 200.0, "2026-08-07T12:00:00"),
            entry(3, 300.0, "2026-08-07T18:00:00"),
        ];
        sort_newest_first(&mut entries);
        let once: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(once, vec![3, 1, 2]);

        sort_newest_first(&mut entries);
        let twice: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn unparseable_timestamps_sort_last() {
        let mut entries = vec![
            entry(1, 100.0, "not a timestamp"),
            entry(2, 200.0, "2026-08-07T09:30:00"),
        ];
        sort_newest_first(&mut entries);
        assert_eq!(entries[0].id, 2);
        assert_eq!(entries[1].id, 1);
    }

    #[test]
    fn same_day_total_matches_only_todays_entries() {
        let entries = vec![
            entry(1, 95.0, "2026-08-07T08:00:00"),
            entry(2, 354.0, "2026-08-06T13:00:00"),
            entry(3, 130.0, "2026-08-07T19:45:00.500000"),
        ];
        assert_eq!(same_day_total(&entries, today()), 225.0);
        assert_eq!(total_calories(&entries), 579.0);
    }

    #[test]
    fn same_day_total_is_order_independent() {
        let mut entries = vec![
            entry(1, 95.0, "2026-08-07T08:00:00"),
            entry(2, 354.0, "2026-08-06T13:00:00"),
            entry(3, 130.0, "2026-08-07T19:45:00"),
        ];
        let before = same_day_total(&entries, today());
        entries.reverse();
        assert_eq!(same_day_total(&entries, today()), before);
    }

    #[test]
    fn empty_log_totals_are_zero() {
        assert_eq!(total_calories(&[]), 0.0);
        assert_eq!(same_day_total(&[], today()), 0.0);
        assert_eq!(format_kcal(same_day_total(&[], today())), "0 kcal");
    }

    #[test]
    fn time_label_distinguishes_today_from_older_days() {
        let same_day = entry(1, 95.0, "2026-08-07T08:05:00");
        assert_eq!(
            TimeLabel::for_entry(&same_day, today()),
            TimeLabel::Today {
                time: "08:05".into()
            }
        );

        let older = entry(2, 354.0, "2026-08-01T13:30:00");
        assert_eq!(
            TimeLabel::for_entry(&older, today()),
            TimeLabel::OnDate {
                date: "Aug 1".into(),
                time: "13:30".into()
            }
        );

        let broken = entry(3, 0.0, "???");
        assert_eq!(
            TimeLabel::for_entry(&broken, today()),
            TimeLabel::Unknown { raw: "???".into() }
        );
    }

    #[test]
    fn kcal_formatting() {
        assert_eq!(format_kcal(450.0), "450 kcal");
        assert_eq!(format_kcal(0.0), "0 kcal");
        assert_eq!(format_kcal(95.5), "95.5 kcal");
    }
}
