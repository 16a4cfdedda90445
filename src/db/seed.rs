//! Demo catalog used to pre-populate the in-memory store

use chrono::{NaiveDate, TimeZone, Utc};

use super::MovieRecord;

fn release(year: i32, month: u32, day: u32) -> Option<chrono::DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// The two movies every fresh in-memory store starts with
pub fn demo_movies() -> Vec<MovieRecord> {
    vec![
        MovieRecord {
            id: "1".to_string(),
            title: "Aladdin".to_string(),
            release_date: release(1992, 11, 25),
            rating: Some(5),
            status: None,
            actor_ids: vec!["williams".to_string()],
        },
        MovieRecord {
            id: "2".to_string(),
            title: "Hacksaw Ridge".to_string(),
            release_date: release(2016, 11, 4),
            rating: Some(5),
            status: None,
            actor_ids: vec!["garfield".to_string()],
        },
    ]
}
