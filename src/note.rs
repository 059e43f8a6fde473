use chrono::{Local, NaiveDateTime, Timelike};
use std::cmp::Ordering;
use uuid::Uuid;

/// Stored and displayed note timestamp, minute precision.
pub const TIME_FMT: &str = "%d.%m.%Y %H:%M";
/// Date-only form used in card footers.
pub const DATE_FMT: &str = "%d.%m.%Y";
pub const SHORT_ID_WIDTH: usize = 8;

pub type NoteId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub(crate) id: NoteId,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) timestamp: NaiveDateTime,
}

impl Note {
    /// Build a note with a freshly generated id. Title validation is the
    /// store's job; this only assembles the record.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, content, timestamp)
    }

    pub(crate) fn with_id(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            timestamp,
        }
    }

    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn timestamp_label(&self) -> String {
        self.timestamp.format(TIME_FMT).to_string()
    }

    pub fn date_label(&self) -> String {
        self.timestamp.format(DATE_FMT).to_string()
    }

    pub fn short_id(&self) -> String {
        short_id(self.id)
    }
}

pub fn short_id(id: NoteId) -> String {
    id.simple().to_string()[..SHORT_ID_WIDTH].to_string()
}

/// Current local time truncated to the minute, so a note survives a
/// save/load cycle unchanged.
pub fn now_minute() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

pub fn parse_timestamp(ts: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(ts.trim(), TIME_FMT).ok()
}

/// Newest first. Equal timestamps compare equal so a stable sort keeps
/// their stored order.
pub fn cmp_recency(a: &Note, b: &Note) -> Ordering {
    b.timestamp.cmp(&a.timestamp)
}

pub(crate) mod date_format {
    use super::{TIME_FMT, parse_timestamp};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        ts: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&ts.format(TIME_FMT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).ok_or_else(|| {
            de::Error::custom(format!("invalid note date `{raw}`"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ts: &str) -> Note {
        Note::new("t", "", parse_timestamp(ts).unwrap())
    }

    #[test]
    fn test_parse_timestamp_round_trips_format() {
        let ts = parse_timestamp("02.01.2024 09:05").unwrap();
        assert_eq!(ts.format(TIME_FMT).to_string(), "02.01.2024 09:05");
        assert!(parse_timestamp(" 02.01.2024 09:05 ").is_some());
    }

    #[test]
    fn test_parse_timestamp_rejects_other_formats() {
        assert!(parse_timestamp("2024-01-02 09:05").is_none());
        assert!(parse_timestamp("32.01.2024 09:05").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_recency_compares_dates_not_text() {
        let mut notes = vec![
            at("01.01.2024 10:00"),
            at("02.01.2024 09:00"),
            at("15.06.2023 08:00"),
        ];
        notes.sort_by(cmp_recency);
        let labels: Vec<String> =
            notes.iter().map(|n| n.timestamp_label()).collect();
        assert_eq!(
            labels,
            vec!["02.01.2024 09:00", "01.01.2024 10:00", "15.06.2023 08:00"]
        );
    }

    #[test]
    fn test_now_minute_has_no_seconds() {
        let now = now_minute();
        assert_eq!(now.second(), 0);
        assert_eq!(now.nanosecond(), 0);
    }

    #[test]
    fn test_labels_and_short_id() {
        let note = at("15.06.2023 08:00");
        assert_eq!(note.date_label(), "15.06.2023");
        assert_eq!(note.short_id().len(), SHORT_ID_WIDTH);
        assert!(note.id().to_string().starts_with(&note.short_id()));
    }

    #[test]
    fn test_new_notes_get_distinct_ids() {
        let a = at("15.06.2023 08:00");
        let b = at("15.06.2023 08:00");
        assert_ne!(a.id(), b.id());
        assert_ne!(a, b);
    }
}
