use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One persisted stopwatch run. Rows are immutable once the store hands them
/// back: there is no update or delete path in this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTimeRecord {
    pub id: i64,             // ⇔ saved_times.id (assigned by the store)
    pub time_record: String, // ⇔ saved_times.time_record ("HH:MM:SS")
    pub created_at: String,  // ⇔ saved_times.created_at (assigned by the store)
}

impl SavedTimeRecord {
    /// Parse `created_at` into local time.
    ///
    /// Accepts RFC 3339 (what hosted Postgres backends return) and the bare
    /// `YYYY-MM-DD HH:MM:SS[.fff]` form, which is taken as UTC.
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        let raw = self.created_at.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Local));
        }

        ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .map(|naive| naive.and_utc().with_timezone(&Local))
    }
}

/// Insert payload: only `time_record` is supplied by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSavedTime {
    pub time_record: String,
}

impl NewSavedTime {
    pub fn new(time_record: impl Into<String>) -> Self {
        Self {
            time_record: time_record.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(created_at: &str) -> SavedTimeRecord {
        SavedTimeRecord {
            id: 1,
            time_record: "00:00:05".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = record("2025-03-01T10:15:30.123456+00:00")
            .created_at_local()
            .expect("rfc3339");
        assert_eq!(parsed.with_timezone(&Utc).to_rfc3339(), "2025-03-01T10:15:30.123456+00:00");
    }

    #[test]
    fn parses_bare_timestamp_as_utc() {
        let parsed = record("2025-03-01 10:15:30").created_at_local().expect("bare");
        assert_eq!(
            parsed.with_timezone(&Utc).format("%Y-%m-%d %H:%M:%S").to_string(),
            "2025-03-01 10:15:30"
        );
    }

    #[test]
    fn garbage_timestamp_is_none() {
        assert!(record("yesterday").created_at_local().is_none());
    }

    #[test]
    fn decodes_rest_row() {
        let json = r#"{"id":7,"time_record":"01:02:03","created_at":"2025-03-01T10:15:30+00:00"}"#;
        let row: SavedTimeRecord = serde_json::from_str(json).expect("decode");
        assert_eq!(row.id, 7);
        assert_eq!(row.time_record, "01:02:03");
    }
}
