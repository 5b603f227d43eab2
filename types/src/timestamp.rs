//! Lenient `created_at` decoding. The server owns the format, so RFC 3339,
//! naive date-times (taken as UTC), unix seconds and `null` are all accepted.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

const NAIVE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Text(String),
    Seconds(i64),
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(DateTime::<Utc>::default()),
        Some(Raw::Seconds(secs)) => Utc
            .timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| de::Error::custom(format!("timestamp {} out of range", secs))),
        Some(Raw::Text(text)) => parse(&text).map_err(de::Error::custom),
    }
}

pub fn parse(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(DateTime::<Utc>::default());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{}'", text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339_with_offset() {
        let dt = parse("2023-01-01T02:00:00+02:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn parses_naive_formats_as_utc() {
        let expected = Utc.with_ymd_and_hms(2022, 3, 4, 5, 6, 7).unwrap();
        assert_eq!(parse("2022-03-04T05:06:07").unwrap(), expected);
        assert_eq!(parse("2022-03-04 05:06:07").unwrap(), expected);
    }

    #[test]
    fn empty_text_is_epoch() {
        assert_eq!(parse("").unwrap(), DateTime::<Utc>::default());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse("yesterday").is_err());
    }

    #[test]
    fn accepts_unix_seconds_and_null() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[serde(deserialize_with = "deserialize")]
            at: DateTime<Utc>,
        }

        let w: Wrapper = serde_json::from_str(r#"{"at":1672531200}"#).unwrap();
        assert_eq!(w.at, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());

        let w: Wrapper = serde_json::from_str(r#"{"at":null}"#).unwrap();
        assert_eq!(w.at, DateTime::<Utc>::default());
    }
}
