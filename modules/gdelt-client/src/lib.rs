pub mod error;
pub mod types;

pub use error::{GdeltError, Result};
pub use types::{ArticleList, ArticleRow};

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use civicweather_common::Observation;
use tracing::info;

/// Client for the GDELT DOC 2.0 `ArtList` endpoint.
pub struct GdeltClient {
    client: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl GdeltClient {
    pub fn new(base_url: &str, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(25))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.to_string(),
            user_agent: user_agent.to_string(),
        }
    }

    /// Fetch articles matching `(topic_query) AND (place)` seen within the
    /// last `hours_back` hours, newest first. Rows missing a title or url
    /// are skipped; unparseable timestamps fall back to now.
    pub async fn article_list(
        &self,
        topic_query: &str,
        place: &str,
        hours_back: u32,
        max_records: u32,
    ) -> Result<Vec<Observation>> {
        let query = format!("({topic_query}) AND ({place})");
        let startdt = start_datetime(hours_back);

        info!(place, hours_back, max_records, "GDELT article search");

        let resp = self
            .client
            .get(&self.base_url)
            .header("User-Agent", &self.user_agent)
            .query(&[
                ("query", query.as_str()),
                ("mode", "ArtList"),
                ("format", "json"),
                ("sort", "DateDesc"),
                ("maxrecords", &max_records.to_string()),
                ("startdatetime", &startdt),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GdeltError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let list: ArticleList = resp.json().await?;

        let observations: Vec<Observation> = list
            .articles
            .into_iter()
            .filter(|row| !row.title.is_empty() && !row.url.is_empty())
            .map(|row| Observation {
                headline: row.title,
                locator: row.url,
                observed_at: parse_seendate(&row.seendate),
                origin_tag: row.source_country.filter(|c| !c.is_empty()),
            })
            .collect();

        info!(
            place,
            hours_back,
            count = observations.len(),
            "GDELT article search complete"
        );
        Ok(observations)
    }
}

fn start_datetime(hours_back: u32) -> String {
    let dt = Utc::now() - chrono::Duration::hours(hours_back as i64);
    dt.format("%Y%m%d%H%M%S").to_string()
}

/// Parse the `seendate` field across the encodings GDELT has been seen to
/// emit: compact (`20240130123000`), compact with T/Z
/// (`20240130T123000Z`), and dashed (`2024-01-30 12:30:00`), with or
/// without fractional seconds. Anything else falls back to now.
pub fn parse_seendate(raw: &str) -> DateTime<Utc> {
    let mut s = raw.trim().replace('Z', "");
    if let Some(dot) = s.find('.') {
        s.truncate(dot);
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y%m%dT%H%M%S",
        "%Y%m%d%H%M%S",
    ];
    for fmt in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&s, fmt) {
            return naive.and_utc();
        }
    }
    Utc::now()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_compact_seendate() {
        let dt = parse_seendate("20240130123000");
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 1, 30));
        assert_eq!((dt.hour(), dt.minute()), (12, 30));
    }

    #[test]
    fn parses_compact_with_t_and_z() {
        let dt = parse_seendate("20240130T123000Z");
        assert_eq!((dt.year(), dt.hour()), (2024, 12));
    }

    #[test]
    fn parses_dashed_with_fractional_seconds() {
        let dt = parse_seendate("2024-01-30 12:30:00.123456");
        assert_eq!((dt.year(), dt.second()), (2024, 0));
        let dt = parse_seendate("2024-01-30T12:30:59Z");
        assert_eq!(dt.second(), 59);
    }

    #[test]
    fn garbage_falls_back_to_now() {
        let before = Utc::now();
        let dt = parse_seendate("not a timestamp");
        assert!(dt >= before);
        let dt = parse_seendate("");
        assert!(dt >= before);
    }

    #[test]
    fn start_datetime_is_compact_utc() {
        let s = start_datetime(24);
        assert_eq!(s.len(), 14);
        assert!(s.chars().all(|c| c.is_ascii_digit()));
    }
}
