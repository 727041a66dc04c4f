use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate};
use regex::Regex;
use serde::Deserialize;

use super::{matches_keywords, Page, RawRecord};
use crate::error::SourceError;

pub const SEARCH_URL: &str = "https://www.cninfo.com.cn/new/fulltextSearch/full";
const STATIC_BASE: &str = "https://static.cninfo.com.cn/";

/// Search hits come back with `<em>` highlighting around matched terms.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    announcements: Option<Vec<Announcement>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Announcement {
    #[serde(default)]
    announcement_title: Option<String>,
    #[serde(default)]
    announcement_time: Option<i64>,
    #[serde(default)]
    sec_name: Option<String>,
    #[serde(default)]
    sec_code: Option<String>,
    #[serde(default)]
    adjunct_url: Option<String>,
    #[serde(default)]
    short_title: Option<String>,
}

pub fn parse(body: &str, keywords: &[String]) -> Result<Page, SourceError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let items = response.announcements.unwrap_or_default();
    let seen = items.len();

    let records = items
        .into_iter()
        .filter_map(|a| {
            let title = clean(a.announcement_title.as_deref().unwrap_or_default());
            if !matches_keywords(&title, keywords) {
                return None;
            }
            let short_title = a.short_title.as_deref().map(clean).filter(|s| !s.is_empty());
            Some(RawRecord {
                announce_date: a.announcement_time.and_then(beijing_date),
                source_url: non_empty(a.adjunct_url).map(|p| format!("{}{}", STATIC_BASE, p.trim_start_matches('/'))),
                company: company_label(non_empty(a.sec_name), non_empty(a.sec_code)),
                display_title: Some(short_title.unwrap_or_else(|| title.clone())),
                summary: Some(title.clone()),
                title,
            })
        })
        .collect();

    Ok(Page { records, seen })
}

fn clean(s: &str) -> String {
    TAG_RE.replace_all(s, "").trim().to_string()
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn company_label(name: Option<String>, code: Option<String>) -> Option<String> {
    match (name, code) {
        (Some(name), Some(code)) => Some(format!("{}({})", name, code)),
        (None, Some(code)) => Some(format!("未知({})", code)),
        (name, None) => name,
    }
}

/// Announcement timestamps are epoch milliseconds; dates are reported in
/// Beijing time.
fn beijing_date(ms: i64) -> Option<NaiveDate> {
    let offset = FixedOffset::east_opt(8 * 3600)?;
    DateTime::from_timestamp_millis(ms).map(|dt| dt.with_timezone(&offset).date_naive())
}
