use std::sync::LazyLock;

use chrono::NaiveDate;
use scraper::{Html, Selector};

use super::{absolute_url, matches_keywords, Page, RawRecord};

pub const SEARCH_URL: &str = "https://search.sznews.com/search";
const DEFAULT_QUERY: &str = "深圳 企业 外迁";

static ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.news-list li").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static DATE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span.date").unwrap());

pub fn query(keywords: &[String]) -> String {
    if keywords.is_empty() {
        DEFAULT_QUERY.to_string()
    } else {
        keywords.join(" ")
    }
}

pub fn parse(html: &str, keywords: &[String]) -> Page {
    let doc = Html::parse_document(html);
    let mut page = Page::default();

    for li in doc.select(&ITEM) {
        let Some(anchor) = li.select(&ANCHOR).next() else {
            continue;
        };
        page.seen += 1;

        let title: String = anchor.text().map(str::trim).collect();
        if title.is_empty() || !matches_keywords(&title, keywords) {
            continue;
        }

        // Dates sometimes carry a time suffix: "2024-03-08 10:21".
        let announce_date = li.select(&DATE).next().and_then(|d| {
            let text: String = d.text().collect::<String>().trim().chars().take(10).collect();
            NaiveDate::parse_from_str(&text, "%Y-%m-%d").ok()
        });

        page.records.push(RawRecord {
            title,
            announce_date,
            source_url: anchor
                .value()
                .attr("href")
                .filter(|h| !h.trim().is_empty())
                .map(|h| absolute_url(SEARCH_URL, h.trim())),
            company: None,
            summary: None,
            display_title: None,
        });
    }

    page
}
