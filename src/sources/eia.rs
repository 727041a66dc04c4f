use std::sync::LazyLock;

use chrono::NaiveDate;
use scraper::{Html, Selector};

use super::{absolute_url, matches_keywords, Page, RawRecord};

pub const LIST_URL: &str = "https://sthjj.sz.gov.cn/xxgk/xxgkml/hjgl/psj/jgxxgk/hpgs/";

static ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.list_content ul li").unwrap());
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static SPAN: LazyLock<Selector> = LazyLock::new(|| Selector::parse("span").unwrap());

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

        let announce_date = li
            .select(&SPAN)
            .next()
            .and_then(|s| NaiveDate::parse_from_str(s.text().collect::<String>().trim(), "%Y-%m-%d").ok());

        page.records.push(RawRecord {
            title,
            announce_date,
            source_url: anchor
                .value()
                .attr("href")
                .filter(|h| !h.trim().is_empty())
                .map(|h| absolute_url(LIST_URL, h.trim())),
            company: None,
            summary: None,
            display_title: None,
        });
    }

    page
}
