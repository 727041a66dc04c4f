pub mod cninfo;
pub mod eia;
pub mod sznews;

use std::path::Path;

use chrono::NaiveDate;
use clap::ValueEnum;
use tracing::{debug, info};

use crate::error::SourceError;
use crate::net::{decode_body, Fetch};

/// One scraped item before classification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    /// Full title; the classifier input.
    pub title: String,
    /// Shorter title for display, when the source offers one.
    pub display_title: Option<String>,
    pub announce_date: Option<NaiveDate>,
    pub source_url: Option<String>,
    pub company: Option<String>,
    pub summary: Option<String>,
}

/// Records parsed from one response body. `seen` counts items before the
/// keyword filter, which is what pagination compares against the page size.
#[derive(Debug, Default)]
pub struct Page {
    pub records: Vec<RawRecord>,
    pub seen: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Source {
    /// Listed-company announcements (full-text search API)
    Cninfo,
    /// Shenzhen news search results
    Sznews,
    /// Shenzhen ecology bureau EIA notices
    Eia,
}

/// Upper bound the cninfo API accepts for `pageSize`.
const MAX_PAGE_SIZE: usize = 100;
const DEFAULT_START_DATE: &str = "2010-01-01";

pub struct ScrapeOptions {
    pub keywords: Vec<String>,
    pub limit: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// End of the date window when only a start date is given.
    pub today: NaiveDate,
}

impl Source {
    pub fn name(self) -> &'static str {
        match self {
            Source::Cninfo => "cninfo",
            Source::Sznews => "sznews",
            Source::Eia => "eia",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Source::Cninfo => "巨潮资讯全文检索，捕捉上市公司搬迁/迁建公告",
            Source::Sznews => "深圳新闻网资讯列表，用于捕捉企业搬迁报道",
            Source::Eia => "深圳生态环境局环评公示，用于识别制造项目外迁线索",
        }
    }

    pub fn evidence_type(self) -> &'static str {
        match self {
            Source::Cninfo => "上市公司公告",
            Source::Sznews => "新闻/公示",
            Source::Eia => "环评公示",
        }
    }

    /// Company placeholder for sources whose listings carry no company name.
    pub fn default_company(self) -> &'static str {
        match self {
            Source::Cninfo | Source::Sznews => "未知",
            Source::Eia => "待抽取",
        }
    }

    pub fn evidence_strength(self, record: &RawRecord) -> &'static str {
        match self {
            Source::Cninfo if record.source_url.is_some() => "强",
            Source::Cninfo | Source::Sznews => "中",
            Source::Eia => "强",
        }
    }

    pub fn parse(self, body: &str, keywords: &[String]) -> Result<Page, SourceError> {
        match self {
            Source::Cninfo => cninfo::parse(body, keywords),
            Source::Sznews => Ok(sznews::parse(body, keywords)),
            Source::Eia => Ok(eia::parse(body, keywords)),
        }
    }
}

/// A record is kept when no keywords are given or its title contains any.
pub fn matches_keywords(title: &str, keywords: &[String]) -> bool {
    keywords.is_empty() || keywords.iter().any(|k| title.contains(k.as_str()))
}

/// Fetch up to `opts.limit` records from a live source.
pub async fn scrape<F: Fetch>(
    fetcher: &F,
    source: Source,
    opts: &ScrapeOptions,
) -> Result<Vec<RawRecord>, SourceError> {
    info!("Scraping {} ({})", source.name(), source.description());
    let mut records = match source {
        Source::Cninfo => scrape_paginated(fetcher, opts).await?,
        Source::Sznews => {
            let body = fetcher
                .get_text(sznews::SEARCH_URL, &[("keyword", sznews::query(&opts.keywords))])
                .await?;
            source.parse(&body, &opts.keywords)?.records
        }
        Source::Eia => {
            let body = fetcher.get_text(eia::LIST_URL, &[]).await?;
            source.parse(&body, &opts.keywords)?.records
        }
    };
    records.truncate(opts.limit);
    info!("Collected {} records from {}", records.len(), source.name());
    Ok(records)
}

async fn scrape_paginated<F: Fetch>(
    fetcher: &F,
    opts: &ScrapeOptions,
) -> Result<Vec<RawRecord>, SourceError> {
    let mut records = Vec::new();
    let mut page_num = 1usize;
    // The API pages by offset (pageNum - 1) * pageSize, so the size stays
    // fixed across requests and the caller truncates the overshoot.
    let page_size = MAX_PAGE_SIZE.min(opts.limit);

    while records.len() < opts.limit {
        let mut query = vec![("pageNum", page_num.to_string()), ("pageSize", page_size.to_string())];
        if !opts.keywords.is_empty() {
            query.push(("searchkey", opts.keywords.join(" ")));
        }
        if opts.start_date.is_some() || opts.end_date.is_some() {
            let start = opts
                .start_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| DEFAULT_START_DATE.to_string());
            let end = opts.end_date.unwrap_or(opts.today).format("%Y-%m-%d");
            query.push(("seDate", format!("{}~{}", start, end)));
        }

        let body = fetcher.get_text(cninfo::SEARCH_URL, &query).await?;
        let page = cninfo::parse(&body, &opts.keywords)?;
        debug!("Page {}: {} announcements, {} kept", page_num, page.seen, page.records.len());

        if page.seen == 0 {
            break;
        }
        records.extend(page.records);
        if page.seen < page_size {
            break;
        }
        page_num += 1;
    }

    Ok(records)
}

/// Parse a saved HTML/JSON body instead of hitting the network.
pub fn parse_snapshot(
    source: Source,
    path: &Path,
    keywords: &[String],
    limit: usize,
) -> Result<Vec<RawRecord>, SourceError> {
    let bytes = std::fs::read(path).map_err(|e| SourceError::Snapshot {
        path: path.to_path_buf(),
        source: e,
    })?;
    let body = decode_body(&bytes, None);
    let mut records = source.parse(&body, keywords)?.records;
    records.truncate(limit);
    info!("Parsed {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Resolve a listing href against the page it came from.
pub(crate) fn absolute_url(base: &str, href: &str) -> String {
    reqwest::Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}
