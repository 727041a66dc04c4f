use std::sync::LazyLock;
use std::time::Duration;

use scraper::{Html, Selector};
use tracing::{debug, warn};

use super::{city_name, parse_area, RentRecord};
use crate::net::Fetch;

static ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".content__list--item").unwrap());
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".content__list--item--title a").unwrap());
static PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".content__list--item-price em").unwrap());
static DES: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".content__list--item--des").unwrap());

pub fn page_url(city: &str, page: usize) -> String {
    format!("https://{}.lianjia.com/zufang/pg{}/", city, page)
}

/// Listings missing a title, price or description, or with a price that is
/// not a number (e.g. "2000-2500"), are skipped.
pub fn parse_page(html: &str, city: &str) -> Vec<RentRecord> {
    let doc = Html::parse_document(html);
    let mut records = Vec::new();

    for item in doc.select(&ITEM) {
        let (Some(title), Some(price), Some(des)) = (
            item.select(&TITLE).next(),
            item.select(&PRICE).next(),
            item.select(&DES).next(),
        ) else {
            continue;
        };

        let price_text: String = price.text().collect();
        let Ok(price) = price_text.trim().parse::<f64>() else {
            debug!("Skipping listing with price {:?}", price_text.trim());
            continue;
        };

        records.push(RentRecord {
            city: city.to_string(),
            title: title.text().map(str::trim).collect(),
            area: parse_area(&des.text().collect::<String>()),
            price,
        });
    }

    records
}

/// Fetch pages `1..=pages` for one city, stopping at the first failure.
pub async fn fetch_city<F: Fetch>(fetcher: &F, city: &str, pages: usize, delay: Duration) -> Vec<RentRecord> {
    let name = city_name(city);
    let mut all = Vec::new();

    for page in 1..=pages {
        match fetcher.get_text(&page_url(city, page), &[]).await {
            Ok(body) => {
                let records = parse_page(&body, name);
                debug!("{} page {}: {} listings", name, page, records.len());
                all.extend(records);
                if page < pages {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => {
                warn!("Failed to fetch {} page {}: {}", city, page, e);
                break;
            }
        }
    }

    all
}
