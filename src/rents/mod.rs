pub mod lianjia;
pub mod provinces;

use std::sync::LazyLock;

use regex::Regex;

static AREA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*㎡").unwrap());

/// Lianjia city subdomains and their display names.
pub const CITY_CODES: &[(&str, &str)] = &[("bj", "北京"), ("sh", "上海"), ("gz", "广州"), ("sz", "深圳")];

/// Unknown codes are shown as given.
pub fn city_name(code: &str) -> &str {
    CITY_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
        .unwrap_or(code)
}

/// One rental listing. `area` is in square metres, `price` in yuan per month.
#[derive(Debug, Clone, PartialEq)]
pub struct RentRecord {
    pub city: String,
    pub title: String,
    pub area: f64,
    pub price: f64,
}

impl RentRecord {
    pub fn price_per_sqm(&self) -> f64 {
        if self.area > 0.0 {
            self.price / self.area
        } else {
            0.0
        }
    }
}

/// First "<number>㎡" in the listing description; 0 when absent.
pub fn parse_area(text: &str) -> f64 {
    AREA_RE
        .captures(text)
        .and_then(|c| c[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Mean of per-listing price per square metre; 0 for no listings.
pub fn average_price_per_sqm(records: &[RentRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(RentRecord::price_per_sqm).sum::<f64>() / records.len() as f64
}
