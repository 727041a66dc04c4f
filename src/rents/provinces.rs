use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::{average_price_per_sqm, city_name, lianjia, RentRecord};
use crate::net::Fetch;

/// Provinces and the Lianjia city codes sampled for each, in report order.
pub const PROVINCE_CITIES: &[(&str, &[&str])] = &[
    ("北京市", &["bj"]),
    ("上海市", &["sh"]),
    ("广东省", &["gz", "sz"]),
];

pub struct ProvinceRents {
    pub province: String,
    pub records: Vec<RentRecord>,
}

impl ProvinceRents {
    pub fn average(&self) -> f64 {
        average_price_per_sqm(&self.records)
    }
}

pub async fn collect<F: Fetch>(fetcher: &F, pages: usize, delay: Duration) -> Vec<ProvinceRents> {
    let total_cities: usize = PROVINCE_CITIES.iter().map(|(_, c)| c.len()).sum();
    let pb = ProgressBar::new(total_cities as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=> "));
    }

    let mut out = Vec::with_capacity(PROVINCE_CITIES.len());
    for (province, cities) in PROVINCE_CITIES {
        let mut records = Vec::new();
        for city in *cities {
            pb.set_message(format!("{} ({})", city_name(city), city));
            records.extend(lianjia::fetch_city(fetcher, city, pages, delay).await);
            pb.inc(1);
        }
        let entry = ProvinceRents {
            province: province.to_string(),
            records,
        };
        info!("{} average rent: {:.2} yuan/sqm/month", entry.province, entry.average());
        out.push(entry);
    }

    pb.finish_and_clear();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    struct FixtureFetcher;

    impl Fetch for FixtureFetcher {
        async fn get_text(&self, _url: &str, _query: &[(&str, String)]) -> Result<String, FetchError> {
            Ok(std::fs::read_to_string("tests/fixtures/lianjia.html").unwrap())
        }
    }

    #[tokio::test]
    async fn groups_cities_by_province() {
        let provinces = collect(&FixtureFetcher, 1, Duration::ZERO).await;
        let names: Vec<&str> = provinces.iter().map(|p| p.province.as_str()).collect();
        assert_eq!(names, vec!["北京市", "上海市", "广东省"]);

        // two valid listings per city page
        assert_eq!(provinces[0].records.len(), 2);
        assert_eq!(provinces[2].records.len(), 4);
        assert!(provinces[2].records.iter().any(|r| r.city == "广州"));
        assert!(provinces[2].records.iter().any(|r| r.city == "深圳"));
        assert!(provinces[0].average() > 0.0);
    }
}
