mod cards;
mod classify;
mod error;
mod net;
mod output;
mod rents;
mod settings;
mod sources;

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDate};
use clap::{Parser, Subcommand};

use cards::CardRow;
use classify::Classifier;
use net::HttpClient;
use settings::Settings;
use sources::{RawRecord, ScrapeOptions, Source};

#[derive(Parser)]
#[command(
    name = "sz_scraper",
    about = "Shenzhen relocation event cards and Lianjia rent collection"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a source and write classified event cards
    Events {
        /// Data source to crawl
        #[arg(long, value_enum)]
        source: Source,
        /// Keep only titles containing one of these keywords
        #[arg(long, num_args = 0..)]
        keywords: Vec<String>,
        /// Max records to keep
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
        /// Output CSV path
        #[arg(long, default_value = "data/event_cards.csv")]
        out: PathBuf,
        /// Also write an Excel workbook
        #[arg(long)]
        xlsx_out: Option<PathBuf>,
        /// Parse a saved HTML/JSON body instead of fetching
        #[arg(long)]
        from_html: Option<PathBuf>,
        /// Start date for sources supporting date filters (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        start_date: Option<NaiveDate>,
        /// End date for sources supporting date filters (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        end_date: Option<NaiveDate>,
        /// Classifier rules JSON (defaults to built-in tables)
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Classify titles given as arguments, or one per line on stdin
    Classify {
        titles: Vec<String>,
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Scrape Lianjia rent listings for the given city codes
    Rents {
        /// City codes, e.g. bj sh sz
        #[arg(required = true)]
        cities: Vec<String>,
        /// Pages per city
        #[arg(long, default_value = "5")]
        pages: usize,
        #[arg(long, default_value = "rent_data.csv")]
        output: PathBuf,
    },
    /// Average rent per province
    Provinces {
        /// Pages per city
        #[arg(long, default_value = "5")]
        pages: usize,
        /// CSV of every listing
        #[arg(long, default_value = "rent_raw.csv")]
        raw: PathBuf,
        #[arg(long, default_value = "provincial_rents.csv")]
        output: PathBuf,
    },
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;

    let result = match cli.command {
        Commands::Events {
            source,
            keywords,
            limit,
            out,
            xlsx_out,
            from_html,
            start_date,
            end_date,
            rules,
        } => {
            let classifier = Classifier::new(settings.load_rules(rules.as_ref())?);
            let today = Local::now().date_naive();

            let records = match &from_html {
                Some(path) => sources::parse_snapshot(source, path, &keywords, limit)?,
                None => {
                    let client = HttpClient::new(&settings)?;
                    let opts = ScrapeOptions {
                        keywords,
                        limit,
                        start_date,
                        end_date,
                        today,
                    };
                    sources::scrape(&client, source, &opts)
                        .await
                        .with_context(|| format!("Scrape failed for {}", source.name()))?
                }
            };

            let cards = classifier.classify_all(&records);
            let rows: Vec<CardRow> = records
                .iter()
                .zip(&cards)
                .map(|(record, card)| CardRow::build(source, record, card, today.year()))
                .collect();

            output::write_cards_csv(&rows, &out)?;
            if let Some(path) = &xlsx_out {
                output::write_cards_xlsx(&rows, path)?;
            }
            println!("Saved {} rows to {}", rows.len(), out.display());
            Ok(())
        }
        Commands::Classify { titles, rules } => {
            let classifier = Classifier::new(settings.load_rules(rules.as_ref())?);
            let titles = if titles.is_empty() {
                std::io::stdin()
                    .lock()
                    .lines()
                    .collect::<std::io::Result<Vec<_>>>()
                    .context("Failed to read titles from stdin")?
            } else {
                titles
            };

            println!(
                "{:<24} | {:<22} | {:<30} | {:<22} | {}",
                "Title", "Function", "Destination", "Industry", "Reasons"
            );
            println!("{}", "-".repeat(120));
            for title in titles.iter().filter(|t| !t.trim().is_empty()) {
                let card = classifier.classify(&RawRecord {
                    title: title.trim().to_string(),
                    ..Default::default()
                });
                println!(
                    "{:<24} | {:<22} | {:<30} | {:<22} | {}",
                    truncate(title.trim(), 24),
                    card.function.label(),
                    card.destination.to_string(),
                    card.industry.label(),
                    card.reasons_cell()
                );
            }
            Ok(())
        }
        Commands::Rents {
            cities,
            pages,
            output,
        } => {
            let client = HttpClient::new(&settings)?;
            let mut all = Vec::new();
            for city in &cities {
                let records =
                    rents::lianjia::fetch_city(&client, city, pages, settings.page_delay()).await;
                println!(
                    "{} average rent: {:.2} yuan/sqm/month",
                    rents::city_name(city),
                    rents::average_price_per_sqm(&records)
                );
                all.extend(records);
            }
            output::write_rents_csv(&all, &output)?;
            println!("Saved {} listings to {}", all.len(), output.display());
            Ok(())
        }
        Commands::Provinces { pages, raw, output } => {
            let client = HttpClient::new(&settings)?;
            let provinces = rents::provinces::collect(&client, pages, settings.page_delay()).await;

            let averages: Vec<(String, f64)> = provinces
                .iter()
                .map(|p| (p.province.clone(), p.average()))
                .collect();
            for (province, avg) in &averages {
                println!("{}: {:.2} yuan/sqm/month", province, avg);
            }

            let all: Vec<_> = provinces.into_iter().flat_map(|p| p.records).collect();
            output::write_rents_csv(&all, &raw)?;
            output::write_provincial_csv(&averages, &output)?;
            println!(
                "Raw listings saved to {}, provincial averages saved to {}",
                raw.display(),
                output.display()
            );
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
