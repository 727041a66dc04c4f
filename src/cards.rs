use chrono::Datelike;
use serde::Serialize;

use crate::classify::EventCard;
use crate::sources::{RawRecord, Source};

pub const ORIGIN: &str = "深圳";

/// One output row: provenance plus the classified fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardRow {
    pub company: String,
    pub year: i32,
    pub function: String,
    pub destination: String,
    pub industry: String,
    pub origin: String,
    pub evidence_url: String,
    pub evidence_type: String,
    pub evidence_strength: String,
    pub reasons: String,
    pub raw_title: String,
    pub raw_summary: String,
    pub source: String,
}

impl CardRow {
    pub const HEADERS: [&'static str; 13] = [
        "company",
        "year",
        "function",
        "destination",
        "industry",
        "origin",
        "evidence_url",
        "evidence_type",
        "evidence_strength",
        "reasons",
        "raw_title",
        "raw_summary",
        "source",
    ];

    /// `fallback_year` stands in when the record carries no date.
    pub fn build(source: Source, record: &RawRecord, card: &EventCard, fallback_year: i32) -> Self {
        CardRow {
            company: record
                .company
                .clone()
                .unwrap_or_else(|| source.default_company().to_string()),
            year: record.announce_date.map(|d| d.year()).unwrap_or(fallback_year),
            function: card.function.label().to_string(),
            destination: card.destination.to_string(),
            industry: card.industry.label().to_string(),
            origin: ORIGIN.to_string(),
            evidence_url: record.source_url.clone().unwrap_or_default(),
            evidence_type: source.evidence_type().to_string(),
            evidence_strength: source.evidence_strength(record).to_string(),
            reasons: card.reasons_cell(),
            raw_title: record.display_title.clone().unwrap_or_else(|| record.title.clone()),
            raw_summary: record.summary.clone().unwrap_or_default(),
            source: source.name().to_string(),
        }
    }

    /// Cells in `HEADERS` order.
    pub fn cells(&self) -> [String; 13] {
        [
            self.company.clone(),
            self.year.to_string(),
            self.function.clone(),
            self.destination.clone(),
            self.industry.clone(),
            self.origin.clone(),
            self.evidence_url.clone(),
            self.evidence_type.clone(),
            self.evidence_strength.clone(),
            self.reasons.clone(),
            self.raw_title.clone(),
            self.raw_summary.clone(),
            self.source.clone(),
        ]
    }
}
