pub mod categories;
pub mod rules;
pub mod tables;

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::sources::RawRecord;
use categories::{Destination, Function, Industry, ReasonCode};
use rules::Rules;

/// The four categorical fields derived from one record title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCard {
    pub function: Function,
    pub destination: Destination,
    pub industry: Industry,
    pub reasons: BTreeSet<ReasonCode>,
}

impl EventCard {
    /// Reasons joined by `|` in taxonomy order; empty when none matched.
    pub fn reasons_cell(&self) -> String {
        self.reasons
            .iter()
            .map(|r| r.label())
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Keyword classifier over an immutable rule set.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    rules: Rules,
}

impl Classifier {
    pub fn new(rules: Rules) -> Self {
        Classifier { rules }
    }

    /// Total: unmatched fields fall back to their sentinels.
    pub fn classify(&self, record: &RawRecord) -> EventCard {
        self.classify_title(&record.title)
    }

    pub fn classify_title(&self, title: &str) -> EventCard {
        let function = rules::first_match(&self.rules.functions, title).unwrap_or(Function::Undisclosed);

        let destination = match rules::find_place(&self.rules.gazetteers, title) {
            Some((place, region)) => Destination::Place {
                name: place.name.clone(),
                region,
            },
            None => Destination::Undisclosed,
        };

        let industry =
            rules::first_match(&self.rules.industries, title).unwrap_or(Industry::OtherManufacturing);

        let reasons = rules::all_matches(&self.rules.reasons, title);

        EventCard {
            function,
            destination,
            industry,
            reasons,
        }
    }

    /// Classify a batch in parallel; output order matches input order.
    pub fn classify_all(&self, records: &[RawRecord]) -> Vec<EventCard> {
        records.par_iter().map(|r| self.classify(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use categories::Region;

    fn record(title: &str) -> RawRecord {
        RawRecord {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn line_relocation_to_suzhou() {
        let card = Classifier::default().classify(&record("苏州产线搬迁"));
        assert_eq!(card.function, Function::RelocationLine);
        assert_eq!(card.destination.to_string(), "moving to 苏州（domestic）");
        assert_eq!(card.industry, Industry::OtherManufacturing);
        assert!(card.reasons.is_empty());
    }

    #[test]
    fn keyword_free_title_gets_sentinels() {
        let card = Classifier::default().classify(&record("内部公告"));
        assert_eq!(card.function, Function::Undisclosed);
        assert_eq!(card.destination, Destination::Undisclosed);
        assert_eq!(card.destination.to_string(), categories::NO_PLACE_SENTINEL);
        assert_eq!(card.industry, Industry::OtherManufacturing);
        assert!(card.reasons.is_empty());
        assert_eq!(card.reasons_cell(), "");
    }

    #[test]
    fn empty_and_whitespace_titles_are_total() {
        let classifier = Classifier::default();
        for title in ["", "   ", "\n\t"] {
            let card = classifier.classify(&record(title));
            assert_eq!(card.function, Function::Undisclosed);
            assert_eq!(card.destination, Destination::Undisclosed);
            assert_eq!(card.industry, Industry::OtherManufacturing);
            assert!(card.reasons.is_empty());
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let classifier = Classifier::default();
        let r = record("关于芯片研发中心迁往越南的公告");
        assert_eq!(classifier.classify(&r), classifier.classify(&r));
    }

    #[test]
    fn function_priority_ignores_keyword_position() {
        let classifier = Classifier::default();
        for title in ["总部搬迁至东莞", "搬迁总部至东莞", "东莞搬迁，总部"] {
            assert_eq!(classifier.classify(&record(title)).function, Function::HeadquartersMove);
        }
        assert_eq!(
            classifier.classify(&record("研发中心与运营中心迁址")).function,
            Function::RdMove
        );
    }

    #[test]
    fn reasons_are_a_union() {
        let card = Classifier::default().classify(&record("因成本上升及人才短缺迁往东莞"));
        let expected: BTreeSet<_> = [ReasonCode::Cost, ReasonCode::Talent].into_iter().collect();
        assert_eq!(card.reasons, expected);
        assert_eq!(card.reasons_cell(), "cost|talent");
        assert_eq!(card.function, Function::Relocation);
    }

    #[test]
    fn domestic_place_outranks_southeast_asia() {
        let card = Classifier::default().classify(&record("越南工厂投产后东莞基地调整"));
        assert_eq!(
            card.destination,
            Destination::Place {
                name: "东莞".into(),
                region: Region::Domestic
            }
        );
    }

    #[test]
    fn southeast_asia_outranks_western() {
        let card = Classifier::default().classify(&record("关于美国工厂产能转移至越南的公告"));
        assert_eq!(
            card.destination,
            Destination::Place {
                name: "越南".into(),
                region: Region::SoutheastAsia
            }
        );
        assert_eq!(card.destination.to_string(), "moving to 越南（southeast-asia）");
    }

    #[test]
    fn zhongshan_yields_to_other_cities() {
        let card = Classifier::default().classify(&record("中山大学合作研发中心迁至广州"));
        assert_eq!(card.destination.to_string(), "moving to 广州（domestic）");
        let card = Classifier::default().classify(&record("生产基地迁往中山"));
        assert_eq!(card.destination.to_string(), "moving to 中山（domestic）");
    }

    #[test]
    fn western_destination_when_only_western_place() {
        let card = Classifier::default().classify(&record("关于在墨西哥设立生产基地的公告"));
        assert_eq!(card.destination.to_string(), "moving to 墨西哥（western）");
        assert_eq!(card.function, Function::RelocationLine);
    }

    #[test]
    fn industry_first_match() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify(&record("锂电池生产线迁建")).industry,
            Industry::NewEnergy
        );
        assert_eq!(
            classifier.classify(&record("跨境电子商务运营中心")).industry,
            Industry::PlatformEconomy
        );
        assert_eq!(
            classifier.classify(&record("医疗设备厂区搬迁")).industry,
            Industry::BiomedMedicalDevice
        );
    }

    #[test]
    fn custom_rules_replace_defaults() {
        let mut rules = Rules::default();
        rules.functions = vec![rules::KeywordRule {
            category: Function::OperationsCenterMove,
            keywords: vec!["仓".to_string()],
        }];
        let card = Classifier::new(rules).classify(&record("仓库搬迁"));
        assert_eq!(card.function, Function::OperationsCenterMove);
    }

    #[test]
    fn batch_preserves_order() {
        let records: Vec<_> = (0..200)
            .map(|i| if i % 2 == 0 { record("苏州产线搬迁") } else { record("内部公告") })
            .collect();
        let cards = Classifier::default().classify_all(&records);
        assert_eq!(cards.len(), 200);
        for (i, card) in cards.iter().enumerate() {
            let expected = if i % 2 == 0 { Function::RelocationLine } else { Function::Undisclosed };
            assert_eq!(card.function, expected);
        }
    }
}
