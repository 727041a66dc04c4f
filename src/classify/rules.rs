use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::categories::{Function, Industry, ReasonCode, Region};
use super::tables;
use crate::error::RulesError;

/// One keyword set mapped to a category. Matches when any keyword is a
/// substring of the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule<T> {
    pub category: T,
    pub keywords: Vec<String>,
}

impl<T> KeywordRule<T> {
    fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|k| text.contains(k.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Place {
    fn found_in(&self, text: &str) -> bool {
        text.contains(self.name.as_str()) || self.aliases.iter().any(|a| text.contains(a.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gazetteer {
    pub region: Region,
    pub places: Vec<Place>,
}

/// Every keyword table the classifier consults. Vector order is priority
/// order for the first-match tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub functions: Vec<KeywordRule<Function>>,
    pub gazetteers: Vec<Gazetteer>,
    pub industries: Vec<KeywordRule<Industry>>,
    pub reasons: Vec<KeywordRule<ReasonCode>>,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            functions: owned_rules(tables::FUNCTION_KEYWORDS),
            gazetteers: tables::GAZETTEERS
                .iter()
                .map(|(region, places)| Gazetteer {
                    region: *region,
                    places: places
                        .iter()
                        .map(|(name, aliases)| Place {
                            name: name.to_string(),
                            aliases: aliases.iter().map(|a| a.to_string()).collect(),
                        })
                        .collect(),
                })
                .collect(),
            industries: owned_rules(tables::INDUSTRY_KEYWORDS),
            reasons: owned_rules(tables::REASON_KEYWORDS),
        }
    }
}

fn owned_rules<T: Copy>(table: &[(T, &[&str])]) -> Vec<KeywordRule<T>> {
    table
        .iter()
        .map(|(category, keywords)| KeywordRule {
            category: *category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

impl Rules {
    /// Load a rules document from JSON and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self, RulesError> {
        let raw = std::fs::read_to_string(path).map_err(|source| RulesError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let rules: Rules = serde_json::from_str(&raw)?;
        rules.validate()?;
        Ok(rules)
    }

    /// An empty keyword is a substring of every title and would make its rule
    /// match unconditionally, so it is rejected. Empty tables would silently
    /// send every field to its sentinel.
    pub fn validate(&self) -> Result<(), RulesError> {
        check_keywords("functions", &self.functions)?;
        check_keywords("industries", &self.industries)?;
        check_keywords("reasons", &self.reasons)?;
        if self.gazetteers.is_empty() {
            return Err(RulesError::EmptyTable { table: "gazetteers" });
        }
        for gazetteer in &self.gazetteers {
            if gazetteer.places.is_empty() {
                return Err(RulesError::EmptyTable {
                    table: gazetteer.region.label(),
                });
            }
            for place in &gazetteer.places {
                if place.name.trim().is_empty() || place.aliases.iter().any(|a| a.trim().is_empty()) {
                    return Err(RulesError::EmptyKeyword {
                        table: "gazetteers",
                        category: gazetteer.region.label().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

fn check_keywords<T: Serialize>(table: &'static str, rules: &[KeywordRule<T>]) -> Result<(), RulesError> {
    if rules.is_empty() {
        return Err(RulesError::EmptyTable { table });
    }
    for rule in rules {
        if rule.keywords.is_empty() || rule.keywords.iter().any(|k| k.trim().is_empty()) {
            let category = serde_json::to_string(&rule.category)
                .unwrap_or_default()
                .trim_matches('"')
                .to_string();
            return Err(RulesError::EmptyKeyword { table, category });
        }
    }
    Ok(())
}

/// First-match discipline: the earliest rule in table order that matches
/// wins, regardless of where its keyword appears in the text.
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], text: &str) -> Option<T> {
    rules.iter().find(|r| r.matches(text)).map(|r| r.category)
}

/// Union discipline: every rule is tested independently.
pub fn all_matches<T: Copy + Ord>(rules: &[KeywordRule<T>], text: &str) -> BTreeSet<T> {
    rules
        .iter()
        .filter(|r| r.matches(text))
        .map(|r| r.category)
        .collect()
}

/// Gazetteers are tried in order, places within a gazetteer in order.
pub fn find_place<'a>(gazetteers: &'a [Gazetteer], text: &str) -> Option<(&'a Place, Region)> {
    gazetteers.iter().find_map(|g| {
        g.places
            .iter()
            .find(|p| p.found_in(text))
            .map(|p| (p, g.region))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule<T>(category: T, keywords: &[&str]) -> KeywordRule<T> {
        KeywordRule {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn first_match_uses_table_order_not_text_order() {
        let rules = vec![
            rule(Function::HeadquartersMove, &["总部"]),
            rule(Function::Relocation, &["搬迁"]),
        ];
        assert_eq!(first_match(&rules, "搬迁总部"), Some(Function::HeadquartersMove));
        assert_eq!(first_match(&rules, "总部搬迁"), Some(Function::HeadquartersMove));
        assert_eq!(first_match(&rules, "公告"), None);
    }

    #[test]
    fn all_matches_collects_every_hit() {
        let rules = vec![
            rule(ReasonCode::Talent, &["人才"]),
            rule(ReasonCode::Cost, &["成本"]),
            rule(ReasonCode::Environmental, &["环保"]),
        ];
        let hits = all_matches(&rules, "人才与成本");
        assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec![ReasonCode::Cost, ReasonCode::Talent]);
    }

    #[test]
    fn aliases_resolve_to_canonical_name() {
        let rules = Rules::default();
        let (place, region) = find_place(&rules.gazetteers, "拟在印尼投资建厂").unwrap();
        assert_eq!(place.name, "印度尼西亚");
        assert_eq!(region, Region::SoutheastAsia);
    }

    #[test]
    fn defaults_are_valid() {
        let rules = Rules::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.reasons.len(), 10);
        assert_eq!(rules.industries.len(), 10);
        assert_eq!(rules.gazetteers.len(), 3);
    }

    #[test]
    fn empty_keyword_is_rejected() {
        let mut rules = Rules::default();
        rules.reasons[0].keywords.push("  ".to_string());
        match rules.validate() {
            Err(RulesError::EmptyKeyword { table, category }) => {
                assert_eq!(table, "reasons");
                assert_eq!(category, "cost");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn empty_tables_are_rejected() {
        let mut rules = Rules::default();
        rules.functions.clear();
        assert!(matches!(
            rules.validate(),
            Err(RulesError::EmptyTable { table: "functions" })
        ));

        let mut rules = Rules::default();
        rules.gazetteers.clear();
        assert!(matches!(
            rules.validate(),
            Err(RulesError::EmptyTable { table: "gazetteers" })
        ));

        let mut rules = Rules::default();
        rules.gazetteers[2].places.clear();
        assert!(matches!(
            rules.validate(),
            Err(RulesError::EmptyTable { table: "western" })
        ));
    }

    #[test]
    fn empty_table_in_file_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut rules = Rules::default();
        rules.reasons.clear();
        std::fs::write(&path, serde_json::to_string(&rules).unwrap()).unwrap();

        let err = Rules::from_json_file(&path).unwrap_err();
        assert!(matches!(err, RulesError::EmptyTable { table: "reasons" }));
    }

    #[test]
    fn rules_round_trip_through_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut rules = Rules::default();
        rules.functions.truncate(1);
        std::fs::write(&path, serde_json::to_string_pretty(&rules).unwrap()).unwrap();

        let loaded = Rules::from_json_file(&path).unwrap();
        assert_eq!(loaded, rules);
    }

    #[test]
    fn missing_rules_file_reports_path() {
        let err = Rules::from_json_file(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
