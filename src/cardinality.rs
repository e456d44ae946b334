//! Element occurrence rules per list type.

use std::collections::HashMap;

use crate::list_type::ListType;

/// Occurrence counts of element names within one validation run.
#[derive(Debug, Default, Clone)]
pub struct ElementCounts {
    counts: HashMap<String, usize>,
}

impl ElementCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence. `FORMAT` and `DATEIENDE` never count.
    pub fn record(&mut self, name: &str) {
        if name == "FORMAT" || name == "DATEIENDE" {
            return;
        }
        *self.counts.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Occurrence constraints of one list type.
#[derive(Debug, Clone, Copy)]
pub struct CardinalityRules {
    pub exactly_one: &'static [&'static str],
    pub at_most_one: &'static [&'static str],
    pub at_least_one: &'static [&'static str],
    /// Result lists without any element are not checked.
    pub skip_when_empty: bool,
}

const RESULT_LIST_RULES: CardinalityRules = CardinalityRules {
    exactly_one: &["ERZEUGER", "VERANSTALTUNG", "VERANSTALTER", "AUSRICHTER"],
    at_most_one: &[],
    at_least_one: &["ABSCHNITT", "WETTKAMPF", "WERTUNG", "VEREIN"],
    skip_when_empty: true,
};

pub fn rules_for(list_type: ListType) -> CardinalityRules {
    match list_type {
        ListType::Wettkampfdefinitionsliste => CardinalityRules {
            exactly_one: &[
                "ERZEUGER",
                "VERANSTALTUNG",
                "VERANSTALTUNGSORT",
                "AUSSCHREIBUNGIMNETZ",
                "VERANSTALTER",
                "AUSRICHTER",
                "MELDEADRESSE",
                "MELDESCHLUSS",
            ],
            at_most_one: &["BANKVERBINDUNG", "BESONDERES", "NACHWEIS"],
            at_least_one: &["ABSCHNITT", "WETTKAMPF", "WERTUNG", "MELDEGELD"],
            skip_when_empty: false,
        },
        ListType::Vereinsmeldeliste => CardinalityRules {
            exactly_one: &["ERZEUGER", "VERANSTALTUNG", "VEREIN", "ANSPRECHPARTNER"],
            at_most_one: &[],
            at_least_one: &["ABSCHNITT", "WETTKAMPF"],
            skip_when_empty: false,
        },
        ListType::Wettkampfergebnisliste | ListType::Vereinsergebnisliste => RESULT_LIST_RULES,
    }
}

impl CardinalityRules {
    /// Diagnostics for `counts`, prefixed with the list type name.
    pub fn check(&self, list_type: ListType, counts: &ElementCounts) -> Vec<String> {
        let mut errors = Vec::new();
        if self.skip_when_empty && counts.is_empty() {
            return errors;
        }

        for name in self.exactly_one {
            match counts.get(name) {
                0 => errors.push(missing(list_type, name)),
                1 => {}
                n => errors.push(format!(
                    "{list_type}: element '{name}' occurs {n} times (expected 1)"
                )),
            }
        }

        for name in self.at_most_one {
            let n = counts.get(name);
            if n > 1 {
                errors.push(format!(
                    "{list_type}: element '{name}' occurs {n} times (max 1)"
                ));
            }
        }

        for name in self.at_least_one {
            if counts.get(name) == 0 {
                errors.push(missing(list_type, name));
            }
        }

        errors
    }
}

fn missing(list_type: ListType, name: &str) -> String {
    format!("{list_type}: missing required element '{name}'")
}
