//! Regex and gazetteer based entity recognizer.
//!
//! Good enough to notice the names, places and dates a summary dropped; it is
//! not a statistical tagger, so sentence-initial capitals and unusual names
//! will be missed or mislabeled.

use lazy_static::lazy_static;
use regex::Regex;
use ns_core::{Entity, EntityLabel, EntityRecognizer};

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December";
const MONTHS_SHORT: &str = "Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec";
const WEEKDAYS: &str = "Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday";

const PLACES: &[&str] = &[
    "Afghanistan", "Argentina", "Australia", "Austria", "Bangladesh", "Belgium", "Brazil",
    "Canada", "Chile", "China", "Colombia", "Cuba", "Denmark", "Egypt", "Ethiopia", "Finland",
    "France", "Gaza", "Germany", "Greece", "Hong Kong", "Hungary", "India", "Indonesia", "Iran",
    "Iraq", "Ireland", "Israel", "Italy", "Japan", "Kenya", "Lebanon", "Mexico", "Morocco",
    "Netherlands", "New Zealand", "Nigeria", "North Korea", "Norway", "Pakistan", "Peru",
    "Philippines", "Poland", "Portugal", "Russia", "Saudi Arabia", "Scotland", "South Africa",
    "South Korea", "Spain", "Sudan", "Sweden", "Switzerland", "Syria", "Taiwan", "Thailand",
    "Turkey", "Ukraine", "United Arab Emirates", "United Kingdom", "United States", "Venezuela",
    "Vietnam", "Wales", "Yemen", "UK", "US", "USA", "EU",
    "Amsterdam", "Athens", "Bangkok", "Beijing", "Berlin", "Boston", "Brussels", "Buenos Aires",
    "Cairo", "Chicago", "Delhi", "Dubai", "Geneva", "Istanbul", "Jerusalem", "Kabul", "Kyiv",
    "Lagos", "London", "Los Angeles", "Madrid", "Manchester", "Melbourne", "Mexico City",
    "Moscow", "Mumbai", "Nairobi", "New Delhi", "New York", "New York City", "Paris", "Rome",
    "San Francisco", "Seoul", "Shanghai", "Singapore", "Sydney", "Tehran", "Tokyo", "Toronto",
    "Washington", "California", "Texas", "Florida", "Ohio", "Georgia", "Michigan",
];

/// Capitalized words that start sentences far more often than names.
const NOT_NAMES: &[&str] = &[
    "The", "A", "An", "In", "On", "At", "By", "For", "From", "Of", "To", "With", "This", "That",
    "These", "Those", "He", "She", "It", "They", "We", "I", "You", "His", "Her", "Their", "Our",
    "But", "And", "Or", "If", "When", "While", "After", "Before", "As", "Mr", "Mrs", "Ms", "Dr",
    "President", "Prime", "Minister", "Senator", "Governor", "Chief", "Officials", "Police",
];

lazy_static! {
    static ref DATE_PATTERN: Regex = Regex::new(&format!(
        r"\b(?:(?:{m}|{s})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{m})(?:\s+\d{{4}})?|(?:{m})\s+\d{{4}}|\d{{1,2}}/\d{{1,2}}/\d{{2,4}}|\d{{4}}-\d{{2}}-\d{{2}}|(?:{w}))\b",
        m = MONTHS,
        s = MONTHS_SHORT,
        w = WEEKDAYS
    ))
    .unwrap();

    static ref EVENT_PATTERN: Regex = Regex::new(
        r"\b(?:\d{4}\s+)?(?:[A-Z][a-z]+\s+){1,4}(?:Olympics|Games|Cup|Championships?|Summit|Conference|Festival|War|Elections?|Marathon|Expo|Awards)(?:\s+[IVX]+)?\b"
    )
    .unwrap();

    static ref ORG_PATTERN: Regex = Regex::new(
        r"\b(?:(?:[A-Z][A-Za-z&]+\s+){1,4}(?:Inc|Corp|Corporation|Ltd|LLC|Group|Company|Bank|University|Institute|Agency|Council|Party|Foundation|Association|Commission|Committee)|(?:University|Ministry|Department|Bank|Institute|Office) of(?:\s+[A-Z][a-z]+)+)\b"
    )
    .unwrap();

    static ref ACRONYM_PATTERN: Regex = Regex::new(r"\b[A-Z]{2,6}\b").unwrap();

    static ref PLACE_PATTERN: Regex = {
        let mut places: Vec<&str> = PLACES.to_vec();
        // longest first so "New York City" wins over "New York"
        places.sort_by(|a, b| b.len().cmp(&a.len()));
        let alternation = places
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(r"\b(?:{})\b", alternation)).unwrap()
    };

    static ref PERSON_PATTERN: Regex = Regex::new(
        r"\b[A-Z][a-z]+(?:[-'][A-Z][a-z]+)?(?:\s+[A-Z]\.)?(?:\s+[A-Z][a-z]+(?:[-'][A-Z][a-z]+)?){1,2}\b"
    )
    .unwrap();
}

#[derive(Debug, Default, Clone)]
pub struct PatternRecognizer;

impl PatternRecognizer {
    pub fn new() -> Self {
        Self
    }
}

struct Claims {
    spans: Vec<(usize, usize, Entity)>,
}

impl Claims {
    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.spans.iter().any(|(s, e, _)| start < *e && *s < end)
    }

    fn claim(&mut self, start: usize, end: usize, text: &str, label: EntityLabel) {
        if !self.overlaps(start, end) {
            self.spans.push((start, end, Entity::new(text, label)));
        }
    }
}

fn person_candidate(candidate: &str) -> Option<(usize, &str)> {
    let mut offset = 0;
    let mut rest = candidate;
    while let Some(word) = rest.split_whitespace().next() {
        if !NOT_NAMES.contains(&word.trim_end_matches('.')) {
            break;
        }
        let skip = rest.find(word).unwrap_or(0) + word.len();
        offset += skip;
        rest = &rest[skip..];
    }

    let trimmed = rest.trim_start();
    offset += rest.len() - trimmed.len();
    let words: Vec<&str> = trimmed.split_whitespace().collect();
    let month_or_day = |w: &&str| MONTHS.split('|').any(|m| m == *w) || WEEKDAYS.split('|').any(|d| d == *w);

    if words.len() < 2 || words.iter().any(month_or_day) {
        return None;
    }
    Some((offset, trimmed))
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Vec<Entity> {
        let mut claims = Claims { spans: Vec::new() };

        for m in DATE_PATTERN.find_iter(text) {
            claims.claim(m.start(), m.end(), m.as_str(), EntityLabel::Date);
        }
        for m in EVENT_PATTERN.find_iter(text) {
            claims.claim(m.start(), m.end(), m.as_str(), EntityLabel::Event);
        }
        for m in ORG_PATTERN.find_iter(text) {
            claims.claim(m.start(), m.end(), m.as_str(), EntityLabel::Org);
        }
        for m in PLACE_PATTERN.find_iter(text) {
            claims.claim(m.start(), m.end(), m.as_str(), EntityLabel::Gpe);
        }
        for m in ACRONYM_PATTERN.find_iter(text) {
            claims.claim(m.start(), m.end(), m.as_str(), EntityLabel::Org);
        }
        for m in PERSON_PATTERN.find_iter(text) {
            if let Some((offset, name)) = person_candidate(m.as_str()) {
                let start = m.start() + offset;
                claims.claim(start, start + name.len(), name, EntityLabel::Person);
            }
        }

        claims.spans.sort_by_key(|(start, _, _)| *start);
        claims.spans.into_iter().map(|(_, _, entity)| entity).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labelled(text: &str) -> Vec<(String, EntityLabel)> {
        PatternRecognizer::new()
            .recognize(text)
            .into_iter()
            .map(|e| (e.text, e.label))
            .collect()
    }

    #[test]
    fn test_dates() {
        let found = labelled("The vote was held on March 3, 2024 and again on Friday.");
        assert!(found.contains(&("March 3, 2024".to_string(), EntityLabel::Date)));
        assert!(found.contains(&("Friday".to_string(), EntityLabel::Date)));
    }

    #[test]
    fn test_places_prefer_longest_name() {
        let found = labelled("She moved to New York City last year.");
        assert!(found.contains(&("New York City".to_string(), EntityLabel::Gpe)));
        assert!(!found.iter().any(|(t, _)| t == "New York"));
    }

    #[test]
    fn test_organizations() {
        let found = labelled("Shares of Acme Corp fell after NASA cancelled the contract.");
        assert!(found.contains(&("Acme Corp".to_string(), EntityLabel::Org)));
        assert!(found.contains(&("NASA".to_string(), EntityLabel::Org)));
    }

    #[test]
    fn test_acronym_place_is_not_org() {
        let found = labelled("Talks between the UK and Japan resumed.");
        assert!(found.contains(&("UK".to_string(), EntityLabel::Gpe)));
        assert!(found.contains(&("Japan".to_string(), EntityLabel::Gpe)));
    }

    #[test]
    fn test_people_skip_titles_and_sentence_starters() {
        let found = labelled("President Joe Biden met Maria Lopez in Paris.");
        assert!(found.contains(&("Joe Biden".to_string(), EntityLabel::Person)));
        assert!(found.contains(&("Maria Lopez".to_string(), EntityLabel::Person)));
        assert!(found.contains(&("Paris".to_string(), EntityLabel::Gpe)));
    }

    #[test]
    fn test_events() {
        let found = labelled("Athletes prepared for the Paris Summer Olympics.");
        assert!(found.contains(&("Paris Summer Olympics".to_string(), EntityLabel::Event)));
    }

    #[test]
    fn test_results_in_text_order() {
        let found = labelled("On Monday, Maria Lopez visited Berlin.");
        let texts: Vec<&str> = found.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(texts, vec!["Monday", "Maria Lopez", "Berlin"]);
    }
}
