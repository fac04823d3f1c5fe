use lazy_static::lazy_static;
use regex::Regex;
use ns_core::HeadlinePair;

const MAX_HEADLINE_WORDS: usize = 10;

lazy_static! {
    // ALL CAPS runs, or two or more Title Case words
    static ref HEADLINE: Regex =
        Regex::new(r"^([A-Z][A-Z\s]{3,}|[A-Z][a-z]+(\s[A-Z][a-z]+)+)$").unwrap();
}

pub fn is_headline(line: &str) -> bool {
    HEADLINE.is_match(line) && line.split_whitespace().count() <= MAX_HEADLINE_WORDS
}

/// Split PDF text into headline/paragraph pairs.
///
/// Lines are classified one at a time; non-headline lines are joined with
/// spaces into the paragraph of the most recent headline. Text before the
/// first headline is dropped, as is a headline with no paragraph after it.
/// An empty result means no usable structure was found.
pub fn extract_headlines_and_paragraphs(text: &str) -> Vec<HeadlinePair> {
    let mut pairs = Vec::new();
    let mut headline: Option<&str> = None;
    let mut paragraph: Vec<&str> = Vec::new();

    let mut flush = |headline: Option<&str>, paragraph: &mut Vec<&str>| {
        if let Some(h) = headline {
            if !paragraph.is_empty() {
                pairs.push(HeadlinePair {
                    headline: h.to_string(),
                    paragraph: paragraph.join(" "),
                });
            }
        }
        paragraph.clear();
    };

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if is_headline(line) {
            flush(headline, &mut paragraph);
            headline = Some(line);
        } else {
            paragraph.push(line);
        }
    }
    flush(headline, &mut paragraph);

    pairs
}
