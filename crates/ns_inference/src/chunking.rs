//! Splitting long text into pieces that fit a fixed-context model.

pub const DEFAULT_WRAP_WIDTH: usize = 3000;
pub const DEFAULT_PARAGRAPH_BUDGET: usize = 2000;

/// Greedy word wrap into lines of at most `width` characters.
///
/// Words are re-joined with single spaces, so runs of whitespace (including
/// newlines) collapse. A word longer than `width` is broken into
/// `width`-sized pieces.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let chars: Vec<char> = word.chars().collect();
            let mut pieces = chars.chunks(width).map(|c| c.iter().collect::<String>());
            let last = pieces.next_back();
            lines.extend(pieces);
            // the tail of a broken word can still share a line with what follows
            if let Some(tail) = last {
                current_len = tail.chars().count();
                current = tail;
            }
            continue;
        }

        let needed = if current.is_empty() { word_len } else { current_len + 1 + word_len };
        if needed > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_len = needed;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Greedily packs blank-line separated paragraphs into chunks of roughly
/// `max_chars` characters.
///
/// A paragraph that alone exceeds the budget becomes its own chunk. Empty
/// chunks are never returned.
pub fn chunk_paragraphs(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for para in text.split("\n\n") {
        let para_len = para.chars().count();
        if current_len + para_len <= max_chars {
            current.push_str(para);
            current.push_str("\n\n");
            current_len += para_len + 2;
        } else {
            let flushed = current.trim();
            if !flushed.is_empty() {
                chunks.push(flushed.to_string());
            }
            current.clear();
            current.push_str(para);
            current.push_str("\n\n");
            current_len = para_len + 2;
        }
    }

    let flushed = current.trim();
    if !flushed.is_empty() {
        chunks.push(flushed.to_string());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ws(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn sample_text() -> String {
        let para = "The council met on Tuesday to discuss the budget. Members argued for hours \
                    about road repairs and the new library.";
        (0..40)
            .map(|i| format!("{} Paragraph {}.", para, i))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = sample_text();
        let lines = wrap_text(&text, 300);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 300));
    }

    #[test]
    fn test_wrap_round_trip() {
        let text = sample_text();
        let lines = wrap_text(&text, 3000);
        assert_eq!(strip_ws(&lines.concat()), strip_ws(&text));
        assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        let word = "a".repeat(25);
        let text = format!("short {} end", word);
        let lines = wrap_text(&text, 10);
        assert_eq!(lines, vec!["short", "aaaaaaaaaa", "aaaaaaaaaa", "aaaaa end"]);
        assert_eq!(strip_ws(&lines.concat()), strip_ws(&text));
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_text("", 3000).is_empty());
        assert!(wrap_text(" \n\t ", 3000).is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let text = "one two three";
        assert_eq!(wrap_text(text, DEFAULT_WRAP_WIDTH), vec!["one two three"]);
    }

    #[test]
    fn test_paragraph_chunks_round_trip() {
        let text = sample_text();
        let chunks = chunk_paragraphs(&text, DEFAULT_PARAGRAPH_BUDGET);
        assert!(chunks.len() > 1);
        assert_eq!(strip_ws(&chunks.concat()), strip_ws(&text));
    }

    #[test]
    fn test_paragraph_chunks_stay_within_budget() {
        let text = sample_text();
        let chunks = chunk_paragraphs(&text, 500);
        assert!(chunks.iter().all(|c| c.chars().count() <= 500));
    }

    #[test]
    fn test_oversized_paragraph_is_own_chunk() {
        let big = "word ".repeat(100);
        let text = format!("{}\n\nsmall tail", big.trim());
        let chunks = chunk_paragraphs(&text, 50);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], big.trim());
        assert_eq!(chunks[1], "small tail");
    }

    #[test]
    fn test_paragraph_chunks_never_empty() {
        let chunks = chunk_paragraphs("\n\n\n\n", 10);
        assert!(chunks.is_empty());
    }
}
