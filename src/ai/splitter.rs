use unicode_segmentation::UnicodeSegmentation;

/// Segments text into an ordered list of sentences.
pub trait SentenceSplitter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<String>;
}

/// Lowercased abbreviations, without their final period, that never end a
/// sentence on their own.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "ft", "gen", "lt", "col", "maj",
    "capt", "cmdr", "sgt", "adm", "gov", "sen", "rep", "pres", "rev", "hon", "messrs",
    "vs", "approx", "dept", "est", "inc", "ltd", "corp", "co", "bros", "jan", "feb", "mar",
    "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "e.g", "i.e", "cf", "al",
];

/// Sentence boundaries per Unicode UAX #29, re-joined across abbreviations.
///
/// UAX #29 breaks after any period followed by a capital, so "Mr. Smith" or
/// "the U.S. Senate" would otherwise split mid-sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSplitter;

impl SentenceSplitter for UnicodeSentenceSplitter {
    fn segment(&self, text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut pending = String::new();

        for piece in text.unicode_sentences() {
            pending.push_str(piece);
            if ends_with_abbreviation(&pending) {
                continue;
            }
            push_sentence(&mut sentences, &pending);
            pending.clear();
        }
        push_sentence(&mut sentences, &pending);

        sentences
    }
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}

/// True when the last word of `segment` is a known abbreviation or an
/// initialism such as "U.S." or "J.".
fn ends_with_abbreviation(segment: &str) -> bool {
    let Some(stem) = segment.trim_end().strip_suffix('.') else {
        return false;
    };
    let word = stem
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        return false;
    }

    let lowered = word.to_lowercase();
    ABBREVIATIONS.contains(&lowered.as_str()) || is_initialism(word)
}

fn is_initialism(word: &str) -> bool {
    word.split('.').all(|part| {
        let mut chars = part.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
    })
}

/// Keeps the first `limit` sentences of `summary`, joined by single spaces.
///
/// A summary with fewer sentences than `limit` is returned whole.
#[must_use]
pub fn trim_to_sentences(splitter: &dyn SentenceSplitter, summary: &str, limit: usize) -> String {
    splitter
        .segment(summary)
        .into_iter()
        .take(limit)
        .collect::<Vec<_>>()
        .join(" ")
}
