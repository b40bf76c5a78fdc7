use std::borrow::Cow;

/// Abbreviations that end in a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co", "corp",
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "gov",
    "sen", "rep", "gen", "u.s", "u.k", "e.g", "i.e", "a.m", "p.m",
];

/// Collapses every run of whitespace into a single space and trims the ends.
///
/// Returns `Cow::Borrowed` when the input is already normalized.
///
/// # Examples
///
/// ```
/// use newsbrief::util::normalize_whitespace;
///
/// assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
/// assert_eq!(normalize_whitespace("clean text"), "clean text");
/// ```
pub fn normalize_whitespace(s: &str) -> Cow<'_, str> {
    let trimmed = s.trim();
    let mut prev_space = false;
    let needs_work = trimmed.len() != s.len()
        || trimmed.chars().any(|c| {
            let bad = c.is_whitespace() && (c != ' ' || prev_space);
            prev_space = c.is_whitespace();
            bad
        });

    if !needs_work {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(trimmed.len());
    for word in trimmed.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    Cow::Owned(out)
}

/// Splits prose into sentences on `.`, `!` and `?` followed by whitespace.
///
/// Periods after common abbreviations ("Mr.", "U.S.") and single initials do
/// not end a sentence. Returned slices are trimmed and never empty.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        // Closing quotes/brackets stay with the sentence they end.
        let mut end = idx + c.len_utf8();
        while let Some(&(next_idx, next)) = chars.peek() {
            if matches!(next, '"' | '\'' | ')' | '\u{201d}' | '\u{2019}') {
                end = next_idx + next.len_utf8();
                chars.next();
            } else {
                break;
            }
        }

        let at_boundary = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
        if !at_boundary || (c == '.' && ends_with_abbreviation(&text[start..idx])) {
            continue;
        }

        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = end;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail);
    }
    sentences
}

fn ends_with_abbreviation(before_period: &str) -> bool {
    let last = before_period
        .rsplit(|c: char| c.is_whitespace() || c == '(' || c == '"')
        .next()
        .unwrap_or("");
    if last.chars().count() == 1 && last.chars().all(|c| c.is_uppercase()) {
        return true;
    }
    let lower = last.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Lowercased word tokens of `text`.
///
/// Tokens are runs of alphanumeric characters; inner apostrophes are kept
/// ("don't"), leading and trailing ones are not.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|w| w.trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Truncates `s` to at most `max_chars` characters, appending "..." when cut.
pub fn truncate_chars(s: &str, max_chars: usize) -> Cow<'_, str> {
    match s.char_indices().nth(max_chars) {
        None => Cow::Borrowed(s),
        Some((byte_idx, _)) => {
            let cut = s[..byte_idx].trim_end();
            Cow::Owned(format!("{}...", cut))
        }
    }
}
