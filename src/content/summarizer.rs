//! Keyword-frequency extractive summarization.
//!
//! Sentences are ranked by four features: overlap with the headline, keyword
//! frequency and density, position in the article, and closeness to an ideal
//! length. The best sentences are returned in their original order.

use std::collections::{HashMap, HashSet};

use crate::util::{split_sentences, words};

/// Number of top keywords used for scoring.
pub const KEYWORD_COUNT: usize = 10;

/// Sentences returned by default.
pub const DEFAULT_SUMMARY_SENTENCES: usize = 5;

/// Sentence length (in words) that scores highest.
const IDEAL_SENTENCE_WORDS: f64 = 20.0;

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "new", "no", "nor", "not", "now",
    "of", "off", "on", "once", "one", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "said", "same", "says", "she", "should", "so", "some", "such", "than", "that",
    "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were", "what",
    "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
    "your", "yours", "yourself", "yourselves",
];

/// A generated summary plus the keywords that drove it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Selected sentences in article order
    pub sentences: Vec<String>,
    /// Most frequent non-stopword terms, most frequent first
    pub keywords: Vec<String>,
}

impl Summary {
    /// Sentences joined one per line.
    pub fn text(&self) -> String {
        self.sentences.join("\n")
    }
}

fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Top `limit` keywords of `text` with their scores.
///
/// The score is `1.0 + 1.5 * frequency / total_words`. Ties keep the order in
/// which words first appear. Stopwords, single characters and pure numbers are
/// ignored.
pub fn keywords(text: &str, limit: usize) -> Vec<(String, f64)> {
    let tokens = words(text);
    let total = tokens.len();
    if total == 0 {
        return Vec::new();
    }

    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, word) in tokens.iter().enumerate() {
        if word.chars().count() < 2
            || is_stopword(word)
            || word.chars().all(|c| c.is_ascii_digit())
        {
            continue;
        }
        counts.entry(word.as_str()).or_insert((0, idx)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (count, first))| (word, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(word, count, _)| {
            let score = 1.0 + 1.5 * count as f64 / total as f64;
            (word.to_string(), score)
        })
        .collect()
}

/// Builds an extractive summary of `text` of at most `max_sentences` sentences.
///
/// Blank-line separated paragraphs are split into sentences independently,
/// so headings without trailing punctuation do not merge into the next
/// paragraph.
pub fn summarize(title: &str, text: &str, max_sentences: usize) -> Summary {
    let scored_keywords = keywords(text, KEYWORD_COUNT);
    let keyword_scores: HashMap<&str, f64> = scored_keywords
        .iter()
        .map(|(w, s)| (w.as_str(), *s))
        .collect();

    let sentences: Vec<&str> = text
        .split("\n\n")
        .flat_map(split_sentences)
        .collect();
    if sentences.is_empty() || max_sentences == 0 {
        return Summary {
            sentences: Vec::new(),
            keywords: scored_keywords.into_iter().map(|(w, _)| w).collect(),
        };
    }

    let title_words: HashSet<String> = words(title)
        .into_iter()
        .filter(|w| !is_stopword(w))
        .collect();

    let total = sentences.len();
    let mut ranked: Vec<(usize, f64)> = sentences
        .iter()
        .enumerate()
        .map(|(idx, sentence)| {
            let sentence_words = words(sentence);
            let title_feature = title_score(&title_words, &sentence_words);
            let length_feature = length_score(sentence_words.len());
            let position_feature = position_score(idx, total);
            let frequency_feature = (sbs(&sentence_words, &keyword_scores)
                + dbs(&sentence_words, &keyword_scores))
                / 2.0
                * 10.0;
            let score = (title_feature * 1.5
                + frequency_feature * 2.0
                + length_feature
                + position_feature)
                / 4.0;
            (idx, score)
        })
        .collect();

    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.truncate(max_sentences);
    ranked.sort_by_key(|(idx, _)| *idx);

    Summary {
        sentences: ranked
            .into_iter()
            .map(|(idx, _)| sentences[idx].to_string())
            .collect(),
        keywords: scored_keywords.into_iter().map(|(w, _)| w).collect(),
    }
}

fn title_score(title_words: &HashSet<String>, sentence_words: &[String]) -> f64 {
    if title_words.is_empty() {
        return 0.0;
    }
    let hits = sentence_words
        .iter()
        .filter(|w| !is_stopword(w) && title_words.contains(*w))
        .count();
    hits as f64 / title_words.len() as f64
}

fn length_score(word_count: usize) -> f64 {
    (1.0 - (IDEAL_SENTENCE_WORDS - word_count as f64).abs() / IDEAL_SENTENCE_WORDS).max(0.0)
}

/// Leading sentences and the closing one carry the most weight in news copy.
fn position_score(idx: usize, total: usize) -> f64 {
    let normalized = (idx + 1) as f64 / total as f64;
    match normalized {
        n if n <= 0.1 => 0.17,
        n if n <= 0.2 => 0.23,
        n if n <= 0.3 => 0.14,
        n if n <= 0.4 => 0.08,
        n if n <= 0.5 => 0.05,
        n if n < 1.0 => 0.04,
        _ => 0.15,
    }
}

/// Summation-based selection: mean keyword score per word.
fn sbs(sentence_words: &[String], keyword_scores: &HashMap<&str, f64>) -> f64 {
    if sentence_words.is_empty() {
        return 0.0;
    }
    let sum: f64 = sentence_words
        .iter()
        .filter_map(|w| keyword_scores.get(w.as_str()))
        .sum();
    sum / sentence_words.len() as f64 / 10.0
}

/// Density-based selection: rewards keywords that sit close together.
fn dbs(sentence_words: &[String], keyword_scores: &HashMap<&str, f64>) -> f64 {
    let hits: Vec<(usize, f64)> = sentence_words
        .iter()
        .enumerate()
        .filter_map(|(idx, w)| keyword_scores.get(w.as_str()).map(|s| (idx, *s)))
        .collect();
    if hits.len() < 2 {
        return 0.0;
    }

    let sum: f64 = hits
        .windows(2)
        .map(|pair| {
            let distance = (pair[1].0 - pair[0].0) as f64;
            pair[0].1 * pair[1].1 / (distance * distance)
        })
        .sum();

    let distinct: HashSet<&str> = sentence_words
        .iter()
        .map(String::as_str)
        .filter(|w| keyword_scores.contains_key(w))
        .collect();
    let k = distinct.len() as f64 + 1.0;
    sum / (k * (k + 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "The central bank raised interest rates on Tuesday. \
        Inflation has stayed above target for two years, the bank said.\n\n\
        Markets reacted calmly. Some traders had expected the rate increase for weeks.\n\n\
        The weather in the capital was mild. Rates could rise again if inflation persists, \
        according to the central bank governor.";

    #[test]
    fn test_keywords_skip_stopwords_and_rank_by_frequency() {
        let kws = keywords(TEXT, 3);
        let names: Vec<&str> = kws.iter().map(|(w, _)| w.as_str()).collect();
        assert_eq!(names[0], "bank");
        assert!(names.contains(&"central"));
        assert!(!names.contains(&"the"));
        assert!(kws.iter().all(|(_, s)| *s > 1.0));
    }

    #[test]
    fn test_keywords_empty_text() {
        assert!(keywords("", 10).is_empty());
    }

    #[test]
    fn test_summary_limits_sentences_and_keeps_order() {
        let summary = summarize("Central bank raises interest rates", TEXT, 2);
        assert_eq!(summary.sentences.len(), 2);

        let positions: Vec<usize> = summary
            .sentences
            .iter()
            .map(|s| TEXT.find(s.as_str()).unwrap())
            .collect();
        assert!(positions[0] < positions[1]);
    }

    #[test]
    fn test_summary_prefers_relevant_sentences() {
        let summary = summarize("Central bank raises interest rates", TEXT, 2);
        assert!(summary
            .sentences
            .iter()
            .any(|s| s.starts_with("The central bank raised interest rates")));
        assert!(!summary.sentences.iter().any(|s| s.contains("weather")));
    }

    #[test]
    fn test_short_text_returned_whole() {
        let summary = summarize("Title", "Only one sentence here.", 5);
        assert_eq!(summary.sentences, vec!["Only one sentence here.".to_string()]);
        assert_eq!(summary.text(), "Only one sentence here.");
    }

    #[test]
    fn test_position_score_edges() {
        assert_eq!(position_score(0, 10), 0.17);
        assert_eq!(position_score(9, 10), 0.15);
        assert_eq!(position_score(6, 10), 0.04);
    }

    #[test]
    fn test_length_score_peaks_at_ideal() {
        assert_eq!(length_score(20), 1.0);
        assert!(length_score(10) < 1.0);
        assert_eq!(length_score(60), 0.0);
    }
}
