//! Lexicon-based sentiment scoring.
//!
//! Every lexicon word carries a polarity in `[-1, 1]` and a subjectivity in
//! `[0, 1]`. An intensifier directly before a word scales both scores, and a
//! negation up to two words earlier flips and halves the polarity. The text
//! score is the mean over matched words.

use crate::util::words;

/// Polarity and subjectivity of a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sentiment {
    /// Emotional valence, -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// Opinion content, 0.0 (factual) to 1.0 (opinionated)
    pub subjectivity: f64,
}

/// How far back a negation word still applies.
const NEGATION_WINDOW: usize = 2;

/// Polarity multiplier applied under negation.
const NEGATION_FACTOR: f64 = -0.5;

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "without", "isn't",
    "aren't", "wasn't", "weren't", "don't", "doesn't", "didn't", "won't", "wouldn't", "can't",
    "cannot", "couldn't", "shouldn't", "hardly",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("extremely", 1.5),
    ("really", 1.2),
    ("highly", 1.3),
    ("deeply", 1.3),
    ("incredibly", 1.4),
    ("remarkably", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("quite", 1.1),
    ("most", 1.3),
    ("more", 1.1),
    ("slightly", 0.6),
    ("somewhat", 0.7),
    ("barely", 0.5),
];

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    // positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("excellent", 1.0, 1.0),
    ("best", 1.0, 0.3),
    ("better", 0.5, 0.5),
    ("wonderful", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("positive", 0.23, 0.55),
    ("strong", 0.43, 0.73),
    ("stronger", 0.43, 0.73),
    ("robust", 0.5, 0.6),
    ("growth", 0.3, 0.4),
    ("gain", 0.4, 0.4),
    ("gains", 0.4, 0.4),
    ("rally", 0.5, 0.4),
    ("surge", 0.4, 0.5),
    ("soar", 0.5, 0.5),
    ("soared", 0.5, 0.5),
    ("record", 0.2, 0.3),
    ("success", 0.6, 0.6),
    ("successful", 0.75, 0.95),
    ("win", 0.6, 0.5),
    ("wins", 0.6, 0.5),
    ("happy", 0.8, 1.0),
    ("optimistic", 0.6, 0.8),
    ("confident", 0.5, 0.7),
    ("benefit", 0.4, 0.4),
    ("improve", 0.4, 0.4),
    ("improved", 0.4, 0.4),
    ("improvement", 0.4, 0.4),
    ("recovery", 0.3, 0.4),
    ("profit", 0.3, 0.3),
    ("profitable", 0.5, 0.5),
    ("boost", 0.4, 0.4),
    ("beautiful", 0.85, 1.0),
    ("nice", 0.6, 1.0),
    ("love", 0.5, 0.6),
    ("easy", 0.43, 0.83),
    ("healthy", 0.5, 0.5),
    ("safe", 0.5, 0.5),
    ("stable", 0.2, 0.4),
    ("important", 0.4, 1.0),
    ("innovative", 0.5, 0.7),
    ("impressive", 1.0, 1.0),
    ("promising", 0.6, 0.7),
    ("welcome", 0.8, 0.9),
    ("hope", 0.3, 0.6),
    ("helpful", 0.5, 0.6),
    ("fair", 0.4, 0.6),
    ("bright", 0.7, 0.7),
    ("bullish", 0.5, 0.6),
    ("upbeat", 0.6, 0.7),
    // negative
    ("bad", -0.7, 0.67),
    ("worse", -0.4, 0.6),
    ("worst", -1.0, 1.0),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("weak", -0.38, 0.63),
    ("weaker", -0.38, 0.63),
    ("negative", -0.3, 0.4),
    ("loss", -0.4, 0.4),
    ("losses", -0.4, 0.4),
    ("decline", -0.3, 0.4),
    ("declined", -0.3, 0.4),
    ("drop", -0.3, 0.4),
    ("fell", -0.3, 0.3),
    ("fall", -0.3, 0.3),
    ("plunge", -0.6, 0.5),
    ("plunged", -0.6, 0.5),
    ("crash", -0.7, 0.5),
    ("crisis", -0.6, 0.5),
    ("fear", -0.5, 0.7),
    ("fears", -0.5, 0.7),
    ("worried", -0.5, 0.8),
    ("worry", -0.5, 0.8),
    ("concern", -0.3, 0.5),
    ("concerns", -0.3, 0.5),
    ("risk", -0.3, 0.4),
    ("risky", -0.5, 0.6),
    ("threat", -0.5, 0.5),
    ("danger", -0.6, 0.5),
    ("dangerous", -0.6, 0.9),
    ("failure", -0.6, 0.5),
    ("failed", -0.5, 0.3),
    ("fail", -0.5, 0.3),
    ("problem", -0.4, 0.4),
    ("problems", -0.4, 0.4),
    ("sad", -0.5, 1.0),
    ("angry", -0.5, 1.0),
    ("hard", -0.29, 0.54),
    ("difficult", -0.5, 1.0),
    ("disaster", -0.8, 0.7),
    ("scandal", -0.6, 0.6),
    ("corrupt", -0.7, 0.8),
    ("violent", -0.8, 0.8),
    ("war", -0.5, 0.4),
    ("dead", -0.2, 0.4),
    ("deadly", -0.7, 0.5),
    ("killed", -0.6, 0.3),
    ("recession", -0.6, 0.4),
    ("inflation", -0.1, 0.2),
    ("uncertain", -0.3, 0.7),
    ("uncertainty", -0.3, 0.7),
    ("volatile", -0.3, 0.6),
    ("bearish", -0.5, 0.6),
    ("slump", -0.5, 0.4),
    ("layoffs", -0.5, 0.3),
    ("debt", -0.2, 0.3),
    ("wrong", -0.5, 0.9),
    ("ugly", -0.7, 1.0),
    ("unfair", -0.5, 0.8),
    ("controversial", -0.2, 0.7),
    // neutral but opinionated
    ("likely", 0.0, 1.0),
    ("unlikely", -0.1, 1.0),
    ("clear", 0.1, 0.38),
    ("major", 0.06, 0.5),
    ("huge", 0.4, 0.9),
    ("significant", 0.38, 0.88),
    ("surprising", 0.1, 0.9),
    ("unexpected", -0.1, 0.8),
];

fn lexicon_entry(word: &str) -> Option<(f64, f64)> {
    LEXICON
        .iter()
        .find(|(w, _, _)| *w == word)
        .map(|(_, p, s)| (*p, *s))
}

fn intensity(word: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, m)| *m)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

/// Scores `text`, returning `(0.0, 0.0)` when no lexicon word occurs.
///
/// # Examples
///
/// ```
/// use newsbrief::content::analyze_sentiment;
///
/// let s = analyze_sentiment("A great result.");
/// assert!(s.polarity > 0.0);
/// assert!(analyze_sentiment("not great").polarity < 0.0);
/// ```
pub fn analyze(text: &str) -> Sentiment {
    let tokens = words(text);
    let mut scores: Vec<(f64, f64)> = Vec::new();

    for (idx, word) in tokens.iter().enumerate() {
        let Some((mut polarity, mut subjectivity)) = lexicon_entry(word) else {
            continue;
        };

        let mut lookback = idx;
        if let Some(multiplier) = idx
            .checked_sub(1)
            .and_then(|prev| intensity(&tokens[prev]))
        {
            polarity *= multiplier;
            subjectivity *= multiplier;
            lookback -= 1;
        }

        let window_start = lookback.saturating_sub(NEGATION_WINDOW);
        if tokens[window_start..lookback].iter().any(|w| is_negation(w)) {
            polarity *= NEGATION_FACTOR;
        }

        scores.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
    }

    if scores.is_empty() {
        return Sentiment::default();
    }

    let n = scores.len() as f64;
    let polarity = scores.iter().map(|(p, _)| p).sum::<f64>() / n;
    let subjectivity = scores.iter().map(|(_, s)| s).sum::<f64>() / n;

    Sentiment {
        polarity: polarity.clamp(-1.0, 1.0),
        subjectivity: subjectivity.clamp(0.0, 1.0),
    }
}
