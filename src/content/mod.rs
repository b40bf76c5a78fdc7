//! Article summarization: fetch, extract, summarize, score.
//!
//! [`summarize`] is the entry point. The stages it chains are public so they
//! can be tested and reused on their own:
//!
//! - [`extract`] pulls headline, byline, date and body text from HTML
//! - [`summarize_text`] picks the most representative sentences
//! - [`analyze_sentiment`] scores polarity and subjectivity

mod article;
mod extractor;
mod sentiment;
mod summarizer;

pub use article::{
    summarize, ArticleSummary, SummarizeOptions, SummaryError, BROWSER_USER_AGENT,
};
pub use extractor::{extract, parse_date, ExtractedArticle};
pub use sentiment::{analyze as analyze_sentiment, Sentiment};
pub use summarizer::{
    keywords, summarize as summarize_text, Summary, DEFAULT_SUMMARY_SENTENCES, KEYWORD_COUNT,
};
