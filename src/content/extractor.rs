//! Main-content extraction from article HTML.
//!
//! Readability (via `dom_smoothie`) finds the story body and reads the page
//! metadata: title, byline and publish time. A few `scraper` lookups fill in
//! whatever it leaves empty, ending with a `/YYYY/MM/DD/` pattern in the URL.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::util::normalize_whitespace;

/// Upper bound on elements Readability walks before giving up.
const MAX_ELEMENTS_TO_PARSE: usize = 9000;

/// Author strings longer than this are almost always scraped prose.
const MAX_AUTHOR_CHARS: usize = 60;

/// Elements whose text is never story text.
const HIDDEN_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "template", "nav", "header", "footer", "aside", "form",
];

/// Elements that hold one paragraph of story text.
const BLOCK_ELEMENTS: &[&str] = &["p", "li", "blockquote"];
const BLOCK_SELECTOR: &str = "p, li, blockquote";

/// Separators sites use to append their name to the `<title>`.
const TITLE_SEPARATORS: &[&str] = &[" | ", " - ", " \u{2013} ", " \u{2014} ", " :: "];

/// Fields pulled out of an article page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedArticle {
    pub title: String,
    pub authors: Vec<String>,
    pub publication_date: Option<DateTime<Utc>>,
    /// Body paragraphs separated by blank lines
    pub text: String,
}

/// Extracts headline, authors, publish date and body text from `html`.
///
/// Never fails: fields that cannot be found are left empty, and callers
/// decide whether an empty `text` is an error.
pub fn extract(html: &str, url: &Url) -> ExtractedArticle {
    let readable = readability(html, url);
    let document = Html::parse_document(html);

    let (title, byline, published, text) = match readable {
        Some(article) => (
            article.title.to_string(),
            article.byline.as_ref().map(|b| b.to_string()),
            article.published_time.as_ref().map(|p| p.to_string()),
            article_text(&article),
        ),
        None => (String::new(), None, None, String::new()),
    };

    let title = if title.trim().is_empty() {
        fallback_title(&document)
    } else {
        normalize_whitespace(&title).into_owned()
    };

    let authors = byline
        .or_else(|| meta_content(&document, "meta[name='author']"))
        .map(|b| dedup_authors(split_author_names(&b)))
        .unwrap_or_default();

    let publication_date = published
        .as_deref()
        .and_then(parse_date)
        .or_else(|| fallback_date(&document, url));

    let text = if text.is_empty() {
        fallback_text(&document)
    } else {
        text
    };

    ExtractedArticle {
        title,
        authors,
        publication_date,
        text,
    }
}

fn readability(html: &str, url: &Url) -> Option<dom_smoothie::Article> {
    let cfg = dom_smoothie::Config {
        max_elements_to_parse: MAX_ELEMENTS_TO_PARSE,
        ..Default::default()
    };

    let mut readability = match dom_smoothie::Readability::new(html, Some(url.as_str()), Some(cfg))
    {
        Ok(r) => r,
        Err(e) => {
            tracing::debug!(url = %url, error = ?e, "Readability could not load page");
            return None;
        }
    };
    match readability.parse() {
        Ok(article) => Some(article),
        Err(e) => {
            tracing::debug!(url = %url, error = ?e, "Readability found no article");
            None
        }
    }
}

/// Block text of the cleaned article HTML, or its plain text when the
/// article has no paragraph markup.
fn article_text(article: &dom_smoothie::Article) -> String {
    let content = Html::parse_fragment(&article.content.to_string());
    let from_blocks = block_text(&content);
    if from_blocks.is_empty() {
        paragraphs(&article.text_content.to_string())
    } else {
        from_blocks
    }
}

/// One paragraph per outermost `<p>`, `<li>` or `<blockquote>`.
fn block_text(html: &Html) -> String {
    let Some(sel) = selector(BLOCK_SELECTOR) else {
        return String::new();
    };

    html.select(&sel)
        .filter(|el| {
            !el.ancestors().filter_map(ElementRef::wrap).any(|a| {
                let name = a.value().name();
                BLOCK_ELEMENTS.contains(&name) || HIDDEN_ELEMENTS.contains(&name)
            })
        })
        .map(inline_text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Text of `el` with each `<br>` read as a space.
fn inline_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    for node in el.descendants() {
        if let Some(text) = node.value().as_text() {
            out.push_str(text);
        } else if node.value().as_element().is_some_and(|e| e.name() == "br") {
            out.push(' ');
        }
    }
    normalize_whitespace(&out).into_owned()
}

/// Turns raw text content into blank-line separated paragraphs.
fn paragraphs(raw: &str) -> String {
    raw.lines()
        .map(|line| normalize_whitespace(line).into_owned())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(s) => Some(s),
        Err(e) => {
            tracing::error!(selector = css, error = ?e, "Invalid CSS selector");
            None
        }
    }
}

fn meta_content(document: &Html, css: &str) -> Option<String> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .filter_map(|el| el.value().attr("content"))
        .map(|c| normalize_whitespace(c).into_owned())
        .find(|c| !c.is_empty())
}

fn first_text(document: &Html, css: &str) -> Option<String> {
    let sel = selector(css)?;
    document
        .select(&sel)
        .map(|el| normalize_whitespace(&el.text().collect::<String>()).into_owned())
        .find(|t| !t.is_empty())
}

// ============================================================================
// Fallbacks
// ============================================================================

fn fallback_title(document: &Html) -> String {
    if let Some(og) = meta_content(document, "meta[property='og:title']") {
        return og;
    }
    if let Some(title) = first_text(document, "title") {
        return strip_site_suffix(&title);
    }
    first_text(document, "h1").unwrap_or_default()
}

/// Keeps the longest segment of a title like "Story headline | Site Name".
fn strip_site_suffix(title: &str) -> String {
    for sep in TITLE_SEPARATORS {
        if title.contains(sep) {
            return title
                .split(sep)
                .map(str::trim)
                .max_by_key(|part| part.chars().count())
                .unwrap_or(title)
                .to_string();
        }
    }
    title.to_string()
}

fn fallback_date(document: &Html, url: &Url) -> Option<DateTime<Utc>> {
    meta_content(document, "meta[property='article:published_time']")
        .and_then(|c| parse_date(&c))
        .or_else(|| {
            let sel = selector("time[datetime]")?;
            document
                .select(&sel)
                .filter_map(|el| el.value().attr("datetime"))
                .find_map(parse_date)
        })
        .or_else(|| date_from_url(url))
}

fn fallback_text(document: &Html) -> String {
    let blocks = block_text(document);
    if blocks.is_empty() {
        paragraphs(&visible_body_text(document))
    } else {
        blocks
    }
}

/// Text of every visible node under `<body>`, one line per text node.
fn visible_body_text(document: &Html) -> String {
    let Some(sel) = selector("body") else {
        return String::new();
    };
    let Some(body) = document.select(&sel).next() else {
        return String::new();
    };

    let mut lines = Vec::new();
    for node in body.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|el| HIDDEN_ELEMENTS.contains(&el.value().name()));
        let text = text.trim();
        if !hidden && !text.is_empty() {
            lines.push(text.to_string());
        }
    }
    lines.join("\n")
}

// ============================================================================
// Authors
// ============================================================================

/// Splits a byline such as "By Jane Doe and John Roe" into clean names.
fn split_author_names(raw: &str) -> Vec<String> {
    let normalized = normalize_whitespace(raw);
    let cleaned = normalized
        .strip_prefix("By ")
        .or_else(|| normalized.strip_prefix("by "))
        .or_else(|| normalized.strip_prefix("BY "))
        .unwrap_or(&*normalized);

    cleaned
        .split([',', ';', '|'])
        .flat_map(|part| part.split(" and "))
        .map(|name| name.trim().trim_end_matches('.').trim())
        .filter(|name| is_plausible_author(name))
        .map(str::to_string)
        .collect()
}

fn dedup_authors(names: Vec<String>) -> Vec<String> {
    let mut authors: Vec<String> = Vec::new();
    for name in names {
        if !authors.iter().any(|a| a.eq_ignore_ascii_case(&name)) {
            authors.push(name);
        }
    }
    authors
}

fn is_plausible_author(name: &str) -> bool {
    let len = name.chars().count();
    len >= 2
        && len <= MAX_AUTHOR_CHARS
        && !name.contains("://")
        && !name.starts_with("www.")
        && name.chars().any(char::is_alphabetic)
}

// ============================================================================
// Publication date
// ============================================================================

/// Parses the date formats news sites put in metadata.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc())
}

fn url_date_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"/((?:19|20)\d{2})[/-](\d{1,2})[/-](\d{1,2})(?:/|$)").ok())
        .as_ref()
}

/// Finds a `/YYYY/MM/DD/` style date in the URL path.
fn date_from_url(url: &Url) -> Option<DateTime<Utc>> {
    let caps = url_date_pattern()?.captures(url.path())?;
    let year = caps.get(1)?.as_str().parse().ok()?;
    let month = caps.get(2)?.as_str().parse().ok()?;
    let day = caps.get(3)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(0, 0, 0)
        .map(|d| d.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const ARTICLE_HTML: &str = r#"<!DOCTYPE html>
<html><head>
  <title>Central bank raises rates again | Example News</title>
  <meta name="author" content="By Jane Doe and John Roe">
  <meta property="article:published_time" content="2024-03-05T14:30:00Z">
</head>
<body>
  <header><p>Subscribe now to get the latest news delivered to your inbox.</p></header>
  <div class="story">
    <h1>Central bank raises rates again</h1>
    <p>The central bank raised interest rates on Tuesday, citing persistent inflation across the economy.</p>
    <p>Officials said further increases were possible if prices keep climbing, a move that worried investors.</p>
    <p>Economists had widely expected the decision, which follows two earlier increases this year.</p>
  </div>
  <footer><p>Copyright Example News, all rights reserved.</p></footer>
</body></html>"#;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_extracts_title_without_site_suffix() {
        let article = extract(ARTICLE_HTML, &url("https://example.com/story"));
        assert_eq!(article.title, "Central bank raises rates again");
    }

    #[test]
    fn test_og_title_preferred() {
        let html = r#"<html><head><meta property="og:title" content="OG headline"><title>Other</title></head></html>"#;
        assert_eq!(extract(html, &url("https://e.com")).title, "OG headline");
    }

    #[test]
    fn test_title_falls_back_to_h1() {
        let html = "<html><body><h1>Harbor reopens after storm</h1><p>Ships returned on Monday.</p></body></html>";
        assert_eq!(
            extract(html, &url("https://e.com/a")).title,
            "Harbor reopens after storm"
        );
        assert_eq!(
            fallback_title(&Html::parse_document(html)),
            "Harbor reopens after storm"
        );
    }

    #[test]
    fn test_extracts_byline_authors() {
        let article = extract(ARTICLE_HTML, &url("https://example.com/story"));
        assert_eq!(article.authors, vec!["Jane Doe".to_string(), "John Roe".to_string()]);
    }

    #[test]
    fn test_extracts_meta_date() {
        let article = extract(ARTICLE_HTML, &url("https://example.com/story"));
        assert_eq!(
            article.publication_date,
            Some(Utc.with_ymd_and_hms(2024, 3, 5, 14, 30, 0).unwrap())
        );
    }

    #[test]
    fn test_body_paragraphs_without_page_chrome() {
        let article = extract(ARTICLE_HTML, &url("https://example.com/story"));
        assert!(article.text.contains("The central bank raised interest rates"));
        assert!(article.text.contains("worried investors.\n\nEconomists"));
        assert!(!article.text.contains("Subscribe"));
        assert!(!article.text.contains("Copyright"));
    }

    #[test]
    fn test_div_body_with_line_breaks_kept() {
        let html = r#"<html><body><div id="story">
            The harbor reopened on Monday after the storm passed.<br>
            Fishing boats returned to the docks within hours.<br>
            Officials said repairs to the pier would take weeks.
        </div></body></html>"#;
        let article = extract(html, &url("https://e.com/harbor"));
        assert!(article.text.contains("harbor reopened"));
        assert!(article.text.contains("repairs to the pier"));
    }

    #[test]
    fn test_short_paragraphs_kept() {
        let html = "<html><body><article>\
            <p>Rain fell all day.</p><p>Roads flooded.</p>\
            <p>Schools closed early.</p><p>Power is back.</p>\
            </article></body></html>";
        let article = extract(html, &url("https://e.com/rain"));
        assert!(article.text.contains("Rain fell all day."));
        assert!(article.text.contains("Power is back."));
    }

    #[test]
    fn test_json_ld_authors_and_date() {
        let html = r#"<html><head><script type="application/ld+json">
        {"@context":"https://schema.org","@type":"NewsArticle","headline":"Talks resume",
          "author":[{"@type":"Person","name":"Ana Ruiz"},{"@type":"Person","name":"Li Wei"}],
          "datePublished":"2023-11-02T09:15:00+01:00"}
        </script></head><body><article>
        <p>Negotiators met again on Thursday after a week of stalled talks over the budget.</p>
        </article></body></html>"#;
        let article = extract(html, &url("https://e.com/a"));
        assert_eq!(article.authors, vec!["Ana Ruiz".to_string(), "Li Wei".to_string()]);
        assert_eq!(
            article.publication_date,
            Some(Utc.with_ymd_and_hms(2023, 11, 2, 8, 15, 0).unwrap())
        );
    }

    #[test]
    fn test_date_from_url_path() {
        let article = extract("<html></html>", &url("https://e.com/2022/07/14/some-story/"));
        assert_eq!(
            article.publication_date,
            Some(Utc.with_ymd_and_hms(2022, 7, 14, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_time_element_date_fallback() {
        let doc = Html::parse_document(
            r#"<html><body><time datetime="2021-06-30T12:00:00Z">June 30</time></body></html>"#,
        );
        assert_eq!(
            fallback_date(&doc, &url("https://e.com/a")),
            Some(Utc.with_ymd_and_hms(2021, 6, 30, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_no_text_gives_empty_text() {
        let article = extract("<html><body><div>   </div></body></html>", &url("https://e.com"));
        assert!(article.text.is_empty());
    }

    #[test]
    fn test_fallback_text_skips_scripts_and_nav() {
        let doc = Html::parse_document(
            "<html><body><nav>Home</nav><script>var x = 1;</script><div>Story text here.</div></body></html>",
        );
        assert_eq!(fallback_text(&doc), "Story text here.");
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-01-02").is_some());
        assert!(parse_date("2024-01-02T03:04:05").is_some());
        assert!(parse_date("Tue, 10 Oct 2023 12:00:00 GMT").is_some());
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn test_implausible_authors_dropped() {
        assert!(split_author_names("https://example.com/staff/jane").is_empty());
        assert_eq!(split_author_names("by Sam Lee."), vec!["Sam Lee".to_string()]);
        assert_eq!(
            dedup_authors(vec!["Sam Lee".into(), "SAM LEE".into()]),
            vec!["Sam Lee".to_string()]
        );
    }
}
