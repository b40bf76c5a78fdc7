//! HTML rendering for the front-end pages.
//!
//! Pages are assembled from small string builders. Every value that came
//! from a feed, an article or the request is passed through [`escape`].

use std::borrow::Cow;

use axum::http::StatusCode;
use scraper::Html;

use crate::content::ArticleSummary;
use crate::feed::{FeedEntry, Page};
use crate::util::{normalize_whitespace, truncate_chars, validate_url};

/// Characters of a feed summary shown under each listing entry.
const ENTRY_SUMMARY_CHARS: usize = 280;

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn url_encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

/// Text content of an HTML fragment such as a feed item description.
fn plain_text(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    let text: String = parsed.root_element().text().collect();
    normalize_whitespace(&text).into_owned()
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<nav><a href="/">Latest</a> | <a href="/add_source">Add source</a>
<form action="/search" method="get" style="display:inline">
<input type="search" name="q" placeholder="Search titles">
<button type="submit">Search</button>
</form></nav>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

fn entry_item(entry: &FeedEntry) -> String {
    let title = escape(&entry.title);
    // Only http(s) links become anchors; feeds can carry `javascript:` URLs.
    let heading = match entry.link.as_deref().filter(|l| validate_url(l).is_ok()) {
        Some(link) => format!(
            r#"<a href="{href}">{title}</a> <a class="summarize" href="/summarize?url={encoded}">[summarize]</a>"#,
            href = escape(link),
            encoded = url_encode(link),
        ),
        None => title.into_owned(),
    };

    let published = entry
        .published
        .map(|d| d.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "date unknown".to_string());

    let mut meta = escape(&entry.source_name).into_owned();
    if !entry.authors.is_empty() {
        meta.push_str(" &middot; ");
        meta.push_str(&escape(&entry.authors.join(", ")));
    }

    let mut item = format!(
        "<li><h3>{}</h3>\n<p class=\"meta\">{} &middot; {}</p>\n",
        heading, meta, published
    );
    if let Some(summary) = &entry.summary {
        let text = plain_text(summary);
        if !text.is_empty() {
            item.push_str(&format!(
                "<p>{}</p>\n",
                escape(&truncate_chars(&text, ENTRY_SUMMARY_CHARS))
            ));
        }
    }
    item.push_str("</li>\n");
    item
}

fn entry_list(entries: &[&FeedEntry]) -> String {
    let mut html = String::from("<ul class=\"entries\">\n");
    for entry in entries {
        html.push_str(&entry_item(entry));
    }
    html.push_str("</ul>\n");
    html
}

/// The paginated listing at `/`.
pub fn index_page(page: &Page<'_, FeedEntry>) -> String {
    let entries: Vec<&FeedEntry> = page.items.iter().collect();
    let mut body = format!(
        "<h1>Latest articles</h1>\n<p>Page {} of {} &middot; {} of {} articles</p>\n",
        page.page,
        page.total_pages,
        page.len(),
        page.total
    );
    if entries.is_empty() {
        body.push_str("<p>No articles to show.</p>\n");
    } else {
        body.push_str(&entry_list(&entries));
    }

    body.push_str("<nav class=\"pages\">");
    if page.has_previous() {
        body.push_str(&format!(
            r#"<a href="/?page={}">&laquo; Newer</a> "#,
            page.page - 1
        ));
    }
    if page.has_next() {
        body.push_str(&format!(r#"<a href="/?page={}">Older &raquo;</a>"#, page.page + 1));
    }
    body.push_str("</nav>\n");

    layout("Latest articles", &body)
}

/// Search results for `query`.
pub fn search_page(query: &str, results: &[&FeedEntry]) -> String {
    let mut body = format!(
        "<h1>Search results for &quot;{}&quot;</h1>\n<p>{} matching articles</p>\n",
        escape(query),
        results.len()
    );
    if results.is_empty() {
        body.push_str("<p>No articles matched.</p>\n");
    } else {
        body.push_str(&entry_list(results));
    }
    layout(&format!("Search: {}", query), &body)
}

/// One summarized article.
pub fn summary_page(summary: &ArticleSummary) -> String {
    let authors = if summary.authors.is_empty() {
        "Unknown".to_string()
    } else {
        escape(&summary.authors.join(", ")).into_owned()
    };
    let published = summary
        .publication_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut sentences = String::new();
    for sentence in summary.summary.lines() {
        sentences.push_str(&format!("<p>{}</p>\n", escape(sentence)));
    }

    let body = format!(
        r#"<article>
<h1>{title}</h1>
<p class="meta">{site} &middot; {authors} &middot; {published}</p>
<h2>Summary</h2>
{sentences}<h2>Sentiment</h2>
<p>Polarity: {polarity:.2} &middot; Subjectivity: {subjectivity:.2}</p>
<p class="keywords">Keywords: {keywords}</p>
<p><a href="{href}">Read the full article</a></p>
</article>
"#,
        title = escape(&summary.title),
        site = escape(&summary.website_name),
        authors = authors,
        published = published,
        sentences = sentences,
        polarity = summary.sentiment.polarity,
        subjectivity = summary.sentiment.subjectivity,
        keywords = escape(&summary.keywords.join(", ")),
        href = escape(&summary.url),
    );
    layout(&summary.title, &body)
}

/// The add-source form.
pub fn add_source_page() -> String {
    let body = r#"<h1>Add a feed source</h1>
<form action="/add_source" method="post">
<p><label>Name <input type="text" name="source_name" required></label></p>
<p><label>Feed URL <input type="url" name="source_url" required></label></p>
<p><button type="submit">Add source</button></p>
</form>
"#;
    layout("Add source", body)
}

/// Error page shown for failed requests.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>\n",
        status.as_u16(),
        escape(status.canonical_reason().unwrap_or("Error")),
        escape(message)
    );
    layout("Error", &body)
}
