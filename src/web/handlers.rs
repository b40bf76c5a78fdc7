use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

use crate::content;
use crate::feed::{self, FeedEntry};
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use crate::web::{render, AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct ListingParams {
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeParams {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddSourceForm {
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub source_url: String,
}

/// Parses the `page` parameter; anything that is not a positive integer is page 1.
fn page_number(raw: Option<&str>) -> usize {
    raw.and_then(|p| p.trim().parse::<usize>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

/// Re-reads the sources file and aggregates every feed.
async fn aggregate(state: &AppState) -> Result<Vec<FeedEntry>, AppError> {
    let sources = state.store.load().await?;
    Ok(feed::list_entries(&state.client, &sources, &state.config.fetch_options()).await)
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListingParams>,
) -> Result<Html<String>, AppError> {
    let entries = aggregate(&state).await?;
    let page = feed::paginate(
        &entries,
        page_number(params.page.as_deref()),
        state.config.page_size,
    );
    Ok(Html(render::index_page(&page)))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, AppError> {
    let query = params.q.unwrap_or_default();
    if query.chars().count() > MAX_SEARCH_QUERY_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Search query is too long (max {} characters)",
            MAX_SEARCH_QUERY_LENGTH
        )));
    }

    // A blank query matches nothing, so skip the network round-trip.
    if query.trim().is_empty() {
        return Ok(Html(render::search_page(&query, &[])));
    }

    let entries = aggregate(&state).await?;
    let results = feed::search(&entries, &query);
    tracing::debug!(query = %query, results = results.len(), "Search complete");
    Ok(Html(render::search_page(&query, &results)))
}

pub async fn summarize(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SummarizeParams>,
) -> Result<Html<String>, AppError> {
    let url = params
        .url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing url parameter".to_string()))?;

    let summary =
        content::summarize(&state.client, &url, &state.config.summarize_options()).await?;
    Ok(Html(render::summary_page(&summary)))
}

pub async fn add_source_form() -> Html<String> {
    Html(render::add_source_page())
}

pub async fn add_source(
    State(state): State<Arc<AppState>>,
    Form(form): Form<AddSourceForm>,
) -> Result<Redirect, AppError> {
    if !state.store.add(&form.source_name, &form.source_url).await? {
        tracing::debug!("Source submission left the store unchanged");
    }
    Ok(Redirect::to("/"))
}
