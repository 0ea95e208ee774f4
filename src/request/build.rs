/// Assemble complete request bodies from command option values.
use crate::api::types::{Category, ContentsOptions, ContentsRequest, SearchRequest, SearchType};

use super::errors::RequestError;
use super::flags::{ContentFlags, non_empty, positive};

/// Option values for `exa search`.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub query: Option<String>,
    pub search_type: SearchType,
    pub num_results: u32,
    pub content: ContentFlags,
    pub include_domains: Vec<String>,
    pub exclude_domains: Vec<String>,
    pub start_published_date: Option<String>,
    pub end_published_date: Option<String>,
    pub category: Option<Category>,
    pub max_age_hours: Option<i64>,
}

/// Option values for `exa contents`.
#[derive(Debug, Clone, Default)]
pub struct ContentsParams {
    pub urls: Vec<String>,
    pub content: ContentFlags,
    pub subpages: Option<u32>,
    pub subpage_target: Vec<String>,
    pub max_age_hours: Option<i64>,
    pub livecrawl_timeout: Option<u64>,
}

/// Build the `/search` body.
///
/// # Errors
///
/// Returns `RequestError::MissingQuery` for an absent or blank query, and
/// `RequestError::InvalidSchema` for a malformed `--summary-schema`.
pub fn build_search_request(params: &SearchParams) -> Result<SearchRequest, RequestError> {
    let query = non_empty(params.query.as_deref()).ok_or(RequestError::MissingQuery)?;

    let contents = ContentsOptions {
        text: params.content.text(),
        highlights: params.content.highlights(),
        summary: params.content.summary()?,
    };

    Ok(SearchRequest {
        query,
        search_type: params.search_type,
        num_results: params.num_results,
        contents: (!contents.is_empty()).then_some(contents),
        include_domains: clean_list(&params.include_domains),
        exclude_domains: clean_list(&params.exclude_domains),
        start_published_date: non_empty(params.start_published_date.as_deref()),
        end_published_date: non_empty(params.end_published_date.as_deref()),
        category: params.category,
        max_age_hours: params.max_age_hours,
    })
}

/// Build the `/contents` body.
///
/// # Errors
///
/// Returns `RequestError::MissingUrls` when no URL was given, and
/// `RequestError::InvalidSchema` for a malformed `--summary-schema`.
pub fn build_contents_request(params: &ContentsParams) -> Result<ContentsRequest, RequestError> {
    let ids = clean_list(&params.urls);
    if ids.is_empty() {
        return Err(RequestError::MissingUrls);
    }

    Ok(ContentsRequest {
        ids,
        text: params.content.text(),
        highlights: params.content.highlights(),
        summary: params.content.summary()?,
        context: params.content.context(),
        subpages: positive(params.subpages),
        subpage_target: clean_list(&params.subpage_target),
        max_age_hours: params.max_age_hours,
        livecrawl_timeout: positive(params.livecrawl_timeout),
    })
}

/// Trim entries and drop blanks, preserving order.
fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect()
}
