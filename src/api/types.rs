/// Wire types for the Exa `/search` and `/contents` endpoints.
///
/// Request types only serialize; response types round-trip so they can be
/// re-emitted as JSON or TOON output. Keys are camelCase on the wire.
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A content field that is either switched on plainly or refined with options.
///
/// "Not requested" is expressed by wrapping this in `Option` and skipping
/// `None` during serialization.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentToggle<T> {
    /// Serialized as the literal `true`.
    Enabled,
    /// Serialized as the options object.
    Detailed(T),
}

impl<T: Serialize> Serialize for ContentToggle<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Enabled => serializer.serialize_bool(true),
            Self::Detailed(opts) => opts.serialize(serializer),
        }
    }
}

/// Search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Auto,
    Fast,
    Neural,
    Keyword,
}

/// Content category filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Company,
    People,
    Tweet,
    News,
    #[value(name = "research paper")]
    #[serde(rename = "research paper")]
    ResearchPaper,
    #[value(name = "personal site")]
    #[serde(rename = "personal site")]
    PersonalSite,
    #[value(name = "financial report")]
    #[serde(rename = "financial report")]
    FinancialReport,
}

/// How much of the page text to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextVerbosity {
    Compact,
    Standard,
    Full,
}

/// Refinements for `text`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_characters: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_html_tags: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<TextVerbosity>,
}

/// Refinements for `highlights`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_sentences: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights_per_url: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Refinements for `summary`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// JSON schema for structured extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,
}

/// Refinements for `context` (RAG string).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_characters: Option<u32>,
}

/// Content retrieval nested inside a search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ContentToggle<TextOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<ContentToggle<HighlightsOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ContentToggle<SummaryOptions>>,
}

impl ContentsOptions {
    /// True when no content field was requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.highlights.is_none() && self.summary.is_none()
    }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(rename = "type")]
    pub search_type: SearchType,
    pub num_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<ContentsOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include_domains: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_domains: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_published_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// `0` forces a livecrawl, `-1` serves cache only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age_hours: Option<i64>,
}

/// Body of `POST /contents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsRequest {
    pub ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<ContentToggle<TextOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<ContentToggle<HighlightsOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<ContentToggle<SummaryOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContentToggle<ContextOptions>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpages: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subpage_target: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age_hours: Option<i64>,
    /// Milliseconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub livecrawl_timeout: Option<u64>,
}

/// Decode an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A single document returned by either endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub highlight_scores: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Pages reached by a subpage crawl.
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub subpages: Vec<SearchResult>,
}

impl SearchResult {
    /// Title, or empty when the page had none.
    #[must_use]
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Extracted text, treating an empty string as absent.
    #[must_use]
    pub fn text_str(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }

    /// Summary, treating an empty string as absent.
    #[must_use]
    pub fn summary_str(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.is_empty())
    }
}

/// Response of `POST /search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autoprompt_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_search_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Failure detail for one id in a contents call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStatusError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<u16>,
}

/// Fetch status of one requested id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentStatus {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ContentStatusError>,
}

/// Response of `POST /contents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentsResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
    #[serde(default, deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<ContentStatus>,
    /// Combined RAG string, present when context mode was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Error body returned with a 4xx/5xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_toggle_enabled_is_literal_true() {
        let opts = ContentsOptions {
            text: Some(ContentToggle::Enabled),
            ..ContentsOptions::default()
        };
        assert_eq!(serde_json::to_value(&opts).unwrap(), json!({ "text": true }));
    }

    #[test]
    fn test_toggle_detailed_is_object() {
        let opts = ContentsOptions {
            text: Some(ContentToggle::Detailed(TextOptions {
                max_characters: Some(500),
                include_html_tags: false,
                verbosity: Some(TextVerbosity::Compact),
            })),
            ..ContentsOptions::default()
        };
        assert_eq!(
            serde_json::to_value(&opts).unwrap(),
            json!({ "text": { "maxCharacters": 500, "verbosity": "compact" } })
        );
    }

    #[test]
    fn test_category_with_space_serializes_verbatim() {
        assert_eq!(
            serde_json::to_value(Category::ResearchPaper).unwrap(),
            json!("research paper")
        );
    }

    #[test]
    fn test_search_result_tolerates_nulls() {
        let raw = r#"{"title":null,"url":"https://a.dev","id":"x","author":null,"score":0.5}"#;
        let result: SearchResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.title, None);
        assert_eq!(result.title_str(), "");
        assert_eq!(result.score, Some(0.5));
        assert!(result.highlights.is_empty());
    }

    #[test]
    fn test_null_lists_and_ids_decode_as_empty() {
        let raw = r#"{
            "results": [{
                "title": "t",
                "url": null,
                "id": null,
                "highlights": null,
                "highlightScores": null,
                "subpages": null
            }],
            "autopromptString": null
        }"#;
        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        let result = &resp.results[0];
        assert_eq!(result.url, "");
        assert_eq!(result.id, "");
        assert!(result.highlights.is_empty());
        assert!(result.highlight_scores.is_empty());
        assert!(result.subpages.is_empty());

        let resp: SearchResponse = serde_json::from_str(r#"{"results":null}"#).unwrap();
        assert!(resp.results.is_empty());
    }

    #[test]
    fn test_null_contents_lists_decode_as_empty() {
        let resp: ContentsResponse =
            serde_json::from_str(r#"{"results":null,"statuses":null,"context":null}"#).unwrap();
        assert_eq!(resp, ContentsResponse::default());

        let resp: ContentsResponse = serde_json::from_str(
            r#"{"results":[],"statuses":[{"id":null,"status":null,"error":null}]}"#,
        )
        .unwrap();
        assert_eq!(resp.statuses, [ContentStatus::default()]);
    }

    #[test]
    fn test_null_error_message_is_empty() {
        let body: ApiErrorBody = serde_json::from_str(r#"{"error":null}"#).unwrap();
        assert_eq!(body.error, "");
    }

    #[test]
    fn test_contents_response_statuses() {
        let raw = r#"{
            "results": [],
            "statuses": [{"id":"https://gone.dev","status":"error","error":{"tag":"CRAWL_NOT_FOUND","httpStatusCode":404}}]
        }"#;
        let resp: ContentsResponse = serde_json::from_str(raw).unwrap();
        let err = resp.statuses[0].error.as_ref().unwrap();
        assert_eq!(err.tag.as_deref(), Some("CRAWL_NOT_FOUND"));
        assert_eq!(err.http_status_code, Some(404));
    }
}
