/// `search` command: web search with optional content retrieval.
use std::io::Write;

use super::ApiSettings;
use crate::cli::OutputCtx;
use crate::cli::args::SearchArgs;
use crate::cli::output::{Response, SearchColumns, write_response};
use crate::errors::CliError;
use crate::request::build_search_request;

/// Run `exa search`.
///
/// The request is validated before the client is built, so bad input never
/// reaches the network.
///
/// # Errors
///
/// Returns `CliError` on invalid input, missing key, API failure, or output failure.
pub fn run<W: Write>(
    args: &SearchArgs,
    ctx: &OutputCtx,
    api: &ApiSettings,
    out: &mut W,
) -> Result<(), CliError> {
    let request = build_search_request(&args.params())?;
    tracing::debug!(
        query = %request.query,
        num_results = request.num_results,
        with_contents = request.contents.is_some(),
        "search request built"
    );

    let client = api.client()?;
    let response = client.search(&request)?;
    tracing::debug!(results = response.results.len(), "search complete");

    let columns = SearchColumns::for_request(&request);
    write_response(out, Response::Search(&response, columns), ctx)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::api::ApiError;
    use crate::cli::args::Command;
    use crate::commands::testing::{parse, settings};
    use crate::request::RequestError;

    fn run_cli(args: &[&str], api: &ApiSettings) -> Result<String, CliError> {
        let cli = parse(args);
        let ctx = OutputCtx::new(cli.output, cli.json, cli.quiet, cli.no_header);
        let Command::Search(search) = cli.into_command() else {
            panic!("expected search");
        };
        let mut buf = Vec::new();
        run(&search, &ctx, api, &mut buf)?;
        Ok(String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_invalid_schema_fails_before_any_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/search");
            then.status(200).json_body(json!({ "results": [] }));
        });
        let dir = TempDir::new().unwrap();
        let api = settings(Some("k"), &server.base_url(), &dir);

        let err = run_cli(&["search", "--summary-schema", "{oops", "q"], &api).unwrap_err();

        assert!(matches!(
            err,
            CliError::Request(RequestError::InvalidSchema(_))
        ));
        mock.assert_hits(0);
    }

    #[test]
    fn test_missing_key_fails_before_any_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/search");
            then.status(200).json_body(json!({ "results": [] }));
        });
        let dir = TempDir::new().unwrap();
        let api = settings(None, &server.base_url(), &dir);

        let err = run_cli(&["search", "q"], &api).unwrap_err();

        assert!(matches!(err, CliError::Api(ApiError::MissingApiKey)));
        mock.assert_hits(0);
    }

    #[test]
    fn test_missing_query() {
        let dir = TempDir::new().unwrap();
        let api = settings(Some("k"), "http://127.0.0.1:1", &dir);
        let err = run_cli(&["search"], &api).unwrap_err();
        assert!(matches!(err, CliError::Request(RequestError::MissingQuery)));
    }

    #[test]
    fn test_quiet_search_end_to_end() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/search")
                .header("x-api-key", "k")
                .json_body(json!({
                    "query": "rust",
                    "type": "auto",
                    "numResults": 2,
                    "contents": { "summary": true },
                    "maxAgeHours": 0
                }));
            then.status(200).json_body(json!({
                "results": [
                    { "title": "A", "url": "a", "id": "1", "summary": "s1" },
                    { "title": "B", "url": "b", "id": "2" }
                ]
            }));
        });
        let dir = TempDir::new().unwrap();
        let api = settings(Some("k"), &server.base_url(), &dir);

        let out = run_cli(
            &["search", "-q", "-o", "json", "-n", "2", "-s", "--max-age-hours", "0", "rust"],
            &api,
        )
        .unwrap();

        mock.assert();
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn test_bare_words_search_without_subcommand() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/search").json_body(json!({
                "query": "latest AI news",
                "type": "auto",
                "numResults": 10
            }));
            then.status(200).json_body(json!({
                "results": [{ "title": "News", "url": "https://news.dev", "id": "n" }]
            }));
        });
        let dir = TempDir::new().unwrap();
        let api = settings(Some("k"), &server.base_url(), &dir);

        let out = run_cli(&["-q", "latest", "AI", "news"], &api).unwrap();

        mock.assert();
        assert_eq!(out, "https://news.dev\n");
    }

    #[test]
    fn test_table_shows_summary_column_when_requested() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/search");
            then.status(200).json_body(json!({
                "results": [{ "title": "A", "url": "https://a.dev", "id": "1", "summary": "short" }]
            }));
        });
        let dir = TempDir::new().unwrap();
        let api = settings(Some("k"), &server.base_url(), &dir);

        let out = run_cli(&["search", "--summary-query", "what?", "q"], &api).unwrap();

        let header = out.lines().next().unwrap();
        assert!(header.contains("Summary"));
        assert!(!header.contains("Published"));
        assert!(out.contains("short"));
    }

    #[test]
    fn test_api_error_propagates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/search");
            then.status(401).json_body(json!({ "error": "invalid API key" }));
        });
        let dir = TempDir::new().unwrap();
        let api = settings(Some("bad"), &server.base_url(), &dir);

        let err = run_cli(&["search", "q"], &api).unwrap_err();

        assert_eq!(err.to_string(), "API error (401): invalid API key");
    }
}
