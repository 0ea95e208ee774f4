/// Output rendering: quiet, table, JSON and TOON modes. TTY detection.
use std::io::{self, IsTerminal, Write};

use comfy_table::{Attribute, Cell, Color, Table, presets::NOTHING};
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::OutputFormat;
use super::toon;
use crate::api::types::SearchRequest;
use crate::api::{ContentsResponse, SearchResponse, SearchResult};
use crate::types::ErrorOutput;

const TITLE_WIDTH: usize = 55;
const TITLE_WIDTH_WITH_CONTENT: usize = 40;
const URL_WIDTH: usize = 45;
const PREVIEW_WIDTH: usize = 60;
const ELLIPSIS: &str = "...";
const EMPTY_CELL: &str = "-";

/// Errors while producing output. Always fatal to the command.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Effective rendering mode. `--quiet` wins over `--output`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Quiet,
    Table,
    Json,
    Toon,
}

impl RenderMode {
    /// Resolve from the global flags.
    #[must_use]
    pub fn resolve(format: OutputFormat, json_flag: bool, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        if json_flag {
            return Self::Json;
        }
        match format {
            OutputFormat::Table => Self::Table,
            OutputFormat::Json => Self::Json,
            OutputFormat::Toon => Self::Toon,
        }
    }
}

/// Output context passed to all commands.
#[derive(Debug, Clone, Copy)]
pub struct OutputCtx {
    pub mode: RenderMode,
    pub no_header: bool,
    /// Style table cells; only when stdout is a terminal.
    pub color: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(format: OutputFormat, json_flag: bool, quiet: bool, no_header: bool) -> Self {
        Self {
            mode: RenderMode::resolve(format, json_flag, quiet),
            no_header,
            color: io::stdout().is_terminal(),
        }
    }
}

/// Optional content columns of the search table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchColumns {
    pub text: bool,
    pub summary: bool,
}

impl SearchColumns {
    /// Show a column for each content field the request asked for.
    #[must_use]
    pub fn for_request(request: &SearchRequest) -> Self {
        request
            .contents
            .as_ref()
            .map_or_else(Self::default, |c| Self {
                text: c.text.is_some(),
                summary: c.summary.is_some(),
            })
    }

    fn any(self) -> bool {
        self.text || self.summary
    }
}

/// A response ready to render.
#[derive(Debug, Clone, Copy)]
pub enum Response<'a> {
    Search(&'a SearchResponse, SearchColumns),
    Contents(&'a ContentsResponse),
}

impl Serialize for Response<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Search(resp, _) => resp.serialize(serializer),
            Self::Contents(resp) => resp.serialize(serializer),
        }
    }
}

/// Write a response in the context's mode.
///
/// # Errors
///
/// Returns `RenderError` if serialization or the write fails.
pub fn write_response<W: Write>(
    out: &mut W,
    response: Response<'_>,
    ctx: &OutputCtx,
) -> Result<(), RenderError> {
    match (ctx.mode, response) {
        (RenderMode::Quiet, Response::Search(resp, _)) => write_search_quiet(out, resp)?,
        (RenderMode::Quiet, Response::Contents(resp)) => write_contents_quiet(out, resp)?,
        (RenderMode::Table, Response::Search(resp, columns)) => {
            write_search_table(out, resp, columns, ctx)?;
        }
        (RenderMode::Table, Response::Contents(resp)) => write_contents_documents(out, resp)?,
        (RenderMode::Json, response) => {
            serde_json::to_writer_pretty(&mut *out, &response)?;
            writeln!(out)?;
        }
        (RenderMode::Toon, response) => {
            let value = serde_json::to_value(response)?;
            writeln!(out, "{}", toon::encode(&value))?;
        }
    }
    Ok(())
}

// --- Quiet ---

fn write_search_quiet<W: Write>(out: &mut W, resp: &SearchResponse) -> io::Result<()> {
    for result in &resp.results {
        writeln!(out, "{}", result.url)?;
    }
    Ok(())
}

fn write_contents_quiet<W: Write>(out: &mut W, resp: &ContentsResponse) -> io::Result<()> {
    let texts = resp.results.iter().filter_map(SearchResult::text_str);
    for (i, text) in texts.enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{text}")?;
    }
    Ok(())
}

// --- Table ---

fn write_search_table<W: Write>(
    out: &mut W,
    resp: &SearchResponse,
    columns: SearchColumns,
    ctx: &OutputCtx,
) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    if ctx.color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }

    if !ctx.no_header {
        let mut headers = vec!["#", "Title", "URL"];
        if columns.text {
            headers.push("Text");
        }
        if columns.summary {
            headers.push("Summary");
        }
        if !columns.any() {
            headers.push("Published");
        }
        table.set_header(
            headers
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
        );
    }

    let title_width = if columns.any() {
        TITLE_WIDTH_WITH_CONTENT
    } else {
        TITLE_WIDTH
    };

    for (i, result) in resp.results.iter().enumerate() {
        let mut row = vec![
            Cell::new(i + 1).fg(Color::Cyan),
            Cell::new(truncate(result.title_str(), title_width)),
            Cell::new(truncate(&result.url, URL_WIDTH)),
        ];
        if columns.text {
            row.push(Cell::new(preview(result.text_str())));
        }
        if columns.summary {
            row.push(Cell::new(preview(result.summary_str())));
        }
        if !columns.any() {
            let date = result
                .published_date
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(EMPTY_CELL);
            row.push(Cell::new(date));
        }
        table.add_row(row);
    }

    writeln!(out, "{table}")
}

/// Cut to `max` characters, the last three replaced by `...`.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_owned();
    }
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut cut: String = s.chars().take(keep).collect();
    cut.push_str(ELLIPSIS);
    cut
}

/// Single-line preview of a text cell.
fn preview(value: Option<&str>) -> String {
    match value {
        Some(text) => {
            let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if flat.is_empty() {
                EMPTY_CELL.to_owned()
            } else {
                truncate(&flat, PREVIEW_WIDTH)
            }
        }
        None => EMPTY_CELL.to_owned(),
    }
}

// --- Contents documents ---

fn write_contents_documents<W: Write>(out: &mut W, resp: &ContentsResponse) -> io::Result<()> {
    for (i, result) in resp.results.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "---")?;
        writeln!(out, "title: {:?}", result.title_str())?;
        writeln!(out, "url: {}", result.url)?;
        if let Some(date) = result.published_date.as_deref().filter(|d| !d.is_empty()) {
            writeln!(out, "date: {date:?}")?;
        }
        if let Some(author) = result.author.as_deref().filter(|a| !a.is_empty()) {
            writeln!(out, "author: {author:?}")?;
        }
        writeln!(out, "---")?;

        if let Some(text) = result.text_str() {
            writeln!(out)?;
            writeln!(out, "{text}")?;
        }
        if let Some(summary) = result.summary_str() {
            writeln!(out)?;
            writeln!(out, "## Summary")?;
            writeln!(out)?;
            writeln!(out, "{summary}")?;
        }
        if !result.highlights.is_empty() {
            writeln!(out)?;
            writeln!(out, "## Highlights")?;
            writeln!(out)?;
            for highlight in &result.highlights {
                writeln!(out, "- {highlight}")?;
            }
        }
    }
    Ok(())
}

// --- Error output ---

/// Write a structured error to stderr: a JSON envelope in JSON mode, else plain text.
pub fn write_error(err: &ErrorOutput, mode: RenderMode) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match mode {
        RenderMode::Json => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}
